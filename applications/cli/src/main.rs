/// Pulse CLI - playlist player driven from the terminal
use anyhow::Context;
use clap::{Parser, Subcommand};
use pulse_cli::{CliConfig, Session};
use pulse_playback::Playlist;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Pulse playlist player", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./pulse.toml when present)
    #[arg(short, long, global = true, env = "PULSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a playlist, reading commands from stdin
    Run {
        /// Playlist file (JSON or TOML)
        #[arg(short, long)]
        playlist: Option<PathBuf>,

        /// Do not print the footer clock
        #[arg(long)]
        no_clock: bool,
    },
    /// Check a playlist file and report the first problem
    Validate {
        /// Playlist file path
        path: PathBuf,
    },
    /// Print the tracks of a playlist
    List {
        /// Playlist file (JSON or TOML)
        #[arg(short, long)]
        playlist: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Logs go to stderr so they never mix with the status lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run { playlist, no_clock } => {
            run(&config, playlist, !no_clock).await?;
        }
        Commands::Validate { path } => {
            validate(&path)?;
        }
        Commands::List { playlist, json } => {
            list(&config, playlist, json)?;
        }
    }

    Ok(())
}

async fn run(config: &CliConfig, playlist: Option<PathBuf>, show_clock: bool) -> anyhow::Result<()> {
    let playlist = config
        .playlist(playlist.as_deref())
        .context("Failed to load playlist")?;

    tracing::info!("Starting Pulse with {} tracks", playlist.len());
    tracing::info!(
        "Progress every {}ms, autoplay: {}",
        config.player.progress_interval_ms,
        config.player.autoplay
    );

    let session = Session::new(playlist, config.player.clone());
    let stdin = BufReader::new(tokio::io::stdin());
    session.run(stdin, show_clock).await?;

    tracing::info!("Session ended");
    Ok(())
}

fn validate(path: &std::path::Path) -> anyhow::Result<()> {
    let playlist = Playlist::load(path)
        .with_context(|| format!("Invalid playlist {}", path.display()))?;

    println!("{}: {} tracks OK", path.display(), playlist.len());
    Ok(())
}

fn list(config: &CliConfig, playlist: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let playlist = config
        .playlist(playlist.as_deref())
        .context("Failed to load playlist")?;

    if json {
        println!("{}", serde_json::to_string_pretty(playlist.tracks())?);
        return Ok(());
    }

    println!("Tracks:");
    for (i, track) in playlist.tracks().iter().enumerate() {
        println!(
            "  {}. {} - {} ({}s)",
            i + 1,
            track.track_name,
            track.artist_name,
            track.duration_secs()
        );
    }

    Ok(())
}
