//! Interactive player session
//!
//! One `Session` owns the player and the simulated stream. All input
//! (typed commands, progress ticks, clock ticks) goes through `&mut self`
//! methods on a single task, so handlers never interleave.

use crate::error::{CliError, Result};
use crate::simulator::SimulatedStream;
use pulse_playback::{PlaybackEvent, Player, PlayerSettings, Playlist};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A typed command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Toggle,
    Next,
    Prev,
    SeekStart,
    Drag(f64),
    SeekEnd,
    Seek(f64),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();

        let command = match name.as_str() {
            "play" => Command::Play,
            "pause" => Command::Pause,
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "b" => Command::Prev,
            "seek-start" | "grab" => Command::SeekStart,
            "drag" => Command::Drag(parse_fraction(&name, parts.next())?),
            "seek-end" | "release" => Command::SeekEnd,
            "seek" => Command::Seek(parse_fraction(&name, parts.next())?),
            "status" | "s" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CliError::UnknownCommand(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn parse_fraction(command: &str, arg: Option<&str>) -> Result<f64> {
    let invalid = |reason: &str| CliError::InvalidArgument {
        command: command.to_string(),
        reason: reason.to_string(),
    };

    let arg = arg.ok_or_else(|| invalid("expected a fraction between 0 and 1"))?;
    let value: f64 = arg
        .parse()
        .map_err(|_| invalid(&format!("'{}' is not a number", arg)))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid("fraction must be finite"))
    }
}

pub const HELP: &str = "\
commands:
  play | pause | toggle (p)      play/pause controls
  next (n) | prev (b)            change track (wraps around)
  seek-start | drag <f> | seek-end
                                 drag the seeker (f in 0..1)
  seek <f>                       click-to-seek
  status (s)                     show the now-playing line
  quit (q)";

/// What the loop should do after a command
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Continue(Vec<String>),
    Quit,
}

pub struct Session {
    player: Player,
    stream: SimulatedStream,
}

impl Session {
    pub fn new(playlist: Playlist, settings: PlayerSettings) -> Self {
        // Playlist validation guarantees one duration per media URL
        let stream = SimulatedStream::new(
            playlist
                .tracks()
                .iter()
                .map(|t| (t.media_url.clone(), t.duration())),
        );
        let player = Player::new(playlist, Box::new(stream.clone()), settings);

        Self { player, stream }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Apply one command and return the lines to print
    pub fn handle(&mut self, command: Command) -> Outcome {
        let mut lines = Vec::new();

        let result = match command {
            Command::Play => {
                self.player.play();
                Ok(())
            }
            Command::Pause => {
                self.player.pause();
                Ok(())
            }
            Command::Toggle => {
                self.player.toggle_play();
                Ok(())
            }
            Command::Next => {
                self.player.next();
                Ok(())
            }
            Command::Prev => {
                self.player.previous();
                Ok(())
            }
            Command::SeekStart => {
                self.player.seek_start();
                Ok(())
            }
            Command::Drag(fraction) => {
                self.player.seek_drag(fraction);
                Ok(())
            }
            Command::SeekEnd => self.player.seek_end().map(|_| ()),
            Command::Seek(fraction) => self.player.seek_to(fraction).map(|_| ()),
            Command::Status => Ok(()),
            Command::Help => {
                lines.push(HELP.to_string());
                return Outcome::Continue(lines);
            }
            Command::Quit => return Outcome::Quit,
        };

        if let Err(e) = result {
            lines.push(format!("error: {}", e));
        }

        self.log_events();
        lines.push(self.player.now_playing().to_string());
        Outcome::Continue(lines)
    }

    /// Advance the stream and feed its report to the player
    ///
    /// Returns the now-playing line when the report was applied.
    pub fn on_progress_tick(&mut self, elapsed: Duration) -> Option<String> {
        let report = self.stream.advance(elapsed)?;
        let applied = self.player.on_progress(report);
        self.log_events();

        applied.then(|| self.player.now_playing().to_string())
    }

    /// Refresh the footer clock
    pub fn on_clock_tick(&mut self) -> String {
        self.player.tick_clock()
    }

    fn log_events(&mut self) {
        for event in self.player.drain_events() {
            match event {
                PlaybackEvent::PositionUpdate { .. } => tracing::trace!(?event, "event"),
                PlaybackEvent::Error { message } => tracing::warn!("Playback error: {}", message),
                _ => tracing::debug!(?event, "event"),
            }
        }
    }

    /// Drive the session from `input` until it ends or `quit` is typed
    ///
    /// Progress and clock ticks are multiplexed with input on the current
    /// task; nothing here runs in parallel.
    pub async fn run<R>(mut self, input: R, show_clock: bool) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let settings = self.player.settings().clone();
        let progress_every = Duration::from_millis(settings.progress_interval_ms);
        let clock_every = Duration::from_millis(settings.clock_interval_ms);

        let mut progress = tokio::time::interval(progress_every);
        let mut clock = tokio::time::interval(clock_every);
        progress.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut lines = input.lines();

        println!("{}", self.player.now_playing());

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("Input closed");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    match Command::parse(&line) {
                        Ok(command) => match self.handle(command) {
                            Outcome::Continue(out) => {
                                for l in out {
                                    println!("{}", l);
                                }
                            }
                            Outcome::Quit => break,
                        },
                        Err(e) => println!("{} (type 'help')", e),
                    }
                }
                _ = progress.tick() => {
                    if let Some(status) = self.on_progress_tick(progress_every) {
                        println!("{}", status);
                    }
                }
                _ = clock.tick(), if show_clock => {
                    println!("{}", self.on_clock_tick());
                }
            }
        }

        Ok(())
    }
}
