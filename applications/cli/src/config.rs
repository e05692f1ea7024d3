/// CLI configuration
use crate::error::{CliError, Result};
use pulse_playback::{PlayerSettings, Playlist};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pulse.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub player: PlayerSettings,

    /// Playlist file; the built-in playlist is used when unset
    #[serde(default)]
    pub playlist: Option<PathBuf>,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `pulse.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. PULSE_PLAYER__AUTOPLAY=false
        settings = settings.add_source(
            config::Environment::with_prefix("PULSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.player.progress_interval_ms == 0 {
            return Err(CliError::Config(
                "player.progress_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.player.clock_interval_ms == 0 {
            return Err(CliError::Config(
                "player.clock_interval_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the playlist, failing fast on malformed tracks
    ///
    /// `override_path` (from the command line) wins over the configured one.
    pub fn playlist(&self, override_path: Option<&Path>) -> Result<Playlist> {
        match override_path.or(self.playlist.as_deref()) {
            Some(path) => Ok(Playlist::load(path)?),
            None => Ok(Playlist::builtin()),
        }
    }
}

fn default_log_filter() -> String {
    "pulse_cli=info,pulse_playback=info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            player: PlayerSettings::default(),
            playlist: None,
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_filter, "pulse_cli=info,pulse_playback=info");
        assert_eq!(config.playlist(None).unwrap().len(), 2);
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            log_filter = "debug"

            [player]
            progress_interval_ms = 250
            autoplay = false
            "#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.player.progress_interval_ms, 250);
        assert_eq!(config.player.clock_interval_ms, 1000);
        assert!(!config.player.autoplay);
    }

    #[test]
    fn zero_interval_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[player]\nprogress_interval_ms = 0").unwrap();

        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(CliConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn bad_playlist_surfaces_to_operator() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "trackName": "A", "artistName": "B", "durationMilliseconds": 1}}]"#
        )
        .unwrap();

        let config = CliConfig {
            playlist: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = config.playlist(None).unwrap_err();
        assert!(err.to_string().contains("mediaUrl"));
    }
}
