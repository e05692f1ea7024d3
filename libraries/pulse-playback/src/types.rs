//! Core types for playlist and playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single playable media item
///
/// Field names follow the playlist file format (`trackName`, `mediaUrl`, ...).
/// Tracks are validated once when a [`Playlist`](crate::Playlist) is built and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier within the playlist
    pub id: u32,

    /// Track title
    pub track_name: String,

    /// Artist name
    pub artist_name: String,

    /// Cover art location (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,

    /// Stream location handed to the streaming primitive
    pub media_url: String,

    /// Track length in milliseconds
    pub duration_milliseconds: u64,
}

impl Track {
    /// Track length as a [`Duration`]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_milliseconds)
    }

    /// Track length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration().as_secs_f64()
    }
}

/// Periodic report from the streaming primitive
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Elapsed time as a fraction of the track duration
    pub played_fraction: f64,

    /// Elapsed time in seconds
    pub played_seconds: f64,

    /// Buffered time in seconds
    pub loaded_seconds: f64,
}

impl ProgressReport {
    /// Whether every field is a finite number
    pub fn is_finite(&self) -> bool {
        self.played_fraction.is_finite()
            && self.played_seconds.is_finite()
            && self.loaded_seconds.is_finite()
    }
}

/// Input props pushed down to the streaming primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveProps {
    /// Whether the primitive should be producing audio
    pub playing: bool,

    /// Media location of the current track
    pub url: String,

    /// How often the primitive reports progress
    pub progress_interval_ms: u64,
}

/// A committed seek position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekTarget {
    /// Position as a fraction of the track duration, in [0, 1]
    pub fraction: f64,

    /// Position from the start of the track
    pub position: Duration,
}

impl SeekTarget {
    /// Build a target from a fraction of `duration`
    ///
    /// The fraction is clamped into [0, 1]; NaN maps to 0.
    pub fn from_fraction(fraction: f64, duration: Duration) -> Self {
        let fraction = clamp_fraction(fraction);
        Self {
            fraction,
            position: duration.mul_f64(fraction),
        }
    }

    /// Target position in seconds
    pub fn seconds(&self) -> f64 {
        self.position.as_secs_f64()
    }
}

/// Clamp a slider value into [0, 1]
///
/// Slider values drift slightly past the ends with floating point input, so
/// out-of-range values are pulled back instead of rejected.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Progress report cadence requested from the primitive (default: 1000)
    pub progress_interval_ms: u64,

    /// Footer clock refresh cadence (default: 1000)
    pub clock_interval_ms: u64,

    /// Start playing as soon as the player is created (default: true)
    pub autoplay: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 1000,
            clock_interval_ms: 1000,
            autoplay: true,
        }
    }
}
