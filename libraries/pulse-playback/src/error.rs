//! Error types for playlist and playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist has no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Track metadata failed validation
    #[error("Invalid track {id}: {reason}")]
    InvalidTrack { id: u32, reason: String },

    /// Two tracks share the same id
    #[error("Duplicate track id: {0}")]
    DuplicateTrackId(u32),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Streaming primitive rejected an operation
    #[error("Streaming primitive error: {0}")]
    Primitive(String),

    /// Playlist file could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlaybackError {
    /// Create an invalid track error
    pub fn invalid_track(id: u32, reason: impl Into<String>) -> Self {
        Self::InvalidTrack {
            id,
            reason: reason.into(),
        }
    }

    /// Create a primitive error
    pub fn primitive(msg: impl Into<String>) -> Self {
        Self::Primitive(msg.into())
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for PlaybackError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
