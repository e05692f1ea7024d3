//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the controller and the adapter and drained by whoever renders the player:
//! - State changes (play/pause/seek)
//! - Track changes (next/previous/select)
//! - Position updates (every accepted progress report)
//! - Seek lifecycle (start, commit, cancel)

use crate::adapter::AdapterPhase;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackStateEvent,
    },

    /// Current track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: u32,
        /// ID of the previous track (if any)
        previous_track_id: Option<u32>,
    },

    /// Position update from an accepted progress report
    PositionUpdate {
        /// Elapsed time as a fraction of the duration
        played_fraction: f64,
        /// Elapsed seconds
        played_seconds: f64,
        /// Buffered seconds
        loaded_seconds: f64,
    },

    /// User grabbed the seek control
    SeekStarted {
        /// Fraction the slider was at when grabbed
        fraction: f64,
    },

    /// Seek committed to the primitive
    SeekCommitted {
        /// Committed fraction
        fraction: f64,
        /// Committed position in milliseconds
        position_ms: u64,
    },

    /// In-flight seek dropped without a seek command (e.g. track switched)
    SeekCancelled,

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}

/// Playback state for events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStateEvent {
    /// Paused or not yet started
    Paused,
    /// Playing audio
    Playing,
    /// User is dragging the seek control
    Seeking,
}

impl From<AdapterPhase> for PlaybackStateEvent {
    fn from(phase: AdapterPhase) -> Self {
        match phase {
            AdapterPhase::Idle => PlaybackStateEvent::Paused,
            AdapterPhase::Playing => PlaybackStateEvent::Playing,
            AdapterPhase::Seeking { .. } => PlaybackStateEvent::Seeking,
        }
    }
}
