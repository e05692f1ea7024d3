//! Pulse Player - Playback Management
//!
//! Platform-agnostic playlist and seek state for Pulse Player.
//!
//! This crate provides:
//! - Validated playlists (built-in, JSON or TOML)
//! - Playlist navigation with wraparound and a play/pause flag
//! - A seek/progress state machine in front of a streaming primitive
//! - A footer clock
//!
//! # Architecture
//!
//! `pulse-playback` never touches media. Fetching, buffering and decoding
//! belong to a [`StreamingPrimitive`] supplied by the platform (an HTML media
//! element through the `wasm` feature, a simulator in the CLI, ...).
//!
//! ```text
//!   PlaylistController --{playing, track}--> PlaybackAdapter --props--> primitive
//!                                                  ^                        |
//!                                                  +------ on_progress -----+
//! ```
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use pulse_playback::{
//!     Player, PlayerSettings, Playlist, PrimitiveProps, ProgressReport, Result, SeekTarget,
//!     StreamingPrimitive,
//! };
//!
//! struct NullStream;
//!
//! impl StreamingPrimitive for NullStream {
//!     fn apply_props(&mut self, _props: &PrimitiveProps) {}
//!
//!     fn seek_to(&mut self, _target: SeekTarget) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut player = Player::new(
//!     Playlist::builtin(),
//!     Box::new(NullStream),
//!     PlayerSettings::default(),
//! );
//!
//! player.toggle_play();
//! player.next();
//!
//! player.on_progress(ProgressReport {
//!     played_fraction: 0.1,
//!     played_seconds: 3.0,
//!     loaded_seconds: 12.0,
//! });
//!
//! // Drag the seeker to the middle and let go
//! player.seek_start();
//! player.seek_drag(0.5);
//! let target = player.seek_end().unwrap().unwrap();
//! assert_eq!(target.seconds(), 15.0);
//! ```

mod adapter;
mod clock;
mod controller;
mod error;
pub mod events;
mod player;
mod playlist;
mod primitive;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use adapter::{AdapterPhase, PlaybackAdapter, PlaybackPosition};
pub use clock::{FooterClock, DEFAULT_CLOCK_FORMAT};
pub use controller::PlaylistController;
pub use error::{PlaybackError, Result};
pub use events::{PlaybackEvent, PlaybackStateEvent};
pub use player::{NowPlaying, Player};
pub use playlist::Playlist;
pub use primitive::StreamingPrimitive;
pub use types::{clamp_fraction, PlayerSettings, PrimitiveProps, ProgressReport, SeekTarget, Track};
