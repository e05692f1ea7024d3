//! Playback adapter - seek and progress state machine
//!
//! Sits between the playlist controller and the streaming primitive:
//! - Forwards the play flag and media URL to the primitive as props
//! - Tracks played/loaded position from progress reports
//! - Freezes position while the user drags the seek control
//! - Commits the dragged fraction to the primitive on release
//!
//! Phases:
//!
//! ```text
//!   Idle <--play/pause--> Playing
//!     |                      |
//!     +----seek_start--------+--> Seeking { resume_playing }
//!                                   |
//!              seek_end (commit) ---+--> Idle | Playing
//! ```

use crate::error::Result;
use crate::events::{PlaybackEvent, PlaybackStateEvent};
use crate::primitive::StreamingPrimitive;
use crate::types::{clamp_fraction, PrimitiveProps, ProgressReport, SeekTarget, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Adapter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterPhase {
    /// Paused or not yet started
    Idle,

    /// Primitive is playing
    Playing,

    /// User is dragging the seek control; position updates are frozen
    Seeking {
        /// Whether to be playing once the seek is released
        resume_playing: bool,
    },
}

/// Committed playback position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackPosition {
    /// Elapsed time as a fraction of the duration, in [0, 1]
    pub played_fraction: f64,

    /// Elapsed seconds
    pub played_seconds: f64,

    /// Buffered seconds
    pub loaded_seconds: f64,
}

/// Child-side player state wrapped around a streaming primitive
pub struct PlaybackAdapter {
    primitive: Box<dyn StreamingPrimitive>,
    phase: AdapterPhase,
    position: PlaybackPosition,

    // Slider value while seeking; not committed until release
    pending_fraction: f64,

    duration: Duration,
    url: String,
    progress_interval_ms: u64,

    pending_events: Vec<PlaybackEvent>,
}

impl std::fmt::Debug for PlaybackAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackAdapter")
            .field("phase", &self.phase)
            .field("position", &self.position)
            .field("pending_fraction", &self.pending_fraction)
            .field("duration", &self.duration)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl PlaybackAdapter {
    /// Create an adapter for `track` and push the initial props
    pub fn new(
        primitive: Box<dyn StreamingPrimitive>,
        track: &Track,
        playing: bool,
        progress_interval_ms: u64,
    ) -> Self {
        let mut adapter = Self {
            primitive,
            phase: if playing {
                AdapterPhase::Playing
            } else {
                AdapterPhase::Idle
            },
            position: PlaybackPosition::default(),
            pending_fraction: 0.0,
            duration: track.duration(),
            url: track.media_url.clone(),
            progress_interval_ms,
            pending_events: Vec::new(),
        };
        adapter.push_props();
        adapter
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.set_playing(true);
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Set the play flag
    ///
    /// While seeking this only changes the phase the adapter returns to on
    /// release; the flag is still forwarded so the primitive follows the
    /// button immediately.
    pub fn set_playing(&mut self, playing: bool) {
        if self.is_playing() == playing {
            return;
        }

        match &mut self.phase {
            AdapterPhase::Seeking { resume_playing } => *resume_playing = playing,
            phase => {
                *phase = if playing {
                    AdapterPhase::Playing
                } else {
                    AdapterPhase::Idle
                };
            }
        }

        tracing::debug!(playing, phase = ?self.phase, "Adapter play flag changed");
        self.push_props();
        self.emit_state_changed();
    }

    /// Switch to a new track
    ///
    /// Resets the position and cancels an in-flight seek without sending it:
    /// the dragged fraction belonged to the old media. A primitive only
    /// reloads on a URL change, so a track with the same URL is restarted
    /// with an explicit seek to zero.
    pub fn load_track(&mut self, track: &Track, playing: bool) {
        if self.is_seeking() {
            tracing::debug!("Track switched mid-seek, dropping pending seek");
            self.pending_events.push(PlaybackEvent::SeekCancelled);
        }

        self.phase = if playing {
            AdapterPhase::Playing
        } else {
            AdapterPhase::Idle
        };
        self.position = PlaybackPosition::default();
        self.pending_fraction = 0.0;
        self.duration = track.duration();
        let same_media = self.url == track.media_url;
        self.url = track.media_url.clone();

        self.push_props();

        if same_media {
            self.rewind();
        }
        self.emit_state_changed();
    }

    fn rewind(&mut self) {
        let target = SeekTarget::from_fraction(0.0, self.duration);

        if let Err(e) = self.primitive.seek_to(target) {
            tracing::warn!("Restart of {} rejected: {}", self.url, e);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }
    }

    /// Change the progress report cadence requested from the primitive
    pub fn set_progress_interval(&mut self, interval_ms: u64) {
        if self.progress_interval_ms != interval_ms {
            self.progress_interval_ms = interval_ms;
            self.push_props();
        }
    }

    // ===== Seek =====

    /// User grabbed the seek control
    ///
    /// Freezes position updates and seeds the pending fraction with the
    /// current position. A second `seek_start` while seeking is ignored.
    pub fn seek_start(&mut self) {
        if self.is_seeking() {
            return;
        }

        self.phase = AdapterPhase::Seeking {
            resume_playing: self.is_playing(),
        };
        self.pending_fraction = self.position.played_fraction;

        tracing::debug!(fraction = self.pending_fraction, "Seek started");
        self.pending_events.push(PlaybackEvent::SeekStarted {
            fraction: self.pending_fraction,
        });
        self.emit_state_changed();
    }

    /// User moved the seek control
    ///
    /// Only updates the pending fraction. Ignored outside of seeking.
    pub fn seek_drag(&mut self, fraction: f64) {
        if !self.is_seeking() {
            tracing::trace!(fraction, "Ignoring seek drag outside of seek");
            return;
        }
        self.pending_fraction = clamp_fraction(fraction);
    }

    /// User released the seek control; commit the last dragged fraction
    ///
    /// Leaving `Seeking`, the primitive seek and the position write happen in
    /// this one call, so no progress report can land between the state flip
    /// and the commit. Returns `Ok(None)` when no seek was in progress.
    ///
    /// If the primitive rejects the seek the adapter still leaves `Seeking`
    /// (the slider must not stay frozen) and keeps the previous position.
    pub fn seek_end(&mut self) -> Result<Option<SeekTarget>> {
        let AdapterPhase::Seeking { resume_playing } = self.phase else {
            return Ok(None);
        };

        self.phase = if resume_playing {
            AdapterPhase::Playing
        } else {
            AdapterPhase::Idle
        };
        let committed = self.commit(self.pending_fraction);
        self.emit_state_changed();

        committed.map(Some)
    }

    /// Release the seek control at an explicit slider value
    ///
    /// Outside of seeking this behaves like [`seek_to`](Self::seek_to).
    pub fn seek_end_at(&mut self, fraction: f64) -> Result<Option<SeekTarget>> {
        if self.is_seeking() {
            self.pending_fraction = clamp_fraction(fraction);
            self.seek_end()
        } else {
            self.seek_to(fraction).map(Some)
        }
    }

    /// One-shot seek (click on the progress bar)
    pub fn seek_to(&mut self, fraction: f64) -> Result<SeekTarget> {
        self.commit(fraction)
    }

    fn commit(&mut self, fraction: f64) -> Result<SeekTarget> {
        let target = SeekTarget::from_fraction(fraction, self.duration);

        if let Err(e) = self.primitive.seek_to(target) {
            tracing::warn!("Seek to {:.3}s rejected: {}", target.seconds(), e);
            self.pending_events.push(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }

        self.position.played_fraction = target.fraction;
        self.position.played_seconds = target.seconds();
        self.pending_fraction = target.fraction;

        tracing::debug!(
            fraction = target.fraction,
            seconds = target.seconds(),
            "Seek committed"
        );
        self.pending_events.push(PlaybackEvent::SeekCommitted {
            fraction: target.fraction,
            position_ms: target.position.as_millis() as u64,
        });

        Ok(target)
    }

    // ===== Progress =====

    /// Handle a progress report from the primitive
    ///
    /// Returns whether the report was applied. Reports are dropped while
    /// seeking and when any field is not a finite number.
    pub fn on_progress(&mut self, report: ProgressReport) -> bool {
        if self.is_seeking() {
            tracing::trace!(?report, "Dropping progress report while seeking");
            return false;
        }

        if !report.is_finite() {
            tracing::warn!(?report, "Dropping non-finite progress report");
            return false;
        }

        self.position = PlaybackPosition {
            played_fraction: clamp_fraction(report.played_fraction),
            played_seconds: report.played_seconds.max(0.0),
            loaded_seconds: report.loaded_seconds.max(0.0),
        };

        tracing::trace!(
            played = self.position.played_seconds,
            loaded = self.position.loaded_seconds,
            "Progress"
        );
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            played_fraction: self.position.played_fraction,
            played_seconds: self.position.played_seconds,
            loaded_seconds: self.position.loaded_seconds,
        });

        true
    }

    // ===== State Queries =====

    /// Current phase
    pub fn phase(&self) -> AdapterPhase {
        self.phase
    }

    /// Whether playback is requested (including the phase to resume after a seek)
    pub fn is_playing(&self) -> bool {
        matches!(
            self.phase,
            AdapterPhase::Playing
                | AdapterPhase::Seeking {
                    resume_playing: true
                }
        )
    }

    /// Whether the user is dragging the seek control
    pub fn is_seeking(&self) -> bool {
        matches!(self.phase, AdapterPhase::Seeking { .. })
    }

    /// Last committed position
    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    /// Value the seek slider should show
    ///
    /// The pending fraction while seeking, the played fraction otherwise.
    pub fn slider_fraction(&self) -> f64 {
        if self.is_seeking() {
            self.pending_fraction
        } else {
            self.position.played_fraction
        }
    }

    /// Duration of the current track
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Props currently pushed to the primitive
    pub fn props(&self) -> PrimitiveProps {
        PrimitiveProps {
            playing: self.is_playing(),
            url: self.url.clone(),
            progress_interval_ms: self.progress_interval_ms,
        }
    }

    /// Mutable access to the wrapped primitive
    pub fn primitive_mut(&mut self) -> &mut dyn StreamingPrimitive {
        self.primitive.as_mut()
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_props(&mut self) {
        let props = self.props();
        self.primitive.apply_props(&props);
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            state: PlaybackStateEvent::from(self.phase),
        });
    }
}
