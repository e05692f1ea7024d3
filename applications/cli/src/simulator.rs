//! Simulated streaming primitive
//!
//! Stands in for a real media element: it "plays" by advancing a clock and
//! "buffers" ahead of the play head at a faster rate. The CLI keeps a clone
//! of the handle to pull progress reports on every tick while the player
//! owns the other clone.

use pulse_playback::{
    PlaybackError, PrimitiveProps, ProgressReport, SeekTarget, StreamingPrimitive,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Buffered time grows this many times faster than played time
const BUFFER_RATE: u32 = 4;

#[derive(Debug, Default)]
struct SimState {
    media: HashMap<String, Duration>,
    props: Option<PrimitiveProps>,
    position: Duration,
    loaded: Duration,
}

impl SimState {
    fn duration(&self) -> Option<Duration> {
        let url = &self.props.as_ref()?.url;
        self.media.get(url).copied()
    }
}

/// Cloneable handle to a simulated stream
#[derive(Debug, Clone, Default)]
pub struct SimulatedStream {
    state: Rc<RefCell<SimState>>,
}

impl SimulatedStream {
    /// Create a stream that knows the length of each media URL
    pub fn new(media: impl IntoIterator<Item = (String, Duration)>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState {
                media: media.into_iter().collect(),
                ..SimState::default()
            })),
        }
    }

    /// Advance the simulation by `elapsed` and report progress
    ///
    /// Returns `None` until props naming a known URL have been applied.
    pub fn advance(&self, elapsed: Duration) -> Option<ProgressReport> {
        let mut state = self.state.borrow_mut();
        let duration = state.duration()?;
        let playing = state.props.as_ref().is_some_and(|p| p.playing);

        if playing {
            state.position = (state.position + elapsed).min(duration);
            state.loaded = (state.loaded + elapsed * BUFFER_RATE).min(duration);
        }
        state.loaded = state.loaded.max(state.position);

        Some(ProgressReport {
            played_fraction: state.position.as_secs_f64() / duration.as_secs_f64(),
            played_seconds: state.position.as_secs_f64(),
            loaded_seconds: state.loaded.as_secs_f64(),
        })
    }

    /// Current play head
    pub fn position(&self) -> Duration {
        self.state.borrow().position
    }

    /// Whether the play head reached the end of the media
    pub fn is_finished(&self) -> bool {
        let state = self.state.borrow();
        state.duration().is_some_and(|d| state.position >= d)
    }
}

impl StreamingPrimitive for SimulatedStream {
    fn apply_props(&mut self, props: &PrimitiveProps) {
        let mut state = self.state.borrow_mut();
        let url_changed = state.props.as_ref().map_or(true, |p| p.url != props.url);

        if url_changed {
            tracing::debug!(url = %props.url, "Simulated stream loading media");
            state.position = Duration::ZERO;
            state.loaded = Duration::ZERO;
        }
        state.props = Some(props.clone());
    }

    fn seek_to(&mut self, target: SeekTarget) -> pulse_playback::Result<()> {
        let mut state = self.state.borrow_mut();
        let duration = state
            .duration()
            .ok_or_else(|| PlaybackError::primitive("no media loaded"))?;

        state.position = target.position.min(duration);
        state.loaded = state.loaded.max(state.position);
        tracing::debug!(position = ?state.position, "Simulated stream seeked");
        Ok(())
    }
}
