//! Player - controller and adapter wired together
//!
//! The controller is the parent: it decides which track and whether it
//! plays. The adapter is the child: it follows `{playing, track}` and owns
//! the seek/progress state. Every operation here mutates the parent first
//! and then pushes the result down, so the two never disagree.

use crate::adapter::{AdapterPhase, PlaybackAdapter, PlaybackPosition};
use crate::clock::FooterClock;
use crate::controller::PlaylistController;
use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::playlist::Playlist;
use crate::primitive::StreamingPrimitive;
use crate::types::{PlayerSettings, ProgressReport, SeekTarget, Track};
use serde::Serialize;

/// Snapshot of everything the player UI displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub track_index: usize,
    pub track_count: usize,
    pub track_name: String,
    pub artist_name: String,
    pub artwork_url: Option<String>,
    pub playing: bool,
    pub seeking: bool,
    /// Whole seconds played, as shown left of the seeker
    pub played_seconds: u64,
    /// Whole seconds buffered, as shown right of the seeker
    pub loaded_seconds: u64,
    pub slider_fraction: f64,
    pub duration_seconds: f64,
}

impl std::fmt::Display for NowPlaying {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const BAR_WIDTH: usize = 30;
        let filled = (self.slider_fraction * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);

        write!(
            f,
            "[{}/{}] {} - {} {} {}s [{}{}] {}s",
            self.track_index + 1,
            self.track_count,
            self.track_name,
            self.artist_name,
            if self.playing { "(playing)" } else { "(paused)" },
            self.played_seconds,
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            self.loaded_seconds,
        )
    }
}

/// Audio player: playlist navigation on top of a seekable stream
#[derive(Debug)]
pub struct Player {
    controller: PlaylistController,
    adapter: PlaybackAdapter,
    clock: FooterClock,
    settings: PlayerSettings,
}

impl Player {
    /// Create a player on the first track of `playlist`
    pub fn new(
        playlist: Playlist,
        primitive: Box<dyn StreamingPrimitive>,
        settings: PlayerSettings,
    ) -> Self {
        let controller = PlaylistController::new(playlist, settings.autoplay);
        let adapter = PlaybackAdapter::new(
            primitive,
            controller.current_track(),
            controller.is_playing(),
            settings.progress_interval_ms,
        );

        tracing::info!(
            tracks = controller.len(),
            autoplay = settings.autoplay,
            "Player ready"
        );

        Self {
            controller,
            adapter,
            clock: FooterClock::new(),
            settings,
        }
    }

    // ===== Playback Control =====

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) {
        self.controller.toggle_play();
        self.sync_playing();
    }

    /// Play button
    pub fn play(&mut self) {
        self.controller.play();
        self.sync_playing();
    }

    /// Pause button
    pub fn pause(&mut self) {
        self.controller.pause();
        self.sync_playing();
    }

    /// Next button (wraps to the first track)
    pub fn next(&mut self) -> &Track {
        self.controller.next();
        self.sync_track()
    }

    /// Previous button (wraps to the last track)
    pub fn previous(&mut self) -> &Track {
        self.controller.previous();
        self.sync_track()
    }

    /// Jump to the track at `index`
    pub fn select(&mut self, index: usize) -> Result<&Track> {
        self.controller.select(index)?;
        Ok(self.sync_track())
    }

    fn sync_playing(&mut self) {
        self.adapter.set_playing(self.controller.is_playing());
    }

    fn sync_track(&mut self) -> &Track {
        let track = self.controller.current_track();
        self.adapter.load_track(track, self.controller.is_playing());
        track
    }

    // ===== Seek =====

    /// Seek control grabbed
    pub fn seek_start(&mut self) {
        self.adapter.seek_start();
    }

    /// Seek control moved
    pub fn seek_drag(&mut self, fraction: f64) {
        self.adapter.seek_drag(fraction);
    }

    /// Seek control released
    pub fn seek_end(&mut self) -> Result<Option<SeekTarget>> {
        self.adapter.seek_end()
    }

    /// Seek control released at an explicit value
    pub fn seek_end_at(&mut self, fraction: f64) -> Result<Option<SeekTarget>> {
        self.adapter.seek_end_at(fraction)
    }

    /// Click-to-seek
    pub fn seek_to(&mut self, fraction: f64) -> Result<SeekTarget> {
        self.adapter.seek_to(fraction)
    }

    // ===== Primitive Callbacks =====

    /// Progress report from the streaming primitive
    pub fn on_progress(&mut self, report: ProgressReport) -> bool {
        self.adapter.on_progress(report)
    }

    /// Refresh the footer clock from the system time
    pub fn tick_clock(&mut self) -> String {
        self.clock.tick();
        self.clock.footer()
    }

    // ===== State Queries =====

    /// Current track
    pub fn current_track(&self) -> &Track {
        self.controller.current_track()
    }

    /// Current index
    pub fn track_index(&self) -> usize {
        self.controller.track_index()
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    /// Whether the seek control is held
    pub fn is_seeking(&self) -> bool {
        self.adapter.is_seeking()
    }

    /// Adapter phase
    pub fn phase(&self) -> AdapterPhase {
        self.adapter.phase()
    }

    /// Committed position
    pub fn position(&self) -> PlaybackPosition {
        self.adapter.position()
    }

    /// The playlist
    pub fn playlist(&self) -> &Playlist {
        self.controller.playlist()
    }

    /// Active settings
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Footer line from the last clock tick
    pub fn footer(&self) -> String {
        self.clock.footer()
    }

    /// Mutable access to the wrapped primitive
    pub fn primitive_mut(&mut self) -> &mut dyn StreamingPrimitive {
        self.adapter.primitive_mut()
    }

    /// Snapshot for display
    pub fn now_playing(&self) -> NowPlaying {
        let track = self.controller.current_track();
        let position = self.adapter.position();

        NowPlaying {
            track_index: self.controller.track_index(),
            track_count: self.controller.len(),
            track_name: track.track_name.clone(),
            artist_name: track.artist_name.clone(),
            artwork_url: track.artwork_url.clone(),
            playing: self.controller.is_playing(),
            seeking: self.adapter.is_seeking(),
            played_seconds: position.played_seconds.floor() as u64,
            loaded_seconds: position.loaded_seconds.floor() as u64,
            slider_fraction: self.adapter.slider_fraction(),
            duration_seconds: track.duration_secs(),
        }
    }

    // ===== Events =====

    /// Drain controller and adapter events, controller first
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        let mut events = self.controller.drain_events();
        events.extend(self.adapter.drain_events());
        events
    }
}
