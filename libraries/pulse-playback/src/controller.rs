//! Playlist navigation
//!
//! Owns the current track index and the `playing` flag. Navigation wraps at
//! both ends, so `next` on the last track lands on the first and `previous`
//! on the first lands on the last.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::playlist::Playlist;
use crate::types::Track;

/// Parent-side player state: which track, and whether it should play
#[derive(Debug, Clone)]
pub struct PlaylistController {
    playlist: Playlist,
    track_index: usize,
    playing: bool,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaylistController {
    /// Create a controller positioned on the first track
    pub fn new(playlist: Playlist, playing: bool) -> Self {
        Self {
            playlist,
            track_index: 0,
            playing,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Flag =====

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) {
        self.set_playing(!self.playing);
    }

    /// Start playing
    pub fn play(&mut self) {
        self.set_playing(true);
    }

    /// Pause playing
    pub fn pause(&mut self) {
        self.set_playing(false);
    }

    /// Set the playing flag
    ///
    /// No event is queued here; the adapter reports state changes since it
    /// also knows about seeking.
    pub fn set_playing(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            tracing::debug!(playing, "Playlist play flag changed");
        }
    }

    // ===== Navigation =====

    /// Advance to the next track, wrapping to the first
    pub fn next(&mut self) -> &Track {
        let len = self.playlist.len();
        self.change_track((self.track_index + 1) % len)
    }

    /// Go back to the previous track, wrapping to the last
    pub fn previous(&mut self) -> &Track {
        let len = self.playlist.len();
        self.change_track((self.track_index + len - 1) % len)
    }

    /// Jump to the track at `index`
    pub fn select(&mut self, index: usize) -> Result<&Track> {
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        Ok(self.change_track(index))
    }

    fn change_track(&mut self, index: usize) -> &Track {
        let previous_track_id = self.current_track().id;
        self.track_index = index;
        let track = &self.playlist.tracks()[index];

        tracing::info!(
            index,
            "Now playing '{}' by {}",
            track.track_name,
            track.artist_name
        );
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id,
            previous_track_id: Some(previous_track_id),
        });

        track
    }

    // ===== State Queries =====

    /// Track at the current index
    pub fn current_track(&self) -> &Track {
        // The index only ever comes from `% len` or a bounds-checked select,
        // and the playlist is never empty.
        &self.playlist.tracks()[self.track_index]
    }

    /// Current index in [0, len)
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    /// Whether playback is requested
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    /// Always false, a controller cannot hold an empty playlist
    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    /// The underlying playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
