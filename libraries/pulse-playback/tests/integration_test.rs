//! Integration tests for the player
//!
//! These tests drive the player the way a UI would: button presses, slider
//! drags and progress ticks from a mock streaming primitive.

use pulse_playback::{
    AdapterPhase, PlaybackError, PlaybackEvent, Player, PlayerSettings, Playlist, PrimitiveProps,
    ProgressReport, SeekTarget, StreamingPrimitive, Track,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// ===== Test Helpers =====

#[derive(Debug, Default)]
struct Calls {
    props: Vec<PrimitiveProps>,
    seeks: Vec<SeekTarget>,
}

/// Mock streaming primitive that plays back a scripted timeline
#[derive(Clone, Default)]
struct MockStream {
    calls: Rc<RefCell<Calls>>,
}

impl MockStream {
    fn last_props(&self) -> PrimitiveProps {
        self.calls.borrow().props.last().cloned().unwrap()
    }

    fn seeks(&self) -> Vec<SeekTarget> {
        self.calls.borrow().seeks.clone()
    }
}

impl StreamingPrimitive for MockStream {
    fn apply_props(&mut self, props: &PrimitiveProps) {
        self.calls.borrow_mut().props.push(props.clone());
    }

    fn seek_to(&mut self, target: SeekTarget) -> pulse_playback::Result<()> {
        self.calls.borrow_mut().seeks.push(target);
        Ok(())
    }
}

fn tick(seconds: f64, duration: f64) -> ProgressReport {
    ProgressReport {
        played_fraction: seconds / duration,
        played_seconds: seconds,
        loaded_seconds: (seconds + 10.0).min(duration),
    }
}

fn player_with(tracks: Vec<Track>) -> (Player, MockStream) {
    let stream = MockStream::default();
    let player = Player::new(
        Playlist::new(tracks).unwrap(),
        Box::new(stream.clone()),
        PlayerSettings::default(),
    );
    (player, stream)
}

fn track(id: u32, seconds: u64) -> Track {
    Track {
        id,
        track_name: format!("Track {}", id),
        artist_name: format!("Artist {}", id),
        artwork_url: Some(format!("https://cdn.example.com/{}.jpg", id)),
        media_url: format!("https://cdn.example.com/{}.mp3", id),
        duration_milliseconds: seconds * 1000,
    }
}

// ===== Navigation =====

#[test]
fn test_wraparound_both_directions() {
    let (mut player, stream) = player_with(vec![track(1, 30), track(2, 30), track(3, 30)]);

    assert_eq!(player.previous().id, 3);
    assert_eq!(stream.last_props().url, "https://cdn.example.com/3.mp3");

    assert_eq!(player.next().id, 1);
    assert_eq!(player.next().id, 2);
    assert_eq!(player.next().id, 3);
    assert_eq!(player.next().id, 1);
}

#[test]
fn test_single_track_playlist_navigation() {
    let (mut player, stream) = player_with(vec![track(1, 30)]);
    player.on_progress(tick(12.0, 30.0));

    assert_eq!(player.next().id, 1);
    assert_eq!(player.previous().id, 1);

    // Re-selecting restarts the position and rewinds the same media
    assert_eq!(player.position().played_seconds, 0.0);
    assert_eq!(stream.last_props().url, "https://cdn.example.com/1.mp3");
    let seeks = stream.seeks();
    assert_eq!(seeks.len(), 2);
    assert!(seeks.iter().all(|s| s.position == Duration::ZERO));
}

#[test]
fn test_select_bounds() {
    let (mut player, _) = player_with(vec![track(1, 30), track(2, 30)]);

    assert_eq!(player.select(1).unwrap().id, 2);
    assert!(matches!(
        player.select(2),
        Err(PlaybackError::IndexOutOfBounds(2))
    ));
    assert_eq!(player.track_index(), 1);
}

// ===== Play / Pause =====

#[test]
fn test_autoplay_setting() {
    let stream = MockStream::default();
    let settings = PlayerSettings {
        autoplay: false,
        progress_interval_ms: 500,
        ..Default::default()
    };
    let player = Player::new(Playlist::builtin(), Box::new(stream.clone()), settings);

    assert!(!player.is_playing());
    let props = stream.last_props();
    assert!(!props.playing);
    assert_eq!(props.progress_interval_ms, 500);
}

#[test]
fn test_toggle_play_twice() {
    let (mut player, stream) = player_with(vec![track(1, 30)]);

    player.toggle_play();
    player.toggle_play();

    assert!(player.is_playing());
    let flags: Vec<bool> = stream.calls.borrow().props.iter().map(|p| p.playing).collect();
    assert_eq!(flags, vec![true, false, true]);
}

// ===== Progress & Seek =====

#[test]
fn test_progress_follows_latest_report() {
    let (mut player, _) = player_with(vec![track(1, 30)]);

    for second in 1..=5 {
        player.on_progress(tick(f64::from(second), 30.0));
    }

    assert_eq!(player.position().played_seconds, 5.0);
    assert_eq!(player.now_playing().played_seconds, 5);
    assert_eq!(player.now_playing().loaded_seconds, 15);
}

#[test]
fn test_drag_to_middle_of_30s_track_seeks_to_15s() {
    let (mut player, stream) = player_with(vec![track(1, 30)]);
    player.on_progress(tick(4.0, 30.0));

    player.seek_start();
    assert_eq!(player.phase(), AdapterPhase::Seeking { resume_playing: true });

    player.seek_drag(0.2);
    player.on_progress(tick(5.0, 30.0));
    player.seek_drag(0.5);
    player.on_progress(tick(6.0, 30.0));

    // Position frozen, slider follows the drag
    assert_eq!(player.position().played_seconds, 4.0);
    assert_eq!(player.now_playing().slider_fraction, 0.5);

    let target = player.seek_end().unwrap().unwrap();
    assert_eq!(target.position, Duration::from_secs(15));

    let seeks = stream.seeks();
    assert_eq!(seeks.len(), 1);
    assert!((seeks[0].seconds() - 15.0).abs() < 1e-9);
    assert_eq!(player.phase(), AdapterPhase::Playing);
    assert_eq!(player.position().played_seconds, 15.0);

    // Reports after release are applied again
    assert!(player.on_progress(tick(16.0, 30.0)));
    assert_eq!(player.position().played_seconds, 16.0);
}

#[test]
fn test_switching_track_mid_seek_cancels_it() {
    let (mut player, stream) = player_with(vec![track(1, 30), track(2, 60)]);

    player.seek_start();
    player.seek_drag(0.9);
    player.next();

    assert!(!player.is_seeking());
    assert!(player.seek_end().unwrap().is_none());
    assert!(stream.seeks().is_empty());

    let events = player.drain_events();
    assert!(events.contains(&PlaybackEvent::SeekCancelled));
}

#[test]
fn test_event_stream_for_seek() {
    let (mut player, _) = player_with(vec![track(1, 30)]);
    player.drain_events();

    player.seek_start();
    player.seek_drag(0.5);
    player.seek_end().unwrap();

    let events = player.drain_events();
    assert!(matches!(events[0], PlaybackEvent::SeekStarted { .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::SeekCommitted {
            position_ms: 15_000,
            ..
        }
    )));
}

#[test]
fn test_now_playing_reflects_current_track() {
    let (mut player, _) = player_with(vec![track(1, 30), track(2, 45)]);
    player.next();
    player.pause();

    let view = player.now_playing();
    assert_eq!(view.track_index, 1);
    assert_eq!(view.track_count, 2);
    assert_eq!(view.track_name, "Track 2");
    assert_eq!(view.artist_name, "Artist 2");
    assert_eq!(
        view.artwork_url.as_deref(),
        Some("https://cdn.example.com/2.jpg")
    );
    assert!(!view.playing);
    assert_eq!(view.duration_seconds, 45.0);
}
