//! Scripted sessions against the simulated stream

use pulse_cli::{CliConfig, Command, Outcome, Session};
use pulse_playback::{PlayerSettings, Playlist};
use std::io::Write;
use std::time::Duration;

fn script(session: &mut Session, lines: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for line in lines {
        match session.handle(Command::parse(line).unwrap()) {
            Outcome::Continue(lines) => out.extend(lines),
            Outcome::Quit => break,
        }
    }
    out
}

#[test]
fn navigation_wraps_both_ways() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());

    let out = script(&mut session, &["next", "next", "prev", "prev"]);
    assert!(out[0].starts_with("[2/2]"));
    assert!(out[1].starts_with("[1/2]"));
    assert!(out[2].starts_with("[2/2]"));
    assert!(out[3].starts_with("[1/2]"));
}

#[test]
fn track_change_keeps_play_state() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());

    let out = script(&mut session, &["pause", "next"]);
    assert!(out[1].contains("(paused)"));
    assert!(!session.player().is_playing());
}

#[test]
fn drag_and_release_moves_stream() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());
    session.on_progress_tick(Duration::from_secs(3));

    script(&mut session, &["seek-start", "drag 0.9", "drag 0.5"]);
    assert!(session.player().is_seeking());
    assert_eq!(session.player().position().played_seconds, 3.0);

    let out = script(&mut session, &["seek-end"]);
    assert!(out[0].contains(" 15s "));
    assert!(!session.player().is_seeking());
    assert!(session.player().is_playing());
}

#[test]
fn click_to_seek_clamps() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());

    script(&mut session, &["seek 4"]);
    assert_eq!(session.player().position().played_seconds, 30.0);
}

#[test]
fn pause_during_drag_resumes_paused() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());

    script(&mut session, &["seek-start", "pause", "drag 0.2", "seek-end"]);
    assert!(!session.player().is_playing());

    // Paused stream does not move
    session.on_progress_tick(Duration::from_secs(5));
    assert_eq!(session.player().position().played_seconds, 6.0);
}

#[test]
fn switching_track_resets_progress() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());
    session.on_progress_tick(Duration::from_secs(10));

    script(&mut session, &["next"]);
    assert_eq!(session.player().position().played_seconds, 0.0);

    session.on_progress_tick(Duration::from_secs(1));
    assert_eq!(session.player().position().played_seconds, 1.0);
}

#[test]
fn wrapping_single_track_restarts_stream() {
    let playlist = Playlist::from_json_str(
        r#"[{"id": 1, "trackName": "Loop", "artistName": "Someone",
            "mediaUrl": "https://cdn.example.com/loop.mp3", "durationMilliseconds": 30000}]"#,
    )
    .unwrap();
    let mut session = Session::new(playlist, PlayerSettings::default());
    session.on_progress_tick(Duration::from_secs(10));

    script(&mut session, &["next"]);
    assert_eq!(session.player().position().played_seconds, 0.0);

    session.on_progress_tick(Duration::from_secs(1));
    assert_eq!(session.player().position().played_seconds, 1.0);
}

#[test]
fn clock_tick_renders_footer() {
    let mut session = Session::new(Playlist::builtin(), PlayerSettings::default());
    assert!(session
        .on_clock_tick()
        .starts_with("Current date and time is "));
}

#[test]
fn playlist_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let playlist_path = dir.path().join("mix.json");
    std::fs::write(
        &playlist_path,
        r#"{"tracks": [{"id": 7, "trackName": "Solo", "artistName": "Someone",
            "mediaUrl": "https://cdn.example.com/solo.mp3", "durationMilliseconds": 8000}]}"#,
    )
    .unwrap();

    let config_path = dir.path().join("pulse.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "playlist = {:?}", playlist_path.display().to_string()).unwrap();

    let config = CliConfig::load(Some(&config_path)).unwrap();
    let mut session = Session::new(config.playlist(None).unwrap(), config.player.clone());

    // A single track wraps onto itself
    let out = script(&mut session, &["next"]);
    assert!(out[0].starts_with("[1/1] Solo - Someone"));
}

#[tokio::test]
async fn run_stops_on_quit() {
    let session = Session::new(Playlist::builtin(), PlayerSettings::default());
    let input: &[u8] = b"next\nbogus\nstatus\nquit\nnext\n";

    session.run(input, false).await.unwrap();
}

#[tokio::test]
async fn run_stops_at_end_of_input() {
    let session = Session::new(Playlist::builtin(), PlayerSettings::default());
    let input: &[u8] = b"toggle\n\n";

    session.run(input, true).await.unwrap();
}
