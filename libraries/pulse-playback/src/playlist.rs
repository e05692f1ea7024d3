//! Playlist loading and validation
//!
//! A [`Playlist`] is a non-empty, validated, immutable sequence of tracks.
//! Malformed entries are rejected when the playlist is built so the rest of
//! the player never has to deal with a track it cannot stream.

use crate::error::{PlaybackError, Result};
use crate::types::Track;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use url::Url;

/// Ordered, validated track list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

/// Track as it appears on disk, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackRecord {
    id: u32,
    #[serde(default)]
    track_name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    artwork_url: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(default)]
    duration_milliseconds: u64,
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Self {
            id: record.id,
            track_name: record.track_name,
            artist_name: record.artist_name,
            artwork_url: record.artwork_url,
            media_url: record.media_url.unwrap_or_default(),
            duration_milliseconds: record.duration_milliseconds,
        }
    }
}

/// Accepted file layouts: a bare array, or a table with a `tracks` array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaylistFile {
    Bare(Vec<TrackRecord>),
    Wrapped { tracks: Vec<TrackRecord> },
}

impl PlaylistFile {
    fn into_tracks(self) -> Vec<Track> {
        let records = match self {
            PlaylistFile::Bare(records) | PlaylistFile::Wrapped { tracks: records } => records,
        };
        records.into_iter().map(Track::from).collect()
    }
}

impl Playlist {
    /// Build a playlist, validating every track
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        // One media file has one length, whichever track points at it
        let mut media: HashMap<&str, &Track> = HashMap::with_capacity(tracks.len());
        for track in &tracks {
            validate_track(track)?;
            if !seen.insert(track.id) {
                return Err(PlaybackError::DuplicateTrackId(track.id));
            }

            let first = *media.entry(track.media_url.as_str()).or_insert(track);
            if first.duration_milliseconds != track.duration_milliseconds {
                return Err(PlaybackError::invalid_track(
                    track.id,
                    format!(
                        "mediaUrl is shared with track {} but durationMilliseconds differs ({} vs {})",
                        first.id, track.duration_milliseconds, first.duration_milliseconds
                    ),
                ));
            }
        }

        tracing::debug!("Loaded playlist with {} tracks", tracks.len());
        Ok(Self { tracks })
    }

    /// The two preview tracks the player ships with
    pub fn builtin() -> Self {
        Self {
            tracks: vec![
                Track {
                    id: 1,
                    track_name: "The Pretender".to_string(),
                    artist_name: "Foo Fighters".to_string(),
                    artwork_url: Some(
                        "https://images.sk-static.com/images/media/profile_images/artists/29315/huge_avatar"
                            .to_string(),
                    ),
                    media_url: "https://p.scdn.co/mp3-preview/6aba2f4e671ffe07fd60807ca5fef82d48146d4c?cid=1cef747d7bdf4c52ac981490515bda71"
                        .to_string(),
                    duration_milliseconds: 30_000,
                },
                Track {
                    id: 2,
                    track_name: "Do I Wanna Know?".to_string(),
                    artist_name: "Arctic Monkeys".to_string(),
                    artwork_url: Some(
                        "https://cps-static.rovicorp.com/3/JPG_500/MI0003/626/MI0003626958.jpg?partner=allrovi.com"
                            .to_string(),
                    ),
                    media_url: "https://p.scdn.co/mp3-preview/9ec5fce4b39656754da750499597fcc1d2cc82e5?cid=1cef747d7bdf4c52ac981490515bda71"
                        .to_string(),
                    duration_milliseconds: 30_000,
                },
            ],
        }
    }

    /// Parse a JSON playlist (bare array or `{"tracks": [...]}`)
    pub fn from_json_str(input: &str) -> Result<Self> {
        let file: PlaylistFile = serde_json::from_str(input)?;
        Self::new(file.into_tracks())
    }

    /// Parse a TOML playlist (`[[tracks]]` tables)
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: PlaylistFile = toml::from_str(input)?;
        Self::new(file.into_tracks())
    }

    /// Load a playlist file, picking the format from the extension
    ///
    /// `.toml` files are read as TOML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let playlist = if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        };

        match &playlist {
            Ok(p) => tracing::info!("Loaded {} tracks from {}", p.len(), path.display()),
            Err(e) => tracing::error!("Rejected playlist {}: {}", path.display(), e),
        }

        playlist
    }

    /// Number of tracks (never zero)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_track(track: &Track) -> Result<()> {
    if track.track_name.trim().is_empty() {
        return Err(PlaybackError::invalid_track(track.id, "missing trackName"));
    }
    if track.artist_name.trim().is_empty() {
        return Err(PlaybackError::invalid_track(track.id, "missing artistName"));
    }

    if track.media_url.trim().is_empty() {
        return Err(PlaybackError::invalid_track(track.id, "missing mediaUrl"));
    }
    check_absolute_url(track.id, "mediaUrl", &track.media_url)?;

    if let Some(artwork) = &track.artwork_url {
        check_absolute_url(track.id, "artworkUrl", artwork)?;
    }

    if track.duration_milliseconds == 0 {
        return Err(PlaybackError::invalid_track(
            track.id,
            "durationMilliseconds must be greater than zero",
        ));
    }

    Ok(())
}

fn check_absolute_url(id: u32, field: &str, value: &str) -> Result<()> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| PlaybackError::invalid_track(id, format!("{field} '{value}': {e}")))
}
