//! WASM-compatible Player wrapper

use super::primitive::JsPrimitive;
use crate::{PlaybackError, Player, PlayerSettings, Playlist, ProgressReport};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// WASM-compatible player
///
/// This wraps the core Player with a JavaScript-friendly API.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Player,

    // Event callbacks
    on_event: Option<Function>,
    on_error: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a new player
    ///
    /// `tracks` is an array of `{id, trackName, artistName, artworkUrl,
    /// mediaUrl, durationMilliseconds}`; pass `undefined` for the built-in
    /// playlist. `set_props` and `seek_to` drive the media element.
    #[wasm_bindgen(constructor)]
    pub fn new(
        tracks: JsValue,
        settings: JsValue,
        set_props: Function,
        seek_to: Function,
    ) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let playlist = if tracks.is_undefined() || tracks.is_null() {
            Playlist::builtin()
        } else {
            let tracks = serde_wasm_bindgen::from_value(tracks)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
            Playlist::new(tracks).map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        let settings: PlayerSettings = if settings.is_undefined() || settings.is_null() {
            PlayerSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse settings: {}", e)))?
        };

        let primitive = JsPrimitive::new(set_props, seek_to);

        Ok(Self {
            inner: Player::new(playlist, Box::new(primitive), settings),
            on_event: None,
            on_error: None,
        })
    }

    // ===== Playback Control =====

    /// Play/pause button
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&mut self) {
        self.inner.toggle_play();
        self.flush_events();
    }

    /// Play button
    pub fn play(&mut self) {
        self.inner.play();
        self.flush_events();
    }

    /// Pause button
    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush_events();
    }

    /// Next button
    pub fn next(&mut self) {
        self.inner.next();
        self.flush_events();
    }

    /// Previous button
    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush_events();
    }

    /// Jump to a track
    pub fn select(&mut self, index: usize) -> Result<(), JsValue> {
        if let Err(e) = self.inner.select(index).map(|_| ()) {
            return Err(self.handle_error(e));
        }
        self.flush_events();
        Ok(())
    }

    // ===== Seeking =====

    /// Seek slider mousedown
    #[wasm_bindgen(js_name = seekStart)]
    pub fn seek_start(&mut self) {
        self.inner.seek_start();
        self.flush_events();
    }

    /// Seek slider change
    #[wasm_bindgen(js_name = seekDrag)]
    pub fn seek_drag(&mut self, fraction: f64) {
        self.inner.seek_drag(fraction);
    }

    /// Seek slider mouseup with the slider's final value
    #[wasm_bindgen(js_name = seekEnd)]
    pub fn seek_end(&mut self, fraction: f64) -> Result<(), JsValue> {
        self.inner
            .seek_end_at(fraction)
            .map_err(|e| self.handle_error(e))?;
        self.flush_events();
        Ok(())
    }

    /// Click-to-seek, fraction in [0, 1]
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&mut self, fraction: f64) -> Result<(), JsValue> {
        self.inner.seek_to(fraction).map_err(|e| self.handle_error(e))?;
        self.flush_events();
        Ok(())
    }

    // ===== Media Element Callbacks =====

    /// Forward a progress report; returns whether it was applied
    #[wasm_bindgen(js_name = onProgress)]
    pub fn on_progress(
        &mut self,
        played_fraction: f64,
        played_seconds: f64,
        loaded_seconds: f64,
    ) -> bool {
        let applied = self.inner.on_progress(ProgressReport {
            played_fraction,
            played_seconds,
            loaded_seconds,
        });
        self.flush_events();
        applied
    }

    // ===== State Queries =====

    /// Everything the UI displays, as a plain object
    #[wasm_bindgen(js_name = nowPlaying)]
    pub fn now_playing(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.now_playing()).unwrap_or(JsValue::NULL)
    }

    /// Current track as a plain object
    #[wasm_bindgen(js_name = currentTrack)]
    pub fn current_track(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.current_track()).unwrap_or(JsValue::NULL)
    }

    /// Whether playback is requested
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    /// Refresh and return the footer line
    #[wasm_bindgen(js_name = tickClock)]
    pub fn tick_clock(&mut self) -> String {
        self.inner.tick_clock()
    }

    // ===== Event Listeners =====

    /// Register a callback receiving every playback event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    /// Register error callback
    #[wasm_bindgen(js_name = onError)]
    pub fn on_error(&mut self, callback: Function) {
        self.on_error = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };

        for event in events {
            if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }

    fn handle_error(&mut self, error: PlaybackError) -> JsValue {
        let err_msg = error.to_string();

        // Error events queued by the adapter go out with everything else
        self.flush_events();

        if let Some(ref cb) = self.on_error {
            cb.call1(&JsValue::NULL, &JsValue::from_str(&err_msg)).ok();
        }

        JsValue::from_str(&err_msg)
    }
}
