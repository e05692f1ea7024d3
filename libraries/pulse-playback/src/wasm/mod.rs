//! WASM bindings for pulse-playback
//!
//! This module exposes the [`Player`](crate::Player) to JavaScript so a web
//! front end can keep all playlist and seek state in Rust while an HTML
//! media element does the streaming.

pub mod player;
pub mod primitive;

pub use player::WasmPlayer;
pub use primitive::JsPrimitive;
