//! JavaScript-backed streaming primitive

use crate::error::{PlaybackError, Result};
use crate::primitive::StreamingPrimitive;
use crate::types::{PrimitiveProps, SeekTarget};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// Streaming primitive reached through two JS callbacks
///
/// - `setProps({playing, url, progressIntervalMs})`
/// - `seekTo(fraction, seconds)`; a thrown exception becomes a seek error
pub struct JsPrimitive {
    set_props: Function,
    seek_to: Function,
}

impl JsPrimitive {
    pub fn new(set_props: Function, seek_to: Function) -> Self {
        Self { set_props, seek_to }
    }
}

impl StreamingPrimitive for JsPrimitive {
    fn apply_props(&mut self, props: &PrimitiveProps) {
        match serde_wasm_bindgen::to_value(props) {
            Ok(value) => {
                if let Err(e) = self.set_props.call1(&JsValue::NULL, &value) {
                    tracing::warn!("setProps callback threw: {:?}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize props: {}", e),
        }
    }

    fn seek_to(&mut self, target: SeekTarget) -> Result<()> {
        self.seek_to
            .call2(
                &JsValue::NULL,
                &JsValue::from_f64(target.fraction),
                &JsValue::from_f64(target.seconds()),
            )
            .map(|_| ())
            .map_err(|e| PlaybackError::primitive(format!("{:?}", e)))
    }
}
