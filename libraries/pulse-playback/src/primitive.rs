//! Streaming primitive abstraction
//!
//! The player never decodes or fetches media itself. Transport, buffering and
//! decoding belong to an external streaming primitive (an HTML media element,
//! a desktop decoder, a simulator). This trait is the handle the playback
//! adapter holds to drive it.

use crate::error::Result;
use crate::types::{PrimitiveProps, SeekTarget};

/// External streaming-playback primitive
///
/// Progress flows the other way: the host forwards the primitive's periodic
/// reports to [`PlaybackAdapter::on_progress`](crate::PlaybackAdapter::on_progress).
pub trait StreamingPrimitive {
    /// Push the current input props
    ///
    /// Called whenever `playing`, `url` or the progress interval changes.
    /// The primitive owns what "playing" means for its transport.
    fn apply_props(&mut self, props: &PrimitiveProps);

    /// Jump to a position in the current media
    ///
    /// # Returns
    /// * `Ok(())` - Seek accepted
    /// * `Err(_)` - Primitive could not seek (media not seekable, not loaded, ...)
    fn seek_to(&mut self, target: SeekTarget) -> Result<()>;
}

/// Recording primitive for unit tests
///
/// Keeps every call in a shared log so tests can inspect it after handing
/// the primitive to an adapter.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingPrimitive {
    pub log: std::rc::Rc<std::cell::RefCell<PrimitiveLog>>,
    pub fail_seeks: bool,
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct PrimitiveLog {
    pub props: Vec<PrimitiveProps>,
    pub seeks: Vec<SeekTarget>,
}

#[cfg(test)]
impl StreamingPrimitive for RecordingPrimitive {
    fn apply_props(&mut self, props: &PrimitiveProps) {
        self.log.borrow_mut().props.push(props.clone());
    }

    fn seek_to(&mut self, target: SeekTarget) -> Result<()> {
        if self.fail_seeks {
            return Err(crate::error::PlaybackError::primitive("media not seekable"));
        }
        self.log.borrow_mut().seeks.push(target);
        Ok(())
    }
}
