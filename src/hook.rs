//! Decode observation.
//!
//! A [`TraceHook`] attached to a [`Decoder`](crate::decoder::Decoder) is told
//! when each tag starts, when it ends, and when decoding fails. Every method
//! has an empty default, so a hook only implements the events it cares about.
//!
//! [`TracingHook`] forwards all three events to the `tracing` crate at trace
//! level (failures at debug level). Install a subscriber to see them.
//!
//! ```rust
//! use serde_nbt::decoder::Decoder;
//! use serde_nbt::hook::TracingHook;
//!
//! let bytes = [0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'x', 0x05, 0x00];
//! let mut decoder = Decoder::from_slice(&bytes).with_hook(TracingHook);
//! let doc = decoder.read_document().unwrap();
//! assert_eq!(doc.root.get("x").and_then(|t| t.as_i64()), Some(5));
//! ```

use crate::{Error, TypeId};
use tracing::{debug, trace};

/// Callbacks invoked while a document is decoded.
pub trait TraceHook {
    /// A tag is about to be decoded. `name` is `None` for list elements.
    /// `offset` is the position of the tag's payload.
    fn on_tag_start(&mut self, type_id: TypeId, name: Option<&str>, offset: u64) {
        let _ = (type_id, name, offset);
    }

    /// A tag's payload has been decoded. `offset` is the position just past it.
    fn on_tag_end(&mut self, type_id: TypeId, offset: u64) {
        let _ = (type_id, offset);
    }

    /// Decoding of the current document failed.
    fn on_error(&mut self, error: &Error) {
        let _ = error;
    }
}

/// Forwards decode events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHook;

impl TraceHook for TracingHook {
    fn on_tag_start(&mut self, type_id: TypeId, name: Option<&str>, offset: u64) {
        trace!(%type_id, name = name.unwrap_or(""), offset, "tag start");
    }

    fn on_tag_end(&mut self, type_id: TypeId, offset: u64) {
        trace!(%type_id, offset, "tag end");
    }

    fn on_error(&mut self, error: &Error) {
        debug!(%error, "decode failed");
    }
}

impl<H: TraceHook + ?Sized> TraceHook for Box<H> {
    fn on_tag_start(&mut self, type_id: TypeId, name: Option<&str>, offset: u64) {
        (**self).on_tag_start(type_id, name, offset);
    }

    fn on_tag_end(&mut self, type_id: TypeId, offset: u64) {
        (**self).on_tag_end(type_id, offset);
    }

    fn on_error(&mut self, error: &Error) {
        (**self).on_error(error);
    }
}
