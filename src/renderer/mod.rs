//! Drawing backend seam and geometry helpers.
//!
//! [`backend`] defines the command vocabulary and the [`DrawBackend`] trait a
//! host implements over its graphics API. [`recording`] is an in-memory
//! implementation. [`geometry`] holds the bond placement math.

pub mod backend;
pub mod geometry;
pub mod recording;

pub use backend::{
    BlendMode, ClearFlags, ColorMask, DrawBackend, DrawCommand, Rgb,
};
pub use recording::{BackendCall, ListId, RecordingBackend};
