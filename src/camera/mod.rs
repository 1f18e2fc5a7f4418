//! Camera system: projection, viewport and per-eye view transforms.
//!
//! The view pivots about the molecule centroid at a fixed forward distance.
//! Anaglyph rendering derives a left and a right eye from the same view
//! state.

/// Projection and viewport types.
pub mod core;
/// Mono and anaglyph eye passes.
pub mod stereo;

pub use self::core::{Perspective, Viewport};
pub use self::stereo::{Eye, EyePass, StereoCamera};
