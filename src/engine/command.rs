//! The viewer's interactive vocabulary.
//!
//! Every control a host exposes (sliders, check boxes, menu entries, key
//! bindings) maps to one `ViewerCommand`, passed to
//! [`MoleculeViewer::execute`](super::MoleculeViewer::execute).

use glam::DVec3;

use super::view_state::Axis;
use crate::scene::DetailLevel;

/// A discrete or parameterized operation the viewer can perform.
///
/// ```ignore
/// viewer.execute(ViewerCommand::SetRotation { axis: Axis::Y, degrees: 90 });
/// viewer.execute(ViewerCommand::SetAnaglyph { enabled: true });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Set the rotation about one axis.
    SetRotation {
        /// Rotation axis.
        axis: Axis,
        /// Angle in degrees; any integer.
        degrees: i32,
    },

    /// Set the zoom from a percentage (100 = unscaled).
    SetScale {
        /// Scale percentage; must be positive.
        percent: i32,
    },

    /// Move the pan offset.
    Pan {
        /// Offset added to the current pan.
        delta: DVec3,
    },

    /// Restore rotation, scale and pan.
    ResetCamera,

    /// Enable or disable timed rotation about one axis.
    SetAutoRotate {
        /// Rotation axis.
        axis: Axis,
        /// Whether [`MoleculeViewer::tick`](super::MoleculeViewer::tick)
        /// advances this axis.
        enabled: bool,
    },

    // ── Stereo ──────────────────────────────────────────────────────
    /// Switch between mono and red/cyan anaglyph output.
    SetAnaglyph {
        /// Anaglyph on.
        enabled: bool,
    },

    /// Set the eye separation.
    SetEyeSeparation {
        /// Separation in control units.
        separation: f64,
    },

    // ── Scene ───────────────────────────────────────────────────────
    /// Select the geometry detail level.
    SetDetail {
        /// New level.
        detail: DetailLevel,
    },

    /// Scale all atom radii.
    SetAtomScale {
        /// Multiplier; must be positive.
        scale: f64,
    },

    // ── Viewport ────────────────────────────────────────────────────
    /// The host window changed size.
    Resize {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}
