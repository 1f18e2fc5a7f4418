//! The drawing substrate seam.
//!
//! The scene builder emits [`DrawCommand`]s; a [`DrawBackend`] compiles them
//! into a replayable list once and replays that list every frame under a
//! per-eye view matrix, projection and color mask. This mirrors the
//! immediate-mode "display list" model: the backend owns list storage, the
//! engine only holds the opaque handle.

use glam::{DMat4, DVec3};

use crate::camera::{Perspective, Viewport};

/// RGB color with components in `0.0..=1.0`.
pub type Rgb = [f32; 3];

/// One recorded drawing operation inside a compiled list.
///
/// Geometry primitives are drawn at the origin of the current modeling
/// transform (the product of all active [`DrawCommand::MultMatrix`]
/// entries), except [`DrawCommand::Lines`] and [`DrawCommand::Label`],
/// which carry their own positions.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Set the flat material color for subsequent primitives.
    SetColor(Rgb),
    /// Duplicate the top of the modeling transform stack.
    PushMatrix,
    /// Restore the previously pushed modeling transform.
    PopMatrix,
    /// Post-multiply the current modeling transform.
    MultMatrix(DMat4),
    /// Line segments given as endpoint pairs.
    Lines(Vec<[DVec3; 2]>),
    /// Sphere approximation centered at the local origin.
    Sphere {
        /// Radius in local units.
        radius: f64,
        /// Subdivisions around the vertical axis.
        slices: u32,
        /// Subdivisions along the vertical axis.
        stacks: u32,
    },
    /// Cylinder from the local origin along local +X.
    Cylinder {
        /// Radius at the origin end.
        base_radius: f64,
        /// Radius at the far end.
        top_radius: f64,
        /// Length along +X.
        length: f64,
        /// Subdivisions around the axis.
        slices: u32,
    },
    /// Extruded line-stroke text anchored at the local origin.
    StrokeText {
        /// Text to draw.
        text: String,
        /// Glyph height in local units.
        height: f64,
    },
    /// Screen-aligned text label anchored at a model-space position.
    Label {
        /// Text to draw.
        text: String,
        /// Anchor position.
        position: DVec3,
    },
}

/// Per-channel framebuffer write enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ColorMask {
    /// Write the red channel.
    pub red: bool,
    /// Write the green channel.
    pub green: bool,
    /// Write the blue channel.
    pub blue: bool,
    /// Write the alpha channel.
    pub alpha: bool,
}

impl ColorMask {
    /// All channels.
    pub const ALL: Self = Self {
        red: true,
        green: true,
        blue: true,
        alpha: true,
    };

    /// Red plus alpha (left eye of red/cyan glasses).
    pub const RED: Self = Self {
        red: true,
        green: false,
        blue: false,
        alpha: true,
    };

    /// Green and blue plus alpha (right eye of red/cyan glasses).
    pub const CYAN: Self = Self {
        red: false,
        green: true,
        blue: true,
        alpha: true,
    };

    /// Whether the two masks share no color channel (alpha is ignored).
    #[must_use]
    pub fn color_disjoint(&self, other: &Self) -> bool {
        !(self.red && other.red
            || self.green && other.green
            || self.blue && other.blue)
    }
}

impl Default for ColorMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// How fragment colors combine with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite.
    #[default]
    Replace,
    /// Add source to destination.
    Additive,
}

/// Which buffers a clear affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearFlags {
    /// Clear the color buffer.
    pub color: bool,
    /// Clear the depth buffer.
    pub depth: bool,
}

impl ClearFlags {
    /// Color and depth.
    pub const ALL: Self = Self {
        color: true,
        depth: true,
    };

    /// Depth only; color accumulates.
    pub const DEPTH: Self = Self {
        color: false,
        depth: true,
    };
}

/// Drawing substrate the engine issues commands to.
///
/// Implementations must treat zero-scale transforms and empty line lists as
/// no-op draws.
pub trait DrawBackend {
    /// Opaque handle to a compiled command list.
    type ListHandle: Copy + std::fmt::Debug;
    /// Opaque framebuffer capture.
    type Snapshot;

    /// Compile a command list for later replay (begin/end of a group).
    fn compile(&mut self, commands: &[DrawCommand]) -> Self::ListHandle;
    /// Replay a compiled list under the current view and state.
    fn call_list(&mut self, list: Self::ListHandle);
    /// Free a compiled list. The handle must not be used afterwards.
    fn delete_list(&mut self, list: Self::ListHandle);
    /// Clear the selected buffers.
    fn clear(&mut self, flags: ClearFlags);
    /// Restrict which color channels are written.
    fn set_color_mask(&mut self, mask: ColorMask);
    /// Select the blend mode.
    fn set_blend_mode(&mut self, mode: BlendMode);
    /// Load the projection.
    fn set_projection(&mut self, projection: &Perspective);
    /// Set the viewport rectangle.
    fn set_viewport(&mut self, viewport: Viewport);
    /// Load the view transform that prefixes every modeling transform.
    fn load_view(&mut self, view: &DMat4);
    /// Capture the current framebuffer, if the backend supports it.
    fn capture_frame(&mut self) -> Option<Self::Snapshot>;
}
