//! Orientation, zoom, pan, stereo and detail settings of the viewer.
//!
//! Every setter records what it invalidated. Camera-only changes
//! (rotation, scale, pan, eye separation) need a redraw; changes to inputs
//! baked into the compiled scene (detail level, atom-size scale, anaglyph
//! colors) additionally need a recache.

use glam::DVec3;

use crate::scene::DetailLevel;

/// Upper end of the rotation control range in degrees.
pub const ROTATION_RANGE: i32 = 360;

/// Pending work caused by view mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// The next frame must be drawn.
    pub redraw: bool,
    /// The compiled scene must be rebuilt before the next frame.
    pub recache: bool,
}

impl Invalidation {
    /// Nothing pending.
    pub const NONE: Self = Self {
        redraw: false,
        recache: false,
    };

    /// Frame-level change only.
    pub const REDRAW: Self = Self {
        redraw: true,
        recache: false,
    };

    /// Geometry-level change.
    pub const RECACHE: Self = Self {
        redraw: true,
        recache: true,
    };

    /// Combine two invalidations.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            redraw: self.redraw || other.redraw,
            recache: self.recache || other.recache,
        }
    }
}

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal screen axis.
    X,
    /// Vertical screen axis.
    Y,
    /// Depth axis.
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Mutable view parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    rotation: [i32; 3],
    scale: f64,
    pan: DVec3,
    eye_separation: f64,
    detail: DetailLevel,
    atom_scale: f64,
    anaglyph: bool,
    pending: Invalidation,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ViewState {
    /// Identity orientation, 100 % scale, no pan, compact detail, mono.
    #[must_use]
    pub fn new(eye_separation: f64) -> Self {
        Self {
            rotation: [0; 3],
            scale: 1.0,
            pan: DVec3::ZERO,
            eye_separation,
            detail: DetailLevel::Compact,
            atom_scale: 1.0,
            anaglyph: false,
            pending: Invalidation::NONE,
        }
    }

    // -- Accessors --

    /// Rotation about `axis` in degrees, exactly as last set.
    #[must_use]
    pub fn rotation(&self, axis: Axis) -> i32 {
        self.rotation[axis.index()]
    }

    /// Uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pan offset.
    #[must_use]
    pub fn pan(&self) -> DVec3 {
        self.pan
    }

    /// Eye separation driving stereo disparity.
    #[must_use]
    pub fn eye_separation(&self) -> f64 {
        self.eye_separation
    }

    /// Detail level requested for the scene.
    #[must_use]
    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    /// Multiplier applied to element radii.
    #[must_use]
    pub fn atom_scale(&self) -> f64 {
        self.atom_scale
    }

    /// Whether anaglyph output is enabled.
    #[must_use]
    pub fn anaglyph(&self) -> bool {
        self.anaglyph
    }

    /// Work accumulated since the last [`Self::take_invalidation`].
    #[must_use]
    pub fn pending(&self) -> Invalidation {
        self.pending
    }

    /// Return and clear the accumulated invalidation.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.pending)
    }

    /// Record an invalidation caused outside the view (e.g. a new molecule).
    pub fn invalidate(&mut self, invalidation: Invalidation) {
        self.pending = self.pending.union(invalidation);
    }

    // -- Camera setters (redraw only) --

    /// Set the rotation about `axis` in degrees. Any integer is accepted;
    /// the rotation math wraps it.
    pub fn set_rotation(&mut self, axis: Axis, degrees: i32) {
        let slot = &mut self.rotation[axis.index()];
        if *slot != degrees {
            *slot = degrees;
            self.invalidate(Invalidation::REDRAW);
        }
    }

    /// Advance the rotation about `axis` by `step` degrees. A value at the
    /// top of the control range wraps to zero first. The step is taken
    /// modulo a full turn, so any `i32` step is accepted.
    pub fn advance_rotation(&mut self, axis: Axis, step: i32) {
        let mut value = self.rotation(axis);
        if value >= ROTATION_RANGE {
            value = 0;
        }
        self.set_rotation(axis, value + step.rem_euclid(ROTATION_RANGE));
    }

    /// Set the scale from a percentage (100 → 1.0). Non-positive values are
    /// rejected.
    pub fn set_scale_percent(&mut self, percent: i32) {
        if percent <= 0 {
            log::warn!("ignoring non-positive scale {percent}%");
            return;
        }
        let scale = f64::from(percent) / 100.0;
        if self.scale != scale {
            self.scale = scale;
            self.invalidate(Invalidation::REDRAW);
        }
    }

    /// Set the pan offset.
    pub fn set_pan(&mut self, pan: DVec3) {
        if !pan.is_finite() {
            log::warn!("ignoring non-finite pan {pan}");
            return;
        }
        if self.pan != pan {
            self.pan = pan;
            self.invalidate(Invalidation::REDRAW);
        }
    }

    /// Move the pan offset by `delta`.
    pub fn pan_by(&mut self, delta: DVec3) {
        self.set_pan(self.pan + delta);
    }

    /// Set the eye separation.
    pub fn set_eye_separation(&mut self, eye_separation: f64) {
        if !eye_separation.is_finite() {
            log::warn!("ignoring non-finite eye separation");
            return;
        }
        if self.eye_separation != eye_separation {
            self.eye_separation = eye_separation;
            self.invalidate(Invalidation::REDRAW);
        }
    }

    // -- Scene setters (redraw + recache) --

    /// Set the detail level.
    pub fn set_detail(&mut self, detail: DetailLevel) {
        if self.detail != detail {
            self.detail = detail;
            self.invalidate(Invalidation::RECACHE);
        }
    }

    /// Set the atom-size scale. Non-positive or non-finite values are
    /// rejected.
    pub fn set_atom_scale(&mut self, atom_scale: f64) {
        if !(atom_scale.is_finite() && atom_scale > 0.0) {
            log::warn!("ignoring invalid atom scale {atom_scale}");
            return;
        }
        if self.atom_scale != atom_scale {
            self.atom_scale = atom_scale;
            self.invalidate(Invalidation::RECACHE);
        }
    }

    /// Enable or disable anaglyph output. Atom colors are baked into the
    /// compiled scene per mode, so this recaches.
    pub fn set_anaglyph(&mut self, anaglyph: bool) {
        if self.anaglyph != anaglyph {
            self.anaglyph = anaglyph;
            self.invalidate(Invalidation::RECACHE);
        }
    }

    /// Reset orientation, scale and pan; leaves stereo and detail alone.
    pub fn reset_camera(&mut self) {
        for axis in Axis::ALL {
            self.set_rotation(axis, 0);
        }
        self.set_scale_percent(100);
        self.set_pan(DVec3::ZERO);
    }
}
