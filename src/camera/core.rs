use glam::{DMat4, DVec4};

use crate::options::CameraOptions;

/// Perspective projection, optionally with a horizontally shifted
/// (asymmetric) frustum for off-axis stereo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in degrees.
    pub fovy: f64,
    /// Viewport aspect ratio (width / height).
    pub aspect: f64,
    /// Near clipping plane distance.
    pub znear: f64,
    /// Far clipping plane distance.
    pub zfar: f64,
    /// Horizontal shift of the frustum window at the near plane.
    pub frustum_shift: f64,
}

impl Perspective {
    /// Symmetric projection from camera options.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f64) -> Self {
        Self {
            fovy: options.fovy,
            aspect,
            znear: options.znear,
            zfar: options.zfar,
            frustum_shift: 0.0,
        }
    }

    /// Copy with the given frustum shift.
    #[must_use]
    pub fn with_frustum_shift(mut self, frustum_shift: f64) -> Self {
        self.frustum_shift = frustum_shift;
        self
    }

    /// GL-convention projection matrix (clip depth in `[-1, 1]`).
    #[must_use]
    pub fn matrix(&self) -> DMat4 {
        let (n, f) = (self.znear, self.zfar);
        let top = n * (self.fovy.to_radians() / 2.0).tan();
        let half_width = top * self.aspect;
        let left = -half_width + self.frustum_shift;
        let right = half_width + self.frustum_shift;
        let bottom = -top;

        DMat4::from_cols(
            DVec4::new(2.0 * n / (right - left), 0.0, 0.0, 0.0),
            DVec4::new(0.0, 2.0 * n / (top - bottom), 0.0, 0.0),
            DVec4::new(
                (right + left) / (right - left),
                (top + bottom) / (top - bottom),
                -(f + n) / (f - n),
                -1.0,
            ),
            DVec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
        )
    }
}

/// Viewport rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Viewport for a window of the given size: the full window, or the
    /// centered square of side `min(width, height)`. Zero dimensions are
    /// clamped to one pixel.
    #[must_use]
    pub fn fit(width: u32, height: u32, square: bool) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        if square {
            let side = width.min(height);
            Self {
                x: ((width - side) / 2) as i32,
                y: ((height - side) / 2) as i32,
                width: side,
                height: side,
            }
        } else {
            Self {
                x: 0,
                y: 0,
                width,
                height,
            }
        }
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::fit(1, 1, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_frustum_matches_gl_perspective() {
        let p = Perspective {
            fovy: 45.0,
            aspect: 1.5,
            znear: 0.01,
            zfar: 1000.0,
            frustum_shift: 0.0,
        };
        let expected =
            DMat4::perspective_rh_gl(45.0_f64.to_radians(), 1.5, 0.01, 1000.0);
        assert!(p.matrix().abs_diff_eq(expected, 1e-9));
    }

    #[test]
    fn shifted_frustum_moves_center() {
        let p = Perspective::from_options(&CameraOptions::default(), 1.0)
            .with_frustum_shift(0.001);
        let m = p.matrix();
        // The column that maps view-space depth into clip x is no longer 0.
        assert!(m.z_axis.x > 0.0);
        assert_eq!(m.z_axis.y, 0.0);
    }

    #[test]
    fn viewport_fit() {
        assert_eq!(
            Viewport::fit(800, 600, false),
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
        assert_eq!(
            Viewport::fit(800, 600, true),
            Viewport {
                x: 100,
                y: 0,
                width: 600,
                height: 600
            }
        );
        let degenerate = Viewport::fit(640, 0, false);
        assert_eq!(degenerate.height, 1);
        assert!(degenerate.aspect().is_finite());
    }
}
