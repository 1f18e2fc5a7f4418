//! Eye transforms for mono and red/cyan anaglyph rendering.
//!
//! Both eyes replay the same compiled scene. The left eye writes red only
//! and clears color and depth; the right eye writes green and blue, clears
//! depth only and blends additively, so overlapping regions sum toward
//! white instead of occluding each other.

use glam::{DMat4, DVec3};

use crate::engine::{Axis, ViewState};
use crate::options::{CameraOptions, StereoMode, StereoOptions};
use crate::renderer::{BlendMode, ClearFlags, ColorMask};

/// Which eye a pass renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    /// Single centered camera.
    Mono,
    /// Left (red) eye.
    Left,
    /// Right (cyan) eye.
    Right,
}

/// Everything the backend needs to draw one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePass {
    /// Eye rendered by this pass.
    pub eye: Eye,
    /// View matrix applied before the compiled scene.
    pub view: DMat4,
    /// Channels written.
    pub color_mask: ColorMask,
    /// Buffers cleared before drawing.
    pub clear: ClearFlags,
    /// Blend mode while drawing.
    pub blend: BlendMode,
    /// Horizontal frustum shift at the near plane (off-axis stereo only).
    pub frustum_shift: f64,
}

/// Stereo camera model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoCamera {
    /// Distance from the eyes to the pivot; also the convergence distance.
    pub forward_distance: f64,
    /// Half-shift per unit of eye separation.
    pub shift_per_unit: f64,
    /// Near plane, used to size off-axis frustum shifts.
    pub znear: f64,
    /// Convergence model.
    pub mode: StereoMode,
}

impl StereoCamera {
    /// Build the camera from options.
    #[must_use]
    pub fn from_options(camera: &CameraOptions, stereo: &StereoOptions) -> Self {
        Self {
            forward_distance: camera.forward_distance,
            shift_per_unit: stereo.shift_per_unit,
            znear: camera.znear,
            mode: stereo.mode,
        }
    }

    /// Horizontal half-shift `s = k·e` of each eye.
    #[must_use]
    pub fn half_shift(&self, eye_separation: f64) -> f64 {
        self.shift_per_unit * eye_separation
    }

    /// Toe-in convergence angle in degrees.
    #[must_use]
    pub fn convergence_degrees(&self, eye_separation: f64) -> f64 {
        (self.half_shift(eye_separation) / self.forward_distance)
            .atan()
            .to_degrees()
    }

    /// Pan, scale, Z/Y/X rotation and centering shared by every eye.
    #[must_use]
    pub fn model_chain(view: &ViewState, centroid: DVec3) -> DMat4 {
        let angle = |axis| f64::from(view.rotation(axis)).to_radians();
        DMat4::from_translation(-view.pan())
            * DMat4::from_scale(DVec3::splat(view.scale()))
            * DMat4::from_rotation_z(angle(Axis::Z))
            * DMat4::from_rotation_y(angle(Axis::Y))
            * DMat4::from_rotation_x(angle(Axis::X))
            * DMat4::from_translation(-centroid)
    }

    /// View matrix of the single mono camera.
    #[must_use]
    pub fn mono_view(&self, view: &ViewState, centroid: DVec3) -> DMat4 {
        DMat4::from_translation(DVec3::new(0.0, 0.0, -self.forward_distance))
            * Self::model_chain(view, centroid)
    }

    /// One pass in mono mode, two (left then right) with anaglyph enabled.
    #[must_use]
    pub fn eye_passes(&self, view: &ViewState, centroid: DVec3) -> Vec<EyePass> {
        if !view.anaglyph() {
            return vec![EyePass {
                eye: Eye::Mono,
                view: self.mono_view(view, centroid),
                color_mask: ColorMask::ALL,
                clear: ClearFlags::ALL,
                blend: BlendMode::Replace,
                frustum_shift: 0.0,
            }];
        }

        let chain = Self::model_chain(view, centroid);
        let s = self.half_shift(view.eye_separation());
        vec![
            EyePass {
                eye: Eye::Left,
                color_mask: ColorMask::RED,
                clear: ClearFlags::ALL,
                blend: BlendMode::Replace,
                ..self.eye_pass(s, chain)
            },
            EyePass {
                eye: Eye::Right,
                color_mask: ColorMask::CYAN,
                clear: ClearFlags::DEPTH,
                blend: BlendMode::Additive,
                ..self.eye_pass(-s, chain)
            },
        ]
    }

    /// View and frustum shift for an eye whose scene is shifted by `shift`
    /// (positive for the left eye).
    fn eye_pass(&self, shift: f64, chain: DMat4) -> EyePass {
        let offset = DMat4::from_translation(DVec3::new(
            shift,
            0.0,
            -self.forward_distance,
        ));
        let (view, frustum_shift) = match self.mode {
            StereoMode::ToeIn => {
                let theta = (shift / self.forward_distance).atan();
                (DMat4::from_rotation_y(theta) * offset * chain, 0.0)
            }
            StereoMode::OffAxis => (
                offset * chain,
                shift * self.znear / self.forward_distance,
            ),
        };
        EyePass {
            eye: Eye::Mono,
            view,
            color_mask: ColorMask::ALL,
            clear: ClearFlags::ALL,
            blend: BlendMode::Replace,
            frustum_shift,
        }
    }
}

impl Default for StereoCamera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), &StereoOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn stereo_view() -> ViewState {
        let mut view = ViewState::default();
        view.set_anaglyph(true);
        view
    }

    #[test]
    fn mono_places_centroid_at_look_at_point() {
        let camera = StereoCamera::default();
        let centroid = DVec3::new(3.0, -1.0, 7.5);
        let passes = camera.eye_passes(&ViewState::default(), centroid);
        assert_eq!(passes.len(), 1);
        let pass = passes[0];
        assert_eq!(pass.eye, Eye::Mono);
        assert_eq!(pass.color_mask, ColorMask::ALL);
        let eye_space = pass.view.transform_point3(centroid);
        assert!(eye_space.abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), EPS));
    }

    #[test]
    fn rotation_pivots_about_centroid() {
        let camera = StereoCamera::default();
        let centroid = DVec3::new(1.0, 2.0, 3.0);
        let mut view = ViewState::default();
        view.set_rotation(Axis::X, 37);
        view.set_rotation(Axis::Y, -400);
        view.set_rotation(Axis::Z, 90);
        let m = camera.mono_view(&view, centroid);
        assert!(m
            .transform_point3(centroid)
            .abs_diff_eq(DVec3::new(0.0, 0.0, -10.0), EPS));
    }

    #[test]
    fn rotation_order_is_z_then_y_then_x() {
        let mut view = ViewState::default();
        view.set_rotation(Axis::X, 90);
        view.set_rotation(Axis::Z, 90);
        let chain = StereoCamera::model_chain(&view, DVec3::ZERO);
        // X first: +Y -> +Z, then Z leaves +Z alone.
        assert!(chain.transform_point3(DVec3::Y).abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn scale_and_pan_apply_after_centering() {
        let camera = StereoCamera::default();
        let mut view = ViewState::default();
        view.set_scale_percent(200);
        view.set_pan(DVec3::new(1.0, 0.5, 0.0));
        let m = camera.mono_view(&view, DVec3::ZERO);
        let p = m.transform_point3(DVec3::X);
        assert!(p.abs_diff_eq(DVec3::new(1.0, -0.5, -10.0), EPS));
    }

    #[test]
    fn stereo_has_two_disjoint_passes_with_depth_clear() {
        let camera = StereoCamera::default();
        let passes = camera.eye_passes(&stereo_view(), DVec3::ZERO);
        assert_eq!(passes.len(), 2);
        let (left, right) = (passes[0], passes[1]);
        assert_eq!(left.eye, Eye::Left);
        assert_eq!(right.eye, Eye::Right);
        assert!(left.color_mask.color_disjoint(&right.color_mask));
        assert_eq!(left.color_mask, ColorMask::RED);
        assert_eq!(right.color_mask, ColorMask::CYAN);
        assert!(left.clear.depth && left.clear.color);
        assert!(right.clear.depth && !right.clear.color);
        assert_eq!(left.blend, BlendMode::Replace);
        assert_eq!(right.blend, BlendMode::Additive);
    }

    #[test]
    fn toe_in_eyes_converge_on_pivot() {
        let camera = StereoCamera::default();
        let centroid = DVec3::new(-2.0, 4.0, 1.0);
        let passes = camera.eye_passes(&stereo_view(), centroid);
        let s = camera.half_shift(100.0);
        assert!((s - 0.2).abs() < EPS);
        let theta = camera.convergence_degrees(100.0);
        assert!((theta - (0.2_f64 / 10.0).atan().to_degrees()).abs() < EPS);

        for pass in passes {
            let p = pass.view.transform_point3(centroid);
            // Pivot lies on each eye's view axis at the convergence distance.
            assert!(p.x.abs() < EPS);
            assert!(p.y.abs() < EPS);
            assert!((p.length() - 10.0_f64.hypot(s)).abs() < EPS);
            assert_eq!(pass.frustum_shift, 0.0);
        }
    }

    #[test]
    fn eyes_mirror_each_other() {
        let camera = StereoCamera::default();
        let passes = camera.eye_passes(&stereo_view(), DVec3::ZERO);
        let probe = DVec3::new(0.3, 0.7, -1.1);
        let l = passes[0].view.transform_point3(probe);
        let r = passes[1].view.transform_point3(DVec3::new(-probe.x, probe.y, probe.z));
        assert!(l.abs_diff_eq(DVec3::new(-r.x, r.y, r.z), EPS));
    }

    #[test]
    fn off_axis_shifts_frustum_without_rotation() {
        let options = StereoOptions {
            mode: StereoMode::OffAxis,
            ..StereoOptions::default()
        };
        let camera = StereoCamera::from_options(&CameraOptions::default(), &options);
        let passes = camera.eye_passes(&stereo_view(), DVec3::ZERO);
        let s = camera.half_shift(100.0);
        let expected = s * camera.znear / camera.forward_distance;
        assert!((passes[0].frustum_shift - expected).abs() < EPS);
        assert!((passes[1].frustum_shift + expected).abs() < EPS);
        let p = passes[0].view.transform_point3(DVec3::ZERO);
        assert!(p.abs_diff_eq(DVec3::new(s, 0.0, -10.0), EPS));
    }

    #[test]
    fn zero_separation_matches_mono() {
        let camera = StereoCamera::default();
        let mut view = stereo_view();
        view.set_eye_separation(0.0);
        let mono = camera.mono_view(&view, DVec3::ONE);
        for pass in camera.eye_passes(&view, DVec3::ONE) {
            assert!(pass.view.abs_diff_eq(mono, EPS));
        }
    }
}
