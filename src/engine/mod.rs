//! Host-facing viewer engine.
//!
//! [`MoleculeViewer`] owns the current molecule, the element table, the view
//! state and the compiled scene cache. It talks to the host's graphics API
//! only through a [`DrawBackend`] passed into each call.

mod accessors;
/// Interactive command vocabulary.
pub mod command;
mod options;
mod scene_management;
/// View parameters and invalidation tracking.
pub mod view_state;

pub use command::ViewerCommand;
pub use view_state::{Axis, Invalidation, ViewState, ROTATION_RANGE};

use crate::camera::{Perspective, StereoCamera, Viewport};
use crate::elements::ElementTable;
use crate::molecule::Molecule;
use crate::options::Options;
use crate::renderer::{BlendMode, ColorMask, DrawBackend};
use crate::scene::{SceneCache, SceneStats};

/// Summary of one [`MoleculeViewer::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Eye passes drawn (1 mono, 2 anaglyph).
    pub passes: usize,
    /// Whether the compiled scene was rebuilt for this frame.
    pub rebuilt: bool,
    /// Commands in the compiled scene.
    pub commands: usize,
}

/// Molecule viewer driving a [`DrawBackend`].
///
/// # Frame loop
///
/// Call [`render`](Self::render) whenever [`needs_redraw`](Self::needs_redraw)
/// reports pending work, [`resize`](Self::resize) when the window size
/// changes and [`tick`](Self::tick) from the host's animation timer.
///
/// # Scene management
///
/// [`load_molecule`](Self::load_molecule) parses bytes and swaps the
/// molecule in only on success. The compiled scene is rebuilt lazily on the
/// next render, or eagerly with [`recache`](Self::recache).
pub struct MoleculeViewer<B: DrawBackend> {
    options: Options,
    elements: ElementTable,
    molecule: Molecule,
    /// Bumped on every molecule, element table or options replacement.
    generation: u64,
    view: ViewState,
    camera: StereoCamera,
    window_size: (u32, u32),
    viewport: Viewport,
    auto_rotate: [bool; 3],
    cache: SceneCache<B::ListHandle>,
    scene_stats: SceneStats,
}

impl<B: DrawBackend> MoleculeViewer<B> {
    /// Viewer with an empty molecule.
    #[must_use]
    pub fn new(options: Options, elements: ElementTable) -> Self {
        let camera = StereoCamera::from_options(&options.camera, &options.stereo);
        let mut view = ViewState::new(options.stereo.eye_separation);
        view.invalidate(Invalidation::RECACHE);
        Self {
            options,
            elements,
            molecule: Molecule::default(),
            generation: 0,
            view,
            camera,
            window_size: (1, 1),
            viewport: Viewport::default(),
            auto_rotate: [false; 3],
            cache: SceneCache::new(),
            scene_stats: SceneStats::default(),
        }
    }

    /// Recompute the viewport and projection aspect for a new window size.
    /// Everything else about the projection is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.refit_viewport();
    }

    fn refit_viewport(&mut self) {
        let (width, height) = self.window_size;
        let viewport =
            Viewport::fit(width, height, self.options.camera.square_viewport);
        if viewport != self.viewport {
            log::debug!("viewport {viewport:?}");
            self.viewport = viewport;
            self.view.invalidate(Invalidation::REDRAW);
        }
    }

    /// Projection for the current viewport, without stereo shift.
    #[must_use]
    pub fn projection(&self) -> Perspective {
        Perspective::from_options(&self.options.camera, self.viewport.aspect())
    }

    /// Draw one frame: rebuild the scene if needed, then replay it once per
    /// eye pass.
    pub fn render(&mut self, backend: &mut B) -> FrameStats {
        let pending = self.view.take_invalidation();
        if pending.recache {
            self.cache.invalidate();
        }
        let (list, rebuilt) = self.ensure_scene(backend);

        backend.set_viewport(self.viewport);
        let projection = self.projection();
        let passes = self.camera.eye_passes(&self.view, self.molecule.centroid());
        for pass in &passes {
            // Clear before masking so a color clear reaches every channel.
            backend.clear(pass.clear);
            backend.set_color_mask(pass.color_mask);
            backend.set_blend_mode(pass.blend);
            backend.set_projection(&projection.with_frustum_shift(pass.frustum_shift));
            backend.load_view(&pass.view);
            backend.call_list(list);
        }
        backend.set_color_mask(ColorMask::ALL);
        backend.set_blend_mode(BlendMode::Replace);

        let stats = FrameStats {
            passes: passes.len(),
            rebuilt,
            commands: self.scene_stats.commands,
        };
        log::trace!("frame {stats:?}");
        stats
    }

    /// Capture the current framebuffer through the backend. Returns `None`
    /// when the backend cannot capture.
    pub fn save_snapshot(&self, backend: &mut B) -> Option<B::Snapshot> {
        let snapshot = backend.capture_frame();
        if snapshot.is_none() {
            log::warn!("backend does not support frame capture");
        } else {
            log::debug!("captured frame of '{}'", self.molecule.name());
        }
        snapshot
    }

    /// Advance every auto-rotating axis by the configured step. Returns
    /// whether anything moved.
    pub fn tick(&mut self) -> bool {
        let step = self.options.camera.auto_rotate_step;
        let mut moved = false;
        for axis in Axis::ALL {
            if self.auto_rotate(axis) {
                self.view.advance_rotation(axis, step);
                moved = true;
            }
        }
        moved
    }

    /// Apply one interactive command.
    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::SetRotation { axis, degrees } => {
                self.view.set_rotation(axis, degrees);
            }
            ViewerCommand::SetScale { percent } => {
                self.view.set_scale_percent(percent);
            }
            ViewerCommand::Pan { delta } => self.view.pan_by(delta),
            ViewerCommand::ResetCamera => self.view.reset_camera(),
            ViewerCommand::SetAutoRotate { axis, enabled } => {
                self.set_auto_rotate(axis, enabled);
            }
            ViewerCommand::SetAnaglyph { enabled } => {
                self.view.set_anaglyph(enabled);
            }
            ViewerCommand::SetEyeSeparation { separation } => {
                self.view.set_eye_separation(separation);
            }
            ViewerCommand::SetDetail { detail } => self.view.set_detail(detail),
            ViewerCommand::SetAtomScale { scale } => {
                self.view.set_atom_scale(scale);
            }
            ViewerCommand::Resize { width, height } => {
                self.resize(width, height);
            }
        }
    }

    /// Free backend resources. The viewer stays usable; the next render
    /// recompiles.
    pub fn release(&mut self, backend: &mut B) {
        self.cache.release(backend);
        self.view.invalidate(Invalidation::RECACHE);
    }
}
