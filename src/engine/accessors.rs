//! Read-only queries and small state toggles for [`MoleculeViewer`].

use super::{Axis, MoleculeViewer, ViewState};
use crate::camera::{StereoCamera, Viewport};
use crate::elements::ElementTable;
use crate::molecule::Molecule;
use crate::options::Options;
use crate::renderer::DrawBackend;
use crate::scene::{CacheState, SceneStats};

// ── Model ──

impl<B: DrawBackend> MoleculeViewer<B> {
    /// The displayed molecule (empty until the first successful load).
    #[must_use]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Counter bumped whenever a scene input other than the view changes.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Active element table.
    #[must_use]
    pub fn elements(&self) -> &ElementTable {
        &self.elements
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

// ── View ──

impl<B: DrawBackend> MoleculeViewer<B> {
    /// Current view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Mutable view state. Changes are picked up by the next render.
    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Stereo camera derived from the options.
    #[must_use]
    pub fn camera(&self) -> &StereoCamera {
        &self.camera
    }

    /// Current viewport rectangle.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether a view change is waiting for [`render`](Self::render).
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.view.pending().redraw
    }

    /// Whether [`tick`](Self::tick) rotates about `axis`.
    #[must_use]
    pub fn auto_rotate(&self, axis: Axis) -> bool {
        self.auto_rotate[axis.index()]
    }

    /// Enable or disable timed rotation about `axis`.
    pub fn set_auto_rotate(&mut self, axis: Axis, enabled: bool) {
        self.auto_rotate[axis.index()] = enabled;
    }
}

// ── Scene ──

impl<B: DrawBackend> MoleculeViewer<B> {
    /// Lifecycle state of the compiled scene.
    #[must_use]
    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Statistics of the most recently built scene.
    #[must_use]
    pub fn scene_stats(&self) -> SceneStats {
        self.scene_stats
    }
}
