//! Options and element table methods for [`MoleculeViewer`].

use super::{Invalidation, MoleculeViewer};
use crate::camera::StereoCamera;
use crate::elements::ElementTable;
use crate::options::Options;
use crate::renderer::DrawBackend;

impl<B: DrawBackend> MoleculeViewer<B> {
    /// Replace options and apply them to the camera, viewport and scene.
    ///
    /// Geometry and color options are baked into the compiled scene, so the
    /// next render rebuilds it. The view's current eye separation is kept.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the camera and viewport and mark the
    /// scene stale.
    fn apply_options(&mut self) {
        self.camera =
            StereoCamera::from_options(&self.options.camera, &self.options.stereo);
        self.refit_viewport();
        self.generation += 1;
        self.view.invalidate(Invalidation::RECACHE);
    }

    /// Replace the element table. Atoms are recolored and resized on the
    /// next render.
    pub fn set_element_table(&mut self, elements: ElementTable) {
        log::debug!("element table replaced ({} entries)", elements.len());
        self.elements = elements;
        self.generation += 1;
        self.view.invalidate(Invalidation::RECACHE);
    }
}
