//! Molecule replacement and scene compilation for [`MoleculeViewer`].

use std::path::Path;

use super::{Invalidation, MoleculeViewer};
use crate::error::StereomolError;
use crate::molecule::{self, Molecule};
use crate::renderer::DrawBackend;
use crate::scene::{SceneBuilder, SceneKey, SceneParams, SceneStats};

impl<B: DrawBackend> MoleculeViewer<B> {
    /// Parse `bytes` and, on success, replace the current molecule and
    /// recache. On failure the previous molecule and its compiled scene are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::Parse`] if the bytes are not a valid
    /// molecule file.
    pub fn load_molecule(
        &mut self,
        backend: &mut B,
        bytes: &[u8],
    ) -> Result<(), StereomolError> {
        let molecule = molecule::parse(bytes)?;
        self.set_molecule(backend, molecule);
        Ok(())
    }

    /// Read and load a molecule file.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::Parse`] for unreadable or malformed files.
    pub fn load_file(
        &mut self,
        backend: &mut B,
        path: &Path,
    ) -> Result<(), StereomolError> {
        let molecule = molecule::load(path)?;
        self.set_molecule(backend, molecule);
        Ok(())
    }

    /// Replace the current molecule with an already built one and recache.
    ///
    /// The previous compiled list is freed before the old molecule is
    /// dropped. With automatic detail enabled the detail level follows the
    /// new atom count.
    pub fn set_molecule(&mut self, backend: &mut B, molecule: Molecule) {
        self.cache.release(backend);
        log::info!(
            "loaded '{}': {} atoms, {} bonds, centroid {}",
            molecule.name(),
            molecule.atom_count(),
            molecule.bond_count(),
            molecule.centroid()
        );
        self.molecule = molecule;
        self.generation += 1;
        if self.options.detail.auto_select {
            let detail = self.options.detail.advised(self.molecule.atom_count());
            self.view.set_detail(detail);
        }
        let _ = self.recache(backend);
    }

    /// Rebuild the compiled scene now, regardless of pending state. Returns
    /// whether a new list was compiled.
    pub fn recache(&mut self, backend: &mut B) -> bool {
        // The rebuild satisfies any pending recache; a redraw is still owed.
        let _ = self.view.take_invalidation();
        self.cache.invalidate();
        let (_, rebuilt) = self.ensure_scene(backend);
        self.view.invalidate(Invalidation::REDRAW);
        rebuilt
    }

    /// Build inputs derived from the current view.
    #[must_use]
    pub fn scene_params(&self) -> SceneParams {
        SceneParams {
            detail: self.view.detail(),
            atom_scale: self.view.atom_scale(),
            stereo: self.view.anaglyph(),
        }
    }

    /// Key the next compiled scene will carry.
    #[must_use]
    pub fn scene_key(&self) -> SceneKey {
        SceneKey::new(self.generation, self.scene_params())
    }

    /// Return the compiled list, building it first when the cache is empty,
    /// dirty or keyed differently.
    pub(super) fn ensure_scene(&mut self, backend: &mut B) -> (B::ListHandle, bool) {
        let params = self.scene_params();
        let key = self.scene_key();
        let molecule = &self.molecule;
        let elements = &self.elements;
        let options = &self.options;
        let scene_stats = &mut self.scene_stats;
        self.cache.ensure(backend, key, || {
            let commands =
                SceneBuilder::new(molecule, elements, options).build(params);
            *scene_stats = SceneStats::of(&commands);
            log::debug!(
                "{} scene for '{}': {scene_stats}",
                params.detail.name(),
                molecule.name()
            );
            commands
        })
    }
}
