//! Centralized viewer options with TOML preset support.
//!
//! Camera, stereo, geometry, color and detail-selection settings live here.
//! Options serialize to/from TOML so a host can keep view presets on disk.

mod camera;
mod colors;
mod detail;
mod geometry;
mod stereo;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use detail::DetailOptions;
pub use geometry::GeometryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stereo::{StereoMode, StereoOptions};

use crate::error::StereomolError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[stereo]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Anaglyph stereo parameters.
    pub stereo: StereoOptions,
    /// Atom and bond primitive parameters.
    pub geometry: GeometryOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Detail-level selection on load.
    pub detail: DetailOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::OptionsParse`] for malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, StereomolError> {
        toml::from_str(content)
            .map_err(|e| StereomolError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::Io`] if the file cannot be read, or
    /// [`StereomolError::OptionsParse`] for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, StereomolError> {
        let content =
            std::fs::read_to_string(path).map_err(StereomolError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`StereomolError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StereomolError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StereomolError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StereomolError::Io)?;
        }
        std::fs::write(path, content).map_err(StereomolError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
