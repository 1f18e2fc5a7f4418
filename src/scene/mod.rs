//! Compiled scene: command-list construction, caching and inspection.
//!
//! The [`builder`] turns a molecule into a flat [`DrawCommand`] list for one
//! [`DetailLevel`]. The [`cache`] owns the backend handle of the compiled
//! list and rebuilds only when a [`SceneKey`] input changes. [`replay`]
//! resolves a command list back into world-space primitives.

pub mod builder;
pub mod cache;
pub mod replay;

pub use builder::SceneBuilder;
pub use cache::{CacheState, SceneCache};
pub use replay::{resolve, Primitive};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::DetailOptions;
use crate::renderer::DrawCommand;

// ---------------------------------------------------------------------------
// Detail level
// ---------------------------------------------------------------------------

/// How much geometry the scene carries.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Cylinders for bonds, full spheres or stroke glyphs for atoms.
    #[default]
    Compact,
    /// Line bonds, small low-resolution spheres, text labels.
    Standard,
    /// Line bonds only.
    Wire,
}

impl DetailLevel {
    /// Level recommended for a molecule of `atom_count` atoms.
    #[must_use]
    pub fn advised(atom_count: usize, options: &DetailOptions) -> Self {
        options.advised(atom_count)
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Standard => "standard",
            Self::Wire => "wire",
        }
    }
}

// ---------------------------------------------------------------------------
// Build inputs
// ---------------------------------------------------------------------------

/// View-dependent inputs baked into a compiled scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    /// Geometry detail.
    pub detail: DetailLevel,
    /// Multiplier on element radii.
    pub atom_scale: f64,
    /// Use per-element secondary (stereo) colors.
    pub stereo: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            detail: DetailLevel::Compact,
            atom_scale: 1.0,
            stereo: false,
        }
    }
}

/// Identity of a compiled scene. Two builds with equal keys produce equal
/// command lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneKey {
    /// Generation of the molecule the scene was built from.
    pub generation: u64,
    /// Geometry detail.
    pub detail: DetailLevel,
    /// Bit pattern of the atom scale, so the key stays `Eq`.
    pub atom_scale_bits: u64,
    /// Stereo colors.
    pub stereo: bool,
}

impl SceneKey {
    /// Key for `params` applied to molecule generation `generation`.
    #[must_use]
    pub fn new(generation: u64, params: SceneParams) -> Self {
        Self {
            generation,
            detail: params.detail,
            atom_scale_bits: params.atom_scale.to_bits(),
            stereo: params.stereo,
        }
    }
}

/// Counts describing a built command list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStats {
    /// Total commands.
    pub commands: usize,
    /// Sphere primitives.
    pub spheres: usize,
    /// Cylinder primitives.
    pub cylinders: usize,
    /// Line segments.
    pub line_segments: usize,
    /// Stroke glyphs and screen labels.
    pub texts: usize,
}

impl SceneStats {
    /// Count the primitives of a command list.
    #[must_use]
    pub fn of(commands: &[DrawCommand]) -> Self {
        let mut stats = Self {
            commands: commands.len(),
            ..Self::default()
        };
        for command in commands {
            match command {
                DrawCommand::Sphere { .. } => stats.spheres += 1,
                DrawCommand::Cylinder { .. } => stats.cylinders += 1,
                DrawCommand::Lines(segments) => {
                    stats.line_segments += segments.len();
                }
                DrawCommand::StrokeText { .. } | DrawCommand::Label { .. } => {
                    stats.texts += 1;
                }
                DrawCommand::SetColor(_)
                | DrawCommand::PushMatrix
                | DrawCommand::PopMatrix
                | DrawCommand::MultMatrix(_) => {}
            }
        }
        stats
    }
}

impl std::fmt::Display for SceneStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} commands ({} spheres, {} cylinders, {} line segments, {} texts)",
            self.commands,
            self.spheres,
            self.cylinders,
            self.line_segments,
            self.texts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct DetailOnly {
        detail: DetailLevel,
    }

    #[test]
    fn detail_level_serializes_snake_case() {
        let toml_str = toml::to_string(&DetailOnly {
            detail: DetailLevel::Standard,
        })
        .unwrap();
        assert_eq!(toml_str.trim(), "detail = \"standard\"");
    }

    #[test]
    fn stats_count_primitives() {
        let commands = vec![
            DrawCommand::SetColor([1.0; 3]),
            DrawCommand::Lines(vec![[glam::DVec3::ZERO, glam::DVec3::X]; 3]),
            DrawCommand::Sphere {
                radius: 1.0,
                slices: 8,
                stacks: 8,
            },
            DrawCommand::Label {
                text: "X".to_owned(),
                position: glam::DVec3::ZERO,
            },
        ];
        let stats = SceneStats::of(&commands);
        assert_eq!(stats.commands, 4);
        assert_eq!(stats.line_segments, 3);
        assert_eq!(stats.spheres, 1);
        assert_eq!(stats.texts, 1);
        assert_eq!(stats.cylinders, 0);
    }

    #[test]
    fn key_distinguishes_every_input() {
        let base = SceneKey::new(1, SceneParams::default());
        assert_ne!(base, SceneKey::new(2, SceneParams::default()));
        assert_ne!(
            base,
            SceneKey::new(
                1,
                SceneParams {
                    detail: DetailLevel::Wire,
                    ..SceneParams::default()
                }
            )
        );
        assert_ne!(
            base,
            SceneKey::new(
                1,
                SceneParams {
                    atom_scale: 1.5,
                    ..SceneParams::default()
                }
            )
        );
        assert_ne!(
            base,
            SceneKey::new(
                1,
                SceneParams {
                    stereo: true,
                    ..SceneParams::default()
                }
            )
        );
        assert_eq!(base, SceneKey::new(1, SceneParams::default()));
    }

    #[test]
    fn advised_delegates_to_options() {
        let options = DetailOptions {
            auto_select: true,
            compact_below: 5,
            wire_above: 10,
        };
        assert_eq!(DetailLevel::advised(4, &options), DetailLevel::Compact);
        assert_eq!(DetailLevel::advised(5, &options), DetailLevel::Standard);
        assert_eq!(DetailLevel::advised(11, &options), DetailLevel::Wire);
    }
}
