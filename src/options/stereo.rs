use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the two anaglyph eyes converge.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StereoMode {
    /// Rotate each eye inward so the view axes cross at the pivot.
    #[default]
    ToeIn,
    /// Keep the view axes parallel and shift each eye's frustum.
    OffAxis,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stereo", inline)]
#[serde(default)]
/// Anaglyph stereo parameters.
pub struct StereoOptions {
    /// Eye separation applied to a freshly created view.
    #[schemars(title = "Eye Separation", range(min = 0.0, max = 300.0), extend("step" = 1.0))]
    pub eye_separation: f64,
    /// Horizontal half-shift per unit of eye separation.
    #[schemars(skip)]
    pub shift_per_unit: f64,
    /// Convergence model.
    #[schemars(title = "Convergence")]
    pub mode: StereoMode,
}

impl Default for StereoOptions {
    fn default() -> Self {
        Self {
            eye_separation: 100.0,
            shift_per_unit: 0.002,
            mode: StereoMode::ToeIn,
        }
    }
}
