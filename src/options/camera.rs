use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and auto-rotation parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f64,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f64,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f64,
    /// Distance from the eye to the rotation pivot (and stereo convergence
    /// plane).
    #[schemars(title = "Viewing Distance", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub forward_distance: f64,
    /// Draw into the centered square of the window instead of the full
    /// window.
    #[schemars(title = "Square Viewport")]
    pub square_viewport: bool,
    /// Degrees added per auto-rotation tick on each enabled axis.
    #[schemars(title = "Auto-Rotate Step", range(min = 1, max = 10))]
    pub auto_rotate_step: i32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.01,
            zfar: 1000.0,
            forward_distance: 10.0,
            square_viewport: false,
            auto_rotate_step: 1,
        }
    }
}
