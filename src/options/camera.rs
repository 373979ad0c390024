use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and focus-transition parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Duration of center-on-atom/pair transitions in milliseconds.
    #[schemars(title = "Focus Duration", range(min = 0, max = 5000))]
    pub focus_duration_ms: u64,
    /// Centering on an atom zooms to the current eye distance divided by
    /// this.
    #[schemars(title = "Atom Zoom Divisor", range(min = 1.0, max = 10.0), extend("step" = 0.5))]
    pub atom_zoom_divisor: f32,
    /// Centering on a pair zooms to the pair separation times this.
    #[schemars(title = "Pair Zoom Factor", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub pair_zoom_factor: f32,
    /// Padding applied when fitting the whole molecule into view.
    #[schemars(skip)]
    pub fit_padding: f32,
    /// Easing curve for focus transitions.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            focus_duration_ms: 1000,
            atom_zoom_divisor: 4.0,
            pair_zoom_factor: 5.0,
            fit_padding: 1.5,
            easing: EasingFunction::DEFAULT,
        }
    }
}
