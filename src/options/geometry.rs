use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Rgb;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Sizes and colors of the scene primitives.
pub struct GeometryOptions {
    /// Sphere radius for unpicked atoms.
    #[schemars(title = "Atom Radius", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub atom_radius: f32,
    /// Sphere radius for picked atoms.
    #[schemars(title = "Picked Atom Radius", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub picked_atom_radius: f32,
    /// Channel multiplier applied to picked atoms (clamped to 1.0).
    #[schemars(title = "Picked Brightness", range(min = 1.0, max = 2.0), extend("step" = 0.05))]
    pub picked_brighten: f32,
    /// Cylinder radius for distance pairs.
    #[schemars(title = "Pair Radius", range(min = 0.02, max = 0.5), extend("step" = 0.01))]
    pub pair_radius: f32,
    /// Cylinder color for distance pairs.
    #[schemars(skip)]
    pub pair_color: Rgb,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            atom_radius: 0.5,
            picked_atom_radius: 0.75,
            picked_brighten: 1.2,
            pair_radius: 0.1,
            pair_color: [1.0, 1.0, 0.0],
        }
    }
}
