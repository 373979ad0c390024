//! Scene mirror: the 3D-primitive projection of the loaded atoms and the
//! current selection.
//!
//! Every atom becomes a sphere named `atom{index}` in the `atom_points`
//! component; every distance pair becomes a cylinder in the
//! `distance-pairs` component. The mirror is disposable: [`SceneSync`]
//! regenerates it from the selection whenever the selection changes, and
//! nothing else writes to it.

mod builder;
mod memory;
mod pick;
mod stage;
mod sync;

use glam::Vec3;

pub use builder::SceneStyle;
pub use memory::{Component, MemoryStage};
pub use pick::PickTarget;
pub use stage::Stage;
pub use sync::{SceneSync, SyncScope};

use crate::util::color::Rgb;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// Center in scene space.
    pub position: Vec3,
    /// Fill color.
    pub color: Rgb,
    /// Radius in Angstroms.
    pub radius: f32,
    /// Pickable name (`atom{index}`).
    pub name: String,
}

/// A cylinder primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    /// First end cap center.
    pub start: Vec3,
    /// Second end cap center.
    pub end: Vec3,
    /// Fill color.
    pub color: Rgb,
    /// Radius in Angstroms.
    pub radius: f32,
}

/// A named bundle of primitives, added to a stage as one component.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    /// Component name.
    pub name: String,
    /// Sphere primitives.
    pub spheres: Vec<Sphere>,
    /// Cylinder primitives.
    pub cylinders: Vec<Cylinder>,
}

impl Shape {
    /// Empty shape called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Total number of primitives.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.cylinders.len()
    }
}

/// How a component's shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Point-sprite rendering (atoms).
    Point,
    /// Raw geometry buffer (pair cylinders).
    Buffer,
}

/// A scene layer the synchronizer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// One sphere per loaded atom.
    Atoms,
    /// One cylinder per distance pair.
    Pairs,
}

impl Layer {
    /// Stage component name for the layer.
    #[must_use]
    pub fn component_name(self) -> &'static str {
        match self {
            Self::Atoms => "atom_points",
            Self::Pairs => "distance-pairs",
        }
    }

    /// How the layer is drawn.
    #[must_use]
    pub fn representation(self) -> Representation {
        match self {
            Self::Atoms => Representation::Point,
            Self::Pairs => Representation::Buffer,
        }
    }
}

/// Which layers a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerSet {
    /// The atom layer needs regenerating.
    pub atoms: bool,
    /// The pair layer needs regenerating.
    pub pairs: bool,
}

impl LayerSet {
    /// No layers.
    pub const NONE: Self = Self {
        atoms: false,
        pairs: false,
    };
    /// Atom layer only.
    pub const ATOMS: Self = Self {
        atoms: true,
        pairs: false,
    };
    /// Pair layer only.
    pub const PAIRS: Self = Self {
        atoms: false,
        pairs: true,
    };
    /// Both layers.
    pub const ALL: Self = Self {
        atoms: true,
        pairs: true,
    };

    /// Union of two sets.
    #[must_use]
    pub fn with(self, other: Self) -> Self {
        Self {
            atoms: self.atoms || other.atoms,
            pairs: self.pairs || other.pairs,
        }
    }
}

/// Pickable name of the sphere for the atom at `index`.
#[must_use]
pub fn atom_name(index: usize) -> String {
    format!("atom{index}")
}
