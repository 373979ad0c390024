use rustc_hash::FxHashSet;

use super::{atom_name, Cylinder, Layer, Shape, Sphere};
use crate::model::{AtomRecord, DistancePair};
use crate::options::{ColorOptions, GeometryOptions, Options};
use crate::util::color::brighten;

/// Palette and sizes used to turn atoms and pairs into primitives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneStyle {
    /// Element palette.
    pub colors: ColorOptions,
    /// Primitive sizes.
    pub geometry: GeometryOptions,
}

impl SceneStyle {
    /// Style taken from the runtime options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self {
            colors: options.colors.clone(),
            geometry: options.geometry.clone(),
        }
    }

    /// One sphere per atom, keyed by array index. Picked atoms are larger
    /// and brighter.
    #[must_use]
    pub fn atom_layer(&self, atoms: &[AtomRecord], picked: &FxHashSet<usize>) -> Shape {
        let g = &self.geometry;
        let mut shape = Shape::new(Layer::Atoms.component_name());
        shape.spheres = atoms
            .iter()
            .enumerate()
            .map(|(index, atom)| {
                let base = self.colors.element_color(atom.element);
                let (color, radius) = if picked.contains(&index) {
                    (brighten(base, g.picked_brighten), g.picked_atom_radius)
                } else {
                    (base, g.atom_radius)
                };
                Sphere {
                    position: atom.scene_position(),
                    color,
                    radius,
                    name: atom_name(index),
                }
            })
            .collect();
        shape
    }

    /// One cylinder per pair, or `None` when there are no pairs.
    #[must_use]
    pub fn pair_layer(&self, pairs: &[DistancePair]) -> Option<Shape> {
        if pairs.is_empty() {
            return None;
        }
        let g = &self.geometry;
        let mut shape = Shape::new(Layer::Pairs.component_name());
        shape.cylinders = pairs
            .iter()
            .map(|pair| Cylinder {
                start: pair.atom1.atom.scene_position(),
                end: pair.atom2.atom.scene_position(),
                color: g.pair_color,
                radius: g.pair_radius,
            })
            .collect();
        Some(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::three_atoms;
    use crate::model::PickedAtom;

    #[test]
    fn picked_atoms_are_larger_and_brighter() {
        let style = SceneStyle::default();
        let picked: FxHashSet<usize> = [0].into_iter().collect();
        let shape = style.atom_layer(&three_atoms(), &picked);

        assert_eq!(shape.name, "atom_points");
        assert_eq!(shape.spheres.len(), 3);
        assert_eq!(shape.spheres[0].radius, 0.75);
        assert_eq!(shape.spheres[0].color, [0.6, 0.6, 0.6]);
        assert_eq!(shape.spheres[1].radius, 0.5);
        assert_eq!(shape.spheres[1].color, [0.0, 0.0, 1.0]);
        assert_eq!(shape.spheres[2].name, "atom2");
    }

    #[test]
    fn no_pairs_means_no_pair_layer() {
        let style = SceneStyle::default();
        assert!(style.pair_layer(&[]).is_none());

        let atoms = three_atoms();
        let pair = DistancePair::between(
            PickedAtom::new(atoms[0].clone(), 0),
            PickedAtom::new(atoms[1].clone(), 1),
        );
        let shape = style.pair_layer(&[pair]).unwrap();
        assert_eq!(shape.cylinders.len(), 1);
        assert_eq!(shape.cylinders[0].color, [1.0, 1.0, 0.0]);
        assert_eq!(shape.cylinders[0].radius, 0.1);
    }
}
