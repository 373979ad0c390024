//! Atom records, picked atoms, distance pairs and the persisted selection
//! state.
//!
//! Field names follow the backend's JSON payloads so records round-trip
//! through the URL fragment unchanged.

use std::fmt;

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque atom identifier assigned by the backend database.
///
/// The backend emits integer keys, but nothing here depends on that, so
/// string keys are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AtomId {
    /// Numeric database key.
    Number(i64),
    /// Textual database key.
    Text(String),
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for AtomId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// One atom of a loaded molecule, as returned by `GET /get_molecule/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRecord {
    /// Database identifier.
    pub id: AtomId,
    /// Atomic number.
    pub element: u32,
    /// X coordinate (Angstroms).
    pub x: f64,
    /// Y coordinate (Angstroms).
    pub y: f64,
    /// Z coordinate (Angstroms).
    pub z: f64,
    /// Provenance tag of the source system (e.g. ligand or protein).
    #[serde(default)]
    pub origin: String,
    /// Optional atom type column.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl AtomRecord {
    /// Coordinates as a double-precision vector.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Coordinates in scene space.
    #[must_use]
    pub fn scene_position(&self) -> Vec3 {
        self.position().as_vec3()
    }

    /// Euclidean distance to another atom.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position().distance(other.position())
    }
}

/// An atom the user picked, tagged with its position in the loaded atom
/// array.
///
/// `index` is the stable key: it names the scene primitive (`atom{index}`)
/// and decides selection membership. List positions shift on deletion,
/// `index` never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickedAtom {
    /// The underlying atom record.
    #[serde(flatten)]
    pub atom: AtomRecord,
    /// Position of the atom in the loaded atom array.
    pub index: usize,
}

impl PickedAtom {
    /// Tag `atom` with its scene index.
    #[must_use]
    pub fn new(atom: AtomRecord, index: usize) -> Self {
        Self { atom, index }
    }
}

/// A distance constraint between two picked atoms.
///
/// `distance` is computed once, when the pair is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistancePair {
    /// First atom.
    pub atom1: PickedAtom,
    /// Second atom.
    pub atom2: PickedAtom,
    /// Euclidean separation at creation time (Angstroms).
    pub distance: f64,
}

impl DistancePair {
    /// Build a pair and cache the separation of the two atoms.
    #[must_use]
    pub fn between(atom1: PickedAtom, atom2: PickedAtom) -> Self {
        let distance = atom1.atom.distance_to(&atom2.atom);
        Self {
            atom1,
            atom2,
            distance,
        }
    }

    /// Whether either end of the pair is the atom at scene `index`.
    #[must_use]
    pub fn references(&self, index: usize) -> bool {
        self.atom1.index == index || self.atom2.index == index
    }

    /// Midpoint of the two atoms in scene space.
    #[must_use]
    pub fn midpoint(&self) -> Vec3 {
        ((self.atom1.atom.position() + self.atom2.atom.position()) * 0.5)
            .as_vec3()
    }
}

/// The unit written to and restored from the URL fragment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Identifier of the molecule the selection was made on.
    pub pdb_id: String,
    /// Picked atoms in pick order.
    pub picked_atoms: Vec<PickedAtom>,
    /// Distance pairs in creation order.
    pub distance_pairs: Vec<DistancePair>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{AtomId, AtomRecord};

    /// A carbon-ish atom at the given coordinates.
    pub(crate) fn atom(id: i64, element: u32, x: f64, y: f64, z: f64) -> AtomRecord {
        AtomRecord {
            id: AtomId::Number(id),
            element,
            x,
            y,
            z,
            origin: "ligand".to_owned(),
            kind: None,
        }
    }

    /// Three atoms of a small molecule: C at the origin, N on +x, O off-axis.
    pub(crate) fn three_atoms() -> Vec<AtomRecord> {
        vec![
            atom(101, 6, 0.0, 0.0, 0.0),
            atom(102, 7, 1.5, 0.0, 0.0),
            atom(103, 8, 1.0, 2.0, 2.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{atom, three_atoms};
    use super::*;

    #[test]
    fn distance_is_euclidean_norm() {
        let atoms = three_atoms();
        let pair = DistancePair::between(
            PickedAtom::new(atoms[0].clone(), 0),
            PickedAtom::new(atoms[2].clone(), 2),
        );
        assert!((pair.distance - 3.0).abs() < 1e-12);
        assert!(pair.references(0));
        assert!(pair.references(2));
        assert!(!pair.references(1));
    }

    #[test]
    fn distance_handles_negative_coordinates() {
        let a = atom(1, 6, -1.25, 4.0, -3.5);
        let b = atom(2, 6, 2.75, -2.0, 8.5);
        let dx: f64 = -1.25 - 2.75;
        let dy: f64 = 4.0 - -2.0;
        let dz: f64 = -3.5 - 8.5;
        let expected = (dx * dx + dy * dy + dz * dz).sqrt();
        assert!((a.distance_to(&b) - expected).abs() < 1e-12);
    }

    #[test]
    fn picked_atom_serializes_flat() {
        let picked = PickedAtom::new(atom(7, 8, 1.0, 2.0, 3.0), 4);
        let value = serde_json::to_value(&picked).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["element"], 8);
        assert_eq!(value["index"], 4);
        assert_eq!(value["origin"], "ligand");
        assert!(value.get("type").is_none());
    }

    #[test]
    fn atom_record_accepts_backend_payload() {
        let json = r#"{"id": "A17", "element": 16, "type": "SG",
                       "origin": "protein", "x": 1, "y": -2.5, "z": 0.25}"#;
        let rec: AtomRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.id, AtomId::Text("A17".to_owned()));
        assert_eq!(rec.kind.as_deref(), Some("SG"));
        assert_eq!(rec.x, 1.0);
        assert_eq!(rec.id.to_string(), "A17");
    }

    #[test]
    fn selection_state_uses_camel_case_keys() {
        let state = SelectionState {
            pdb_id: "1ABC".to_owned(),
            ..SelectionState::default()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["pdbId"], "1ABC");
        assert!(value["pickedAtoms"].as_array().unwrap().is_empty());
        assert!(value["distancePairs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn midpoint_is_halfway() {
        let atoms = three_atoms();
        let pair = DistancePair::between(
            PickedAtom::new(atoms[0].clone(), 0),
            PickedAtom::new(atoms[1].clone(), 1),
        );
        assert_eq!(pair.midpoint(), Vec3::new(0.75, 0.0, 0.0));
    }
}
