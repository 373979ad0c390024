//! Selection store: picked atoms, distance pairs, and the two-click pair
//! picker.
//!
//! The store is the single source of truth for the tables, the scene mirror
//! and the URL fragment. It does not touch any of them itself; the
//! controller re-renders after every mutation.

mod pair_picker;

use std::fmt;

pub use pair_picker::PairPicker;
use rustc_hash::FxHashSet;

use crate::model::{AtomRecord, DistancePair, PickedAtom, SelectionState};

/// A rejected selection operation. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A picked-atom list position past the end of the list.
    AtomOutOfRange {
        /// Requested list position.
        position: usize,
        /// Current list length.
        len: usize,
    },
    /// A distance-pair list position past the end of the list.
    PairOutOfRange {
        /// Requested list position.
        position: usize,
        /// Current list length.
        len: usize,
    },
    /// Both ends of a pair name the same picked atom.
    SameAtom(usize),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtomOutOfRange { position, len } => write!(
                f,
                "no picked atom at position {position} (list has {len})"
            ),
            Self::PairOutOfRange { position, len } => write!(
                f,
                "no distance pair at position {position} (list has {len})"
            ),
            Self::SameAtom(position) => write!(
                f,
                "a pair needs two different atoms (both are match {})",
                position + 1
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Result of [`SelectionStore::toggle_atom_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The atom was appended to the picked list.
    Picked,
    /// The atom was removed, along with `pruned_pairs` pairs that used it.
    Unpicked {
        /// Number of distance pairs removed with the atom.
        pruned_pairs: usize,
    },
}

/// Result of [`SelectionStore::handle_pair_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairClick {
    /// Pair mode is off; the click was not consumed.
    Inactive,
    /// The atom is buffered, waiting for a partner.
    Waiting {
        /// Whether the click also added the atom to the picked list.
        newly_picked: bool,
    },
    /// The pair was completed and appended at `position`.
    Completed {
        /// List position of the new pair.
        position: usize,
        /// Whether the click also added the atom to the picked list.
        newly_picked: bool,
    },
}

/// Picked atoms and distance pairs for the loaded molecule.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    picked: Vec<PickedAtom>,
    pairs: Vec<DistancePair>,
    picker: PairPicker,
}

impl SelectionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Accessors --

    /// Picked atoms in pick order.
    #[must_use]
    pub fn picked_atoms(&self) -> &[PickedAtom] {
        &self.picked
    }

    /// Distance pairs in creation order.
    #[must_use]
    pub fn distance_pairs(&self) -> &[DistancePair] {
        &self.pairs
    }

    /// The two-click pair picker.
    #[must_use]
    pub fn pair_picker(&self) -> &PairPicker {
        &self.picker
    }

    /// List position of the picked atom with scene `index`.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.picked.iter().position(|p| p.index == index)
    }

    /// Whether the atom at scene `index` is picked.
    #[must_use]
    pub fn is_picked(&self, index: usize) -> bool {
        self.position_of(index).is_some()
    }

    /// Scene indices of every picked atom.
    #[must_use]
    pub fn picked_indices(&self) -> FxHashSet<usize> {
        self.picked.iter().map(|p| p.index).collect()
    }

    /// Snapshot the store as a persistable state for molecule `pdb_id`.
    #[must_use]
    pub fn to_state(&self, pdb_id: &str) -> SelectionState {
        SelectionState {
            pdb_id: pdb_id.to_owned(),
            picked_atoms: self.picked.clone(),
            distance_pairs: self.pairs.clone(),
        }
    }

    // -- Bulk updates --

    /// Drop every pick, every pair, and any half-built pair. Pair mode
    /// itself is left as it was.
    pub fn clear(&mut self) {
        self.picked.clear();
        self.pairs.clear();
        self.picker.discard();
    }

    /// Replace picks and pairs wholesale (URL restore). A half-built pair
    /// is dropped; pair mode stays as it was.
    pub fn replace(&mut self, picked: Vec<PickedAtom>, pairs: Vec<DistancePair>) {
        self.picked = picked;
        self.pairs = pairs;
        self.picker.discard();
    }

    // -- Mutations --

    /// Pick the atom at scene `index`, or unpick it if already picked.
    ///
    /// Unpicking also prunes every pair that references `index`.
    pub fn toggle_atom_selection(&mut self, atom: &AtomRecord, index: usize) -> Toggle {
        if let Some(position) = self.position_of(index) {
            let _ = self.picked.remove(position);
            let pruned_pairs = self.prune_pairs(index);
            self.release_pending(index);
            log::debug!("unpicked atom{index}, pruned {pruned_pairs} pair(s)");
            Toggle::Unpicked { pruned_pairs }
        } else {
            self.picked.push(PickedAtom::new(atom.clone(), index));
            log::debug!("picked atom{index}");
            Toggle::Picked
        }
    }

    /// Add a pair between the picked atoms at list positions `position1`
    /// and `position2`. Duplicates are allowed and stay independent.
    ///
    /// Returns the list position of the new pair.
    ///
    /// # Errors
    ///
    /// Out-of-range or identical positions.
    pub fn add_pair(
        &mut self,
        position1: usize,
        position2: usize,
    ) -> Result<usize, SelectionError> {
        let atom1 = self.picked_at(position1)?.clone();
        let atom2 = self.picked_at(position2)?.clone();
        if position1 == position2 {
            return Err(SelectionError::SameAtom(position1));
        }
        Ok(self.push_pair(DistancePair::between(atom1, atom2)))
    }

    /// Remove the picked atom at list `position` and every pair that
    /// references its scene index.
    ///
    /// Returns the removed atom and the number of pruned pairs.
    ///
    /// # Errors
    ///
    /// [`SelectionError::AtomOutOfRange`].
    pub fn delete_atom(
        &mut self,
        position: usize,
    ) -> Result<(PickedAtom, usize), SelectionError> {
        let _ = self.picked_at(position)?;
        let removed = self.picked.remove(position);
        let pruned = self.prune_pairs(removed.index);
        self.release_pending(removed.index);
        log::debug!(
            "deleted match {} (atom{}), pruned {pruned} pair(s)",
            position + 1,
            removed.index
        );
        Ok((removed, pruned))
    }

    /// Remove the pair at list `position`.
    ///
    /// # Errors
    ///
    /// [`SelectionError::PairOutOfRange`].
    pub fn delete_pair(&mut self, position: usize) -> Result<DistancePair, SelectionError> {
        if position >= self.pairs.len() {
            return Err(SelectionError::PairOutOfRange {
                position,
                len: self.pairs.len(),
            });
        }
        Ok(self.pairs.remove(position))
    }

    /// Flip pair-picking mode, discarding a half-built pair. Returns the new
    /// mode.
    pub fn toggle_pair_picking(&mut self) -> bool {
        self.picker.toggle()
    }

    /// Route a scene click on the atom at `index` into the pair picker.
    ///
    /// The clicked atom is picked first if it is not already, so both ends
    /// of every pair stay in the picked list.
    pub fn handle_pair_selection(&mut self, atom: &AtomRecord, index: usize) -> PairClick {
        if !self.picker.is_active() {
            return PairClick::Inactive;
        }
        let newly_picked = !self.is_picked(index);
        if newly_picked {
            self.picked.push(PickedAtom::new(atom.clone(), index));
        }
        match self.picker.push(PickedAtom::new(atom.clone(), index)) {
            Some((first, second)) => {
                let position = self.push_pair(DistancePair::between(first, second));
                PairClick::Completed {
                    position,
                    newly_picked,
                }
            }
            None => PairClick::Waiting { newly_picked },
        }
    }

    // -- Internals --

    fn picked_at(&self, position: usize) -> Result<&PickedAtom, SelectionError> {
        self.picked
            .get(position)
            .ok_or(SelectionError::AtomOutOfRange {
                position,
                len: self.picked.len(),
            })
    }

    fn push_pair(&mut self, pair: DistancePair) -> usize {
        log::debug!(
            "pair atom{} - atom{}: {:.2} Å",
            pair.atom1.index,
            pair.atom2.index,
            pair.distance
        );
        self.pairs.push(pair);
        self.pairs.len() - 1
    }

    /// An atom waiting in the pair picker must still be picked.
    fn release_pending(&mut self, index: usize) {
        if self.picker.pending().is_some_and(|p| p.index == index) {
            self.picker.discard();
        }
    }

    fn prune_pairs(&mut self, index: usize) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|pair| !pair.references(index));
        before - self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{atom, three_atoms};

    fn store_with_picks(indices: &[usize]) -> (SelectionStore, Vec<AtomRecord>) {
        let atoms = three_atoms();
        let mut store = SelectionStore::new();
        for &i in indices {
            let _ = store.toggle_atom_selection(&atoms[i], i);
        }
        (store, atoms)
    }

    #[test]
    fn toggle_parity_keeps_one_entry_per_odd_index() {
        let atoms: Vec<AtomRecord> = (0..6)
            .map(|i| atom(i, 6, i as f64, 0.0, 0.0))
            .collect();
        let sequence = [0, 3, 3, 5, 0, 1, 3, 1, 1, 4, 4, 4];
        let mut store = SelectionStore::new();
        for &i in &sequence {
            let _ = store.toggle_atom_selection(&atoms[i], i);
        }

        let mut expected: Vec<usize> = (0..6)
            .filter(|i| sequence.iter().filter(|&&s| s == *i).count() % 2 == 1)
            .collect();
        let mut actual: Vec<usize> =
            store.picked_atoms().iter().map(|p| p.index).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(actual, expected);
        assert_eq!(store.picked_indices().len(), store.picked_atoms().len());
    }

    #[test]
    fn unpick_prunes_pairs_using_the_atom() {
        let (mut store, atoms) = store_with_picks(&[0, 1, 2]);
        let _ = store.add_pair(0, 1).unwrap();
        let _ = store.add_pair(1, 2).unwrap();
        let toggled = store.toggle_atom_selection(&atoms[0], 0);
        assert_eq!(toggled, Toggle::Unpicked { pruned_pairs: 1 });
        assert_eq!(store.distance_pairs().len(), 1);
        assert_eq!(store.distance_pairs()[0].atom1.index, 1);
    }

    #[test]
    fn add_pair_caches_distance_and_allows_duplicates() {
        let (mut store, _) = store_with_picks(&[0, 2]);
        assert_eq!(store.add_pair(0, 1), Ok(0));
        assert_eq!(store.add_pair(1, 0), Ok(1));
        assert_eq!(store.distance_pairs().len(), 2);
        assert!((store.distance_pairs()[0].distance - 3.0).abs() < 1e-12);
        assert_eq!(
            store.distance_pairs()[0].distance,
            store.distance_pairs()[1].distance
        );
    }

    #[test]
    fn add_pair_rejects_bad_positions() {
        let (mut store, _) = store_with_picks(&[0, 2]);
        assert_eq!(
            store.add_pair(0, 5),
            Err(SelectionError::AtomOutOfRange { position: 5, len: 2 })
        );
        assert_eq!(store.add_pair(1, 1), Err(SelectionError::SameAtom(1)));
        assert!(store.distance_pairs().is_empty());
    }

    #[test]
    fn delete_atom_prunes_by_scene_index_not_list_position() {
        // Picks in order 2, 0, 1: list position 0 holds scene index 2.
        let (mut store, _) = store_with_picks(&[2, 0, 1]);
        let _ = store.add_pair(1, 2).unwrap(); // atom0 - atom1
        let _ = store.add_pair(0, 1).unwrap(); // atom2 - atom0
        let _ = store.add_pair(0, 2).unwrap(); // atom2 - atom1

        let (removed, pruned) = store.delete_atom(0).unwrap();
        assert_eq!(removed.index, 2);
        assert_eq!(pruned, 2);
        assert_eq!(store.distance_pairs().len(), 1);
        let remaining = &store.distance_pairs()[0];
        assert_eq!((remaining.atom1.index, remaining.atom2.index), (0, 1));
    }

    #[test]
    fn delete_atom_keeps_unrelated_pairs() {
        let (mut store, _) = store_with_picks(&[0, 1, 2]);
        let _ = store.add_pair(1, 2).unwrap();
        let (_, pruned) = store.delete_atom(0).unwrap();
        assert_eq!(pruned, 0);
        assert_eq!(store.distance_pairs().len(), 1);
    }

    #[test]
    fn delete_out_of_range_leaves_state_untouched() {
        let (mut store, _) = store_with_picks(&[0]);
        assert!(store.delete_atom(3).is_err());
        assert_eq!(
            store.delete_pair(0),
            Err(SelectionError::PairOutOfRange { position: 0, len: 0 })
        );
        assert_eq!(store.picked_atoms().len(), 1);
    }

    #[test]
    fn delete_pair_removes_only_that_pair() {
        let (mut store, _) = store_with_picks(&[0, 1, 2]);
        let _ = store.add_pair(0, 1).unwrap();
        let _ = store.add_pair(1, 2).unwrap();
        let removed = store.delete_pair(0).unwrap();
        assert_eq!(removed.atom1.index, 0);
        assert_eq!(store.distance_pairs().len(), 1);
        assert_eq!(store.picked_atoms().len(), 3);
    }

    #[test]
    fn pair_selection_picks_atoms_and_completes() {
        let atoms = three_atoms();
        let mut store = SelectionStore::new();
        assert_eq!(
            store.handle_pair_selection(&atoms[0], 0),
            PairClick::Inactive
        );
        assert!(store.toggle_pair_picking());
        assert_eq!(
            store.handle_pair_selection(&atoms[0], 0),
            PairClick::Waiting { newly_picked: true }
        );
        let _ = store.toggle_atom_selection(&atoms[1], 1);
        assert_eq!(
            store.handle_pair_selection(&atoms[1], 1),
            PairClick::Completed {
                position: 0,
                newly_picked: false
            }
        );
        assert!(!store.pair_picker().is_active());
        assert_eq!(store.picked_atoms().len(), 2);
        assert!((store.distance_pairs()[0].distance - 1.5).abs() < 1e-12);
    }

    #[test]
    fn removing_the_buffered_atom_empties_the_picker() {
        let atoms = three_atoms();
        let mut store = SelectionStore::new();
        let _ = store.toggle_pair_picking();
        let _ = store.handle_pair_selection(&atoms[0], 0);
        let _ = store.delete_atom(0).unwrap();
        assert!(store.pair_picker().pending().is_none());
        assert!(store.pair_picker().is_active());
        assert_eq!(
            store.handle_pair_selection(&atoms[1], 1),
            PairClick::Waiting { newly_picked: true }
        );

        // Unpicking through a toggle releases it too.
        let _ = store.toggle_atom_selection(&atoms[1], 1);
        assert!(store.pair_picker().pending().is_none());
        let _ = store.handle_pair_selection(&atoms[2], 2);
        assert!(store.distance_pairs().is_empty());
    }

    #[test]
    fn removing_another_atom_keeps_the_buffer() {
        let (mut store, atoms) = store_with_picks(&[0]);
        let _ = store.toggle_pair_picking();
        let _ = store.handle_pair_selection(&atoms[1], 1);
        let _ = store.delete_atom(0).unwrap();
        assert_eq!(store.pair_picker().pending().map(|p| p.index), Some(1));
    }

    #[test]
    fn replace_drops_a_half_built_pair() {
        let atoms = three_atoms();
        let mut store = SelectionStore::new();
        let _ = store.toggle_pair_picking();
        let _ = store.handle_pair_selection(&atoms[0], 0);
        store.replace(Vec::new(), Vec::new());
        assert!(store.pair_picker().pending().is_none());
        assert!(store.pair_picker().is_active());
    }

    #[test]
    fn clear_resets_lists_and_buffer() {
        let (mut store, atoms) = store_with_picks(&[0, 1]);
        let _ = store.add_pair(0, 1).unwrap();
        let _ = store.toggle_pair_picking();
        let _ = store.handle_pair_selection(&atoms[2], 2);
        store.clear();
        assert!(store.picked_atoms().is_empty());
        assert!(store.distance_pairs().is_empty());
        assert!(store.pair_picker().is_active());
        assert!(store.pair_picker().pending().is_none());
    }
}
