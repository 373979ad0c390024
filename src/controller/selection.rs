//! Selection editing: clicks, table buttons, pair mode and camera focus.

use std::time::Duration;

use super::{MoleculeController, Notice};
use crate::backend::Backend;
use crate::error::MolpickError;
use crate::persist::Location;
use crate::scene::{LayerSet, PickTarget, Stage, SyncScope};
use crate::selection::{PairClick, SelectionError, Toggle};
use crate::view::RowAction;

impl<B: Backend, S: Stage, L: Location> MoleculeController<B, S, L> {
    // ── Scene clicks ──

    /// A click on the stage hit the primitive called `name` (or nothing).
    ///
    /// Routes to pair selection while pair mode is on, otherwise toggles
    /// the atom. Ignored until a molecule is loaded.
    pub fn on_click(&mut self, name: Option<&str>) {
        if !self.picking_enabled {
            return;
        }
        let PickTarget::Atom(index) = PickTarget::resolve(name, self.atoms.len()) else {
            return;
        };
        if self.store.pair_picker().is_active() {
            let _ = self.handle_pair_selection(index);
        } else {
            let _ = self.toggle_atom_selection(index);
        }
    }

    /// Pick or unpick the loaded atom at `index`.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `index` is past the loaded atoms.
    pub fn toggle_atom_selection(&mut self, index: usize) -> Result<Toggle, MolpickError> {
        let atom = self
            .atoms
            .get(index)
            .cloned()
            .ok_or(SelectionError::AtomOutOfRange {
                position: index,
                len: self.atoms.len(),
            })?;
        let toggled = self.store.toggle_atom_selection(&atom, index);
        self.commit(LayerSet::ALL, SyncScope::Rebuild);
        Ok(toggled)
    }

    /// Feed the loaded atom at `index` to the pair picker.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `index` is past the loaded atoms.
    pub fn handle_pair_selection(&mut self, index: usize) -> Result<PairClick, MolpickError> {
        let atom = self
            .atoms
            .get(index)
            .cloned()
            .ok_or(SelectionError::AtomOutOfRange {
                position: index,
                len: self.atoms.len(),
            })?;
        let click = self.store.handle_pair_selection(&atom, index);
        let picked_layer = |newly_picked: bool| {
            if newly_picked {
                LayerSet::ATOMS
            } else {
                LayerSet::NONE
            }
        };
        let layers = match click {
            PairClick::Inactive => LayerSet::NONE,
            PairClick::Waiting { newly_picked } => picked_layer(newly_picked),
            PairClick::Completed { newly_picked, .. } => {
                LayerSet::PAIRS.with(picked_layer(newly_picked))
            }
        };
        if layers != LayerSet::NONE {
            self.commit(layers, SyncScope::Patch);
        }
        Ok(click)
    }

    /// Flip pair-picking mode. Returns the new mode.
    pub fn toggle_pair_picking(&mut self) -> bool {
        let active = self.store.toggle_pair_picking();
        log::debug!("pair picking {}", if active { "on" } else { "off" });
        active
    }

    // ── Table buttons ──

    /// Pair the picked atoms at list positions `position1` and
    /// `position2`. Returns the new pair's position.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] for a bad or repeated position.
    pub fn add_pair(&mut self, position1: usize, position2: usize) -> Result<usize, MolpickError> {
        let position = self.store.add_pair(position1, position2)?;
        self.commit(LayerSet::ALL, SyncScope::Rebuild);
        Ok(position)
    }

    /// The "Add Pair" button with the two dropdown values. Either being on
    /// its placeholder is refused with an alert and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// See [`add_pair`](Self::add_pair).
    pub fn add_pair_from_selectors(
        &mut self,
        atom1: Option<usize>,
        atom2: Option<usize>,
    ) -> Result<Option<usize>, MolpickError> {
        let (Some(position1), Some(position2)) = (atom1, atom2) else {
            self.notify(Notice::Alert(
                "Please select both atoms for the pair.".to_owned(),
            ));
            return Ok(None);
        };
        self.add_pair(position1, position2).map(Some)
    }

    /// Delete the picked atom at list `position` and the pairs using it.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `position` is out of range.
    pub fn delete_atom(&mut self, position: usize) -> Result<(), MolpickError> {
        let _ = self.store.delete_atom(position)?;
        self.commit(LayerSet::ALL, SyncScope::Rebuild);
        Ok(())
    }

    /// Delete the pair at list `position`.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `position` is out of range.
    pub fn delete_pair(&mut self, position: usize) -> Result<(), MolpickError> {
        let _ = self.store.delete_pair(position)?;
        self.commit(LayerSet::ALL, SyncScope::Rebuild);
        Ok(())
    }

    /// Dispatch a row button.
    ///
    /// # Errors
    ///
    /// Whatever the dispatched operation reports.
    pub fn apply_row_action(&mut self, action: RowAction) -> Result<(), MolpickError> {
        match action {
            RowAction::CenterAtom(position) => self.center_on_atom(position),
            RowAction::DeleteAtom(position) => self.delete_atom(position),
            RowAction::CenterPair(position) => self.center_on_pair(position),
            RowAction::DeletePair(position) => self.delete_pair(position),
        }
    }

    /// Pointer entered pair row `position`.
    pub fn hover_pair_row(&mut self, position: usize) {
        self.tables.hover_pair(position);
    }

    /// Pointer left the pair rows.
    pub fn leave_pair_rows(&mut self) {
        self.tables.clear_hover();
    }

    // ── Camera ──

    fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.options.camera.focus_duration_ms)
    }

    /// Animate the camera onto the picked atom at list `position`, closing
    /// in to a fraction of the current eye distance.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `position` is out of range.
    pub fn center_on_atom(&mut self, position: usize) -> Result<(), MolpickError> {
        let picked = self.store.picked_atoms();
        let target = picked
            .get(position)
            .ok_or(SelectionError::AtomOutOfRange {
                position,
                len: picked.len(),
            })?
            .atom
            .scene_position();
        let distance =
            self.stage.camera_position().distance(target) / self.options.camera.atom_zoom_divisor;
        let duration = self.focus_duration();
        self.stage.zoom_move(target, distance, duration);
        Ok(())
    }

    /// Animate the camera onto the midpoint of the pair at list
    /// `position`, at a multiple of the pair's separation.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Selection`] if `position` is out of range.
    pub fn center_on_pair(&mut self, position: usize) -> Result<(), MolpickError> {
        let pairs = self.store.distance_pairs();
        let pair = pairs.get(position).ok_or(SelectionError::PairOutOfRange {
            position,
            len: pairs.len(),
        })?;
        let target = pair.midpoint();
        let distance = pair.distance as f32 * self.options.camera.pair_zoom_factor;
        let duration = self.focus_duration();
        self.stage.zoom_move(target, distance, duration);
        Ok(())
    }
}
