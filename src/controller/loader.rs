//! Identifier lookup, molecule loading and fragment restore.

use super::{MoleculeController, Notice, IDENTIFIER_LIMIT};
use crate::backend::Backend;
use crate::error::MolpickError;
use crate::model::SelectionState;
use crate::persist::{self, Location};
use crate::scene::{LayerSet, Stage, SyncScope};

impl<B: Backend, S: Stage, L: Location> MoleculeController<B, S, L> {
    /// Fetch the initial identifier list, which auto-loads a molecule.
    ///
    /// # Errors
    ///
    /// See [`refresh_identifiers`](Self::refresh_identifiers).
    pub fn start(&mut self) -> Result<(), MolpickError> {
        self.refresh_identifiers("")
    }

    /// Replace the selector options with identifiers matching `search`.
    ///
    /// The first successful call also loads a molecule: the one named in
    /// the URL fragment if it decodes, otherwise the first identifier.
    ///
    /// # Errors
    ///
    /// A search text over the configured length, any backend failure, or
    /// the failure of the initial load. The options are left empty on
    /// error.
    pub fn refresh_identifiers(&mut self, search: &str) -> Result<(), MolpickError> {
        let search = search.trim();
        self.identifiers.clear();
        if search.chars().count() > self.options.search.max_search_len {
            let e = MolpickError::Backend("Search term too long".to_owned());
            log::error!("error fetching PDB identifiers: {e}");
            self.notify(Notice::Error(e.to_string()));
            return Err(e);
        }

        let entries = match self.backend.search_identifiers(search) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("error fetching PDB identifiers: {e}");
                self.notify(Notice::Error(e.to_string()));
                return Err(e);
            }
        };
        self.identifiers = entries
            .into_iter()
            .take(IDENTIFIER_LIMIT)
            .map(|entry| entry.id)
            .collect();
        log::debug!("{} identifier(s) for {search:?}", self.identifiers.len());

        if self.identifiers_loaded {
            return Ok(());
        }
        let Some(initial) = self.initial_molecule() else {
            return Ok(());
        };
        self.identifiers_loaded = true;
        log::info!("loading first molecule: {initial}");
        self.load_molecule(&initial)
    }

    fn initial_molecule(&self) -> Option<String> {
        self.location
            .fragment()
            .and_then(|fragment| persist::decode(&fragment).ok())
            .map(|state| state.pdb_id)
            .filter(|id| !id.is_empty())
            .or_else(|| self.identifiers.first().cloned())
    }

    /// Selector change: select `pdb_id` and load it.
    ///
    /// # Errors
    ///
    /// See [`load_molecule`](Self::load_molecule).
    pub fn select_molecule(&mut self, pdb_id: &str) -> Result<(), MolpickError> {
        log::info!("selection changed, loading molecule: {pdb_id}");
        self.load_molecule(pdb_id)
    }

    /// Load `pdb_id`, dropping every pick and pair.
    ///
    /// The stage and tables are cleared before the fetch. On success the
    /// atom layer is drawn, the camera is fitted if this is the first
    /// molecule, clicks are enabled and a fragment saved for this molecule
    /// is restored.
    ///
    /// # Errors
    ///
    /// Transport, status, payload and empty-molecule failures. The stage
    /// and tables stay cleared; a notice is recorded.
    pub fn load_molecule(&mut self, pdb_id: &str) -> Result<(), MolpickError> {
        log::info!("loading molecule: {pdb_id}");
        self.selected_id = Some(pdb_id.to_owned());
        self.stage.remove_all_components();
        self.store.clear();
        self.atoms.clear();
        self.picking_enabled = false;
        self.render_tables();

        let atoms = match self.backend.fetch_molecule(pdb_id) {
            Ok(atoms) => atoms,
            Err(e) => {
                log::error!("error loading molecule {pdb_id}: {e}");
                self.notify(Notice::Error(format!("Error loading molecule {pdb_id}: {e}")));
                return Err(e);
            }
        };

        self.atoms = atoms;
        self.sync_scene(LayerSet::ALL, SyncScope::Rebuild);
        if !self.camera_fitted {
            self.stage.auto_view();
            self.camera_fitted = true;
        }
        self.picking_enabled = true;
        log::info!("molecule {pdb_id} loaded ({} atoms)", self.atoms.len());

        self.restore_saved_selection(pdb_id);
        Ok(())
    }

    /// After a load, restore a fragment saved for the same molecule.
    fn restore_saved_selection(&mut self, pdb_id: &str) {
        let Some(fragment) = self.location.fragment() else {
            return;
        };
        match persist::decode(&fragment) {
            Ok(state) if state.pdb_id == pdb_id => self.apply_state(state),
            Ok(state) => log::debug!(
                "fragment is for {}, not restoring onto {pdb_id}",
                state.pdb_id
            ),
            Err(e) => {
                log::error!("{e}");
                self.notify(Notice::Error(e.to_string()));
            }
        }
    }

    /// Restore the selection held in the URL fragment, whatever molecule it
    /// names. Returns false if there is no fragment.
    ///
    /// Nothing is checked against the loaded atoms; picks whose index is
    /// past the end of the atom array highlight nothing.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Fragment`] if the fragment does not decode. State is
    /// left untouched and a notice is recorded.
    pub fn restore_from_fragment(&mut self) -> Result<bool, MolpickError> {
        let Some(fragment) = self.location.fragment() else {
            return Ok(false);
        };
        match persist::decode(&fragment) {
            Ok(state) => {
                self.apply_state(state);
                Ok(true)
            }
            Err(e) => {
                log::error!("{e}");
                self.notify(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Selector value, picks and pairs from `state`. The fragment is not
    /// rewritten.
    fn apply_state(&mut self, state: SelectionState) {
        log::info!(
            "restoring {} pick(s) and {} pair(s) for {}",
            state.picked_atoms.len(),
            state.distance_pairs.len(),
            state.pdb_id
        );
        self.selected_id = Some(state.pdb_id);
        self.store.replace(state.picked_atoms, state.distance_pairs);
        self.render_tables();
        self.sync_scene(LayerSet::ALL, SyncScope::Patch);
    }
}
