//! Read-only accessors for [`MoleculeController`].

use super::{MoleculeController, Notice};
use crate::model::AtomRecord;
use crate::options::Options;
use crate::search::SearchHandoff;
use crate::selection::SelectionStore;
use crate::view::{pair_mode_label, Tables};

impl<B, S, L> MoleculeController<B, S, L> {
    /// Runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The stage.
    #[must_use]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// The URL fragment holder.
    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Mutable access to the fragment holder, e.g. to follow a pasted link
    /// before [`restore_from_fragment`](Self::restore_from_fragment).
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Picks and pairs.
    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.store
    }

    /// Atoms of the loaded molecule.
    #[must_use]
    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    /// Selector value: the molecule last loaded or restored.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Selector options from the last identifier fetch.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// The rendered tables.
    #[must_use]
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Whether scene clicks are routed to the selection.
    #[must_use]
    pub fn picking_enabled(&self) -> bool {
        self.picking_enabled
    }

    /// Whether pair-picking mode is on.
    #[must_use]
    pub fn is_pair_picking(&self) -> bool {
        self.store.pair_picker().is_active()
    }

    /// Current label of the pair-pick button.
    #[must_use]
    pub fn pair_mode_label(&self) -> &'static str {
        pair_mode_label(self.is_pair_picking())
    }

    /// Notices recorded so far.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take and clear the recorded notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The running or last search hand-off.
    #[must_use]
    pub fn search_handoff(&self) -> Option<&SearchHandoff> {
        self.handoff.as_ref()
    }
}
