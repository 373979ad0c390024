//! The molecule controller: owns the selection and keeps the tables, the
//! stage and the URL fragment in step with it.
//!
//! Methods are grouped by concern across submodules (loading, selection
//! editing, search, read-only accessors); all of them are inherent methods
//! on [`MoleculeController`]. Every mutation ends in one commit that
//! re-renders the tables, re-syncs the stage and re-encodes the fragment,
//! in that order.

mod accessors;
mod loader;
mod search;
mod selection;

use std::fmt;

use crate::backend::Backend;
use crate::model::AtomRecord;
use crate::options::Options;
use crate::persist::{self, Location};
use crate::scene::{LayerSet, SceneSync, Stage, SyncScope};
use crate::search::SearchHandoff;
use crate::selection::SelectionStore;
use crate::view::Tables;

/// Most identifiers shown in the selector at once.
pub const IDENTIFIER_LIMIT: usize = 25;

/// A message for the user (an alert or an inline error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The request was refused; nothing changed.
    Alert(String),
    /// Something failed; the message says what.
    Error(String),
}

impl Notice {
    /// The text to show.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Alert(msg) | Self::Error(msg) => msg,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Drives one molecule viewer session.
///
/// `B` reaches the backend, `S` draws the scene, `L` holds the URL
/// fragment.
pub struct MoleculeController<B, S, L> {
    options: Options,
    backend: B,
    stage: S,
    location: L,
    sync: SceneSync,
    store: SelectionStore,
    atoms: Vec<AtomRecord>,
    selected_id: Option<String>,
    identifiers: Vec<String>,
    tables: Tables,
    /// Clicks reach the store only once a molecule is loaded.
    picking_enabled: bool,
    /// Auto-view runs on the first successful load only.
    camera_fitted: bool,
    /// The first identifier fetch auto-loads a molecule.
    identifiers_loaded: bool,
    notices: Vec<Notice>,
    handoff: Option<SearchHandoff>,
}

impl<B: Backend, S: Stage, L: Location> MoleculeController<B, S, L> {
    /// Controller over the given collaborators. Nothing is fetched until
    /// [`start`](Self::start) or a load.
    #[must_use]
    pub fn new(options: Options, backend: B, stage: S, location: L) -> Self {
        let sync = SceneSync::new(&options);
        let tables = Tables::render(&SelectionStore::new(), &options.colors);
        Self {
            options,
            backend,
            stage,
            location,
            sync,
            store: SelectionStore::new(),
            atoms: Vec::new(),
            selected_id: None,
            identifiers: Vec::new(),
            tables,
            picking_enabled: false,
            camera_fitted: false,
            identifiers_loaded: false,
            notices: Vec::new(),
            handoff: None,
        }
    }

    /// Advance camera animations by `dt` seconds. Returns true while one is
    /// still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.stage.tick(dt)
    }

    // ── Commit ──

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn render_tables(&mut self) {
        self.tables = Tables::render(&self.store, &self.options.colors);
    }

    fn sync_scene(&mut self, layers: LayerSet, scope: SyncScope) {
        self.sync
            .reconcile(&mut self.stage, &self.atoms, &self.store, layers, scope);
    }

    fn write_fragment(&mut self) {
        let state = self
            .store
            .to_state(self.selected_id.as_deref().unwrap_or_default());
        match persist::encode(&state) {
            Ok(fragment) => self.location.set_fragment(&fragment),
            Err(e) => log::warn!("could not persist selection: {e}"),
        }
    }

    /// Tables, then stage, then fragment.
    fn commit(&mut self, layers: LayerSet, scope: SyncScope) {
        self.render_tables();
        self.sync_scene(layers, scope);
        self.write_fragment();
    }
}
