//! Structural search submission.
//!
//! Distance pairs become the `POST /search` payload here; the hand-off of
//! the generated query to the results context lives in [`handoff`].

pub mod handoff;

pub use handoff::{
    mpsc_channel, ControllerMessage, HandoffState, MpscResultsChannel, ResultsChannel,
    ResultsContext, ResultsMessage, SearchHandoff,
};
use serde::{Deserialize, Serialize};

use crate::error::MolpickError;
use crate::model::{AtomId, PickedAtom};
use crate::selection::SelectionStore;

/// One end of a distance constraint as the search backend sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomQuery {
    /// Atomic number.
    pub element: u32,
    /// Provenance tag of the source system.
    pub origin: String,
    /// 1-based match number of the atom in the picked list.
    pub matchid: usize,
}

/// A distance constraint in the search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairQuery {
    /// First atom.
    pub atom1: AtomQuery,
    /// Second atom.
    pub atom2: AtomQuery,
    /// Separation in Angstroms.
    pub distance: f64,
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The constraints.
    pub selected_pairs: Vec<PairQuery>,
    /// Use the PostGIS query generator.
    pub use_postgis: bool,
    /// Only generate the SQL; the results context runs it.
    pub skip_execution: bool,
}

impl SearchRequest {
    /// Query-only request for `pairs`.
    #[must_use]
    pub fn new(pairs: Vec<PairQuery>, use_postgis: bool) -> Self {
        Self {
            selected_pairs: pairs,
            use_postgis,
            skip_execution: true,
        }
    }
}

/// 1-based position of the first picked atom with database id `id`, or 0
/// if none has it.
#[must_use]
pub fn match_number(picked: &[PickedAtom], id: &AtomId) -> usize {
    picked
        .iter()
        .position(|p| &p.atom.id == id)
        .map_or(0, |position| position + 1)
}

fn atom_query(picked: &[PickedAtom], atom: &PickedAtom) -> AtomQuery {
    AtomQuery {
        element: atom.atom.element,
        origin: atom.atom.origin.clone(),
        matchid: match_number(picked, &atom.atom.id),
    }
}

/// Translate the store's distance pairs into search constraints.
///
/// # Errors
///
/// [`MolpickError::NoPairs`] when the store holds no distance pair.
pub fn build_search_data(store: &SelectionStore) -> Result<Vec<PairQuery>, MolpickError> {
    let picked = store.picked_atoms();
    let pairs = store.distance_pairs();
    if pairs.is_empty() {
        return Err(MolpickError::NoPairs);
    }
    Ok(pairs
        .iter()
        .map(|pair| PairQuery {
            atom1: atom_query(picked, &pair.atom1),
            atom2: atom_query(picked, &pair.atom2),
            distance: pair.distance,
        })
        .collect())
}

/// Address of the results context, e.g. `/search_results?usePostGIS=false`.
#[must_use]
pub fn results_url(path: &str, use_postgis: bool) -> String {
    format!("{path}?usePostGIS={use_postgis}")
}
