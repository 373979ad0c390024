//! URL fragment codec for the selection state.
//!
//! The fragment is the JSON form of [`SelectionState`], escaped with the
//! same rules as `encodeURIComponent`, so links produced by a browser
//! front-end and by this crate are interchangeable. Only identifiers,
//! indices, coordinates as picked and cached distances are stored; nothing
//! ties the state to the molecule it is restored onto.

mod location;

pub use location::{Location, MemoryLocation};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::MolpickError;
use crate::model::{AtomRecord, SelectionState};

/// Characters `encodeURIComponent` leaves alone: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serialize and escape `state` for use as a URL fragment (without `#`).
///
/// # Errors
///
/// [`MolpickError::Fragment`] for non-finite coordinates or distances,
/// which JSON cannot carry.
pub fn encode(state: &SelectionState) -> Result<String, MolpickError> {
    if let Some(what) = first_non_finite(state) {
        return Err(MolpickError::Fragment(format!("non-finite {what}")));
    }
    let json = serde_json::to_string(state)
        .map_err(|e| MolpickError::Fragment(e.to_string()))?;
    Ok(utf8_percent_encode(&json, URI_COMPONENT).to_string())
}

fn first_non_finite(state: &SelectionState) -> Option<String> {
    let finite = |a: &AtomRecord| a.x.is_finite() && a.y.is_finite() && a.z.is_finite();
    let atoms = state
        .picked_atoms
        .iter()
        .chain(state.distance_pairs.iter().flat_map(|p| [&p.atom1, &p.atom2]));
    for picked in atoms {
        if !finite(&picked.atom) {
            return Some(format!("coordinates on atom{}", picked.index));
        }
    }
    state
        .distance_pairs
        .iter()
        .position(|p| !p.distance.is_finite())
        .map(|position| format!("distance on pair {}", position + 1))
}

/// Unescape and parse a fragment. A leading `#` is ignored.
///
/// # Errors
///
/// [`MolpickError::Fragment`] for bad escapes, invalid UTF-8 or JSON that
/// is not a selection state.
pub fn decode(fragment: &str) -> Result<SelectionState, MolpickError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let json = percent_decode_str(fragment)
        .decode_utf8()
        .map_err(|e| MolpickError::Fragment(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| MolpickError::Fragment(e.to_string()))
}
