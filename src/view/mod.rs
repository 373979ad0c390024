//! Atom and pair tables, rendered from the selection store.
//!
//! The tables are plain data: a host toolkit draws the rows and routes row
//! buttons back as [`RowAction`]s. Every render replaces all rows, so any
//! hover highlight is dropped with it.

use std::fmt;

use crate::model::{AtomRecord, PickedAtom};
use crate::options::ColorOptions;
use crate::search::match_number;
use crate::selection::SelectionStore;

/// Label of the pair-pick button while pair mode is off.
pub const ADD_PAIR_LABEL: &str = "Add Pair in 3D";
/// Label of the pair-pick button while pair mode is on.
pub const CANCEL_PAIR_LABEL: &str = "Cancel Add Pair";

/// Pair-pick button label for the given mode.
#[must_use]
pub fn pair_mode_label(active: bool) -> &'static str {
    if active {
        CANCEL_PAIR_LABEL
    } else {
        ADD_PAIR_LABEL
    }
}

/// A row button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Center the camera on the picked atom at this list position.
    CenterAtom(usize),
    /// Delete the picked atom at this list position.
    DeleteAtom(usize),
    /// Center the camera on the pair at this list position.
    CenterPair(usize),
    /// Delete the pair at this list position.
    DeletePair(usize),
}

/// One row of the picked-atom table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRow {
    /// List position (0-based); row buttons act on it.
    pub position: usize,
    /// Database id.
    pub db_id: String,
    /// Element symbol.
    pub symbol: String,
    /// `(x, y, z)` with two decimals.
    pub coordinates: String,
    /// Set while a pair row referencing this atom is hovered.
    pub highlighted: bool,
}

impl AtomRow {
    /// 1-based row number shown in the `#` column.
    #[must_use]
    pub fn number(&self) -> usize {
        self.position + 1
    }

    /// The Center and Delete buttons.
    #[must_use]
    pub fn actions(&self) -> [RowAction; 2] {
        [
            RowAction::CenterAtom(self.position),
            RowAction::DeleteAtom(self.position),
        ]
    }
}

/// One row of the distance-pair table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRow {
    /// List position (0-based).
    pub position: usize,
    /// `{symbol} (Match#: {n}, DB ID: {id})` for the first atom.
    pub atom1: String,
    /// Same for the second atom.
    pub atom2: String,
    /// `{d} Å` with two decimals.
    pub distance: String,
    /// Match numbers of both atoms (0 when not in the picked list).
    pub matches: [usize; 2],
}

impl PairRow {
    /// 1-based row number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.position + 1
    }

    /// The Center and Delete buttons.
    #[must_use]
    pub fn actions(&self) -> [RowAction; 2] {
        [
            RowAction::CenterPair(self.position),
            RowAction::DeletePair(self.position),
        ]
    }
}

/// One entry of an atom dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomOption {
    /// Picked-list position, or `None` for the placeholder.
    pub value: Option<usize>,
    /// Display text.
    pub label: String,
}

/// A dropdown over the picked atoms, placeholder first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSelector {
    /// Placeholder followed by one option per picked atom.
    pub options: Vec<AtomOption>,
}

impl AtomSelector {
    fn new(placeholder: &str, atoms: &[AtomOption]) -> Self {
        let mut options = Vec::with_capacity(atoms.len() + 1);
        options.push(AtomOption {
            value: None,
            label: placeholder.to_owned(),
        });
        options.extend_from_slice(atoms);
        Self { options }
    }
}

/// Both tables and both atom selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    /// Picked atoms.
    pub atom_rows: Vec<AtomRow>,
    /// Distance pairs.
    pub pair_rows: Vec<PairRow>,
    /// First-atom selector.
    pub atom1_selector: AtomSelector,
    /// Second-atom selector.
    pub atom2_selector: AtomSelector,
    hovered_pair: Option<usize>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            atom_rows: Vec::new(),
            pair_rows: Vec::new(),
            atom1_selector: AtomSelector::new("Select Atom 1", &[]),
            atom2_selector: AtomSelector::new("Select Atom 2", &[]),
            hovered_pair: None,
        }
    }
}

fn format_coordinates(atom: &AtomRecord) -> String {
    format!("({:.2}, {:.2}, {:.2})", atom.x, atom.y, atom.z)
}

fn pair_atom_label(colors: &ColorOptions, picked: &[PickedAtom], atom: &PickedAtom) -> (String, usize) {
    let n = match_number(picked, &atom.atom.id);
    let label = format!(
        "{} (Match#: {n}, DB ID: {})",
        colors.element_symbol(atom.atom.element),
        atom.atom.id
    );
    (label, n)
}

impl Tables {
    /// Render both tables from the store.
    #[must_use]
    pub fn render(store: &SelectionStore, colors: &ColorOptions) -> Self {
        let picked = store.picked_atoms();
        let atom_rows = picked
            .iter()
            .enumerate()
            .map(|(position, p)| AtomRow {
                position,
                db_id: p.atom.id.to_string(),
                symbol: colors.element_symbol(p.atom.element),
                coordinates: format_coordinates(&p.atom),
                highlighted: false,
            })
            .collect();
        let options: Vec<AtomOption> = picked
            .iter()
            .enumerate()
            .map(|(position, p)| AtomOption {
                value: Some(position),
                label: format!(
                    "Match {}: {} (DB ID: {})",
                    position + 1,
                    colors.element_symbol(p.atom.element),
                    p.atom.id
                ),
            })
            .collect();
        let pair_rows = store
            .distance_pairs()
            .iter()
            .enumerate()
            .map(|(position, pair)| {
                let (atom1, m1) = pair_atom_label(colors, picked, &pair.atom1);
                let (atom2, m2) = pair_atom_label(colors, picked, &pair.atom2);
                PairRow {
                    position,
                    atom1,
                    atom2,
                    distance: format!("{:.2} Å", pair.distance),
                    matches: [m1, m2],
                }
            })
            .collect();

        Self {
            atom_rows,
            pair_rows,
            atom1_selector: AtomSelector::new("Select Atom 1", &options),
            atom2_selector: AtomSelector::new("Select Atom 2", &options),
            hovered_pair: None,
        }
    }

    /// Pair row under the pointer, if any.
    #[must_use]
    pub fn hovered_pair(&self) -> Option<usize> {
        self.hovered_pair
    }

    /// Pointer entered pair row `position`: highlight the atom rows of its
    /// two matches. Unknown positions clear the highlight.
    pub fn hover_pair(&mut self, position: usize) {
        self.clear_hover();
        let Some(row) = self.pair_rows.get(position) else {
            return;
        };
        let matches = row.matches;
        self.hovered_pair = Some(position);
        for n in matches.into_iter().filter(|&n| n > 0) {
            if let Some(atom_row) = self.atom_rows.get_mut(n - 1) {
                atom_row.highlighted = true;
            }
        }
    }

    /// Pointer left the pair rows.
    pub fn clear_hover(&mut self) {
        self.hovered_pair = None;
        for row in &mut self.atom_rows {
            row.highlighted = false;
        }
    }

    /// List positions of highlighted atom rows.
    #[must_use]
    pub fn highlighted_atoms(&self) -> Vec<usize> {
        self.atom_rows
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.position)
            .collect()
    }
}

impl fmt::Display for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Picked atoms:")?;
        for row in &self.atom_rows {
            let mark = if row.highlighted { '*' } else { ' ' };
            writeln!(
                f,
                "{mark}{:>3}  {:<8} {:<10} {}",
                row.number(),
                row.db_id,
                row.symbol,
                row.coordinates
            )?;
        }
        writeln!(f, "Distance pairs:")?;
        for row in &self.pair_rows {
            writeln!(
                f,
                " {:>3}  {} - {}  {}",
                row.number(),
                row.atom1,
                row.atom2,
                row.distance
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{atom, three_atoms};

    fn store() -> SelectionStore {
        let atoms = three_atoms();
        let mut store = SelectionStore::new();
        for i in [2, 0, 1] {
            let _ = store.toggle_atom_selection(&atoms[i], i);
        }
        let _ = store.add_pair(1, 0).unwrap();
        store
    }

    #[test]
    fn atom_rows_and_options() {
        let tables = Tables::render(&store(), &ColorOptions::default());
        assert_eq!(tables.atom_rows.len(), 3);
        let first = &tables.atom_rows[0];
        assert_eq!(first.number(), 1);
        assert_eq!(first.db_id, "103");
        assert_eq!(first.symbol, "O");
        assert_eq!(first.coordinates, "(1.00, 2.00, 2.00)");
        assert_eq!(first.actions()[1], RowAction::DeleteAtom(0));

        let options = &tables.atom1_selector.options;
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].value, None);
        assert_eq!(options[0].label, "Select Atom 1");
        assert_eq!(options[2].label, "Match 2: C (DB ID: 101)");
        assert_eq!(options[2].value, Some(1));
        assert_eq!(tables.atom2_selector.options[0].label, "Select Atom 2");
    }

    #[test]
    fn pair_rows_carry_match_numbers() {
        let tables = Tables::render(&store(), &ColorOptions::default());
        let row = &tables.pair_rows[0];
        assert_eq!(row.atom1, "C (Match#: 2, DB ID: 101)");
        assert_eq!(row.atom2, "O (Match#: 1, DB ID: 103)");
        assert_eq!(row.distance, "3.00 Å");
        assert_eq!(row.matches, [2, 1]);
    }

    #[test]
    fn hovering_a_pair_highlights_its_atoms() {
        let mut tables = Tables::render(&store(), &ColorOptions::default());
        tables.hover_pair(0);
        assert_eq!(tables.hovered_pair(), Some(0));
        assert_eq!(tables.highlighted_atoms(), vec![0, 1]);
        tables.clear_hover();
        assert!(tables.highlighted_atoms().is_empty());
        tables.hover_pair(9);
        assert_eq!(tables.hovered_pair(), None);
    }

    #[test]
    fn unknown_elements_and_empty_tables() {
        let mut store = SelectionStore::new();
        let _ = store.toggle_atom_selection(&atom(1, 26, -0.005, 0.0, 10.0), 0);
        let tables = Tables::render(&store, &ColorOptions::default());
        assert_eq!(tables.atom_rows[0].symbol, "Element26");
        assert!(tables.pair_rows.is_empty());
        assert_eq!(Tables::default().atom1_selector.options.len(), 1);
        assert_eq!(pair_mode_label(false), "Add Pair in 3D");
        assert_eq!(pair_mode_label(true), "Cancel Add Pair");
    }
}
