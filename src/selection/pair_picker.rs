use crate::model::PickedAtom;

/// Two-slot buffer for building a distance pair from consecutive scene
/// clicks.
///
/// The picker is armed with [`PairPicker::toggle`]; each [`PairPicker::push`]
/// fills a slot and the second one yields the completed pair and disarms the
/// picker. Toggling at any point discards a half-filled buffer.
#[derive(Debug, Clone, Default)]
pub struct PairPicker {
    active: bool,
    first: Option<PickedAtom>,
}

impl PairPicker {
    /// Whether clicks are currently routed into the picker.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The atom waiting for a partner, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PickedAtom> {
        self.first.as_ref()
    }

    /// Flip the mode and drop any buffered atom. Returns the new mode.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.first = None;
        self.active
    }

    /// Drop a buffered atom without changing the mode.
    pub fn discard(&mut self) {
        self.first = None;
    }

    /// Buffer a clicked atom.
    ///
    /// Returns both atoms once the second slot is filled. A repeat click on
    /// the buffered atom is ignored: a pair needs two distinct atoms.
    pub fn push(&mut self, atom: PickedAtom) -> Option<(PickedAtom, PickedAtom)> {
        if !self.active {
            return None;
        }
        match self.first.take() {
            None => {
                self.first = Some(atom);
                None
            }
            Some(first) if first.index == atom.index => {
                self.first = Some(first);
                None
            }
            Some(first) => {
                self.active = false;
                Some((first, atom))
            }
        }
    }
}
