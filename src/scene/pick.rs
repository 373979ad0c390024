//! Typed pick-target resolution from primitive names.

/// What a click in the scene landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// Background, a pair cylinder, or anything without an atom name.
    None,
    /// The atom at this index of the loaded atom array.
    Atom(usize),
}

impl PickTarget {
    /// Resolve the name of a picked primitive.
    ///
    /// Only `atom{N}` names with `N < atom_count` resolve to an atom; a name
    /// from a stale scene (e.g. a previous, larger molecule) resolves to
    /// `None`.
    #[must_use]
    pub fn resolve(name: Option<&str>, atom_count: usize) -> Self {
        name.and_then(|n| n.strip_prefix("atom"))
            .and_then(|digits| digits.parse::<usize>().ok())
            .filter(|&index| index < atom_count)
            .map_or(Self::None, Self::Atom)
    }

    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::atom_name;

    #[test]
    fn resolves_atom_names() {
        assert_eq!(PickTarget::resolve(Some("atom0"), 3), PickTarget::Atom(0));
        assert_eq!(
            PickTarget::resolve(Some(&atom_name(2)), 3),
            PickTarget::Atom(2)
        );
    }

    #[test]
    fn rejects_out_of_range_and_foreign_names() {
        assert!(PickTarget::resolve(Some("atom3"), 3).is_none());
        assert!(PickTarget::resolve(Some("atomX"), 3).is_none());
        assert!(PickTarget::resolve(Some("atom-1"), 3).is_none());
        assert!(PickTarget::resolve(Some("distance-pairs"), 3).is_none());
        assert!(PickTarget::resolve(None, 3).is_none());
    }
}
