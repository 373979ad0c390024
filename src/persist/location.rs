/// Read/write access to the URL fragment.
pub trait Location {
    /// The current fragment without the leading `#`, if non-empty.
    fn fragment(&self) -> Option<String>;

    /// Replace the fragment.
    fn set_fragment(&mut self, fragment: &str);
}

/// A fragment held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    fragment: Option<String>,
    writes: usize,
}

impl MemoryLocation {
    /// Start at `fragment` (leading `#` optional).
    #[must_use]
    pub fn with_fragment(fragment: &str) -> Self {
        let mut location = Self::default();
        location.store(fragment);
        location
    }

    /// How many times the fragment was written through [`Location`].
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn store(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.fragment = (!fragment.is_empty()).then(|| fragment.to_owned());
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> Option<String> {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.store(fragment);
        self.writes += 1;
    }
}
