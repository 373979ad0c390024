//! Crate-level error types.

use std::fmt;

use crate::selection::SelectionError;

/// Errors produced by the molpick crate.
#[derive(Debug)]
pub enum MolpickError {
    /// The request never produced an HTTP response (DNS, connect, I/O).
    Transport(String),
    /// The backend answered with a non-success status.
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, as text.
        body: String,
    },
    /// The backend returned no atoms for the requested molecule.
    EmptyMolecule(String),
    /// A backend payload could not be decoded.
    Payload(String),
    /// The backend reported an `{error}` object.
    Backend(String),
    /// The URL fragment could not be decoded into a selection state.
    Fragment(String),
    /// A search was requested with no distance pairs.
    NoPairs,
    /// A selection operation was rejected.
    Selection(SelectionError),
    /// The search results context could not be reached.
    Handoff(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for MolpickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status { code, body } => {
                write!(f, "HTTP error! status: {code}")?;
                if !body.is_empty() {
                    write!(f, " ({body})")?;
                }
                Ok(())
            }
            Self::EmptyMolecule(id) => {
                write!(f, "received empty atom data for {id}")
            }
            Self::Payload(msg) => write!(f, "malformed payload: {msg}"),
            Self::Backend(msg) => write!(f, "{msg}"),
            Self::Fragment(msg) => {
                write!(f, "error loading state from URL: {msg}")
            }
            Self::NoPairs => write!(
                f,
                "Please add at least one distance pair before searching."
            ),
            Self::Selection(e) => write!(f, "selection error: {e}"),
            Self::Handoff(msg) => write!(f, "search hand-off error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for MolpickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Selection(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SelectionError> for MolpickError {
    fn from(e: SelectionError) -> Self {
        Self::Selection(e)
    }
}

impl From<std::io::Error> for MolpickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
