//! The molecule/search backend: molecule lookup, identifier search and
//! search-query generation.
//!
//! [`Backend`] is the seam the controller talks through. Payload parsing is
//! shared here so every transport treats status codes, empty results and
//! `{error}` objects the same way.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpBackend;
use serde::{Deserialize, Serialize};

use crate::error::MolpickError;
use crate::model::AtomRecord;
use crate::search::SearchRequest;

/// One entry of the identifier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierEntry {
    /// Molecule identifier (e.g. a PDB code).
    pub id: String,
}

/// Operations the controller needs from the backend.
pub trait Backend {
    /// `GET /get_molecule/{id}`: atom records of a molecule. An empty list
    /// is an error.
    ///
    /// # Errors
    ///
    /// Transport, status, payload and empty-molecule failures.
    fn fetch_molecule(&mut self, pdb_id: &str) -> Result<Vec<AtomRecord>, MolpickError>;

    /// `GET /get_pdb_identifiers?search={text}`: identifiers matching a
    /// search text (empty text lists the first ones).
    ///
    /// # Errors
    ///
    /// Transport, status and payload failures, or a backend `{error}`.
    fn search_identifiers(&mut self, search: &str) -> Result<Vec<IdentifierEntry>, MolpickError>;

    /// `POST /search` with `skip_execution`: the SQL query generated for
    /// the constraints.
    ///
    /// # Errors
    ///
    /// Transport and status failures, a backend `{error}`, or a reply
    /// without `sql_query`.
    fn build_search_query(&mut self, request: &SearchRequest) -> Result<String, MolpickError>;
}

/// Either a payload or a backend `{error}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply<T> {
    Error { error: String },
    Ok(T),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T, MolpickError> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Error { error } => Err(MolpickError::Backend(error)),
        }
    }
}

/// Response of `POST /search`.
#[derive(Debug, Deserialize)]
struct SearchReply {
    sql_query: Option<String>,
}

/// Turn an HTTP status and body into an error if the status is not 2xx.
///
/// A JSON `{error}` body takes precedence over the bare status.
///
/// # Errors
///
/// [`MolpickError::Backend`] or [`MolpickError::Status`] for non-2xx codes.
pub fn check_status(code: u16, body: &str) -> Result<(), MolpickError> {
    if (200..300).contains(&code) {
        return Ok(());
    }
    if let Ok(Reply::Error { error }) = serde_json::from_str::<Reply<serde_json::Value>>(body) {
        return Err(MolpickError::Backend(error));
    }
    Err(MolpickError::Status {
        code,
        body: body.trim().to_owned(),
    })
}

/// Parse a `get_molecule` body.
///
/// # Errors
///
/// Undecodable bodies, backend `{error}` objects and empty atom lists.
pub fn parse_molecule(pdb_id: &str, body: &str) -> Result<Vec<AtomRecord>, MolpickError> {
    let atoms: Vec<AtomRecord> = serde_json::from_str::<Reply<Vec<AtomRecord>>>(body)
        .map_err(|e| MolpickError::Payload(e.to_string()))?
        .into_result()?;
    if atoms.is_empty() {
        return Err(MolpickError::EmptyMolecule(pdb_id.to_owned()));
    }
    Ok(atoms)
}

/// Parse a `get_pdb_identifiers` body.
///
/// # Errors
///
/// Undecodable bodies and backend `{error}` objects.
pub fn parse_identifiers(body: &str) -> Result<Vec<IdentifierEntry>, MolpickError> {
    serde_json::from_str::<Reply<Vec<IdentifierEntry>>>(body)
        .map_err(|e| MolpickError::Payload(e.to_string()))?
        .into_result()
}

/// Parse a `search` body into the generated SQL query.
///
/// # Errors
///
/// Undecodable bodies, backend `{error}` objects, and replies without
/// `sql_query`.
pub fn parse_search_query(body: &str) -> Result<String, MolpickError> {
    let reply = serde_json::from_str::<Reply<SearchReply>>(body)
        .map_err(|e| MolpickError::Payload(e.to_string()))?
        .into_result()?;
    reply
        .sql_query
        .ok_or_else(|| MolpickError::Payload("Unexpected response from server".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_payload_parses() {
        let body = r#"[{"id": 1, "element": 6, "type": "C1", "origin": "ligand",
                        "x": 0.5, "y": 1.5, "z": -2.0}]"#;
        let atoms = parse_molecule("1ABC", body).unwrap();
        assert_eq!(atoms.len(), 1);
        assert_eq!(atoms[0].element, 6);
    }

    #[test]
    fn empty_molecule_is_an_error() {
        assert!(matches!(
            parse_molecule("1ABC", "[]"),
            Err(MolpickError::EmptyMolecule(id)) if id == "1ABC"
        ));
        assert!(matches!(
            parse_molecule("1ABC", "{\"unexpected\": true}"),
            Err(MolpickError::Payload(_))
        ));
    }

    #[test]
    fn identifier_errors_surface_backend_message() {
        let ids = parse_identifiers(r#"[{"id": "1ABC"}, {"id": "2XYZ"}]"#).unwrap();
        assert_eq!(ids[1].id, "2XYZ");
        assert!(matches!(
            parse_identifiers(r#"{"error": "Search term too long"}"#),
            Err(MolpickError::Backend(msg)) if msg == "Search term too long"
        ));
    }

    #[test]
    fn search_reply_needs_sql_query() {
        assert_eq!(
            parse_search_query(r#"{"sql_query": "SELECT 1"}"#).unwrap(),
            "SELECT 1"
        );
        assert!(matches!(
            parse_search_query(r#"{"error": "No pairs selected"}"#),
            Err(MolpickError::Backend(_))
        ));
        assert!(matches!(
            parse_search_query("{}"),
            Err(MolpickError::Payload(msg)) if msg == "Unexpected response from server"
        ));
    }

    #[test]
    fn status_check_prefers_backend_message() {
        assert!(check_status(200, "").is_ok());
        assert!(matches!(
            check_status(404, r#"{"error": "No atoms found"}"#),
            Err(MolpickError::Backend(msg)) if msg == "No atoms found"
        ));
        assert!(matches!(
            check_status(502, "Bad Gateway\n"),
            Err(MolpickError::Status { code: 502, body }) if body == "Bad Gateway"
        ));
    }
}
