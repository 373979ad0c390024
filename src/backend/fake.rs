//! Scripted in-memory backend for tests.

use rustc_hash::FxHashMap;

use super::{Backend, IdentifierEntry};
use crate::error::MolpickError;
use crate::model::AtomRecord;
use crate::search::SearchRequest;

/// Serves canned molecules and records every call.
pub(crate) struct FakeBackend {
    pub(crate) molecules: FxHashMap<String, Vec<AtomRecord>>,
    pub(crate) identifiers: Vec<String>,
    pub(crate) sql: String,
    pub(crate) search_error: Option<String>,
    pub(crate) molecule_calls: Vec<String>,
    pub(crate) identifier_calls: Vec<String>,
    pub(crate) search_calls: usize,
    pub(crate) last_request: Option<SearchRequest>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            molecules: FxHashMap::default(),
            identifiers: Vec::new(),
            sql: "SELECT 1".to_owned(),
            search_error: None,
            molecule_calls: Vec::new(),
            identifier_calls: Vec::new(),
            search_calls: 0,
            last_request: None,
        }
    }
}

impl FakeBackend {
    pub(crate) fn with_molecule(mut self, pdb_id: &str, atoms: Vec<AtomRecord>) -> Self {
        let _ = self.molecules.insert(pdb_id.to_owned(), atoms);
        self.identifiers.push(pdb_id.to_owned());
        self
    }
}

impl Backend for FakeBackend {
    fn fetch_molecule(&mut self, pdb_id: &str) -> Result<Vec<AtomRecord>, MolpickError> {
        self.molecule_calls.push(pdb_id.to_owned());
        match self.molecules.get(pdb_id) {
            Some(atoms) if atoms.is_empty() => Err(MolpickError::EmptyMolecule(pdb_id.to_owned())),
            Some(atoms) => Ok(atoms.clone()),
            None => Err(MolpickError::Status {
                code: 404,
                body: String::new(),
            }),
        }
    }

    fn search_identifiers(&mut self, search: &str) -> Result<Vec<IdentifierEntry>, MolpickError> {
        self.identifier_calls.push(search.to_owned());
        Ok(self
            .identifiers
            .iter()
            .filter(|id| id.contains(search))
            .take(25)
            .map(|id| IdentifierEntry { id: id.clone() })
            .collect())
    }

    fn build_search_query(&mut self, request: &SearchRequest) -> Result<String, MolpickError> {
        self.search_calls += 1;
        self.last_request = Some(request.clone());
        match &self.search_error {
            Some(message) => Err(MolpickError::Backend(message.clone())),
            None => Ok(self.sql.clone()),
        }
    }
}
