//! Blocking HTTP transport for [`Backend`].

use std::time::Duration;

use ureq::Agent;

use super::{
    check_status, parse_identifiers, parse_molecule, parse_search_query, Backend,
    IdentifierEntry,
};
use crate::error::MolpickError;
use crate::model::AtomRecord;
use crate::options::BackendOptions;
use crate::search::SearchRequest;

/// [`Backend`] over HTTP, one blocking request per call.
pub struct HttpBackend {
    agent: Agent,
    options: BackendOptions,
}

impl HttpBackend {
    /// Client for the backend described by `options`.
    #[must_use]
    pub fn new(options: &BackendOptions) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(options.timeout_secs.map(Duration::from_secs))
            .build();
        Self {
            agent: config.into(),
            options: options.clone(),
        }
    }

    /// Base URL requests go to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.options.base_url
    }

    fn finish(
        result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<String, MolpickError> {
        let mut response = result.map_err(|e| MolpickError::Transport(e.to_string()))?;
        let code = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| MolpickError::Transport(e.to_string()))?;
        check_status(code, &body)?;
        Ok(body)
    }
}

impl Backend for HttpBackend {
    fn fetch_molecule(&mut self, pdb_id: &str) -> Result<Vec<AtomRecord>, MolpickError> {
        let url = self.options.endpoint(&format!("get_molecule/{pdb_id}"));
        log::debug!("GET {url}");
        let body = Self::finish(self.agent.get(&url).call())?;
        parse_molecule(pdb_id, &body)
    }

    fn search_identifiers(&mut self, search: &str) -> Result<Vec<IdentifierEntry>, MolpickError> {
        let url = self.options.endpoint("get_pdb_identifiers");
        log::debug!("GET {url}?search={search}");
        let body = Self::finish(self.agent.get(&url).query("search", search).call())?;
        parse_identifiers(&body)
    }

    fn build_search_query(&mut self, request: &SearchRequest) -> Result<String, MolpickError> {
        let url = self.options.endpoint("search");
        let payload = serde_json::to_string(request)
            .map_err(|e| MolpickError::Payload(e.to_string()))?;
        log::debug!("POST {url} ({} pair(s))", request.selected_pairs.len());
        let body = Self::finish(
            self.agent
                .post(&url)
                .header("Content-Type", "application/json")
                .send(payload),
        )?;
        parse_search_query(&body)
    }
}
