//! Search submission and hand-off polling.

use super::{MoleculeController, Notice};
use crate::backend::Backend;
use crate::error::MolpickError;
use crate::persist::Location;
use crate::scene::Stage;
use crate::search::{build_search_data, results_url, HandoffState, ResultsChannel, SearchHandoff, SearchRequest};

impl<B: Backend, S: Stage, L: Location> MoleculeController<B, S, L> {
    /// Submit the distance pairs as a structural search.
    ///
    /// Opens the results context through `channel`; the query itself is
    /// generated once the context reports ready (see
    /// [`poll_search`](Self::poll_search)). A previous unfinished search is
    /// abandoned.
    ///
    /// # Errors
    ///
    /// [`MolpickError::NoPairs`] (with an alert, and without opening
    /// anything) when there are no pairs; channel failures otherwise.
    pub fn submit_search(
        &mut self,
        use_postgis: bool,
        channel: Box<dyn ResultsChannel>,
    ) -> Result<(), MolpickError> {
        let search_data = match build_search_data(&self.store) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("search refused: {e}");
                self.notify(Notice::Alert(e.to_string()));
                return Err(e);
            }
        };
        if let Some(previous) = self.handoff.take() {
            if !previous.is_finished() {
                log::warn!("abandoning unfinished search in {:?}", previous.state());
            }
        }

        let url = results_url(&self.options.search.results_path, use_postgis);
        let request = SearchRequest::new(search_data, use_postgis);
        log::info!(
            "submitting search with {} pair(s), use_postgis: {use_postgis}",
            request.selected_pairs.len()
        );
        match SearchHandoff::open(channel, &url, request) {
            Ok(handoff) => {
                self.handoff = Some(handoff);
                Ok(())
            }
            Err(e) => {
                log::error!("could not open search results: {e}");
                self.notify(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Submit with the configured `use_postgis` default.
    ///
    /// # Errors
    ///
    /// See [`submit_search`](Self::submit_search).
    pub fn submit_default_search(
        &mut self,
        channel: Box<dyn ResultsChannel>,
    ) -> Result<(), MolpickError> {
        self.submit_search(self.options.search.use_postgis, channel)
    }

    /// Progress the running search hand-off, if any. Returns its state.
    ///
    /// # Errors
    ///
    /// Channel failures; the hand-off is dropped and a notice recorded.
    pub fn poll_search(&mut self) -> Result<Option<HandoffState>, MolpickError> {
        let Some(handoff) = self.handoff.as_mut() else {
            return Ok(None);
        };
        match handoff.poll(&mut self.backend) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                log::error!("search hand-off failed: {e}");
                self.handoff = None;
                self.notify(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }
}
