//! Hand-off of a generated query to the search results context.
//!
//! The results context is opened first and must announce itself with
//! [`ResultsMessage::Ready`]. Only then is the query generated and sent as
//! [`ControllerMessage::Initialize`]; the context confirms with
//! [`ResultsMessage::Acknowledged`]. Messages cross the channel as JSON
//! text, one message per send.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{PairQuery, SearchRequest};
use crate::backend::Backend;
use crate::error::MolpickError;

/// Messages from the results context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultsMessage {
    /// The context is loaded and can take the query.
    Ready,
    /// The query was received.
    Acknowledged,
}

/// Messages to the results context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerMessage {
    /// Navigate the context to `url`.
    Open {
        /// Results page address.
        url: String,
    },
    /// Run `sql_query`; `search_data` describes the constraints.
    Initialize {
        /// Generated SQL.
        sql_query: String,
        /// The constraints the query was generated from.
        search_data: Vec<PairQuery>,
    },
    /// Query generation failed; show `message`.
    Failed {
        /// User-facing error text.
        message: String,
    },
}

/// Link to the search results context.
pub trait ResultsChannel {
    /// Open the context at `url`.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the context cannot be reached.
    fn open(&mut self, url: &str) -> Result<(), MolpickError>;

    /// Send a message to the context.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the context is gone.
    fn post(&mut self, message: &ControllerMessage) -> Result<(), MolpickError>;

    /// Next pending message from the context, without blocking.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the context is gone or sent garbage.
    fn try_recv(&mut self) -> Result<Option<ResultsMessage>, MolpickError>;
}

fn send_json<T: Serialize>(tx: &Sender<String>, message: &T) -> Result<(), MolpickError> {
    let json = serde_json::to_string(message).map_err(|e| MolpickError::Payload(e.to_string()))?;
    tx.send(json)
        .map_err(|_| MolpickError::Handoff("results context closed".to_owned()))
}

fn recv_json<T: DeserializeOwned>(rx: &Receiver<String>) -> Result<Option<T>, MolpickError> {
    match rx.try_recv() {
        Ok(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| MolpickError::Handoff(e.to_string())),
        Err(TryRecvError::Empty) => Ok(None),
        Err(TryRecvError::Disconnected) => {
            Err(MolpickError::Handoff("results context closed".to_owned()))
        }
    }
}

/// Controller end of an in-process results channel.
#[derive(Debug)]
pub struct MpscResultsChannel {
    tx: Sender<String>,
    rx: Receiver<String>,
}

impl ResultsChannel for MpscResultsChannel {
    fn open(&mut self, url: &str) -> Result<(), MolpickError> {
        self.post(&ControllerMessage::Open {
            url: url.to_owned(),
        })
    }

    fn post(&mut self, message: &ControllerMessage) -> Result<(), MolpickError> {
        send_json(&self.tx, message)
    }

    fn try_recv(&mut self) -> Result<Option<ResultsMessage>, MolpickError> {
        recv_json(&self.rx)
    }
}

/// Results-context end of an in-process channel.
///
/// Records what the controller sent so a host (or a test) can render it.
#[derive(Debug)]
pub struct ResultsContext {
    tx: Sender<String>,
    rx: Receiver<String>,
    opened_url: Option<String>,
    sql_query: Option<String>,
    error_message: Option<String>,
}

impl ResultsContext {
    /// Address the controller opened, once received.
    #[must_use]
    pub fn opened_url(&self) -> Option<&str> {
        self.opened_url.as_deref()
    }

    /// Query received via `Initialize`.
    #[must_use]
    pub fn sql_query(&self) -> Option<&str> {
        self.sql_query.as_deref()
    }

    /// Error text received via `Failed`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Tell the controller the context is loaded.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the controller end was dropped.
    pub fn signal_ready(&self) -> Result<(), MolpickError> {
        send_json(&self.tx, &ResultsMessage::Ready)
    }

    /// Confirm receipt of the query.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the controller end was dropped.
    pub fn acknowledge(&self) -> Result<(), MolpickError> {
        send_json(&self.tx, &ResultsMessage::Acknowledged)
    }

    /// Take the next controller message, if any, and record its content.
    ///
    /// # Errors
    ///
    /// [`MolpickError::Handoff`] if the controller end was dropped or sent
    /// something unreadable.
    pub fn recv(&mut self) -> Result<Option<ControllerMessage>, MolpickError> {
        let message = recv_json::<ControllerMessage>(&self.rx)?;
        match &message {
            Some(ControllerMessage::Open { url }) => self.opened_url = Some(url.clone()),
            Some(ControllerMessage::Initialize { sql_query, .. }) => {
                self.sql_query = Some(sql_query.clone());
            }
            Some(ControllerMessage::Failed { message }) => {
                self.error_message = Some(message.clone());
            }
            None => {}
        }
        Ok(message)
    }
}

/// Connected controller and results-context ends.
#[must_use]
pub fn mpsc_channel() -> (MpscResultsChannel, ResultsContext) {
    let (to_context, from_controller) = mpsc::channel();
    let (to_controller, from_context) = mpsc::channel();
    (
        MpscResultsChannel {
            tx: to_context,
            rx: from_context,
        },
        ResultsContext {
            tx: to_controller,
            rx: from_controller,
            opened_url: None,
            sql_query: None,
            error_message: None,
        },
    )
}

/// Progress of one search hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    /// Context opened; waiting for `Ready`.
    AwaitingReady,
    /// `Initialize` sent; waiting for `Acknowledged`.
    Sent,
    /// The context confirmed the query.
    Complete,
    /// Query generation failed and the context was told so.
    Failed,
}

/// One submitted search, driven by [`SearchHandoff::poll`].
pub struct SearchHandoff {
    channel: Box<dyn ResultsChannel>,
    request: SearchRequest,
    state: HandoffState,
}

impl SearchHandoff {
    /// Open the results context at `url` for `request`.
    ///
    /// # Errors
    ///
    /// Whatever [`ResultsChannel::open`] reports.
    pub fn open(
        mut channel: Box<dyn ResultsChannel>,
        url: &str,
        request: SearchRequest,
    ) -> Result<Self, MolpickError> {
        channel.open(url)?;
        log::info!("opened results context {url}");
        Ok(Self {
            channel,
            request,
            state: HandoffState::AwaitingReady,
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> HandoffState {
        self.state
    }

    /// Whether no further messages are expected.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, HandoffState::Complete | HandoffState::Failed)
    }

    /// The request being handed off.
    #[must_use]
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Drain pending context messages, generating and sending the query
    /// once the context is ready.
    ///
    /// # Errors
    ///
    /// Channel failures. A query-generation failure is not an error here:
    /// it is reported to the context and ends in [`HandoffState::Failed`].
    pub fn poll<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<HandoffState, MolpickError> {
        while let Some(message) = self.channel.try_recv()? {
            match (self.state, message) {
                (HandoffState::AwaitingReady, ResultsMessage::Ready) => self.deliver(backend)?,
                (HandoffState::Sent, ResultsMessage::Acknowledged) => {
                    log::info!("results context acknowledged the query");
                    self.state = HandoffState::Complete;
                }
                (state, message) => {
                    log::warn!("ignoring {message:?} from results context in {state:?}");
                }
            }
        }
        Ok(self.state)
    }

    fn deliver<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<(), MolpickError> {
        match backend.build_search_query(&self.request) {
            Ok(sql_query) => {
                self.channel.post(&ControllerMessage::Initialize {
                    sql_query,
                    search_data: self.request.selected_pairs.clone(),
                })?;
                self.state = HandoffState::Sent;
            }
            Err(e) => {
                log::error!("error during search: {e}");
                self.channel.post(&ControllerMessage::Failed {
                    message: failure_message(&e),
                })?;
                self.state = HandoffState::Failed;
            }
        }
        Ok(())
    }
}

/// Text shown in the results context when query generation fails.
#[must_use]
pub fn failure_message(error: &MolpickError) -> String {
    format!("An error occurred: {error}. Please try again.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fake::FakeBackend;
    use crate::search::AtomQuery;

    fn request() -> SearchRequest {
        let atom = |matchid| AtomQuery {
            element: 6,
            origin: "ligand".to_owned(),
            matchid,
        };
        SearchRequest::new(
            vec![PairQuery {
                atom1: atom(1),
                atom2: atom(2),
                distance: 1.5,
            }],
            false,
        )
    }

    #[test]
    fn query_waits_for_ready_then_completes_on_ack() {
        let (channel, mut context) = mpsc_channel();
        let mut backend = FakeBackend::default();
        let mut handoff =
            SearchHandoff::open(Box::new(channel), "/search_results?usePostGIS=false", request())
                .unwrap();

        assert_eq!(handoff.poll(&mut backend).unwrap(), HandoffState::AwaitingReady);
        assert_eq!(backend.search_calls, 0);
        let _ = context.recv().unwrap();
        assert_eq!(context.opened_url(), Some("/search_results?usePostGIS=false"));

        context.signal_ready().unwrap();
        assert_eq!(handoff.poll(&mut backend).unwrap(), HandoffState::Sent);
        assert_eq!(backend.search_calls, 1);
        let message = context.recv().unwrap();
        assert!(matches!(
            message,
            Some(ControllerMessage::Initialize { ref search_data, .. })
                if *search_data == request().selected_pairs
        ));
        assert_eq!(context.sql_query(), Some("SELECT 1"));

        context.acknowledge().unwrap();
        assert_eq!(handoff.poll(&mut backend).unwrap(), HandoffState::Complete);
        assert!(handoff.is_finished());
    }

    #[test]
    fn backend_error_is_forwarded_to_the_context() {
        let (channel, mut context) = mpsc_channel();
        let mut backend = FakeBackend {
            search_error: Some("No pairs selected".to_owned()),
            ..FakeBackend::default()
        };
        let mut handoff = SearchHandoff::open(Box::new(channel), "/r", request()).unwrap();
        context.signal_ready().unwrap();
        assert_eq!(handoff.poll(&mut backend).unwrap(), HandoffState::Failed);
        let _ = context.recv().unwrap();
        let _ = context.recv().unwrap();
        assert_eq!(
            context.error_message(),
            Some("An error occurred: No pairs selected. Please try again.")
        );
    }

    #[test]
    fn early_ack_is_ignored_and_dropped_context_is_an_error() {
        let (channel, context) = mpsc_channel();
        let mut backend = FakeBackend::default();
        let mut handoff = SearchHandoff::open(Box::new(channel), "/r", request()).unwrap();
        context.acknowledge().unwrap();
        assert_eq!(handoff.poll(&mut backend).unwrap(), HandoffState::AwaitingReady);
        drop(context);
        assert!(matches!(
            handoff.poll(&mut backend),
            Err(MolpickError::Handoff(_))
        ));
    }
}
