//! Fetching a paste by identifier, including the password challenge.
//!
//! Every fetch runs as its own task tagged with a generation number. Only a
//! completion carrying the current generation and identifier may change the
//! state; anything else is a leftover from an earlier navigation and is
//! dropped.

use std::sync::Arc;

use pastebin_common::share::is_valid_paste_id;
use pastebin_common::Paste;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use zeroize::Zeroizing;

use crate::api_client::PasteApi;
use crate::error::{PasteError, Result};

pub const INVALID_ID_MESSAGE: &str = "Invalid paste ID";
pub const NOT_FOUND_MESSAGE: &str = "Paste not found";
pub const GONE_MESSAGE: &str = "Paste expired or unavailable";
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load paste";

/// Which kind of fetch is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// First fetch for an identifier; nothing to show yet.
    Initial,
    /// A password was submitted; the password prompt stays on screen.
    PasswordRetry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalState {
    Loading(LoadPhase),
    PasswordRequired { last_error: Option<String> },
    Loaded(Paste),
    Failed(String),
}

impl RetrievalState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RetrievalState::Loading(_))
    }
}

/// Map the outcome of one fetch to the state it leads to.
///
/// `with_password` tells whether the fetch presented a password, which turns
/// a 401 into a wrong-password condition.
pub fn classify(result: Result<Paste>, with_password: bool) -> RetrievalState {
    match result {
        Ok(paste) => RetrievalState::Loaded(paste),
        Err(PasteError::Api { status: 410, .. }) => RetrievalState::Failed(GONE_MESSAGE.into()),
        Err(PasteError::Api { status: 404, .. }) => {
            RetrievalState::Failed(NOT_FOUND_MESSAGE.into())
        }
        Err(PasteError::Api { status: 401, .. }) => RetrievalState::PasswordRequired {
            last_error: with_password.then(|| INVALID_PASSWORD_MESSAGE.to_string()),
        },
        Err(err) => {
            let message = err.to_string();
            if message.is_empty() {
                RetrievalState::Failed(LOAD_FAILED_MESSAGE.into())
            } else {
                RetrievalState::Failed(message)
            }
        }
    }
}

#[derive(Debug)]
struct Completion {
    generation: u64,
    paste_id: String,
    with_password: bool,
    result: Result<Paste>,
}

/// Drives [`RetrievalState`] for one view of a paste.
///
/// Must be created and used inside a tokio runtime.
pub struct RetrievalController {
    api: Arc<dyn PasteApi>,
    paste_id: Option<String>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    state: watch::Sender<RetrievalState>,
}

impl RetrievalController {
    /// Create a controller and start loading `paste_id`.
    pub fn new(api: Arc<dyn PasteApi>, paste_id: Option<&str>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(RetrievalState::Loading(LoadPhase::Initial));
        let mut controller = Self {
            api,
            paste_id: None,
            generation: 0,
            in_flight: None,
            completions_tx,
            completions_rx,
            state,
        };
        controller.navigate(paste_id);
        controller
    }

    pub fn state(&self) -> RetrievalState {
        self.state.borrow().clone()
    }

    /// Watch the state from now on.
    ///
    /// Fetch results are only applied while [`RetrievalController::settle`]
    /// is being awaited, so `Loaded`, `Failed` and `PasswordRequired` show up
    /// here no earlier than that.
    pub fn subscribe(&self) -> watch::Receiver<RetrievalState> {
        self.state.subscribe()
    }

    pub fn paste_id(&self) -> Option<&str> {
        self.paste_id.as_deref()
    }

    /// Switch to another identifier, abandoning whatever was in flight.
    pub fn navigate(&mut self, paste_id: Option<&str>) {
        self.cancel_in_flight();
        match paste_id.filter(|id| is_valid_paste_id(id)) {
            None => {
                self.paste_id = None;
                self.set_state(RetrievalState::Failed(INVALID_ID_MESSAGE.into()));
            }
            Some(id) => {
                self.paste_id = Some(id.to_string());
                self.set_state(RetrievalState::Loading(LoadPhase::Initial));
                self.dispatch(id.to_string(), None);
            }
        }
    }

    /// Retry the current identifier with a password.
    ///
    /// Only accepted while a password is required; returns whether a fetch
    /// was started. There is no limit on attempts.
    pub fn submit_password(&mut self, password: impl Into<String>) -> bool {
        let password = Zeroizing::new(password.into());
        let paste_id = match (&*self.state.borrow(), &self.paste_id) {
            (RetrievalState::PasswordRequired { .. }, Some(id)) => id.clone(),
            _ => {
                tracing::debug!("ignoring password submission outside of a password prompt");
                return false;
            }
        };
        self.cancel_in_flight();
        self.set_state(RetrievalState::Loading(LoadPhase::PasswordRetry));
        self.dispatch(paste_id, Some(password));
        true
    }

    /// Wait until the current fetch has been applied and return the
    /// resulting state. Returns at once when nothing is loading.
    pub async fn settle(&mut self) -> RetrievalState {
        while self.state.borrow().is_loading() {
            match self.completions_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
        self.state()
    }

    fn dispatch(&mut self, paste_id: String, password: Option<Zeroizing<String>>) {
        let generation = self.generation;
        let api = Arc::clone(&self.api);
        let tx = self.completions_tx.clone();
        tracing::debug!(generation, with_password = password.is_some(), "fetching paste");
        self.in_flight = Some(tokio::spawn(async move {
            let result = api
                .get_paste(&paste_id, password.as_ref().map(|p| p.as_str()))
                .await;
            let _ = tx.send(Completion {
                generation,
                paste_id,
                with_password: password.is_some(),
                result,
            });
        }));
    }

    /// Apply a completion if it still belongs to the current fetch.
    fn apply(&mut self, completion: Completion) -> bool {
        let current = completion.generation == self.generation
            && self.paste_id.as_deref() == Some(completion.paste_id.as_str());
        if !current {
            tracing::debug!(
                generation = completion.generation,
                current_generation = self.generation,
                "discarding stale paste response"
            );
            return false;
        }
        self.in_flight = None;
        let next = classify(completion.result, completion.with_password);
        self.set_state(next);
        true
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    fn set_state(&self, next: RetrievalState) {
        tracing::trace!(generation = self.generation, state = state_name(&next), "retrieval state");
        self.state.send_replace(next);
    }
}

impl Drop for RetrievalController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

fn state_name(state: &RetrievalState) -> &'static str {
    match state {
        RetrievalState::Loading(LoadPhase::Initial) => "loading",
        RetrievalState::Loading(LoadPhase::PasswordRetry) => "unlocking",
        RetrievalState::PasswordRequired { .. } => "password_required",
        RetrievalState::Loaded(_) => "loaded",
        RetrievalState::Failed(_) => "failed",
    }
}
