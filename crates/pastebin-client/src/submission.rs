//! Creating a paste and holding on to the result for display.

use std::sync::Arc;

use chrono::Utc;
use pastebin_common::share::share_url;
use pastebin_common::Paste;
use tokio::sync::watch;
use zeroize::Zeroize;

use crate::api_client::PasteApi;
use crate::config::ClientConfig;
use crate::error::PasteError;
use crate::form::PasteForm;

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create paste";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded(Paste),
    Failed(String),
}

/// User-facing message for a failed create.
fn failure_message(err: &PasteError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        CREATE_FAILED_MESSAGE.to_string()
    } else {
        message
    }
}

pub struct SubmissionController {
    api: Arc<dyn PasteApi>,
    share_base_url: String,
    state: watch::Sender<SubmissionState>,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn PasteApi>, config: &ClientConfig) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            api,
            share_base_url: config.share_base().to_string(),
            state,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Share link for the created paste, once there is one.
    pub fn share_url(&self) -> Option<String> {
        match &*self.state.borrow() {
            SubmissionState::Succeeded(paste) => match share_url(&self.share_base_url, &paste.id) {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!(error = %err, "cannot build share URL");
                    None
                }
            },
            _ => None,
        }
    }

    /// Create a paste from the form.
    ///
    /// Accepted from `Idle` or `Failed` only. The form's password is wiped
    /// whatever the outcome.
    pub async fn submit(&mut self, form: &mut PasteForm) -> SubmissionState {
        if !matches!(
            *self.state.borrow(),
            SubmissionState::Idle | SubmissionState::Failed(_)
        ) {
            tracing::warn!("submit ignored: a paste was already submitted");
            return self.state();
        }

        self.state.send_replace(SubmissionState::Submitting);
        let request = form.to_request(Utc::now());
        form.clear_password();

        let outcome = match request {
            Ok(mut request) => {
                let outcome = self.api.create_paste(&request).await;
                if let Some(password) = request.password.as_mut() {
                    password.zeroize();
                }
                outcome
            }
            Err(err) => Err(err),
        };

        let next = match outcome {
            Ok(paste) => {
                tracing::info!(status = %paste.status, "paste created");
                SubmissionState::Succeeded(paste)
            }
            Err(err) => {
                tracing::warn!(error = %err, "paste creation failed");
                SubmissionState::Failed(failure_message(&err))
            }
        };
        self.state.send_replace(next);
        self.state()
    }

    /// Forget the previous result and accept a new submission.
    pub fn reset(&mut self) {
        self.state.send_replace(SubmissionState::Idle);
    }
}
