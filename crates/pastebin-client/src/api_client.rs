use async_trait::async_trait;
use pastebin_common::api::PASSWORD_HEADER;
use pastebin_common::share::{paste_url, pastes_url};
use pastebin_common::{CreatePasteRequest, ErrorResponse, Paste};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{PasteError, Result};

/// Operations the controllers need from the paste server.
///
/// Each call is exactly one round trip: no retries, caching or deduplication.
#[async_trait]
pub trait PasteApi: Send + Sync {
    async fn create_paste(&self, request: &CreatePasteRequest) -> Result<Paste>;

    /// Fetch a paste, presenting `password` when one is given.
    async fn get_paste(&self, id: &str, password: Option<&str>) -> Result<Paste>;
}

/// HTTP client for communicating with the paste server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

/// Message used when the error body carries nothing usable.
fn status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Turn a response into its success body or a classified error.
///
/// A failure body that is not `{"error": ...}` JSON never masks the status;
/// the synthesized message is used instead.
async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return resp
            .json::<T>()
            .await
            .map_err(|e| PasteError::Transport(format!("malformed response body: {e}")));
    }

    let message = match resp.json::<ErrorResponse>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => status_message(status),
    };
    Err(PasteError::Api {
        message,
        status: status.as_u16(),
    })
}

#[async_trait]
impl PasteApi for ApiClient {
    async fn create_paste(&self, request: &CreatePasteRequest) -> Result<Paste> {
        let url = pastes_url(&self.base_url)?;
        let resp = self.client.post(url.clone()).json(request).send().await?;
        tracing::debug!(status = resp.status().as_u16(), "POST {}", url.path());
        handle_response(resp).await
    }

    async fn get_paste(&self, id: &str, password: Option<&str>) -> Result<Paste> {
        let url = paste_url(&self.base_url, id)?;
        let mut req = self.client.get(url.clone());
        if let Some(password) = password {
            req = req.header(PASSWORD_HEADER, password);
        }
        let resp = req.send().await?;
        tracing::debug!(
            status = resp.status().as_u16(),
            with_password = password.is_some(),
            "GET {}",
            url.path()
        );
        handle_response(resp).await
    }
}
