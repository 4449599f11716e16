use std::fmt;

use serde::{Deserialize, Serialize};

/// Request header carrying the password for a protected paste.
pub const PASSWORD_HEADER: &str = "X-Paste-Password";

/// Path segment of the paste collection (POST /pastes, GET /pastes/{id})
pub const PASTES_SEGMENT: &str = "pastes";

/// Request body for POST /pastes
///
/// Optional fields are left out of the JSON entirely when unset.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    pub max_views: u32,
    /// ISO 8601 timestamp; absent means the paste never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for CreatePasteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatePasteRequest")
            .field("content_len", &self.content.len())
            .field("max_views", &self.max_views)
            .field("expires_at", &self.expires_at)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Error body returned by the server on any failure status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
