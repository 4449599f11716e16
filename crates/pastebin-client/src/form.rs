//! Raw create-form fields and their conversion into a request body.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use pastebin_common::CreatePasteRequest;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{PasteError, Result};

/// Field values as collected from the user, before any derivation.
#[derive(Clone)]
pub struct PasteForm {
    pub content: String,
    pub max_views: u32,
    /// Lead time in seconds from submission; `None` or non-positive means
    /// the paste never expires.
    pub expires_in_seconds: Option<i64>,
    pub password: Zeroizing<String>,
}

impl fmt::Debug for PasteForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasteForm")
            .field("content_len", &self.content.len())
            .field("max_views", &self.max_views)
            .field("expires_in_seconds", &self.expires_in_seconds)
            .field("has_password", &!self.password.is_empty())
            .finish()
    }
}

impl Default for PasteForm {
    fn default() -> Self {
        Self {
            content: String::new(),
            max_views: 1,
            expires_in_seconds: None,
            password: Zeroizing::new(String::new()),
        }
    }
}

impl PasteForm {
    pub fn new(content: impl Into<String>, max_views: u32) -> Self {
        Self {
            content: content.into(),
            max_views,
            ..Self::default()
        }
    }

    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expires_in_seconds = Some(seconds);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Zeroizing::new(password.into());
        self
    }

    /// Required-field checks only; content itself is not inspected.
    pub fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(PasteError::InvalidForm("Content is required".to_string()));
        }
        if self.max_views < 1 {
            return Err(PasteError::InvalidForm(
                "Max views must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the request body as of `now`.
    pub fn to_request(&self, now: DateTime<Utc>) -> Result<CreatePasteRequest> {
        self.validate()?;
        let password = if self.password.trim().is_empty() {
            None
        } else {
            Some(self.password.to_string())
        };
        Ok(CreatePasteRequest {
            content: self.content.clone(),
            max_views: self.max_views,
            expires_at: expires_at_from_lead_time(now, self.expires_in_seconds)?,
            password,
        })
    }

    pub fn clear_password(&mut self) {
        self.password.zeroize();
    }
}

/// Convert a lead time into an absolute ISO 8601 timestamp.
pub fn expires_at_from_lead_time(
    now: DateTime<Utc>,
    seconds: Option<i64>,
) -> Result<Option<String>> {
    let seconds = match seconds {
        Some(s) if s > 0 => s,
        _ => return Ok(None),
    };
    let expires_at = Duration::try_seconds(seconds)
        .and_then(|lead| now.checked_add_signed(lead))
        .ok_or_else(|| {
            PasteError::InvalidForm("Expiration is too far in the future".to_string())
        })?;
    Ok(Some(expires_at.to_rfc3339_opts(SecondsFormat::Millis, true)))
}
