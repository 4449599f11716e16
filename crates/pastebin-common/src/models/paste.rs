use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::PasteStatus;

/// A paste as returned by the server.
///
/// Timestamps are kept as the server sent them; use [`parse_timestamp`] to
/// interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub max_views: u32,
    pub current_views: u32,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub status: PasteStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Paste {
    /// Views left before the server stops serving this paste.
    pub fn remaining_views(&self) -> u32 {
        self.max_views.saturating_sub(self.current_views)
    }
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 and naive ISO 8601 date-times; the latter are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
