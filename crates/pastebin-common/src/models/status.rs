use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status reported by the server.
///
/// The server owns every transition; clients only display it. Values this
/// client does not know are kept verbatim in [`PasteStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PasteStatus {
    Active,
    Viewed,
    Expired,
    Deleted,
    Other(String),
}

impl PasteStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PasteStatus::Active => "ACTIVE",
            PasteStatus::Viewed => "VIEWED",
            PasteStatus::Expired => "EXPIRED",
            PasteStatus::Deleted => "DELETED",
            PasteStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for PasteStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ACTIVE" => PasteStatus::Active,
            "VIEWED" => PasteStatus::Viewed,
            "EXPIRED" => PasteStatus::Expired,
            "DELETED" => PasteStatus::Deleted,
            _ => PasteStatus::Other(raw),
        }
    }
}

impl fmt::Display for PasteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PasteStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PasteStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(PasteStatus::from)
    }
}
