//! Paste identifiers and the URLs that address them.
//!
//! A paste lives at `<base>/pastes/<id>`, where `<id>` is percent-encoded as
//! a single path segment. Identifiers are otherwise opaque to the client.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::api::PASTES_SEGMENT;
use crate::error::{CommonError, CommonResult};

/// Whether `id` can address a paste.
///
/// Only blank identifiers and the dot segments, which URL normalisation
/// would resolve away, are rejected.
pub fn is_valid_paste_id(id: &str) -> bool {
    !id.trim().is_empty() && id != "." && id != ".."
}

/// URL of the paste collection under `base_url`.
pub fn pastes_url(base_url: &str) -> CommonResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| CommonError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| CommonError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(PASTES_SEGMENT);
    Ok(url)
}

/// URL of a single paste under `base_url`.
pub fn paste_url(base_url: &str, id: &str) -> CommonResult<Url> {
    if !is_valid_paste_id(id) {
        return Err(CommonError::InvalidPasteId(id.to_string()));
    }
    let mut url = pastes_url(base_url)?;
    url.path_segments_mut()
        .map_err(|_| CommonError::InvalidBaseUrl(base_url.to_string()))?
        .push(id);
    Ok(url)
}

/// Build the share link for a paste.
pub fn share_url(base_url: &str, id: &str) -> CommonResult<String> {
    paste_url(base_url, id).map(String::from)
}

/// Extract a paste identifier from user input.
///
/// Accepts either a bare identifier or a full http(s) share link.
pub fn parse_paste_ref(raw: &str) -> CommonResult<String> {
    let trimmed = raw.trim();
    let invalid = || CommonError::InvalidPasteId(raw.to_string());

    let candidate = match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
            let encoded = segments
                .iter()
                .rposition(|s| *s == PASTES_SEGMENT)
                .and_then(|i| segments.get(i + 1))
                .ok_or_else(invalid)?;
            percent_decode_str(encoded)
                .decode_utf8()
                .map_err(|_| invalid())?
                .into_owned()
        }
        _ => trimmed.to_string(),
    };

    if is_valid_paste_id(&candidate) {
        Ok(candidate)
    } else {
        Err(invalid())
    }
}
