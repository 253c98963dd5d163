//! Marshalling of audience lists to and from their JSON-array text columns.
//!
//! The store has no multi-value column type, so each list is persisted as
//! a JSON array string. Conversion happens only at the repository edge.

use tracing::warn;

use crate::{AppError, Result};

/// Encode an ordered list as a JSON array string.
///
/// # Errors
///
/// Returns `AppError::MalformedEncoding` if serialization fails.
pub fn encode_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a stored column back into an ordered list.
///
/// A null, blank or JSON `null` column decodes to an empty list.
///
/// # Errors
///
/// Returns `AppError::MalformedEncoding` if the text is not a JSON array
/// of strings.
pub fn decode_list(column: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = column.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Vec::new());
    };

    let decoded: Option<Vec<String>> = serde_json::from_str(raw)
        .map_err(|err| AppError::MalformedEncoding(format!("{raw:?}: {err}")))?;
    Ok(decoded.unwrap_or_default())
}

/// Decode a stored column, substituting an empty list when it is malformed.
#[must_use]
pub fn decode_list_or_empty(column: Option<&str>, field: &str, record_id: &str) -> Vec<String> {
    decode_list(column).unwrap_or_else(|err| {
        warn!(%err, field, record_id, "audience column undecodable; using empty list");
        Vec::new()
    })
}
