//! Tag and custom-property codec.
//!
//! Tags persist as a JSON array of strings, custom properties as a JSON
//! object of string values. Decoding returns an explicit `Result`; callers
//! decide whether a malformed column is fatal or read as empty.

use crate::types::bookmark::CustomProperties;
use crate::types::errors::CodecError;

/// Persisted form of an empty tag list.
pub const EMPTY_TAGS: &str = "[]";

/// Persisted form of an empty property map.
pub const EMPTY_PROPERTIES: &str = "{}";

/// Encodes tags in order. `None` and an empty slice both encode to `[]`.
pub fn encode_tags(tags: Option<&[String]>) -> String {
    match tags {
        Some(t) if !t.is_empty() => {
            serde_json::to_string(t).unwrap_or_else(|_| EMPTY_TAGS.to_string())
        }
        _ => EMPTY_TAGS.to_string(),
    }
}

/// Decodes a tags column. Blank and `null` columns decode as empty.
pub fn decode_tags(text: &str) -> Result<Vec<String>, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" || trimmed == EMPTY_TAGS {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).map_err(|e| CodecError::Tags(e.to_string()))
}

/// Encodes custom properties. `None` and an empty map both encode to `{}`.
pub fn encode_properties(props: Option<&CustomProperties>) -> String {
    match props {
        Some(p) if !p.is_empty() => {
            serde_json::to_string(p).unwrap_or_else(|_| EMPTY_PROPERTIES.to_string())
        }
        _ => EMPTY_PROPERTIES.to_string(),
    }
}

/// Decodes a custom-properties column. Blank and `null` columns decode as empty.
pub fn decode_properties(text: &str) -> Result<CustomProperties, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" || trimmed == EMPTY_PROPERTIES {
        return Ok(CustomProperties::new());
    }
    serde_json::from_str(trimmed).map_err(|e| CodecError::Properties(e.to_string()))
}
