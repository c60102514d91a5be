//! Response Parser — pulls a JSON object out of raw model text.
//!
//! Tries the whole text first, then the span from the first `{` to the last `}`.
//! No schema checks here; the pipeline decides which fields are usable.

use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object returned by the model, before field validation.
pub type Draft = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model response contains no JSON object")]
    NoJsonObject,

    #[error("model response JSON is invalid: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("model response JSON is not an object")]
    NotAnObject,
}

/// Extracts a JSON object from `raw`, tolerating leading and trailing noise
/// such as prose or markdown fences.
pub fn extract_json(raw: &str) -> Result<Draft, ParseError> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(direct_err) => {
            let span = object_span(raw).ok_or(if raw.contains('{') {
                ParseError::Invalid(direct_err)
            } else {
                ParseError::NoJsonObject
            })?;
            serde_json::from_str::<Value>(span)?
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ParseError::NotAnObject),
    }
}

/// Substring from the first `{` through the last `}`, inclusive.
fn object_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}
