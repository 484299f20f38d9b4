//! Payload extraction: service response body → [`ResumeRecord`].
//!
//! The service wraps the resume in an `optimized_resume` field. Depending on
//! the backend version it is either a JSON-encoded string or an inline
//! object; both are accepted. A missing field is an error in its own right
//! rather than an empty record.

use crate::error::IntellicvError;
use crate::record::{json_kind, parse_record, ResumeRecord};
use serde_json::Value;
use tracing::debug;

/// Response field carrying the resume.
pub const PAYLOAD_FIELD: &str = "optimized_resume";

/// Decode a response body into a JSON object.
pub fn decode_response(body: &str) -> Result<Value, IntellicvError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| IntellicvError::InvalidResponse {
            reason: format!("body is not JSON: {e}"),
        })?;

    if !value.is_object() {
        return Err(IntellicvError::InvalidResponse {
            reason: format!("expected a JSON object, got {}", json_kind(&value)),
        });
    }
    Ok(value)
}

/// Pull the resume out of a decoded response and validate it.
///
/// # Errors
/// - [`IntellicvError::MissingPayload`] if `optimized_resume` is absent
/// - [`IntellicvError::MalformedPayload`] if it is a string that is not
///   JSON, or neither a string nor an object
/// - [`IntellicvError::IncompleteRecord`] if required keys are absent
pub fn extract_record(response: &Value) -> Result<ResumeRecord, IntellicvError> {
    let payload = response
        .get(PAYLOAD_FIELD)
        .ok_or(IntellicvError::MissingPayload)?;

    match payload {
        Value::String(encoded) => {
            debug!("{} is a JSON string ({} chars)", PAYLOAD_FIELD, encoded.len());
            let decoded: Value =
                serde_json::from_str(encoded).map_err(|e| IntellicvError::MalformedPayload {
                    reason: e.to_string(),
                })?;
            parse_record(&decoded)
        }
        Value::Object(_) => parse_record(payload),
        other => Err(IntellicvError::MalformedPayload {
            reason: format!("'{}' is {}", PAYLOAD_FIELD, json_kind(other)),
        }),
    }
}
