//! The structured resume returned by the optimisation service.
//!
//! [`ResumeRecord`] is the single interchange format between the service
//! response and the two renderers. [`parse_record`] is the only way a
//! record gets built from untyped JSON: one validation pass reports every
//! missing top-level key, then serde produces the typed record.
//!
//! Text fields take any JSON scalar. Models often answer `"year": 2019`
//! rather than `"year": "2019"`, and such a record renders the same.

use crate::error::IntellicvError;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level keys a record must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "contact_info", "experience", "education", "skills"];

/// An optimized resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub contact_info: String,
    /// Positions in the order the service listed them.
    pub experience: Vec<ExperienceEntry>,
    pub education: Education,
    #[serde(deserialize_with = "scalar_text_list")]
    pub skills: Vec<String>,
}

/// One position held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "scalar_text")]
    pub company: String,
    #[serde(deserialize_with = "scalar_text")]
    pub job_title: String,
    /// Free-form, e.g. `"2019 - Present"`.
    #[serde(deserialize_with = "scalar_text")]
    pub dates: String,
    #[serde(deserialize_with = "scalar_text_list")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(deserialize_with = "scalar_text")]
    pub degree: String,
    #[serde(deserialize_with = "scalar_text")]
    pub year: String,
}

/// Validate and decode an untyped JSON value into a [`ResumeRecord`].
///
/// # Errors
/// - [`IntellicvError::MalformedPayload`] if `value` is not an object, or a
///   present field has the wrong shape
/// - [`IntellicvError::IncompleteRecord`] listing every absent key from
///   [`REQUIRED_FIELDS`]
pub fn parse_record(value: &Value) -> Result<ResumeRecord, IntellicvError> {
    let object = value
        .as_object()
        .ok_or_else(|| IntellicvError::MalformedPayload {
            reason: format!("expected a JSON object, got {}", json_kind(value)),
        })?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IntellicvError::IncompleteRecord { missing });
    }

    ResumeRecord::deserialize(value).map_err(|e| IntellicvError::MalformedPayload {
        reason: e.to_string(),
    })
}

/// String, number or boolean as text. Null, arrays and objects are rejected.
fn scalar_to_text<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!(
            "invalid type: {}, expected a string or number",
            json_kind(&other)
        ))),
    }
}

fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_to_text(Value::deserialize(deserializer)?)
}

fn scalar_text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(scalar_to_text)
        .collect()
}

/// Short human name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
