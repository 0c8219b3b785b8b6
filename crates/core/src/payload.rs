//! Upsert request payload
//!
//! The body of an upsert is a JSON object with the optional fields `key`,
//! `value` and `timestamp` (Unix seconds, any JSON number; a fractional part
//! is truncated). Any other field is rejected with [`Error::UnknownField`]
//! before the store ever sees the write.

use crate::error::{Error, Result};
use crate::types::EntryInput;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statically validated upsert body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpsertPayload {
    /// Key echoed by the client; the addressed key always wins
    #[serde(default)]
    pub key: Option<String>,
    /// Value to store; absent means the empty string
    #[serde(default)]
    pub value: Option<String>,
    /// Write time in Unix seconds; absent means "now"
    #[serde(default)]
    pub timestamp: Option<serde_json::Number>,
}

impl UpsertPayload {
    /// Field names accepted in an upsert body
    pub const FIELDS: &'static [&'static str] = &["key", "value", "timestamp"];

    /// Decode and validate a raw JSON body
    ///
    /// Field names are checked before types so that an unexpected field is
    /// always reported as [`Error::UnknownField`], never as a type error.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let raw: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| Error::MalformedPayload(e.to_string()))?;

        let fields = match raw {
            serde_json::Value::Object(fields) => fields,
            other => {
                return Err(Error::MalformedPayload(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        if let Some(unknown) = fields.keys().find(|name| !Self::FIELDS.contains(&name.as_str())) {
            return Err(Error::UnknownField(unknown.clone()));
        }

        serde_json::from_value(serde_json::Value::Object(fields))
            .map_err(|e| Error::MalformedPayload(e.to_string()))
    }

    /// Convert into the input for a write
    pub fn into_input(self) -> Result<EntryInput> {
        let timestamp = match self.timestamp {
            Some(number) => {
                let out_of_range =
                    || Error::MalformedPayload(format!("timestamp {} out of range", number));
                let secs = whole_seconds(&number).ok_or_else(out_of_range)?;
                Some(DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(out_of_range)?)
            }
            None => None,
        };

        Ok(EntryInput {
            value: self.value.unwrap_or_default(),
            timestamp,
        })
    }
}

/// Truncate a JSON number toward zero; `None` if it does not fit in `i64`
fn whole_seconds(number: &serde_json::Number) -> Option<i64> {
    if let Some(secs) = number.as_i64() {
        return Some(secs);
    }
    let secs = number.as_f64()?.trunc();
    // i64::MAX is not exactly representable; 2^63 itself is out of range
    if secs.is_finite() && secs >= i64::MIN as f64 && secs < i64::MAX as f64 {
        Some(secs as i64)
    } else {
        None
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
