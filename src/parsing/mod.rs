//! Shared decoding helpers for JSON-based message sources.
//!
//! Both the Telegram export source and the JSON Lines source read loosely
//! typed JSON: counters may be numbers or strings, text may be a string or a
//! list of formatted entities, reactions come in several layouts. These
//! helpers turn such values into the typed [`RawMessage`](crate::RawMessage)
//! fields, falling back to `None` instead of failing.

pub mod reactions;

use serde_json::Value;

use crate::message::RawTimestamp;

pub use reactions::{parse_reaction_entry, parse_reactions};

/// Extracts text from a string or an array of text entities.
///
/// The field can be:
/// - A simple string: `"Hello"`
/// - An array with strings and objects: `["Read ", {"type": "link", "text": "this"}]`
///
/// Returns `None` for `null` and for values of any other type.
pub fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => Some(
            parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(obj) => obj.get("text").and_then(Value::as_str),
                    _ => None,
                })
                .collect::<String>(),
        ),
        _ => None,
    }
}

/// Reads a non-negative integer from a number or a numeric string.
///
/// `5`, `5.0` and `"5"` all give `Some(5)`; negative, fractional and
/// non-numeric values give `None`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Reads a timestamp from a string or Unix seconds.
///
/// `null` means "no timestamp". Strings go through [`RawTimestamp::parse`];
/// any other shape is kept as [`RawTimestamp::Unparsable`].
pub fn parse_timestamp(value: &Value) -> Option<RawTimestamp> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(RawTimestamp::parse(s)),
        Value::Number(n) => Some(
            n.as_i64()
                .map(RawTimestamp::from_unix)
                .unwrap_or_else(|| RawTimestamp::Unparsable(n.to_string())),
        ),
        other => Some(RawTimestamp::Unparsable(other.to_string())),
    }
}

/// Looks up a field, treating JSON `null` the same as a missing key.
pub(crate) fn field<'a>(obj: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}
