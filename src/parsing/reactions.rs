//! Decoding of reaction summaries.
//!
//! Two layouts are understood.
//!
//! Telegram Desktop exports a flat array:
//! ```json
//! [
//!   {"type": "emoji", "count": 5, "emoji": "👍"},
//!   {"type": "custom_emoji", "count": 2, "document_id": "5368324170671202286"},
//!   {"type": "paid", "count": 3}
//! ]
//! ```
//!
//! The Telegram API (`MessageReactions`) nests entries under `results`:
//! ```json
//! {"results": [
//!   {"reaction": {"_": "ReactionEmoji", "emoticon": "👍"}, "count": 5},
//!   {"reaction": {"_": "ReactionCustomEmoji", "document_id": 5368324170671202286}, "count": 1},
//!   {"reaction": {"_": "ReactionPaid"}, "count": 1}
//! ]}
//! ```

use serde_json::{Map, Value};
use tracing::trace;

use super::{field, parse_count};
use crate::core::reactions::{ReactionEntry, ReactionSummary};

/// Decodes a reaction summary in either layout.
///
/// Returns `None` for `null` and for values that are neither an array nor
/// an object with a `results` array; the message then counts 0 reactions.
pub fn parse_reactions(value: &Value) -> Option<ReactionSummary> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(obj) => match obj.get("results") {
            Some(Value::Array(entries)) => entries,
            Some(Value::Null) | None => return Some(ReactionSummary::default()),
            Some(_) => {
                trace!("reaction summary 'results' is not an array");
                return None;
            }
        },
        Value::Null => return None,
        _ => {
            trace!("unrecognized reaction summary shape");
            return None;
        }
    };

    Some(entries.iter().map(parse_reaction_entry).collect())
}

/// Decodes one reaction entry.
///
/// Never fails: shapes that can't be classified become
/// [`ReactionEntry::Unknown`], keeping their `count` if they have one.
pub fn parse_reaction_entry(value: &Value) -> ReactionEntry {
    let Value::Object(obj) = value else {
        return ReactionEntry::unknown(json_type(value));
    };
    let count = field(obj, "count").and_then(parse_count);

    if let Some(reaction) = field(obj, "reaction") {
        return parse_api_reaction(reaction, count);
    }

    let kind = field(obj, "type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "emoji" => match string_field(obj, "emoji") {
            Some(emoji) => ReactionEntry::emoji(emoji, count),
            None => unknown(kind, count),
        },
        "custom_emoji" => match string_field(obj, "document_id") {
            Some(id) => ReactionEntry::custom_emoji(id, count),
            None => unknown(kind, count),
        },
        "paid" => ReactionEntry::paid(count),
        _ => unknown(kind, count),
    }
}

fn parse_api_reaction(reaction: &Value, count: Option<u64>) -> ReactionEntry {
    match reaction {
        // Some dumpers flatten emoji reactions to the bare emoticon.
        Value::String(emoji) => ReactionEntry::emoji(emoji.clone(), count),
        Value::Object(obj) => {
            let tag = field(obj, "_")
                .or_else(|| field(obj, "@type"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            match tag {
                "ReactionEmoji" | "reactionTypeEmoji" => match string_field(obj, "emoticon")
                    .or_else(|| string_field(obj, "emoji"))
                {
                    Some(emoji) => ReactionEntry::emoji(emoji, count),
                    None => unknown(tag, count),
                },
                "ReactionCustomEmoji" | "reactionTypeCustomEmoji" => {
                    match string_field(obj, "document_id")
                        .or_else(|| string_field(obj, "custom_emoji_id"))
                    {
                        Some(id) => ReactionEntry::custom_emoji(id, count),
                        None => unknown(tag, count),
                    }
                }
                "ReactionPaid" | "reactionTypePaid" => ReactionEntry::paid(count),
                _ => unknown(tag, count),
            }
        }
        other => unknown(json_type(other), count),
    }
}

/// Reads a string field, accepting numeric identifiers as well.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match field(obj, key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn unknown(kind: &str, count: Option<u64>) -> ReactionEntry {
    ReactionEntry::Unknown {
        kind: kind.to_string(),
        count,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_desktop_layout() {
        let value = json!([
            {"type": "emoji", "count": 5, "emoji": "👍"},
            {"type": "custom_emoji", "count": 2, "document_id": "5368324170671202286"},
            {"type": "paid", "count": 3}
        ]);
        let summary = parse_reactions(&value).unwrap();
        assert_eq!(
            summary.entries,
            vec![
                ReactionEntry::emoji("👍", Some(5)),
                ReactionEntry::custom_emoji("5368324170671202286", Some(2)),
                ReactionEntry::paid(Some(3)),
            ]
        );
        assert_eq!(summary.total(), 10);
    }

    #[test]
    fn test_api_layout() {
        let value = json!({"results": [
            {"reaction": {"_": "ReactionEmoji", "emoticon": "❤"}, "count": 4},
            {"reaction": {"_": "ReactionCustomEmoji", "document_id": 77}, "count": 1},
            {"reaction": {"_": "ReactionPaid"}, "count": 2},
            {"reaction": "🔥", "count": "3"}
        ]});
        let summary = parse_reactions(&value).unwrap();
        assert_eq!(summary.entries[0], ReactionEntry::emoji("❤", Some(4)));
        assert_eq!(summary.entries[1], ReactionEntry::custom_emoji("77", Some(1)));
        assert_eq!(summary.entries[2], ReactionEntry::paid(Some(2)));
        assert_eq!(summary.entries[3], ReactionEntry::emoji("🔥", Some(3)));
        assert_eq!(summary.total(), 10);
    }

    #[test]
    fn test_entries_without_count_are_tolerated() {
        let value = json!([
            {"type": "emoji", "emoji": "👍"},
            {"type": "emoji", "emoji": "🎉", "count": null},
            {"type": "emoji", "emoji": "😢", "count": "lots"},
            {"type": "emoji", "emoji": "😡", "count": 6},
            "garbage",
            42
        ]);
        let summary = parse_reactions(&value).unwrap();
        assert_eq!(summary.entries.len(), 6);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_unknown_types_keep_count() {
        let value = json!([{"type": "reaction_future", "count": 9}]);
        let summary = parse_reactions(&value).unwrap();
        assert_eq!(
            summary.entries[0],
            ReactionEntry::Unknown {
                kind: "reaction_future".into(),
                count: Some(9)
            }
        );
        assert_eq!(summary.total(), 9);
    }

    #[test]
    fn test_absent_and_odd_summaries() {
        assert_eq!(parse_reactions(&json!(null)), None);
        assert_eq!(parse_reactions(&json!("👍")), None);
        assert_eq!(parse_reactions(&json!({"results": 5})), None);
        assert_eq!(parse_reactions(&json!({})), Some(ReactionSummary::default()));
        assert_eq!(parse_reactions(&json!([])), Some(ReactionSummary::default()));
    }
}
