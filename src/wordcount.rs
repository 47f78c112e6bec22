//! Word-count payload normalization.
//!
//! The word-count endpoint answers either with a list of
//! `{"chapter_name": ..., "wordcount": ...}` records or with an already flat
//! `name -> count` object, optionally wrapped in a `chapters` field.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::debug;

/// Field holding the chapter name in record form.
const NAME_FIELD: &str = "chapter_name";

/// Field holding the word count in record form.
const COUNT_FIELD: &str = "wordcount";

/// Chapter name to word count.
pub type WordCountMap = BTreeMap<String, u64>;

/// Flattens a word-count payload into a [`WordCountMap`].
///
/// Records without a name or with a zero or missing count are ignored. Later
/// duplicates overwrite earlier ones. A payload that is neither a list nor an
/// object yields an empty map.
pub fn normalize_word_counts(payload: &JsonValue) -> WordCountMap {
    let source = payload
        .get("chapters")
        .filter(|chapters| is_truthy(chapters))
        .unwrap_or(payload);

    let mut counts = WordCountMap::new();
    match source {
        JsonValue::Array(records) => {
            for record in records {
                let Some(name) = record
                    .get(NAME_FIELD)
                    .and_then(JsonValue::as_str)
                    .filter(|name| !name.is_empty())
                else {
                    continue;
                };
                let Some(count) = record.get(COUNT_FIELD).filter(|c| is_truthy(c)) else {
                    continue;
                };
                match as_word_count(count) {
                    Some(count) => {
                        counts.insert(name.to_string(), count);
                    }
                    None => {
                        debug!(chapter = name, value = %count, "ignoring non-integer word count")
                    }
                }
            }
        }
        JsonValue::Object(flat) => {
            for (name, count) in flat {
                match as_word_count(count) {
                    Some(count) => {
                        counts.insert(name.clone(), count);
                    }
                    None => {
                        debug!(chapter = %name, value = %count, "ignoring non-integer word count")
                    }
                }
            }
        }
        _ => debug!("word-count payload is neither a list nor an object"),
    }

    counts
}

/// Sum of all word counts.
pub fn total_words(counts: &WordCountMap) -> u64 {
    counts.values().fold(0u64, |sum, n| sum.saturating_add(*n))
}

/// JavaScript-style truthiness, which the upstream payloads rely on.
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Accepts integers, integral floats and integer strings.
fn as_word_count(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(entries: &[(&str, u64)]) -> WordCountMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_wrapped_records() {
        let payload = json!({"chapters": [{"chapter_name": "Ch 1", "wordcount": 1000}]});
        assert_eq!(normalize_word_counts(&payload), map(&[("Ch 1", 1000)]));
    }

    #[test]
    fn test_flat_mapping_is_unchanged() {
        let payload = json!({"Ch 1": 1000});
        assert_eq!(normalize_word_counts(&payload), map(&[("Ch 1", 1000)]));
    }

    #[test]
    fn test_bare_record_list() {
        let payload = json!([
            {"chapter_name": "1.00", "wordcount": 12000},
            {"chapter_name": "1.01", "wordcount": 8000, "extra": true}
        ]);
        assert_eq!(
            normalize_word_counts(&payload),
            map(&[("1.00", 12000), ("1.01", 8000)])
        );
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let payload = json!({"chapters": [
            {"chapter_name": "", "wordcount": 10},
            {"chapter_name": "No count"},
            {"chapter_name": "Zero", "wordcount": 0},
            {"wordcount": 50},
            {"chapter_name": "Kept", "wordcount": 5}
        ]});
        assert_eq!(normalize_word_counts(&payload), map(&[("Kept", 5)]));
    }

    #[test]
    fn test_later_duplicates_overwrite() {
        let payload = json!([
            {"chapter_name": "1.00", "wordcount": 1},
            {"chapter_name": "1.00", "wordcount": 2}
        ]);
        assert_eq!(normalize_word_counts(&payload), map(&[("1.00", 2)]));
    }

    #[test]
    fn test_count_forms() {
        let payload = json!([
            {"chapter_name": "float", "wordcount": 300.0},
            {"chapter_name": "string", "wordcount": "400"},
            {"chapter_name": "fraction", "wordcount": 1.5},
            {"chapter_name": "negative", "wordcount": -3},
            {"chapter_name": "word", "wordcount": "many"}
        ]);
        assert_eq!(
            normalize_word_counts(&payload),
            map(&[("float", 300), ("string", 400)])
        );
    }

    #[test]
    fn test_falsy_chapters_field_uses_payload() {
        let payload = json!({"chapters": null, "1.00": 10});
        let counts = normalize_word_counts(&payload);
        assert_eq!(counts.get("1.00"), Some(&10));
        assert!(!counts.contains_key("chapters"));
    }

    #[test]
    fn test_scalar_payload_is_empty() {
        assert!(normalize_word_counts(&json!(42)).is_empty());
        assert!(normalize_word_counts(&json!(null)).is_empty());
    }

    #[test]
    fn test_total_words() {
        assert_eq!(total_words(&map(&[("a", 10), ("b", 32)])), 42);
        assert_eq!(total_words(&WordCountMap::new()), 0);
        assert_eq!(total_words(&map(&[("a", u64::MAX), ("b", 1)])), u64::MAX);
    }
}
