use serde_json::{Map, Value};

/// Normalize a product/category attribute object submitted by the admin panel.
///
/// Free-form form state arrives with empty inputs still present, so before
/// persistence this:
/// - trims every string value
/// - drops nulls, empty/whitespace-only strings, empty arrays and empty objects
///   (recursively, children first)
/// - drops entries whose key trims to empty
///
/// Non-string scalars (numbers, booleans) pass through unchanged. A top-level
/// value that is not an object is cleaned by the same rules and collapses to
/// `null` when nothing survives.
///
/// Example: `{"wearClass": " 33 ", "color": "", "sizes": []}` -> `{"wearClass": "33"}`
pub fn clean_attributes(attributes: Value) -> Value {
    match attributes {
        // The top-level attribute map stays an object even when every entry
        // is dropped, so callers can persist it as-is.
        Value::Object(map) => Value::Object(clean_map(map)),
        other => clean_value(other).unwrap_or(Value::Null),
    }
}

fn clean_map(map: Map<String, Value>) -> Map<String, Value> {
    let mut cleaned = Map::new();
    for (key, entry) in map {
        if key.trim().is_empty() {
            continue;
        }
        if let Some(kept) = clean_value(entry) {
            cleaned.insert(key, kept);
        }
    }
    cleaned
}

/// Clean a single value, returning `None` when it should be dropped entirely.
fn clean_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.into_iter().filter_map(clean_value).collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Array(cleaned))
            }
        }
        Value::Object(map) => {
            let cleaned = clean_map(map);
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        scalar => Some(scalar),
    }
}
