//! Schema-agnostic depth-first search over arbitrary JSON.

use serde_json::Value;

/// Null, blank strings, and empty containers carry no information.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// First non-empty value stored under any of `aliases`.
///
/// At each object the aliases are checked in list order before descending
/// into children, which are visited in document order.
pub fn find_first<'a>(value: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    find_map(value, aliases, &mut |v| Some(v))
}

/// Like [`find_first`], but keeps searching until `convert` accepts a match.
pub fn find_map<'a, T>(
    value: &'a Value,
    aliases: &[&str],
    convert: &mut impl FnMut(&'a Value) -> Option<T>,
) -> Option<T> {
    match value {
        Value::Object(map) => {
            for alias in aliases {
                if let Some(found) = map.get(*alias) {
                    if !is_empty(found) {
                        if let Some(converted) = convert(found) {
                            return Some(converted);
                        }
                    }
                }
            }
            map.values()
                .find_map(|child| find_map(child, aliases, convert))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|item| find_map(item, aliases, convert)),
        _ => None,
    }
}
