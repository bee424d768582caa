//! Key path lookup on JSON rows.

use serde_json::Value;

/// Look up `path` on `value`.
///
/// A key that exists verbatim on the object wins, so `"a.b"` can name a
/// literal key. Otherwise the path is split on `.`, and `[n]` is accepted as an
/// alternative array index syntax: `"items[0].name"` equals `"items.0.name"`.
///
/// Returns `None` as soon as a segment cannot be resolved.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    if let Some(found) = value.as_object().and_then(|map| map.get(path)) {
        return Some(found);
    }

    let normalized = path.replace('[', ".").replace(']', "");
    normalized
        .split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}
