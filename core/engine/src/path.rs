//! FILENAME: core/engine/src/path.rs
//! Dot-separated field paths into row documents (e.g. `"security.name"`).

use crate::cell::CellValue;
use serde_json::Value;

/// Walks `path` through `row`, short-circuiting on the first missing link.
/// Numeric segments index into arrays. JSON `null` at the end of the walk is
/// reported as absent.
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = row;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::Null => None,
        value => Some(value),
    }
}

/// Walks `path` and converts the leaf into a `CellValue`.
pub fn resolve_cell(row: &Value, path: &str) -> CellValue {
    CellValue::from_json(resolve_path(row, path))
}
