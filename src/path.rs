//! Field-path lookup over document snapshots
//!
//! Documents reach the plugin as `serde_json::Value` snapshots. A
//! `FieldPath` names one field inside such a snapshot using dot-separated
//! segments (`author.id`, `tags.0`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A dot-separated path into a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { raw: path.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// Resolve the path, returning `None` when any segment is missing
    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        // Exact key wins so that literal dotted keys stay addressable
        if let Some(v) = doc.as_object().and_then(|m| m.get(&self.raw)) {
            return Some(v);
        }

        let mut current = doc;
        for segment in self.segments() {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Whether the field exists, even if it holds `null`
    pub fn is_present(&self, doc: &Value) -> bool {
        self.resolve(doc).is_some()
    }

    /// Resolve the path and render it as an identifier
    pub fn identifier(&self, doc: &Value) -> Option<String> {
        self.resolve(doc).and_then(value_to_identifier)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self { raw }
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Render a JSON value as a record identifier
///
/// Strings pass through, scalars use their display form, and extended
/// JSON ObjectIds (`{"$oid": "..."}`) are unwrapped. `null` and empty
/// strings yield `None`.
pub fn value_to_identifier(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => match map.get("$oid") {
            Some(Value::String(oid)) => Some(oid.clone()),
            _ => Some(value.to_string()),
        },
        Value::Array(_) => Some(value.to_string()),
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
