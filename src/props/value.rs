//! Prop values - the dynamic payload of one property update.
//!
//! The declaration layer sends untyped values. They arrive here as a tagged
//! variant so every setter matches on an explicit discriminant instead of
//! probing types at runtime.

use std::collections::BTreeMap;

/// A batch of property updates keyed by prop name.
pub type PropMap = BTreeMap<String, PropValue>;

/// One inbound property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    /// Prop removed or explicitly null. Setters reset to their default.
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<PropValue>),
    Map(BTreeMap<String, PropValue>),
}

impl PropValue {
    /// Name of the variant, used in diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            PropValue::Null => "Null",
            PropValue::Bool(_) => "Boolean",
            PropValue::Number(_) => "Number",
            PropValue::String(_) => "String",
            PropValue::Array(_) => "Array",
            PropValue::Map(_) => "Map",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, PropValue>> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => PropValue::Null,
            Value::Bool(b) => PropValue::Bool(b),
            // Numbers outside f64 range do not occur in JSON payloads we accept
            Value::Number(n) => n.as_f64().map_or(PropValue::Null, PropValue::Number),
            Value::String(s) => PropValue::String(s),
            Value::Array(items) => PropValue::Array(items.into_iter().map(PropValue::from).collect()),
            Value::Object(map) => {
                PropValue::Map(map.into_iter().map(|(k, v)| (k, PropValue::from(v))).collect())
            }
        }
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::String(value)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(items: Vec<T>) -> Self {
        PropValue::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Parse a JSON object into a [`PropMap`].
///
/// Non-object payloads yield an empty map.
pub fn prop_map_from_json(json: serde_json::Value) -> PropMap {
    match PropValue::from(json) {
        PropValue::Map(map) => map,
        _ => PropMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = PropValue::from(json!({
            "width": 0.5,
            "height": "50%",
            "visible": false,
            "position": [1, 2, 3],
            "dragPlane": null,
        }));

        let map = value.as_map().expect("object becomes map");
        assert_eq!(map["width"], PropValue::Number(0.5));
        assert_eq!(map["height"], PropValue::String("50%".into()));
        assert_eq!(map["visible"], PropValue::Bool(false));
        assert_eq!(map["position"].as_array().map(<[PropValue]>::len), Some(3));
        assert!(map["dragPlane"].is_null());
    }

    #[test]
    fn test_prop_map_from_non_object() {
        assert!(prop_map_from_json(json!([1, 2])).is_empty());
        assert_eq!(prop_map_from_json(json!({"opacity": 1})).len(), 1);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(PropValue::Bool(true).type_name(), "Boolean");
        assert_eq!(PropValue::from(1.0).type_name(), "Number");
        assert_eq!(PropValue::default().type_name(), "Null");
    }
}
