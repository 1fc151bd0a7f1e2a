//! Value conversion helpers shared by setters.
//!
//! `Null` always means "prop removed" and converts to the caller's default.

use glam::Vec3;

use super::value::{PropMap, PropValue};
use crate::error::BindingError;
use crate::types::DragPlane;

fn invalid(prop: &'static str, expected: &'static str, value: &PropValue) -> BindingError {
    BindingError::invalid(prop, expected, value.type_name())
}

/// A finite number.
pub fn number(prop: &'static str, value: &PropValue, default: f64) -> Result<f64, BindingError> {
    match value {
        PropValue::Null => Ok(default),
        PropValue::Number(n) if n.is_finite() => Ok(*n),
        PropValue::Number(n) => Err(BindingError::invalid(prop, "finite number", n.to_string())),
        other => Err(invalid(prop, "number", other)),
    }
}

pub fn boolean(prop: &'static str, value: &PropValue, default: bool) -> Result<bool, BindingError> {
    if value.is_null() {
        return Ok(default);
    }
    value.as_bool().ok_or_else(|| invalid(prop, "boolean", value))
}

pub fn optional_string(prop: &'static str, value: &PropValue) -> Result<Option<String>, BindingError> {
    match value {
        PropValue::Null => Ok(None),
        PropValue::String(s) => Ok(Some(s.clone())),
        other => Err(invalid(prop, "string", other)),
    }
}

pub fn optional_map(prop: &'static str, value: &PropValue) -> Result<Option<PropMap>, BindingError> {
    match value {
        PropValue::Null => Ok(None),
        PropValue::Map(map) => Ok(Some(map.clone())),
        other => Err(invalid(prop, "map", other)),
    }
}

/// Array of strings. `Null` is the empty list.
pub fn string_list(prop: &'static str, value: &PropValue) -> Result<Vec<String>, BindingError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    value
        .as_array()
        .ok_or_else(|| invalid(prop, "array of strings", value))?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| invalid(prop, "array of strings", item)))
        .collect()
}

/// Three-component vector.
///
/// Missing trailing components keep the default's value.
pub fn vec3(prop: &'static str, value: &PropValue, default: Vec3) -> Result<Vec3, BindingError> {
    if value.is_null() {
        return Ok(default);
    }
    let items = value.as_array().ok_or_else(|| invalid(prop, "array of numbers", value))?;

    let mut out = default.to_array();
    for (slot, item) in out.iter_mut().zip(items) {
        match item {
            PropValue::Number(n) if n.is_finite() => *slot = *n as f32,
            other => return Err(invalid(prop, "array of numbers", other)),
        }
    }
    Ok(Vec3::from_array(out))
}

/// Plane description: `{planePoint, planeNormal, maxDistance}`.
pub fn drag_plane(prop: &'static str, value: &PropValue) -> Result<Option<DragPlane>, BindingError> {
    let map = match value {
        PropValue::Null => return Ok(None),
        PropValue::Map(map) => map,
        other => return Err(invalid(prop, "map", other)),
    };

    let defaults = DragPlane::default();
    let field = |key: &str| map.get(key).unwrap_or(&PropValue::Null);
    Ok(Some(DragPlane {
        point: vec3(prop, field("planePoint"), defaults.point)?,
        normal: vec3(prop, field("planeNormal"), defaults.normal)?,
        max_distance: number(prop, field("maxDistance"), defaults.max_distance as f64)? as f32,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_full_and_partial() {
        let full = PropValue::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(vec3("position", &full, Vec3::ZERO).unwrap(), Vec3::new(1.0, 2.0, 3.0));

        let partial = PropValue::from(vec![2.0]);
        assert_eq!(vec3("scale", &partial, Vec3::ONE).unwrap(), Vec3::new(2.0, 1.0, 1.0));

        assert_eq!(vec3("scale", &PropValue::Null, Vec3::ONE).unwrap(), Vec3::ONE);
    }

    #[test]
    fn test_vec3_rejects_non_numbers() {
        let bad = PropValue::from(vec![PropValue::from(1.0), PropValue::from("x")]);
        assert!(vec3("position", &bad, Vec3::ZERO).is_err());
        assert!(vec3("position", &PropValue::Bool(true), Vec3::ZERO).is_err());
    }

    #[test]
    fn test_number_rejects_nan() {
        assert!(number("opacity", &PropValue::Number(f64::NAN), 1.0).is_err());
        assert_eq!(number("opacity", &PropValue::Null, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_boolean() {
        assert!(boolean("visible", &PropValue::Bool(true), false).unwrap());
        assert!(boolean("visible", &PropValue::Null, true).unwrap());
        assert!(boolean("visible", &PropValue::Number(1.0), false).is_err());
    }

    #[test]
    fn test_string_list() {
        let list = PropValue::from(vec!["a", "b"]);
        assert_eq!(string_list("materials", &list).unwrap(), vec!["a", "b"]);
        assert!(string_list("materials", &PropValue::from(vec![1.0])).is_err());
        assert!(string_list("materials", &PropValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_drag_plane() {
        let value = PropValue::from(serde_json::json!({
            "planePoint": [0, 1, 0],
            "planeNormal": [0, 0, 1],
            "maxDistance": 3,
        }));
        let plane = drag_plane("dragPlane", &value).unwrap().unwrap();
        assert_eq!(plane.point, Vec3::Y);
        assert_eq!(plane.normal, Vec3::Z);
        assert_eq!(plane.max_distance, 3.0);

        assert_eq!(drag_plane("dragPlane", &PropValue::Null).unwrap(), None);
    }
}
