//! Unit conversion between 3D world units and flexbox layout units.
//!
//! Authors declare layout in world units so panels line up with positions and
//! scales elsewhere in the scene. The flexbox engine works in its own 2D unit
//! space. Everything that crosses that boundary goes through
//! [`DimensionResolver`], which applies one fixed ratio:
//!
//! - numeric input is multiplied by [`UNITS_PER_WORLD_UNIT`]
//! - string input is a layout expression and passes through untouched
//! - anything else is rejected and the update is dropped
//!
//! Border widths have no expression form and are always scaled.

use crate::error::BindingError;
use crate::props::PropValue;

/// Layout units per world unit. One world unit is 1000 layout units.
pub const UNITS_PER_WORLD_UNIT: f32 = 1000.0;

// =============================================================================
// Dimension slots
// =============================================================================

/// Padding slot addressed by a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddingEdge {
    All,
    Vertical,
    Horizontal,
    Left,
    Right,
    Top,
    Bottom,
}

impl PaddingEdge {
    pub const ALL: [PaddingEdge; 7] = [
        PaddingEdge::All,
        PaddingEdge::Vertical,
        PaddingEdge::Horizontal,
        PaddingEdge::Left,
        PaddingEdge::Right,
        PaddingEdge::Top,
        PaddingEdge::Bottom,
    ];

    pub const fn prop_name(&self) -> &'static str {
        match self {
            PaddingEdge::All => "padding",
            PaddingEdge::Vertical => "paddingVertical",
            PaddingEdge::Horizontal => "paddingHorizontal",
            PaddingEdge::Left => "paddingLeft",
            PaddingEdge::Right => "paddingRight",
            PaddingEdge::Top => "paddingTop",
            PaddingEdge::Bottom => "paddingBottom",
        }
    }
}

/// Border-width slot addressed by a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderEdge {
    All,
    Left,
    Right,
    Top,
    Bottom,
}

impl BorderEdge {
    pub const ALL: [BorderEdge; 5] = [
        BorderEdge::All,
        BorderEdge::Left,
        BorderEdge::Right,
        BorderEdge::Top,
        BorderEdge::Bottom,
    ];

    pub const fn prop_name(&self) -> &'static str {
        match self {
            BorderEdge::All => "borderWidth",
            BorderEdge::Left => "borderLeftWidth",
            BorderEdge::Right => "borderRightWidth",
            BorderEdge::Top => "borderTopWidth",
            BorderEdge::Bottom => "borderBottomWidth",
        }
    }
}

/// A layout slot whose value is declared in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionProp {
    Width,
    Height,
    Padding(PaddingEdge),
    BorderWidth(BorderEdge),
}

impl DimensionProp {
    pub const fn prop_name(&self) -> &'static str {
        match self {
            DimensionProp::Width => "width",
            DimensionProp::Height => "height",
            DimensionProp::Padding(edge) => edge.prop_name(),
            DimensionProp::BorderWidth(edge) => edge.prop_name(),
        }
    }

    /// Look up the slot a prop name addresses.
    pub fn from_prop_name(name: &str) -> Option<Self> {
        match name {
            "width" => Some(DimensionProp::Width),
            "height" => Some(DimensionProp::Height),
            _ => PaddingEdge::ALL
                .iter()
                .find(|edge| edge.prop_name() == name)
                .map(|&edge| DimensionProp::Padding(edge))
                .or_else(|| {
                    BorderEdge::ALL
                        .iter()
                        .find(|edge| edge.prop_name() == name)
                        .map(|&edge| DimensionProp::BorderWidth(edge))
                }),
        }
    }

    /// Value used when the prop is removed, in world units.
    ///
    /// Width and height fall back to one world unit; spacing falls back to
    /// unset.
    pub const fn default_world_value(&self) -> Option<f64> {
        match self {
            DimensionProp::Width | DimensionProp::Height => Some(1.0),
            DimensionProp::Padding(_) | DimensionProp::BorderWidth(_) => None,
        }
    }

    /// Whether the slot accepts layout expressions.
    pub const fn accepts_expression(&self) -> bool {
        !matches!(self, DimensionProp::BorderWidth(_))
    }
}

// =============================================================================
// Values
// =============================================================================

/// A declared dimension, tagged by the unit system it is written in.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    /// World units.
    Numeric(f64),
    /// Layout expression such as `"50%"` or `"auto"`.
    Expression(String),
}

/// The value handed to the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDimension {
    /// Layout units.
    Length(f32),
    /// Layout expression, unchanged.
    Expression(String),
}

/// Convert world units to layout units.
#[inline]
pub fn to_layout_units(world: f64) -> f32 {
    (world * UNITS_PER_WORLD_UNIT as f64) as f32
}

/// Convert layout units back to world units.
#[inline]
pub fn to_world_units(layout: f32) -> f32 {
    layout / UNITS_PER_WORLD_UNIT
}

// =============================================================================
// Resolver
// =============================================================================

/// The single translation point between declared and layout dimensions.
pub struct DimensionResolver;

impl DimensionResolver {
    /// Tag an inbound prop value.
    ///
    /// Only numbers and strings are dimensions. Border slots accept numbers
    /// only. Numbers must be finite.
    pub fn classify(prop: DimensionProp, value: &PropValue) -> Result<DimensionValue, BindingError> {
        match value {
            PropValue::Number(n) if !n.is_finite() => {
                Err(BindingError::invalid(prop.prop_name(), "finite number", n.to_string()))
            }
            PropValue::Number(n) => Ok(DimensionValue::Numeric(*n)),
            PropValue::String(s) if prop.accepts_expression() => Ok(DimensionValue::Expression(s.clone())),
            other => Err(BindingError::UnsupportedDimensionType {
                prop: prop.prop_name(),
                found: other.type_name(),
            }),
        }
    }

    /// Resolve a tagged value into layout space.
    pub fn resolve(value: DimensionValue) -> ResolvedDimension {
        match value {
            DimensionValue::Numeric(world) => ResolvedDimension::Length(to_layout_units(world)),
            DimensionValue::Expression(expr) => ResolvedDimension::Expression(expr),
        }
    }

    /// Classify and resolve in one step.
    pub fn resolve_prop(prop: DimensionProp, value: &PropValue) -> Result<ResolvedDimension, BindingError> {
        Self::classify(prop, value).map(Self::resolve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_width_scales() {
        let resolved = DimensionResolver::resolve_prop(DimensionProp::Width, &PropValue::Number(0.5)).unwrap();
        assert_eq!(resolved, ResolvedDimension::Length(500.0));
    }

    #[test]
    fn test_expression_passes_through() {
        let resolved =
            DimensionResolver::resolve_prop(DimensionProp::Width, &PropValue::String("50%".into())).unwrap();
        assert_eq!(resolved, ResolvedDimension::Expression("50%".into()));
    }

    #[test]
    fn test_border_width_scales() {
        let resolved = DimensionResolver::resolve_prop(
            DimensionProp::BorderWidth(BorderEdge::Top),
            &PropValue::Number(0.01),
        )
        .unwrap();
        assert_eq!(resolved, ResolvedDimension::Length(10.0));
    }

    #[test]
    fn test_border_rejects_expression() {
        let err = DimensionResolver::resolve_prop(
            DimensionProp::BorderWidth(BorderEdge::All),
            &PropValue::String("10%".into()),
        )
        .unwrap_err();
        assert!(matches!(err, BindingError::UnsupportedDimensionType { prop: "borderWidth", .. }));
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for prop in [DimensionProp::Width, DimensionProp::BorderWidth(BorderEdge::Left)] {
                let err = DimensionResolver::resolve_prop(prop, &PropValue::Number(n)).unwrap_err();
                assert!(
                    matches!(err, BindingError::InvalidValue { expected: "finite number", .. }),
                    "{n} on {prop:?} gave {err:?}"
                );
            }
        }
    }

    #[test]
    fn test_bool_is_unsupported() {
        let err = DimensionResolver::resolve_prop(DimensionProp::Width, &PropValue::Bool(true)).unwrap_err();
        match err {
            BindingError::UnsupportedDimensionType { prop, found } => {
                assert_eq!(prop, "width");
                assert_eq!(found, "Boolean");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_prop_name_lookup() {
        assert_eq!(DimensionProp::from_prop_name("height"), Some(DimensionProp::Height));
        assert_eq!(
            DimensionProp::from_prop_name("paddingHorizontal"),
            Some(DimensionProp::Padding(PaddingEdge::Horizontal))
        );
        assert_eq!(
            DimensionProp::from_prop_name("borderLeftWidth"),
            Some(DimensionProp::BorderWidth(BorderEdge::Left))
        );
        assert_eq!(DimensionProp::from_prop_name("margin"), None);
    }

    #[test]
    fn test_world_round_trip() {
        assert_eq!(to_world_units(to_layout_units(0.25)), 0.25);
    }
}
