//! Layout props, bound to the element's [`ShadowNode`].
//!
//! Every dimension prop goes through [`DimensionResolver`]; nothing in this
//! file multiplies by the unit ratio itself.

use super::convert;
use super::table::{BindContext, PropTable, PropTableBuilder};
use super::value::PropValue;
use crate::error::BindingError;
use crate::layout::{BorderEdge, DimensionProp, DimensionResolver, PaddingEdge, ShadowNode};
use crate::types::{
    AlignContent, AlignItems, AlignSelf, FlexDirection, FlexWrap, JustifyContent, PositionType,
};

type SetResult = Result<(), BindingError>;

/// Every prop declared in world units, in registration order.
pub const DIMENSION_PROPS: [DimensionProp; 14] = [
    DimensionProp::Width,
    DimensionProp::Height,
    DimensionProp::Padding(PaddingEdge::All),
    DimensionProp::Padding(PaddingEdge::Vertical),
    DimensionProp::Padding(PaddingEdge::Horizontal),
    DimensionProp::Padding(PaddingEdge::Left),
    DimensionProp::Padding(PaddingEdge::Right),
    DimensionProp::Padding(PaddingEdge::Top),
    DimensionProp::Padding(PaddingEdge::Bottom),
    DimensionProp::BorderWidth(BorderEdge::All),
    DimensionProp::BorderWidth(BorderEdge::Left),
    DimensionProp::BorderWidth(BorderEdge::Right),
    DimensionProp::BorderWidth(BorderEdge::Top),
    DimensionProp::BorderWidth(BorderEdge::Bottom),
];

/// Apply one dimension prop.
///
/// `Null` restores the slot default: one world unit for width and height,
/// unset for padding and border. Unsupported types leave the slot untouched.
pub fn set_dimension(node: &mut ShadowNode, prop: DimensionProp, value: &PropValue) -> SetResult {
    if value.is_null() {
        match prop.default_world_value() {
            Some(world) => node.set_dimension(prop, DimensionResolver::resolve_prop(prop, &PropValue::Number(world))?),
            None => node.clear_dimension(prop),
        }
        return Ok(());
    }

    let resolved = DimensionResolver::resolve_prop(prop, value)?;
    node.set_dimension(prop, resolved);
    Ok(())
}

fn keyword<T: Default>(
    prop: &'static str,
    value: &PropValue,
    parse: fn(&str) -> Option<T>,
) -> Result<T, BindingError> {
    match value {
        PropValue::Null => Ok(T::default()),
        PropValue::String(s) => parse(s).ok_or_else(|| BindingError::invalid(prop, "layout keyword", s.as_str())),
        other => Err(BindingError::invalid(prop, "layout keyword", other.type_name())),
    }
}

// =============================================================================
// Flex setters
// =============================================================================

fn set_flex_direction(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.flex_direction = keyword("flexDirection", value, FlexDirection::from_keyword)?;
    Ok(())
}

fn set_flex_wrap(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.flex_wrap = keyword("flexWrap", value, FlexWrap::from_keyword)?;
    Ok(())
}

fn set_justify_content(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.justify_content = keyword("justifyContent", value, JustifyContent::from_keyword)?;
    Ok(())
}

fn set_align_items(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.align_items = keyword("alignItems", value, AlignItems::from_keyword)?;
    Ok(())
}

fn set_align_self(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.align_self = keyword("alignSelf", value, AlignSelf::from_keyword)?;
    Ok(())
}

fn set_align_content(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.align_content = keyword("alignContent", value, AlignContent::from_keyword)?;
    Ok(())
}

fn set_position_type(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.position_type = keyword("position", value, PositionType::from_keyword)?;
    Ok(())
}

fn set_flex_grow(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.flex_grow = convert::number("flexGrow", value, 0.0)?.max(0.0) as f32;
    Ok(())
}

fn set_flex_shrink(node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.flex_shrink = convert::number("flexShrink", value, 0.0)?.max(0.0) as f32;
    Ok(())
}

// =============================================================================
// Registration
// =============================================================================

/// Register the layout props on `builder`.
pub fn register_shadow_props(builder: PropTableBuilder<ShadowNode>) -> PropTableBuilder<ShadowNode> {
    let builder = DIMENSION_PROPS.iter().fold(builder, |builder, &prop| {
        builder.prop(prop.prop_name(), move |node: &mut ShadowNode, value: &PropValue, _: &mut BindContext<'_>| {
            set_dimension(node, prop, value)
        })
    });

    builder
        .prop("flexDirection", set_flex_direction)
        .prop("flexWrap", set_flex_wrap)
        .prop("justifyContent", set_justify_content)
        .prop("alignItems", set_align_items)
        .prop("alignSelf", set_align_self)
        .prop("alignContent", set_align_content)
        .prop("flexGrow", set_flex_grow)
        .prop("flexShrink", set_flex_shrink)
        .prop("position", set_position_type)
}

/// The layout prop table.
pub fn shadow_prop_table() -> Result<PropTable<ShadowNode>, BindingError> {
    PropTable::builder().with(register_shadow_props).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MaterialRegistry;
    use crate::types::Dimension;

    fn apply(node: &mut ShadowNode, name: &str, value: PropValue) -> SetResult {
        let table = shadow_prop_table().unwrap();
        let mut materials = MaterialRegistry::new();
        let mut ctx = BindContext { materials: &mut materials };
        table.apply(node, name, &value, &mut ctx)
    }

    #[test]
    fn test_table_covers_every_dimension() {
        let table = shadow_prop_table().unwrap();
        for prop in DIMENSION_PROPS {
            assert!(table.contains(prop.prop_name()), "missing {}", prop.prop_name());
        }
        assert_eq!(table.len(), 23);
    }

    #[test]
    fn test_width_numeric_and_expression() {
        let mut node = ShadowNode::new();
        apply(&mut node, "width", PropValue::Number(0.5)).unwrap();
        assert_eq!(node.width, Dimension::Length(500.0));

        apply(&mut node, "width", "auto".into()).unwrap();
        assert_eq!(node.width, Dimension::Auto);
    }

    #[test]
    fn test_null_width_is_one_world_unit() {
        let mut node = ShadowNode::new();
        apply(&mut node, "height", PropValue::Null).unwrap();
        assert_eq!(node.height, Dimension::Length(1000.0));
    }

    #[test]
    fn test_null_padding_clears() {
        let mut node = ShadowNode::new();
        apply(&mut node, "paddingTop", PropValue::Number(0.1)).unwrap();
        assert_eq!(node.padding.top, Dimension::Length(100.0));

        apply(&mut node, "paddingTop", PropValue::Null).unwrap();
        assert_eq!(node.padding.top, Dimension::Undefined);
    }

    #[test]
    fn test_border_width_scaled() {
        let mut node = ShadowNode::new();
        apply(&mut node, "borderBottomWidth", PropValue::Number(0.01)).unwrap();
        assert_eq!(node.border.bottom, Some(10.0));
    }

    #[test]
    fn test_unsupported_type_leaves_slot() {
        let mut node = ShadowNode::new();
        apply(&mut node, "width", PropValue::Number(2.0)).unwrap();

        let err = apply(&mut node, "width", PropValue::Bool(true)).unwrap_err();
        assert!(matches!(err, BindingError::UnsupportedDimensionType { prop: "width", found: "Boolean" }));
        assert_eq!(node.width, Dimension::Length(2000.0));
    }

    #[test]
    fn test_flex_keywords() {
        let mut node = ShadowNode::new();
        apply(&mut node, "flexDirection", "row".into()).unwrap();
        apply(&mut node, "justifyContent", "space-between".into()).unwrap();
        apply(&mut node, "position", "absolute".into()).unwrap();
        apply(&mut node, "flexGrow", PropValue::Number(1.0)).unwrap();

        assert_eq!(node.flex_direction, FlexDirection::Row);
        assert_eq!(node.justify_content, JustifyContent::SpaceBetween);
        assert_eq!(node.position_type, PositionType::Absolute);
        assert_eq!(node.flex_grow, 1.0);

        assert!(apply(&mut node, "flexDirection", "diagonal".into()).is_err());
        assert_eq!(node.flex_direction, FlexDirection::Row);

        apply(&mut node, "flexDirection", PropValue::Null).unwrap();
        assert_eq!(node.flex_direction, FlexDirection::Column);
    }
}
