//! Base props shared by every scene node.
//!
//! Transform, appearance, input and physics props. Each setter converts the
//! value and forwards it to the [`SceneNode`]; none of them touch layout.

use glam::Vec3;

use super::convert;
use super::table::{BindContext, PropTable, PropTableBuilder};
use super::value::PropValue;
use crate::engine::{resolve_material, SceneNode};
use crate::error::BindingError;
use crate::types::{DEFAULT_TIME_TO_FUSE_MILLIS, DragType, Interaction, TransformBehavior};

type SetResult = Result<(), BindingError>;

/// Props that toggle one interaction flag, with their flag.
pub const INTERACTION_PROPS: [(&str, Interaction); 10] = [
    ("canHover", Interaction::HOVER),
    ("canClick", Interaction::CLICK),
    ("canTouch", Interaction::TOUCH),
    ("canScroll", Interaction::SCROLL),
    ("canSwipe", Interaction::SWIPE),
    ("canDrag", Interaction::DRAG),
    ("canFuse", Interaction::FUSE),
    ("canPinch", Interaction::PINCH),
    ("canRotate", Interaction::ROTATE),
    ("canCollide", Interaction::COLLIDE),
];

// =============================================================================
// Transform
// =============================================================================

fn set_position<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_position(convert::vec3("position", value, Vec3::ZERO)?)?;
    Ok(())
}

fn set_rotation<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_rotation(convert::vec3("rotation", value, Vec3::ZERO)?)?;
    Ok(())
}

fn set_scale<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_scale(convert::vec3("scale", value, Vec3::ONE)?)?;
    Ok(())
}

fn set_rotation_pivot<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_rotation_pivot(convert::vec3("rotationPivot", value, Vec3::ZERO)?)?;
    Ok(())
}

fn set_scale_pivot<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_scale_pivot(convert::vec3("scalePivot", value, Vec3::ZERO)?)?;
    Ok(())
}

// =============================================================================
// Appearance
// =============================================================================

fn set_opacity<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_opacity(convert::number("opacity", value, 1.0)? as f32)?;
    Ok(())
}

fn set_visible<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_visible(convert::boolean("visible", value, true)?)?;
    Ok(())
}

fn set_rendering_order<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    // Integer prop: fractional input truncates
    node.set_rendering_order(convert::number("renderingOrder", value, 0.0)? as i32)?;
    Ok(())
}

fn set_materials<N: SceneNode>(node: &mut N, value: &PropValue, ctx: &mut BindContext<'_>) -> SetResult {
    let names = convert::string_list("materials", value)?;
    let context = node.render_context();
    let materials = names
        .iter()
        .map(|name| resolve_material(&mut *ctx.materials, name, context))
        .collect::<Result<Vec<_>, _>>()?;
    node.set_materials(materials)?;
    Ok(())
}

fn set_transform_behaviors<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    let behaviors = convert::string_list("transformBehaviors", value)?
        .iter()
        .map(|name| {
            TransformBehavior::from_keyword(name)
                .ok_or_else(|| BindingError::invalid("transformBehaviors", "billboard, billboardX or billboardY", name.as_str()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    node.set_transform_behaviors(behaviors)?;
    Ok(())
}

fn set_animation<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_animation(convert::optional_map("animation", value)?)?;
    Ok(())
}

// =============================================================================
// Input
// =============================================================================

fn set_time_to_fuse<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    let millis = convert::number("timeToFuse", value, DEFAULT_TIME_TO_FUSE_MILLIS as f64)?;
    node.set_time_to_fuse(millis as f32)?;
    Ok(())
}

fn set_drag_type<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    let drag_type = match convert::optional_string("dragType", value)? {
        None => DragType::default(),
        Some(keyword) => DragType::from_keyword(&keyword)
            .ok_or_else(|| BindingError::invalid("dragType", "drag type keyword", keyword))?,
    };
    node.set_drag_type(drag_type)?;
    Ok(())
}

fn set_drag_plane<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_drag_plane(convert::drag_plane("dragPlane", value)?)?;
    Ok(())
}

fn set_ignore_event_handling<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_ignore_event_handling(convert::boolean("ignoreEventHandling", value, false)?)?;
    Ok(())
}

// =============================================================================
// Physics and identity
// =============================================================================

fn set_physics_body<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_physics_body(convert::optional_map("physicsBody", value)?)?;
    Ok(())
}

fn set_tag<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_tag(convert::optional_string("viroTag", value)?)?;
    Ok(())
}

fn set_transform_delegate<N: SceneNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_transform_delegate(convert::boolean("hasTransformDelegate", value, false)?)?;
    Ok(())
}

// =============================================================================
// Registration
// =============================================================================

/// Register the base node props on `builder`.
pub fn register_node_props<N: SceneNode + 'static>(builder: PropTableBuilder<N>) -> PropTableBuilder<N> {
    let builder = builder
        .prop("position", set_position::<N>)
        .prop("rotation", set_rotation::<N>)
        .prop("scale", set_scale::<N>)
        .prop("rotationPivot", set_rotation_pivot::<N>)
        .prop("scalePivot", set_scale_pivot::<N>)
        .prop("opacity", set_opacity::<N>)
        .prop("visible", set_visible::<N>)
        .prop("renderingOrder", set_rendering_order::<N>)
        .prop("materials", set_materials::<N>)
        .prop("transformBehaviors", set_transform_behaviors::<N>)
        .prop("animation", set_animation::<N>)
        .prop("timeToFuse", set_time_to_fuse::<N>)
        .prop("dragType", set_drag_type::<N>)
        .prop("dragPlane", set_drag_plane::<N>)
        .prop("ignoreEventHandling", set_ignore_event_handling::<N>)
        .prop("physicsBody", set_physics_body::<N>)
        .prop("viroTag", set_tag::<N>)
        .prop("hasTransformDelegate", set_transform_delegate::<N>);

    INTERACTION_PROPS.iter().fold(builder, |builder, &(name, flag)| {
        builder.prop(name, move |node: &mut N, value: &PropValue, _: &mut BindContext<'_>| {
            node.set_interaction(flag, convert::boolean(name, value, false)?)?;
            Ok(())
        })
    })
}

/// The base node prop table.
pub fn node_prop_table<N: SceneNode + 'static>() -> Result<PropTable<N>, BindingError> {
    PropTable::builder().with(register_node_props).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Material, MaterialRegistry, NodeState};
    use crate::types::DragPlane;
    use serde_json::json;

    fn apply(node: &mut NodeState, materials: &mut MaterialRegistry, name: &str, value: PropValue) -> SetResult {
        let table = node_prop_table::<NodeState>().unwrap();
        let mut ctx = BindContext { materials };
        table.apply(node, name, &value, &mut ctx)
    }

    #[test]
    fn test_table_has_every_prop() {
        let table = node_prop_table::<NodeState>().unwrap();
        assert_eq!(table.len(), 28);
        for name in ["position", "canCollide", "viroTag", "hasTransformDelegate", "dragPlane"] {
            assert!(table.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_transform_props() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        apply(&mut node, &mut materials, "position", json!([1, 2, -3]).into()).unwrap();
        apply(&mut node, &mut materials, "scale", json!([2]).into()).unwrap();

        assert_eq!(node.position, Vec3::new(1.0, 2.0, -3.0));
        assert_eq!(node.scale, Vec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_null_resets_defaults() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        apply(&mut node, &mut materials, "opacity", PropValue::Number(0.2)).unwrap();
        apply(&mut node, &mut materials, "opacity", PropValue::Null).unwrap();
        apply(&mut node, &mut materials, "scale", PropValue::Null).unwrap();

        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.scale, Vec3::ONE);
    }

    #[test]
    fn test_interaction_flags() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        apply(&mut node, &mut materials, "canClick", PropValue::Bool(true)).unwrap();
        apply(&mut node, &mut materials, "canCollide", PropValue::Bool(true)).unwrap();
        apply(&mut node, &mut materials, "canClick", PropValue::Null).unwrap();

        assert_eq!(node.interactions, Interaction::COLLIDE);
    }

    #[test]
    fn test_materials_resolved() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        materials.insert(Material::new("red"));
        materials.insert(Material::new("blue"));

        apply(&mut node, &mut materials, "materials", json!(["red", "blue"]).into()).unwrap();
        let names: Vec<_> = node.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["red", "blue"]);
    }

    #[test]
    fn test_missing_material_keeps_previous() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        materials.insert(Material::new("red"));
        apply(&mut node, &mut materials, "materials", json!(["red"]).into()).unwrap();

        let err = apply(&mut node, &mut materials, "materials", json!(["red", "ghost"]).into()).unwrap_err();
        assert!(matches!(err, BindingError::MaterialNotFound(_)));
        assert_eq!(node.materials.len(), 1);
    }

    #[test]
    fn test_drag_props() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        apply(&mut node, &mut materials, "dragType", "FixedToPlane".into()).unwrap();
        apply(&mut node, &mut materials, "dragPlane", json!({"planeNormal": [1, 0, 0]}).into()).unwrap();

        assert_eq!(node.drag_type, DragType::FixedToPlane);
        assert_eq!(
            node.drag_plane,
            Some(DragPlane { normal: Vec3::X, ..DragPlane::default() })
        );
        assert!(apply(&mut node, &mut materials, "dragType", "Sideways".into()).is_err());
    }

    #[test]
    fn test_transform_behaviors() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        apply(&mut node, &mut materials, "transformBehaviors", json!(["billboardY"]).into()).unwrap();
        assert_eq!(node.transform_behaviors, vec![TransformBehavior::BillboardY]);

        let err = apply(&mut node, &mut materials, "transformBehaviors", json!(["spin"]).into());
        assert!(err.is_err());
        assert_eq!(node.transform_behaviors, vec![TransformBehavior::BillboardY]);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut node = NodeState::attached();
        let mut materials = MaterialRegistry::new();
        let err = apply(&mut node, &mut materials, "visible", PropValue::Number(1.0)).unwrap_err();
        assert!(matches!(err, BindingError::InvalidValue { prop: "visible", .. }));
        assert!(node.visible);
    }
}
