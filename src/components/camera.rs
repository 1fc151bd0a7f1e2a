//! Camera component.
//!
//! A camera is a scene node with two extra props. Which camera renders the
//! scene is tracked by [`CameraStack`] from mount, update and unmount
//! notifications.

use anyhow::Result;
use tracing::debug;

use crate::engine::SceneNode;
use crate::error::BindingError;
use crate::props::{convert, register_node_props, BindContext, PropTable, PropTableBuilder, PropValue};

/// Vertical field of view, in degrees, when none is declared.
pub const DEFAULT_FIELD_OF_VIEW: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub active: bool,
    pub field_of_view: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            active: false,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
        }
    }
}

pub trait CameraNode: SceneNode {
    fn set_active(&mut self, active: bool) -> Result<()>;
    fn set_field_of_view(&mut self, degrees: f32) -> Result<()>;
}

fn set_active<N: CameraNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> Result<(), BindingError> {
    node.set_active(convert::boolean("active", value, false)?)?;
    Ok(())
}

fn set_field_of_view<N: CameraNode>(
    node: &mut N,
    value: &PropValue,
    _: &mut BindContext<'_>,
) -> Result<(), BindingError> {
    let degrees = convert::number("fieldOfView", value, DEFAULT_FIELD_OF_VIEW as f64)?;
    if !(degrees > 0.0 && degrees < 180.0) {
        return Err(BindingError::invalid("fieldOfView", "degrees in (0, 180)", degrees.to_string()));
    }
    node.set_field_of_view(degrees as f32)?;
    Ok(())
}

pub fn register_camera_props<N: CameraNode + 'static>(builder: PropTableBuilder<N>) -> PropTableBuilder<N> {
    builder
        .prop("active", set_active::<N>)
        .prop("fieldOfView", set_field_of_view::<N>)
}

/// Base node props plus camera props.
pub fn camera_prop_table<N: CameraNode + 'static>() -> Result<PropTable<N>, BindingError> {
    PropTable::builder()
        .with(register_node_props)
        .with(register_camera_props)
        .build()
}

// =============================================================================
// CameraStack
// =============================================================================

/// Mounted cameras in mount order.
///
/// The most recently mounted active camera wins. When it goes inactive or
/// unmounts, the previous active one takes over.
#[derive(Debug, Default)]
pub struct CameraStack {
    cameras: Vec<(usize, bool)>,
}

impl CameraStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn did_mount(&mut self, index: usize, active: bool) {
        self.cameras.retain(|&(i, _)| i != index);
        self.cameras.push((index, active));
        debug!("camera {} mounted (active: {})", index, active);
    }

    /// Record a change of the `active` prop.
    pub fn did_update(&mut self, index: usize, active: bool) {
        match self.cameras.iter_mut().find(|(i, _)| *i == index) {
            Some(entry) => entry.1 = active,
            None => self.did_mount(index, active),
        }
    }

    pub fn will_unmount(&mut self, index: usize) {
        self.cameras.retain(|&(i, _)| i != index);
    }

    /// The camera currently rendering the scene.
    pub fn active(&self) -> Option<usize> {
        self.cameras.iter().rev().find(|(_, active)| *active).map(|&(i, _)| i)
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MaterialRegistry, NodeState};

    #[test]
    fn test_camera_props() {
        let table = camera_prop_table::<NodeState>().unwrap();
        assert!(table.contains("position"));

        let mut materials = MaterialRegistry::new();
        let mut ctx = BindContext { materials: &mut materials };
        let mut node = NodeState::attached();
        table.apply(&mut node, "active", &PropValue::Bool(true), &mut ctx).unwrap();
        table.apply(&mut node, "fieldOfView", &PropValue::Number(90.0), &mut ctx).unwrap();

        assert!(node.camera.active);
        assert_eq!(node.camera.field_of_view, 90.0);

        assert!(table.apply(&mut node, "fieldOfView", &PropValue::Number(0.0), &mut ctx).is_err());
        assert_eq!(node.camera.field_of_view, 90.0);
    }

    #[test]
    fn test_stack_latest_active_wins() {
        let mut stack = CameraStack::new();
        stack.did_mount(1, true);
        stack.did_mount(2, false);
        assert_eq!(stack.active(), Some(1));

        stack.did_update(2, true);
        assert_eq!(stack.active(), Some(2));

        stack.will_unmount(2);
        assert_eq!(stack.active(), Some(1));

        stack.did_update(1, false);
        assert_eq!(stack.active(), None);
        assert_eq!(stack.len(), 1);
    }
}
