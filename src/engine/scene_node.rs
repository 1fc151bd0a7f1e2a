//! SceneNode - The seam to the native scene graph.
//!
//! The engine that owns transforms, materials and physics implements
//! [`SceneNode`]. Property setters in [`crate::props`] call these methods after
//! converting values; any `Err` the engine returns is logged by the dispatch
//! loop and does not abort the batch.
//!
//! [`NodeState`] is a retained, in-memory implementation used by headless
//! hosts and by tests.

use anyhow::Result;
use glam::Vec3;

use super::materials::{Material, RenderContextId};
use crate::components::camera::{CameraNode, CameraSettings};
use crate::components::sound::{RolloffModel, SoundNode, SoundSettings, SoundSource};
use crate::layout::WorldBounds;
use crate::props::PropMap;
use crate::types::{
    DEFAULT_TIME_TO_FUSE_MILLIS, DragPlane, DragType, Interaction, TransformBehavior,
};

/// A node in the native scene graph.
pub trait SceneNode {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// True once the engine has destroyed the node.
    fn is_torn_down(&self) -> bool;

    /// True while the node is attached to a scene.
    fn is_attached(&self) -> bool;

    /// Render context the node was created in, if any.
    fn render_context(&self) -> Option<RenderContextId>;

    /// Destroy the native node. Called once when the element is released.
    fn tear_down(&mut self);

    // =========================================================================
    // Transform
    // =========================================================================

    fn set_position(&mut self, position: Vec3) -> Result<()>;
    fn set_rotation(&mut self, rotation: Vec3) -> Result<()>;
    fn set_scale(&mut self, scale: Vec3) -> Result<()>;
    fn set_rotation_pivot(&mut self, pivot: Vec3) -> Result<()>;
    fn set_scale_pivot(&mut self, pivot: Vec3) -> Result<()>;

    // =========================================================================
    // Appearance
    // =========================================================================

    fn set_opacity(&mut self, opacity: f32) -> Result<()>;
    fn set_visible(&mut self, visible: bool) -> Result<()>;
    fn set_rendering_order(&mut self, order: i32) -> Result<()>;
    fn set_materials(&mut self, materials: Vec<Material>) -> Result<()>;
    fn set_transform_behaviors(&mut self, behaviors: Vec<TransformBehavior>) -> Result<()>;
    fn set_animation(&mut self, animation: Option<PropMap>) -> Result<()>;

    // =========================================================================
    // Input
    // =========================================================================

    /// Toggle one input capability.
    fn set_interaction(&mut self, flag: Interaction, enabled: bool) -> Result<()>;
    fn set_time_to_fuse(&mut self, millis: f32) -> Result<()>;
    fn set_drag_type(&mut self, drag_type: DragType) -> Result<()>;
    fn set_drag_plane(&mut self, plane: Option<DragPlane>) -> Result<()>;
    fn set_ignore_event_handling(&mut self, ignore: bool) -> Result<()>;

    // =========================================================================
    // Physics and identity
    // =========================================================================

    /// Physics body description, forwarded opaque to the physics engine.
    fn set_physics_body(&mut self, body: Option<PropMap>) -> Result<()>;
    fn set_tag(&mut self, tag: Option<String>) -> Result<()>;
    fn set_transform_delegate(&mut self, enabled: bool) -> Result<()>;

    /// Receive bounds computed by the flexbox pass.
    fn set_layout_bounds(&mut self, _bounds: WorldBounds) {}
}

// =============================================================================
// NodeState
// =============================================================================

/// Retained scene node: stores whatever it is told.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    pub attached: bool,
    pub torn_down: bool,
    pub render_context: Option<RenderContextId>,

    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub rotation_pivot: Vec3,
    pub scale_pivot: Vec3,

    pub opacity: f32,
    pub visible: bool,
    pub rendering_order: i32,
    pub materials: Vec<Material>,
    pub transform_behaviors: Vec<TransformBehavior>,
    pub animation: Option<PropMap>,

    pub interactions: Interaction,
    pub time_to_fuse: f32,
    pub drag_type: DragType,
    pub drag_plane: Option<DragPlane>,
    pub ignore_event_handling: bool,

    pub physics_body: Option<PropMap>,
    pub tag: Option<String>,
    pub transform_delegate: bool,
    pub layout_bounds: Option<WorldBounds>,

    pub camera: CameraSettings,
    pub sound: SoundSettings,

    /// Number of setter calls received.
    pub updates: usize,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            attached: false,
            torn_down: false,
            render_context: None,

            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation_pivot: Vec3::ZERO,
            scale_pivot: Vec3::ZERO,

            opacity: 1.0,
            visible: true,
            rendering_order: 0,
            materials: Vec::new(),
            transform_behaviors: Vec::new(),
            animation: None,

            interactions: Interaction::default(),
            time_to_fuse: DEFAULT_TIME_TO_FUSE_MILLIS,
            drag_type: DragType::default(),
            drag_plane: None,
            ignore_event_handling: false,

            physics_body: None,
            tag: None,
            transform_delegate: false,
            layout_bounds: None,

            camera: CameraSettings::default(),
            sound: SoundSettings::default(),

            updates: 0,
        }
    }
}

impl NodeState {
    /// A node attached to a scene.
    pub fn attached() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }

    /// A node created but not yet attached.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_render_context(mut self, context: RenderContextId) -> Self {
        self.render_context = Some(context);
        self
    }

    fn record(&mut self) -> Result<()> {
        self.updates += 1;
        Ok(())
    }
}

impl SceneNode for NodeState {
    fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn render_context(&self) -> Option<RenderContextId> {
        self.render_context
    }

    fn tear_down(&mut self) {
        self.torn_down = true;
        self.attached = false;
    }

    fn set_position(&mut self, position: Vec3) -> Result<()> {
        self.position = position;
        self.record()
    }

    fn set_rotation(&mut self, rotation: Vec3) -> Result<()> {
        self.rotation = rotation;
        self.record()
    }

    fn set_scale(&mut self, scale: Vec3) -> Result<()> {
        self.scale = scale;
        self.record()
    }

    fn set_rotation_pivot(&mut self, pivot: Vec3) -> Result<()> {
        self.rotation_pivot = pivot;
        self.record()
    }

    fn set_scale_pivot(&mut self, pivot: Vec3) -> Result<()> {
        self.scale_pivot = pivot;
        self.record()
    }

    fn set_opacity(&mut self, opacity: f32) -> Result<()> {
        self.opacity = opacity;
        self.record()
    }

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        self.record()
    }

    fn set_rendering_order(&mut self, order: i32) -> Result<()> {
        self.rendering_order = order;
        self.record()
    }

    fn set_materials(&mut self, materials: Vec<Material>) -> Result<()> {
        self.materials = materials;
        self.record()
    }

    fn set_transform_behaviors(&mut self, behaviors: Vec<TransformBehavior>) -> Result<()> {
        self.transform_behaviors = behaviors;
        self.record()
    }

    fn set_animation(&mut self, animation: Option<PropMap>) -> Result<()> {
        self.animation = animation;
        self.record()
    }

    fn set_interaction(&mut self, flag: Interaction, enabled: bool) -> Result<()> {
        self.interactions.set(flag, enabled);
        self.record()
    }

    fn set_time_to_fuse(&mut self, millis: f32) -> Result<()> {
        self.time_to_fuse = millis;
        self.record()
    }

    fn set_drag_type(&mut self, drag_type: DragType) -> Result<()> {
        self.drag_type = drag_type;
        self.record()
    }

    fn set_drag_plane(&mut self, plane: Option<DragPlane>) -> Result<()> {
        self.drag_plane = plane;
        self.record()
    }

    fn set_ignore_event_handling(&mut self, ignore: bool) -> Result<()> {
        self.ignore_event_handling = ignore;
        self.record()
    }

    fn set_physics_body(&mut self, body: Option<PropMap>) -> Result<()> {
        self.physics_body = body;
        self.record()
    }

    fn set_tag(&mut self, tag: Option<String>) -> Result<()> {
        self.tag = tag;
        self.record()
    }

    fn set_transform_delegate(&mut self, enabled: bool) -> Result<()> {
        self.transform_delegate = enabled;
        self.record()
    }

    fn set_layout_bounds(&mut self, bounds: WorldBounds) {
        self.layout_bounds = Some(bounds);
    }
}

impl CameraNode for NodeState {
    fn set_active(&mut self, active: bool) -> Result<()> {
        self.camera.active = active;
        self.record()
    }

    fn set_field_of_view(&mut self, degrees: f32) -> Result<()> {
        self.camera.field_of_view = degrees;
        self.record()
    }
}

impl SoundNode for NodeState {
    fn set_source(&mut self, source: Option<SoundSource>) -> Result<()> {
        self.sound.source = source;
        self.record()
    }

    fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.sound.paused = paused;
        self.record()
    }

    fn set_loop(&mut self, looping: bool) -> Result<()> {
        self.sound.looping = looping;
        self.record()
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.sound.muted = muted;
        self.record()
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.sound.volume = volume;
        self.record()
    }

    fn set_min_distance(&mut self, distance: f32) -> Result<()> {
        self.sound.min_distance = distance;
        self.record()
    }

    fn set_max_distance(&mut self, distance: f32) -> Result<()> {
        self.sound.max_distance = distance;
        self.record()
    }

    fn set_rolloff_model(&mut self, model: RolloffModel) -> Result<()> {
        self.sound.rolloff_model = model;
        self.record()
    }

    fn seek_to_time(&mut self, seconds: f32) -> Result<()> {
        self.sound.seek_position = Some(seconds);
        self.record()
    }
}
