//! # node-bridge
//!
//! Property binding between a declarative UI layer and a 3D scene graph.
//!
//! Declared props arrive as untyped batches. Each batch is split between the
//! native scene node (transform, materials, input) and the element's shadow
//! node (flexbox layout). Layout dimensions are declared in world units and
//! cross into the flexbox engine's layout units at one place only:
//!
//! ```
//! use node_bridge::layout::{DimensionProp, DimensionResolver, ResolvedDimension};
//! use node_bridge::props::PropValue;
//!
//! let width = DimensionResolver::resolve_prop(DimensionProp::Width, &PropValue::Number(0.5)).unwrap();
//! assert_eq!(width, ResolvedDimension::Length(500.0));
//!
//! let height = DimensionResolver::resolve_prop(DimensionProp::Height, &PropValue::from("50%")).unwrap();
//! assert_eq!(height, ResolvedDimension::Expression("50%".into()));
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Layout keywords, interaction flags, drag settings
//! - [`engine`] - Scene node seam, element registry, materials
//! - [`layout`] - Unit resolver, shadow nodes, Taffy bridge
//! - [`props`] - Prop values, prop tables, the node manager
//! - [`components`] - Camera and spatial sound

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod layout;
pub mod logging;
pub mod props;
pub mod types;

pub use types::*;

pub use config::BridgeConfig;
pub use error::{BindingError, ConfigError};

pub use engine::{
    resolve_material, Material, MaterialRegistry, MaterialSource, NodeRegistry, NodeState,
    SceneNode,
};

pub use layout::{
    compute_layout, ComputedLayout, DimensionProp, DimensionResolver, ResolvedDimension,
    ShadowNode, UNITS_PER_WORLD_UNIT,
};

pub use props::{NodeManager, PropMap, PropTable, PropValue, UpdateReport};

pub use events::exported_event_types;
