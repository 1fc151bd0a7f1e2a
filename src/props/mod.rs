//! Props Module
//!
//! Declared properties flow through here on their way to the scene.
//!
//! - [`PropValue`] - tagged payload of one update
//! - [`PropTable`] - validated name → setter table per component
//! - [`NodeManager`] - applies batches, logs failures, never aborts a batch
//!
//! Layout props go to the element's shadow node; everything else goes to the
//! [`SceneNode`](crate::engine::SceneNode).

pub mod convert;
mod manager;
mod node_props;
mod shadow_props;
mod table;
mod value;

pub use manager::{NodeManager, Route, UpdateReport};
pub use node_props::{node_prop_table, register_node_props, INTERACTION_PROPS};
pub use shadow_props::{register_shadow_props, set_dimension, shadow_prop_table, DIMENSION_PROPS};
pub use table::{BindContext, PropEntry, PropTable, PropTableBuilder, Setter};
pub use value::{prop_map_from_json, PropMap, PropValue};
