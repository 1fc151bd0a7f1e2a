//! Layout Module
//!
//! Flexbox layout for scene elements using Taffy.
//!
//! # Architecture
//!
//! Declared dimensions are in world units. They cross into layout units at
//! exactly one place, [`units::DimensionResolver`], before landing in a
//! [`ShadowNode`]. The bridge then:
//!
//! 1. Converts ShadowNode properties → Taffy styles
//! 2. Builds the Taffy tree from parent relationships
//! 3. Extracts computed layout in layout units, convertible back to world units
//!
//! # Example
//!
//! ```
//! use node_bridge::engine::{NodeRegistry, NodeState};
//! use node_bridge::layout::{compute_layout, DimensionProp, DimensionResolver};
//! use node_bridge::props::PropValue;
//!
//! let mut registry = NodeRegistry::new();
//! let panel = registry.allocate(None, None, NodeState::attached());
//! let shadow = registry.shadow_mut(panel).unwrap();
//! for (prop, world) in [(DimensionProp::Width, 0.5), (DimensionProp::Height, 0.25)] {
//!     let resolved = DimensionResolver::resolve_prop(prop, &PropValue::Number(world)).unwrap();
//!     shadow.set_dimension(prop, resolved);
//! }
//!
//! let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();
//! assert_eq!(layout.width[panel], 500.0);
//! assert_eq!(layout.world_bounds(panel).unwrap().height, 0.25);
//! ```

mod shadow_node;
mod taffy_bridge;
pub mod units;

pub use shadow_node::*;
pub use taffy_bridge::{build_style, compute_layout, ComputedLayout, ShadowTree, WorldBounds};
pub use units::{
    BorderEdge, DimensionProp, DimensionResolver, DimensionValue, PaddingEdge, ResolvedDimension,
    UNITS_PER_WORLD_UNIT,
};
