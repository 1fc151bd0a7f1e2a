//! Engine - Scene node seam, material lookup and element registry.
//!
//! - SceneNode: the trait the native scene graph implements
//! - Materials: named material lookup and video-material recreation
//! - Registry: index allocation, parent links, node + shadow node ownership
//!
//! # Architecture
//!
//! Every element is an index into the registry. The index owns the native
//! node handle and the element's shadow node side by side:
//!
//! ```text
//! Index 0: panel  (parent=None, node=<engine node>, shadow=width 1000, row)
//! Index 1: label  (parent=0,    node=<engine node>, shadow=width 50%)
//! Index 2: button (parent=0,    node=<engine node>, shadow=padding 20)
//! ```

mod materials;
mod registry;
mod scene_node;

pub use materials::*;
pub use registry::*;
pub use scene_node::*;
