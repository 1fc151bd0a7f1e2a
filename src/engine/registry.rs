//! Node Registry - Index allocation for scene elements.
//!
//! Manages the lifecycle of element indices:
//! - ID ↔ Index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - Parent/child links in declaration order
//! - One scene node and one shadow node per index

use std::collections::HashMap;

use tracing::debug;

use super::scene_node::SceneNode;
use crate::layout::{ComputedLayout, ShadowNode, ShadowTree};

/// One allocated element.
pub struct NodeEntry<N> {
    pub id: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub node: N,
    pub shadow: ShadowNode,
}

/// Owns every live element of a scene.
pub struct NodeRegistry<N> {
    entries: Vec<Option<NodeEntry<N>>>,
    id_to_index: HashMap<String, usize>,
    /// Allocated indices in creation order.
    allocated: Vec<usize>,
    free_indices: Vec<usize>,
    id_counter: usize,
}

impl<N> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> NodeRegistry<N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            id_to_index: HashMap::new(),
            allocated: Vec::new(),
            free_indices: Vec::new(),
            id_counter: 0,
        }
    }

    // =========================================================================
    // Index Allocation
    // =========================================================================

    /// Allocate an index for a new element.
    ///
    /// If `id` is already registered, the existing index is returned and `node`
    /// is dropped. A missing `parent` index makes the element a root.
    pub fn allocate(&mut self, id: Option<&str>, parent: Option<usize>, node: N) -> usize {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let id = format!("n{}", self.id_counter);
                self.id_counter += 1;
                id
            }
        };

        if let Some(&index) = self.id_to_index.get(&id) {
            return index;
        }

        let parent = parent.filter(|&p| self.is_allocated(p));
        let index = self.free_indices.pop().unwrap_or(self.entries.len());
        if index == self.entries.len() {
            self.entries.push(None);
        }

        self.entries[index] = Some(NodeEntry {
            id: id.clone(),
            parent,
            children: Vec::new(),
            node,
            shadow: ShadowNode::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.entry_mut(p)) {
            parent.children.push(index);
        }
        self.id_to_index.insert(id, index);
        self.allocated.push(index);

        index
    }

    pub fn is_allocated(&self, index: usize) -> bool {
        matches!(self.entries.get(index), Some(Some(_)))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.allocated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocated.is_empty()
    }

    /// Allocated indices in creation order.
    pub fn indices(&self) -> &[usize] {
        &self.allocated
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn entry(&self, index: usize) -> Option<&NodeEntry<N>> {
        self.entries.get(index)?.as_ref()
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut NodeEntry<N>> {
        self.entries.get_mut(index)?.as_mut()
    }

    pub fn node(&self, index: usize) -> Option<&N> {
        self.entry(index).map(|e| &e.node)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut N> {
        self.entry_mut(index).map(|e| &mut e.node)
    }

    pub fn shadow(&self, index: usize) -> Option<&ShadowNode> {
        self.entry(index).map(|e| &e.shadow)
    }

    pub fn shadow_mut(&mut self, index: usize) -> Option<&mut ShadowNode> {
        self.entry_mut(index).map(|e| &mut e.shadow)
    }

    /// Both halves of an element at once.
    pub fn split_mut(&mut self, index: usize) -> Option<(&mut N, &mut ShadowNode)> {
        self.entry_mut(index).map(|e| (&mut e.node, &mut e.shadow))
    }
}

impl<N: SceneNode> NodeRegistry<N> {
    /// Release an index back to the pool.
    ///
    /// Children are released first. Each scene node is torn down and its
    /// shadow node reset.
    pub fn release(&mut self, index: usize) {
        let Some(children) = self.entry(index).map(|e| e.children.clone()) else {
            return;
        };
        for child in children {
            self.release(child);
        }

        let Some(mut entry) = self.entries[index].take() else {
            return;
        };
        debug!("releasing node {} ({})", entry.id, index);
        entry.node.tear_down();
        entry.shadow.reset();

        if let Some(parent) = entry.parent.and_then(|p| self.entry_mut(p)) {
            parent.children.retain(|&c| c != index);
        }
        self.id_to_index.remove(&entry.id);
        self.allocated.retain(|&i| i != index);
        self.free_indices.push(index);

        // All elements gone: start numbering from zero again
        if self.allocated.is_empty() {
            self.entries.clear();
            self.free_indices.clear();
        }
    }

    /// Push computed bounds to every attached node.
    pub fn apply_layout(&mut self, layout: &ComputedLayout) {
        for &index in &self.allocated {
            let Some(bounds) = layout.world_bounds(index) else {
                continue;
            };
            if let Some(Some(entry)) = self.entries.get_mut(index) {
                if entry.node.is_attached() && !entry.node.is_torn_down() {
                    entry.node.set_layout_bounds(bounds);
                }
            }
        }
    }
}

impl<N> ShadowTree for NodeRegistry<N> {
    fn shadow_indices(&self) -> Vec<usize> {
        self.allocated.clone()
    }

    fn shadow_node(&self, index: usize) -> Option<&ShadowNode> {
        self.shadow(index)
    }

    fn shadow_parent(&self, index: usize) -> Option<usize> {
        self.entry(index)?.parent
    }

    fn shadow_children(&self, index: usize) -> &[usize] {
        self.entry(index).map(|e| e.children.as_slice()).unwrap_or(&[])
    }
}
