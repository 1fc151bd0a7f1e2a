//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts ShadowNode properties to Taffy styles, runs layout computation,
//! and extracts results back to ComputedLayout.
//!
//! Shadow nodes already hold layout units, so nothing here scales values on
//! the way in. Results come out in layout units; [`ComputedLayout::world_bounds`]
//! converts them back for the scene.

use std::collections::HashMap;

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf,
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage, NodeId,
    Position as TaffyPosition, Rect, Size, Style, TaffyError, TaffyTree,
};

use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent,
    PositionType,
};

use super::shadow_node::ShadowNode;
use super::units::to_world_units;

// =============================================================================
// Tree access
// =============================================================================

/// Read access to a tree of shadow nodes.
pub trait ShadowTree {
    /// Allocated indices in creation order.
    fn shadow_indices(&self) -> Vec<usize>;
    fn shadow_node(&self, index: usize) -> Option<&ShadowNode>;
    fn shadow_parent(&self, index: usize) -> Option<usize>;
    /// Children in declaration order.
    fn shadow_children(&self, index: usize) -> &[usize];
}

// =============================================================================
// Output
// =============================================================================

/// Bounds of one element in world units, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Computed layout for all elements, indexed by registry index, in layout units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub width: Vec<f32>,
    pub height: Vec<f32>,
    /// Size of the first root.
    pub content_width: f32,
    pub content_height: f32,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(size: usize) -> Self {
        Self {
            x: vec![0.0; size],
            y: vec![0.0; size],
            width: vec![0.0; size],
            height: vec![0.0; size],
            content_width: 0.0,
            content_height: 0.0,
        }
    }

    /// Bounds of `index` converted to world units.
    pub fn world_bounds(&self, index: usize) -> Option<WorldBounds> {
        Some(WorldBounds {
            x: to_world_units(*self.x.get(index)?),
            y: to_world_units(*self.y.get(index)?),
            width: to_world_units(*self.width.get(index)?),
            height: to_world_units(*self.height.get(index)?),
        })
    }
}

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Undefined | Dimension::Auto => TaffyDimension::Auto,
        Dimension::Length(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

/// Convert our Dimension to Taffy's LengthPercentage. Padding has no auto.
fn to_taffy_lp(dim: Dimension) -> LengthPercentage {
    match dim {
        Dimension::Undefined | Dimension::Auto => LengthPercentage::Length(0.0),
        Dimension::Length(n) => LengthPercentage::Length(n),
        Dimension::Percent(p) => LengthPercentage::Percent(p / 100.0),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    })
}

fn to_taffy_align_content(align: AlignContent) -> Option<TaffyAlignContent> {
    Some(match align {
        AlignContent::Stretch => TaffyAlignContent::Stretch,
        AlignContent::FlexStart => TaffyAlignContent::FlexStart,
        AlignContent::Center => TaffyAlignContent::Center,
        AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
        AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
        AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
    })
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None, // inherit from parent
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

fn to_taffy_position(position: PositionType) -> TaffyPosition {
    match position {
        PositionType::Relative => TaffyPosition::Relative,
        PositionType::Absolute => TaffyPosition::Absolute,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from a ShadowNode.
pub fn build_style(node: &ShadowNode) -> Style {
    let padding = node.padding.resolve();
    let border = node.border.resolve();

    Style {
        display: Display::Flex,
        position: to_taffy_position(node.position_type),

        flex_direction: to_taffy_flex_direction(node.flex_direction),
        flex_wrap: to_taffy_flex_wrap(node.flex_wrap),
        justify_content: to_taffy_justify_content(node.justify_content),
        align_items: to_taffy_align_items(node.align_items),
        align_content: to_taffy_align_content(node.align_content),

        flex_grow: node.flex_grow,
        flex_shrink: node.flex_shrink,
        align_self: to_taffy_align_self(node.align_self),

        size: Size {
            width: to_taffy_dimension(node.width),
            height: to_taffy_dimension(node.height),
        },

        padding: Rect {
            top: to_taffy_lp(padding.top),
            right: to_taffy_lp(padding.right),
            bottom: to_taffy_lp(padding.bottom),
            left: to_taffy_lp(padding.left),
        },

        border: Rect {
            top: LengthPercentage::Length(border.top),
            right: LengthPercentage::Length(border.right),
            bottom: LengthPercentage::Length(border.bottom),
            left: LengthPercentage::Length(border.left),
        },

        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for every shadow node in `tree`.
///
/// `available_width` and `available_height` are in layout units; each root is
/// laid out against that space.
pub fn compute_layout<T: ShadowTree + ?Sized>(
    tree: &T,
    available_width: f32,
    available_height: f32,
) -> Result<ComputedLayout, TaffyError> {
    let indices = tree.shadow_indices();
    let Some(&max_index) = indices.iter().max() else {
        return Ok(ComputedLayout::new());
    };

    let mut result = ComputedLayout::with_capacity(max_index + 1);
    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let mut index_to_node: HashMap<usize, NodeId> = HashMap::new();

    // First pass: create all nodes without children
    for &idx in &indices {
        if let Some(shadow) = tree.shadow_node(idx) {
            index_to_node.insert(idx, taffy.new_leaf(build_style(shadow))?);
        }
    }

    // Second pass: wire children in declaration order
    let mut roots: Vec<usize> = Vec::new();
    for &idx in &indices {
        let Some(&node_id) = index_to_node.get(&idx) else {
            continue;
        };
        for child in tree.shadow_children(idx) {
            if let Some(&child_id) = index_to_node.get(child) {
                taffy.add_child(node_id, child_id)?;
            }
        }
        let has_parent = tree
            .shadow_parent(idx)
            .is_some_and(|parent| index_to_node.contains_key(&parent));
        if !has_parent {
            roots.push(idx);
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(available_width),
        height: AvailableSpace::Definite(available_height),
    };
    for root in &roots {
        taffy.compute_layout(index_to_node[root], available)?;
    }

    // Extract results
    for (&idx, &node_id) in &index_to_node {
        let layout = taffy.layout(node_id)?;
        result.x[idx] = layout.location.x;
        result.y[idx] = layout.location.y;
        result.width[idx] = layout.size.width;
        result.height[idx] = layout.size.height;
    }

    if let Some(&first_root) = roots.first() {
        result.content_width = result.width[first_root];
        result.content_height = result.height[first_root];
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NodeRegistry, NodeState};
    use crate::layout::units::{BorderEdge, DimensionProp, PaddingEdge, ResolvedDimension};

    fn sized(width: f32, height: f32) -> ShadowNode {
        let mut shadow = ShadowNode::new();
        shadow.set_dimension(DimensionProp::Width, ResolvedDimension::Length(width));
        shadow.set_dimension(DimensionProp::Height, ResolvedDimension::Length(height));
        shadow
    }

    fn add(registry: &mut NodeRegistry<NodeState>, parent: Option<usize>, shadow: ShadowNode) -> usize {
        let idx = registry.allocate(None, parent, NodeState::attached());
        if let Some(slot) = registry.shadow_mut(idx) {
            *slot = shadow;
        }
        idx
    }

    #[test]
    fn test_compute_layout_empty() {
        let registry: NodeRegistry<NodeState> = NodeRegistry::new();
        let layout = compute_layout(&registry, 1000.0, 1000.0).unwrap();
        assert_eq!(layout.content_width, 0.0);
        assert!(layout.x.is_empty());
    }

    #[test]
    fn test_compute_layout_single_root() {
        let mut registry = NodeRegistry::new();
        let idx = add(&mut registry, None, sized(500.0, 250.0));

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();

        assert_eq!(layout.x[idx], 0.0);
        assert_eq!(layout.width[idx], 500.0);
        assert_eq!(layout.height[idx], 250.0);
        assert_eq!(layout.content_width, 500.0);
    }

    #[test]
    fn test_flex_row() {
        let mut registry = NodeRegistry::new();
        let mut parent_shadow = sized(1000.0, 200.0);
        parent_shadow.flex_direction = FlexDirection::Row;
        let parent = add(&mut registry, None, parent_shadow);
        let child1 = add(&mut registry, Some(parent), sized(100.0, 50.0));
        let child2 = add(&mut registry, Some(parent), sized(100.0, 50.0));

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();

        assert_eq!(layout.x[child1], 0.0);
        assert_eq!(layout.x[child2], 100.0);
    }

    #[test]
    fn test_padding_and_border_offset_child() {
        let mut registry = NodeRegistry::new();
        let mut parent_shadow = sized(1000.0, 1000.0);
        parent_shadow.set_dimension(DimensionProp::Padding(PaddingEdge::Left), ResolvedDimension::Length(20.0));
        parent_shadow.set_dimension(DimensionProp::Padding(PaddingEdge::Top), ResolvedDimension::Length(10.0));
        parent_shadow.set_dimension(DimensionProp::BorderWidth(BorderEdge::Left), ResolvedDimension::Length(5.0));
        let parent = add(&mut registry, None, parent_shadow);
        let child = add(&mut registry, Some(parent), sized(100.0, 100.0));

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();

        assert_eq!(layout.x[child], 25.0);
        assert_eq!(layout.y[child], 10.0);
    }

    #[test]
    fn test_percent_width() {
        let mut registry = NodeRegistry::new();
        let parent = add(&mut registry, None, sized(800.0, 400.0));
        let mut child_shadow = ShadowNode::new();
        child_shadow.set_dimension(DimensionProp::Width, ResolvedDimension::Expression("50%".into()));
        child_shadow.set_dimension(DimensionProp::Height, ResolvedDimension::Length(100.0));
        let child = add(&mut registry, Some(parent), child_shadow);

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();

        assert_eq!(layout.width[child], 400.0);
    }

    #[test]
    fn test_justify_content_center() {
        let mut registry = NodeRegistry::new();
        let mut parent_shadow = sized(1000.0, 100.0);
        parent_shadow.flex_direction = FlexDirection::Row;
        parent_shadow.justify_content = JustifyContent::Center;
        let parent = add(&mut registry, None, parent_shadow);
        let child = add(&mut registry, Some(parent), sized(200.0, 50.0));

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();

        assert_eq!(layout.x[child], 400.0);
    }

    #[test]
    fn test_world_bounds() {
        let mut registry = NodeRegistry::new();
        let idx = add(&mut registry, None, sized(500.0, 250.0));

        let layout = compute_layout(&registry, 2000.0, 2000.0).unwrap();
        let bounds = layout.world_bounds(idx).unwrap();

        assert_eq!(bounds.width, 0.5);
        assert_eq!(bounds.height, 0.25);
        assert!(layout.world_bounds(idx + 1).is_none());
    }

    #[test]
    fn test_dimension_conversion() {
        assert!(matches!(to_taffy_dimension(Dimension::Undefined), TaffyDimension::Auto));
        assert!(matches!(to_taffy_dimension(Dimension::Length(50.0)), TaffyDimension::Length(50.0)));
        if let TaffyDimension::Percent(p) = to_taffy_dimension(Dimension::Percent(50.0)) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
    }
}
