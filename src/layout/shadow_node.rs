//! ShadowNode - Off-screen mirror of an element's layout properties.
//!
//! Each scene element gets one ShadowNode. Dimension slots are only written
//! through the resolver in [`super::units`], so every stored length is already
//! in layout units. The taffy bridge reads these slots when it builds styles.

use tracing::warn;

use super::units::{BorderEdge, DimensionProp, PaddingEdge, ResolvedDimension};
use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent,
    PositionType,
};

// =============================================================================
// Edge storage
// =============================================================================

/// Resolved per-edge values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

/// The seven padding slots as declared.
///
/// A specific edge wins over its axis shorthand, which wins over `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaddingSlots {
    pub all: Dimension,
    pub vertical: Dimension,
    pub horizontal: Dimension,
    pub left: Dimension,
    pub right: Dimension,
    pub top: Dimension,
    pub bottom: Dimension,
}

impl PaddingSlots {
    fn slot_mut(&mut self, edge: PaddingEdge) -> &mut Dimension {
        match edge {
            PaddingEdge::All => &mut self.all,
            PaddingEdge::Vertical => &mut self.vertical,
            PaddingEdge::Horizontal => &mut self.horizontal,
            PaddingEdge::Left => &mut self.left,
            PaddingEdge::Right => &mut self.right,
            PaddingEdge::Top => &mut self.top,
            PaddingEdge::Bottom => &mut self.bottom,
        }
    }

    pub fn get(&self, edge: PaddingEdge) -> Dimension {
        match edge {
            PaddingEdge::All => self.all,
            PaddingEdge::Vertical => self.vertical,
            PaddingEdge::Horizontal => self.horizontal,
            PaddingEdge::Left => self.left,
            PaddingEdge::Right => self.right,
            PaddingEdge::Top => self.top,
            PaddingEdge::Bottom => self.bottom,
        }
    }

    /// Effective padding on each edge. Unset edges resolve to `Undefined`.
    pub fn resolve(&self) -> Edges<Dimension> {
        let pick = |specific: Dimension, axis: Dimension| {
            [specific, axis, self.all]
                .into_iter()
                .find(|d| !d.is_undefined())
                .unwrap_or_default()
        };
        Edges {
            top: pick(self.top, self.vertical),
            bottom: pick(self.bottom, self.vertical),
            left: pick(self.left, self.horizontal),
            right: pick(self.right, self.horizontal),
        }
    }
}

/// The five border-width slots, in layout units. `None` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderSlots {
    pub all: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl BorderSlots {
    fn slot_mut(&mut self, edge: BorderEdge) -> &mut Option<f32> {
        match edge {
            BorderEdge::All => &mut self.all,
            BorderEdge::Left => &mut self.left,
            BorderEdge::Right => &mut self.right,
            BorderEdge::Top => &mut self.top,
            BorderEdge::Bottom => &mut self.bottom,
        }
    }

    pub fn get(&self, edge: BorderEdge) -> Option<f32> {
        match edge {
            BorderEdge::All => self.all,
            BorderEdge::Left => self.left,
            BorderEdge::Right => self.right,
            BorderEdge::Top => self.top,
            BorderEdge::Bottom => self.bottom,
        }
    }

    /// Effective border width on each edge, zero when unset.
    pub fn resolve(&self) -> Edges<f32> {
        let pick = |specific: Option<f32>| specific.or(self.all).unwrap_or(0.0);
        Edges {
            top: pick(self.top),
            right: pick(self.right),
            bottom: pick(self.bottom),
            left: pick(self.left),
        }
    }
}

// =============================================================================
// ShadowNode
// =============================================================================

/// Layout-relevant state of one element.
///
/// # Example
///
/// ```
/// use node_bridge::layout::{DimensionProp, ResolvedDimension, ShadowNode};
/// use node_bridge::Dimension;
///
/// let mut node = ShadowNode::new();
/// node.set_dimension(DimensionProp::Width, ResolvedDimension::Length(500.0));
/// node.set_dimension(DimensionProp::Height, ResolvedDimension::Expression("50%".into()));
///
/// assert_eq!(node.width, Dimension::Length(500.0));
/// assert_eq!(node.height, Dimension::Percent(50.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowNode {
    // =========================================================================
    // CONTAINER
    // =========================================================================
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,

    // =========================================================================
    // ITEM
    // =========================================================================
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub align_self: AlignSelf,
    pub position_type: PositionType,

    // =========================================================================
    // DIMENSIONS (layout units)
    // =========================================================================
    pub width: Dimension,
    pub height: Dimension,
    pub padding: PaddingSlots,
    pub border: BorderSlots,
}

impl Default for ShadowNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowNode {
    pub fn new() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::FlexStart,

            flex_grow: 0.0,
            flex_shrink: 0.0,
            align_self: AlignSelf::Auto,
            position_type: PositionType::Relative,

            width: Dimension::Undefined,
            height: Dimension::Undefined,
            padding: PaddingSlots::default(),
            border: BorderSlots::default(),
        }
    }

    /// Write a resolved value into its slot.
    ///
    /// Expressions the layout engine does not understand leave the slot
    /// undefined, as a flexbox engine would.
    pub fn set_dimension(&mut self, prop: DimensionProp, value: ResolvedDimension) {
        let slot = match prop {
            DimensionProp::Width => &mut self.width,
            DimensionProp::Height => &mut self.height,
            DimensionProp::Padding(edge) => self.padding.slot_mut(edge),
            DimensionProp::BorderWidth(edge) => {
                match value {
                    ResolvedDimension::Length(width) => *self.border.slot_mut(edge) = Some(width),
                    ResolvedDimension::Expression(expr) => {
                        warn!("{} does not accept expression {:?}. Doing nothing.", prop.prop_name(), expr);
                    }
                }
                return;
            }
        };

        *slot = match value {
            ResolvedDimension::Length(length) => Dimension::Length(length),
            ResolvedDimension::Expression(expr) => Dimension::parse_expression(&expr).unwrap_or_else(|| {
                warn!("unknown layout expression {:?} for {}", expr, prop.prop_name());
                Dimension::Undefined
            }),
        };
    }

    /// Clear a slot back to unset.
    pub fn clear_dimension(&mut self, prop: DimensionProp) {
        match prop {
            DimensionProp::Width => self.width = Dimension::Undefined,
            DimensionProp::Height => self.height = Dimension::Undefined,
            DimensionProp::Padding(edge) => *self.padding.slot_mut(edge) = Dimension::Undefined,
            DimensionProp::BorderWidth(edge) => *self.border.slot_mut(edge) = None,
        }
    }

    /// Reset every property to its default.
    ///
    /// Called when the owning element is released.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_node_creation() {
        let node = ShadowNode::new();
        assert_eq!(node.flex_direction, FlexDirection::Column);
        assert_eq!(node.width, Dimension::Undefined);
        assert_eq!(node.border.resolve(), Edges::default());
    }

    #[test]
    fn test_padding_precedence() {
        let mut node = ShadowNode::new();
        node.set_dimension(DimensionProp::Padding(PaddingEdge::All), ResolvedDimension::Length(10.0));
        node.set_dimension(DimensionProp::Padding(PaddingEdge::Horizontal), ResolvedDimension::Length(20.0));
        node.set_dimension(DimensionProp::Padding(PaddingEdge::Left), ResolvedDimension::Length(30.0));

        let edges = node.padding.resolve();
        assert_eq!(edges.left, Dimension::Length(30.0));
        assert_eq!(edges.right, Dimension::Length(20.0));
        assert_eq!(edges.top, Dimension::Length(10.0));
        assert_eq!(edges.bottom, Dimension::Length(10.0));
    }

    #[test]
    fn test_padding_percent_expression() {
        let mut node = ShadowNode::new();
        node.set_dimension(
            DimensionProp::Padding(PaddingEdge::Vertical),
            ResolvedDimension::Expression("5%".into()),
        );
        assert_eq!(node.padding.resolve().top, Dimension::Percent(5.0));
        assert_eq!(node.padding.resolve().left, Dimension::Undefined);
    }

    #[test]
    fn test_border_precedence() {
        let mut node = ShadowNode::new();
        node.set_dimension(DimensionProp::BorderWidth(BorderEdge::All), ResolvedDimension::Length(10.0));
        node.set_dimension(DimensionProp::BorderWidth(BorderEdge::Top), ResolvedDimension::Length(4.0));

        let edges = node.border.resolve();
        assert_eq!(edges.top, 4.0);
        assert_eq!(edges.left, 10.0);
    }

    #[test]
    fn test_unknown_expression_clears() {
        let mut node = ShadowNode::new();
        node.set_dimension(DimensionProp::Width, ResolvedDimension::Length(500.0));
        node.set_dimension(DimensionProp::Width, ResolvedDimension::Expression("wide".into()));
        assert_eq!(node.width, Dimension::Undefined);
    }

    #[test]
    fn test_reset() {
        let mut node = ShadowNode::new();
        node.set_dimension(DimensionProp::Height, ResolvedDimension::Length(100.0));
        node.flex_grow = 2.0;
        node.reset();
        assert_eq!(node, ShadowNode::new());
    }
}
