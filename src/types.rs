//! Core types for node-bridge.
//!
//! Layout-side values the shadow node stores, flex keywords, and the small
//! value types scene nodes receive (interaction flags, drag settings,
//! transform behaviors).

use glam::Vec3;

// =============================================================================
// Dimension - Layout-unit values after resolution
// =============================================================================

/// A layout dimension in the flexbox engine's native unit space.
///
/// Numeric world-unit input is converted to [`Dimension::Length`] by the
/// resolver in [`crate::layout::units`]; string input is interpreted by
/// [`Dimension::parse_expression`].
///
/// # Example
///
/// ```
/// use node_bridge::Dimension;
///
/// assert_eq!(Dimension::parse_expression("50%"), Some(Dimension::Percent(50.0)));
/// assert_eq!(Dimension::parse_expression("auto"), Some(Dimension::Auto));
/// assert_eq!(Dimension::parse_expression("wide"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// No value set. Sizes behave like auto, spacing like zero.
    #[default]
    Undefined,
    /// Content-determined.
    Auto,
    /// Absolute size in layout units.
    Length(f32),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl Dimension {
    /// Interpret a layout expression string.
    ///
    /// Accepts `"auto"` and `"<number>%"`. Anything else returns `None`.
    pub fn parse_expression(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        if expr == "auto" {
            return Some(Self::Auto);
        }
        let pct = expr.strip_suffix('%')?;
        pct.trim().parse::<f32>().ok().filter(|p| p.is_finite()).map(Self::Percent)
    }

    /// True when no value has been set.
    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

// =============================================================================
// Flex Enums - For layout
// =============================================================================

/// Declare a layout keyword enum with its accepted prop strings.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $default:ident => $default_kw:literal,
            $($variant:ident => $kw:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            $default,
            $($variant),*
        }

        impl $name {
            /// Parse the keyword used in declared props.
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $default_kw => Some(Self::$default),
                    $($kw => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The keyword this variant is declared with.
            pub const fn keyword(&self) -> &'static str {
                match self {
                    Self::$default => $default_kw,
                    $(Self::$variant => $kw,)*
                }
            }
        }
    };
}

keyword_enum! {
    /// Flex direction for container layout.
    pub enum FlexDirection {
        #[default]
        Column => "column",
        Row => "row",
        ColumnReverse => "column-reverse",
        RowReverse => "row-reverse",
    }
}

keyword_enum! {
    /// Flex wrap behavior.
    pub enum FlexWrap {
        #[default]
        NoWrap => "nowrap",
        Wrap => "wrap",
        WrapReverse => "wrap-reverse",
    }
}

keyword_enum! {
    /// Main-axis distribution.
    pub enum JustifyContent {
        #[default]
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
        SpaceEvenly => "space-evenly",
    }
}

keyword_enum! {
    /// Cross-axis alignment of children.
    pub enum AlignItems {
        #[default]
        Stretch => "stretch",
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        Baseline => "baseline",
    }
}

keyword_enum! {
    /// Per-item override of the parent's `alignItems`.
    pub enum AlignSelf {
        #[default]
        Auto => "auto",
        Stretch => "stretch",
        FlexStart => "flex-start",
        Center => "center",
        FlexEnd => "flex-end",
        Baseline => "baseline",
    }
}

keyword_enum! {
    /// Distribution of wrapped lines.
    pub enum AlignContent {
        #[default]
        FlexStart => "flex-start",
        Stretch => "stretch",
        Center => "center",
        FlexEnd => "flex-end",
        SpaceBetween => "space-between",
        SpaceAround => "space-around",
    }
}

keyword_enum! {
    /// Positioning scheme.
    pub enum PositionType {
        #[default]
        Relative => "relative",
        Absolute => "absolute",
    }
}

// =============================================================================
// Interaction flags
// =============================================================================

bitflags::bitflags! {
    /// Input capabilities a scene node opts into.
    ///
    /// Each `can*` prop toggles one flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interaction: u16 {
        const HOVER = 1 << 0;
        const CLICK = 1 << 1;
        const TOUCH = 1 << 2;
        const SCROLL = 1 << 3;
        const SWIPE = 1 << 4;
        const DRAG = 1 << 5;
        const FUSE = 1 << 6;
        const PINCH = 1 << 7;
        const ROTATE = 1 << 8;
        const COLLIDE = 1 << 9;
    }
}

impl Default for Interaction {
    /// Nodes start with every input capability off.
    fn default() -> Self {
        Self::empty()
    }
}

/// Default time a gaze must rest on a node before a fuse fires.
pub const DEFAULT_TIME_TO_FUSE_MILLIS: f32 = 1000.0;

// =============================================================================
// Drag
// =============================================================================

/// How a dragged node follows the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragType {
    #[default]
    FixedDistance,
    FixedDistanceOrigin,
    FixedToWorld,
    FixedToPlane,
}

impl DragType {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "FixedDistance" => Some(Self::FixedDistance),
            "FixedDistanceOrigin" => Some(Self::FixedDistanceOrigin),
            "FixedToWorld" => Some(Self::FixedToWorld),
            "FixedToPlane" => Some(Self::FixedToPlane),
            _ => None,
        }
    }
}

/// Plane a `FixedToPlane` drag is constrained to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    pub point: Vec3,
    pub normal: Vec3,
    pub max_distance: f32,
}

impl Default for DragPlane {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            max_distance: 5.0,
        }
    }
}

// =============================================================================
// Transform behaviors
// =============================================================================

/// Constraint applied to a node's orientation every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformBehavior {
    /// Face the camera on all axes.
    Billboard,
    /// Face the camera, rotating about X only.
    BillboardX,
    /// Face the camera, rotating about Y only.
    BillboardY,
}

impl TransformBehavior {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "billboard" => Some(Self::Billboard),
            "billboardX" => Some(Self::BillboardX),
            "billboardY" => Some(Self::BillboardY),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expression() {
        assert_eq!(Dimension::parse_expression("auto"), Some(Dimension::Auto));
        assert_eq!(Dimension::parse_expression("50%"), Some(Dimension::Percent(50.0)));
        assert_eq!(Dimension::parse_expression(" 12.5 %"), Some(Dimension::Percent(12.5)));
        assert_eq!(Dimension::parse_expression("100"), None);
        assert_eq!(Dimension::parse_expression("%"), None);
        assert_eq!(Dimension::parse_expression("NaN%"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        assert_eq!(FlexDirection::from_keyword("row"), Some(FlexDirection::Row));
        assert_eq!(FlexDirection::Row.keyword(), "row");
        assert_eq!(JustifyContent::from_keyword("space-evenly"), Some(JustifyContent::SpaceEvenly));
        assert_eq!(AlignSelf::default(), AlignSelf::Auto);
        assert_eq!(PositionType::from_keyword("fixed"), None);
    }

    #[test]
    fn test_interaction_flags() {
        let mut flags = Interaction::default();
        assert!(flags.is_empty());
        flags.set(Interaction::CLICK, true);
        flags.set(Interaction::DRAG, true);
        flags.set(Interaction::CLICK, false);
        assert_eq!(flags, Interaction::DRAG);
    }

    #[test]
    fn test_drag_keywords() {
        assert_eq!(DragType::from_keyword("FixedToPlane"), Some(DragType::FixedToPlane));
        assert_eq!(DragType::from_keyword("fixedToPlane"), None);
        assert_eq!(TransformBehavior::from_keyword("billboardY"), Some(TransformBehavior::BillboardY));
    }
}
