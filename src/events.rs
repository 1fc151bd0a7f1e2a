//! Bubbling events exported to the declaration layer.
//!
//! Each native event is registered under its own name.

use std::collections::BTreeMap;

pub const ON_HOVER: &str = "onHoverViro";
pub const ON_CLICK: &str = "onClickViro";
pub const ON_TOUCH: &str = "onTouchViro";
pub const ON_SWIPE: &str = "onSwipeViro";
pub const ON_SCROLL: &str = "onScrollViro";
pub const ON_FUSE: &str = "onFuseViro";
pub const ON_PINCH: &str = "onPinchViro";
pub const ON_ROTATE: &str = "onRotateViro";
pub const ON_DRAG: &str = "onDragViro";
pub const ON_COLLISION: &str = "onCollisionViro";
pub const ON_TRANSFORM_DELEGATE: &str = "onNativeTransformDelegateViro";
pub const ON_ANIMATION_START: &str = "onAnimationStartViro";
pub const ON_ANIMATION_FINISH: &str = "onAnimationFinishViro";

pub const NODE_EVENTS: [&str; 13] = [
    ON_HOVER,
    ON_CLICK,
    ON_TOUCH,
    ON_SWIPE,
    ON_SCROLL,
    ON_FUSE,
    ON_PINCH,
    ON_ROTATE,
    ON_DRAG,
    ON_COLLISION,
    ON_TRANSFORM_DELEGATE,
    ON_ANIMATION_START,
    ON_ANIMATION_FINISH,
];

/// Event name → registration name.
pub fn exported_event_types() -> BTreeMap<&'static str, &'static str> {
    NODE_EVENTS.iter().map(|&event| (event, event)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_exported_under_its_own_name() {
        let events = exported_event_types();
        assert_eq!(events.len(), NODE_EVENTS.len());
        assert_eq!(events.get(ON_COLLISION), Some(&"onCollisionViro"));
        assert!(events.iter().all(|(name, registration)| name == registration));
    }
}
