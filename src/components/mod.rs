//! Components built on the base scene node.

pub mod camera;
pub mod sound;

pub use camera::{camera_prop_table, CameraNode, CameraSettings, CameraStack};
pub use sound::{sound_event_types, sound_manager, sound_prop_table, RolloffModel, SoundCommand, SoundNode, SoundSettings, SoundSource};
