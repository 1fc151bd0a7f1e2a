//! Spatial sound component.
//!
//! A sound source placed in the scene. Besides props it accepts one command,
//! `seekToTime`, and emits finish and error events.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::config::BridgeConfig;
use crate::engine::{MaterialSource, SceneNode};
use crate::error::BindingError;
use crate::props::{
    convert, register_node_props, shadow_prop_table, BindContext, NodeManager, PropTable,
    PropTableBuilder, PropValue,
};

pub const ON_FINISH: &str = "onFinishViro";
pub const ON_ERROR: &str = "onErrorViro";

/// Where the audio comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A sound bundled with the app, by name.
    Named(String),
    Uri(String),
}

/// Distance attenuation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloffModel {
    #[default]
    None,
    Linear,
    Logarithmic,
}

impl RolloffModel {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(Self::None),
            "linear" => Some(Self::Linear),
            "logarithmic" => Some(Self::Logarithmic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundSettings {
    pub source: Option<SoundSource>,
    pub paused: bool,
    pub looping: bool,
    pub muted: bool,
    pub volume: f32,
    /// Distance in world units where attenuation starts.
    pub min_distance: f32,
    /// Distance in world units beyond which the sound is silent.
    pub max_distance: f32,
    pub rolloff_model: RolloffModel,
    /// Target of the last seek, in seconds.
    pub seek_position: Option<f32>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            source: None,
            paused: false,
            looping: false,
            muted: false,
            volume: 1.0,
            min_distance: 0.0,
            max_distance: 10.0,
            rolloff_model: RolloffModel::None,
            seek_position: None,
        }
    }
}

pub trait SoundNode: SceneNode {
    fn set_source(&mut self, source: Option<SoundSource>) -> Result<()>;
    fn set_paused(&mut self, paused: bool) -> Result<()>;
    fn set_loop(&mut self, looping: bool) -> Result<()>;
    fn set_muted(&mut self, muted: bool) -> Result<()>;
    fn set_volume(&mut self, volume: f32) -> Result<()>;
    fn set_min_distance(&mut self, distance: f32) -> Result<()>;
    fn set_max_distance(&mut self, distance: f32) -> Result<()>;
    fn set_rolloff_model(&mut self, model: RolloffModel) -> Result<()>;
    fn seek_to_time(&mut self, seconds: f32) -> Result<()>;
}

/// Parse `source`: a bundled sound name, `{name}` or `{uri}`.
pub fn sound_source(value: &PropValue) -> Result<Option<SoundSource>, BindingError> {
    match value {
        PropValue::Null => Ok(None),
        PropValue::String(name) => Ok(Some(SoundSource::Named(name.clone()))),
        PropValue::Map(map) => {
            if let Some(uri) = map.get("uri").and_then(PropValue::as_str) {
                Ok(Some(SoundSource::Uri(uri.to_string())))
            } else if let Some(name) = map.get("name").and_then(PropValue::as_str) {
                Ok(Some(SoundSource::Named(name.to_string())))
            } else {
                Err(BindingError::invalid("source", "{uri} or {name}", "Map without uri or name"))
            }
        }
        other => Err(BindingError::invalid("source", "string or map", other.type_name())),
    }
}

// =============================================================================
// Setters
// =============================================================================

type SetResult = Result<(), BindingError>;

fn non_negative(prop: &'static str, value: &PropValue, default: f64) -> Result<f32, BindingError> {
    let n = convert::number(prop, value, default)?;
    if n < 0.0 {
        return Err(BindingError::invalid(prop, "non-negative number", n.to_string()));
    }
    Ok(n as f32)
}

fn set_source<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_source(sound_source(value)?)?;
    Ok(())
}

fn set_paused<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_paused(convert::boolean("paused", value, false)?)?;
    Ok(())
}

fn set_loop<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_loop(convert::boolean("loop", value, false)?)?;
    Ok(())
}

fn set_muted<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_muted(convert::boolean("muted", value, false)?)?;
    Ok(())
}

fn set_volume<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_volume(non_negative("volume", value, 1.0)?)?;
    Ok(())
}

fn set_min_distance<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_min_distance(non_negative("minDistance", value, 0.0)?)?;
    Ok(())
}

fn set_max_distance<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    node.set_max_distance(non_negative("maxDistance", value, 10.0)?)?;
    Ok(())
}

fn set_rolloff_model<N: SoundNode>(node: &mut N, value: &PropValue, _: &mut BindContext<'_>) -> SetResult {
    let model = match convert::optional_string("rolloffModel", value)? {
        None => RolloffModel::default(),
        Some(keyword) => RolloffModel::from_keyword(&keyword)
            .ok_or_else(|| BindingError::invalid("rolloffModel", "none, linear or logarithmic", keyword))?,
    };
    node.set_rolloff_model(model)?;
    Ok(())
}

pub fn register_sound_props<N: SoundNode + 'static>(builder: PropTableBuilder<N>) -> PropTableBuilder<N> {
    builder
        .prop("source", set_source::<N>)
        .prop("paused", set_paused::<N>)
        .prop("loop", set_loop::<N>)
        .prop("muted", set_muted::<N>)
        .prop("volume", set_volume::<N>)
        .prop("minDistance", set_min_distance::<N>)
        .prop("maxDistance", set_max_distance::<N>)
        .prop("rolloffModel", set_rolloff_model::<N>)
}

/// Base node props plus sound props.
pub fn sound_prop_table<N: SoundNode + 'static>() -> Result<PropTable<N>, BindingError> {
    PropTable::builder()
        .with(register_node_props)
        .with(register_sound_props)
        .build()
}

// =============================================================================
// Commands and events
// =============================================================================

/// Commands a sound node accepts by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundCommand {
    SeekToTime(f32),
}

impl SoundCommand {
    pub fn parse(name: &str, args: &[PropValue]) -> Result<Self, BindingError> {
        match name {
            "seekToTime" => {
                let seconds = args.first().and_then(PropValue::as_f64).filter(|s| s.is_finite() && *s >= 0.0);
                seconds
                    .map(|s| SoundCommand::SeekToTime(s as f32))
                    .ok_or_else(|| BindingError::invalid("seekToTime", "time in seconds", format!("{args:?}")))
            }
            other => Err(BindingError::UnknownProp(other.to_string())),
        }
    }

    pub fn run<N: SoundNode>(self, node: &mut N) -> Result<(), BindingError> {
        match self {
            SoundCommand::SeekToTime(seconds) => node.seek_to_time(seconds)?,
        }
        Ok(())
    }
}

/// Sound events: event name → registration name.
pub fn sound_event_types() -> BTreeMap<&'static str, &'static str> {
    [(ON_FINISH, ON_FINISH), (ON_ERROR, ON_ERROR)].into_iter().collect()
}

/// Manager for sound nodes: sound props, layout props, node and sound events.
pub fn sound_manager<N: SoundNode + 'static>(
    materials: Box<dyn MaterialSource>,
    config: BridgeConfig,
) -> Result<NodeManager<N>, BindingError> {
    Ok(NodeManager::with_tables(sound_prop_table()?, shadow_prop_table()?, materials, config)
        .with_events(sound_event_types()))
}
