//! NodeManager - routes property batches to scene nodes and shadow nodes.
//!
//! Every setter failure lands in one dispatch loop. It is logged with the
//! prop name, the prop keeps its previous value, and the batch moves on.

use std::collections::BTreeMap;

use taffy::TaffyError;
use tracing::{debug, error, warn};

use super::node_props::node_prop_table;
use super::shadow_props::shadow_prop_table;
use super::table::{BindContext, PropTable};
use super::value::{PropMap, PropValue};
use crate::config::BridgeConfig;
use crate::engine::{MaterialSource, NodeRegistry, SceneNode};
use crate::error::BindingError;
use crate::events;
use crate::layout::units::to_layout_units;
use crate::layout::{self, ComputedLayout, ShadowNode};

/// Outcome of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateReport {
    /// Props whose setter succeeded.
    pub applied: usize,
    /// Props whose setter returned an error.
    pub rejected: usize,
    /// Props no table registers.
    pub unknown: usize,
    /// Node props were dropped because the node is torn down or detached.
    pub skipped: bool,
}

impl UpdateReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Which half of an element a prop goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Shadow,
    Node,
    Unknown,
}

/// Applies prop batches for one kind of scene node.
pub struct NodeManager<N> {
    props: PropTable<N>,
    shadow_props: PropTable<ShadowNode>,
    /// Names registered in both tables, routed by value type.
    shared: Vec<&'static str>,
    events: BTreeMap<&'static str, &'static str>,
    materials: Box<dyn MaterialSource>,
    config: BridgeConfig,
}

impl<N: SceneNode + 'static> NodeManager<N> {
    /// Manager with the base node and layout tables.
    pub fn new(materials: Box<dyn MaterialSource>, config: BridgeConfig) -> Result<Self, BindingError> {
        Ok(Self::with_tables(node_prop_table()?, shadow_prop_table()?, materials, config))
    }
}

impl<N: SceneNode> NodeManager<N> {
    /// Manager with component-specific tables.
    ///
    /// A name registered in both tables is routed by value: a string goes to
    /// the shadow node as a layout keyword, anything else to the scene node.
    pub fn with_tables(
        props: PropTable<N>,
        shadow_props: PropTable<ShadowNode>,
        materials: Box<dyn MaterialSource>,
        config: BridgeConfig,
    ) -> Self {
        let shared: Vec<_> = props.names().filter(|name| shadow_props.contains(name)).collect();
        if !shared.is_empty() {
            debug!("props routed by value type: {:?}", shared);
        }
        Self {
            props,
            shadow_props,
            shared,
            events: events::exported_event_types(),
            materials,
            config,
        }
    }

    /// Export component events next to the node events.
    pub fn with_events(mut self, events: BTreeMap<&'static str, &'static str>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn props(&self) -> &PropTable<N> {
        &self.props
    }

    pub fn shadow_props(&self) -> &PropTable<ShadowNode> {
        &self.shadow_props
    }

    pub fn materials_mut(&mut self) -> &mut dyn MaterialSource {
        self.materials.as_mut()
    }

    /// Names registered in both tables.
    pub fn shared_props(&self) -> &[&'static str] {
        &self.shared
    }

    /// Where a prop update goes.
    pub fn route(&self, name: &str, value: &PropValue) -> Route {
        route(&self.shadow_props, &self.props, name, value)
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Apply node props to `node`.
    ///
    /// Updates to a torn-down or detached node are discarded. Layout props are
    /// ignored here; see [`Self::update_shadow_props`].
    pub fn update_props(&mut self, node: &mut N, props: &PropMap) -> UpdateReport {
        if node.is_torn_down() || !node.is_attached() {
            debug!("node is torn down or detached, dropping {} prop(s)", props.len());
            return UpdateReport::skipped();
        }

        let mut report = UpdateReport::default();
        let mut ctx = BindContext {
            materials: self.materials.as_mut(),
        };
        for (name, value) in props {
            match route(&self.shadow_props, &self.props, name, value) {
                Route::Node => dispatch(&self.props, node, name, value, &mut ctx, &mut report),
                Route::Shadow => {}
                Route::Unknown => report_unknown(self.config.warn_unknown_props, name, &mut report),
            }
        }
        report
    }

    /// Apply layout props to a shadow node.
    pub fn update_shadow_props(&mut self, shadow: &mut ShadowNode, props: &PropMap) -> UpdateReport {
        let mut report = UpdateReport::default();
        let mut ctx = BindContext {
            materials: self.materials.as_mut(),
        };
        for (name, value) in props {
            match route(&self.shadow_props, &self.props, name, value) {
                Route::Shadow => dispatch(&self.shadow_props, shadow, name, value, &mut ctx, &mut report),
                Route::Node => {}
                Route::Unknown => report_unknown(self.config.warn_unknown_props, name, &mut report),
            }
        }
        report
    }

    /// Apply a batch to element `index` of `registry`.
    ///
    /// Layout props still reach the shadow node of a detached element so the
    /// next layout pass is correct; node props are dropped until it attaches.
    /// A torn-down element receives nothing.
    pub fn update(&mut self, registry: &mut NodeRegistry<N>, index: usize, props: &PropMap) -> UpdateReport {
        let Some((node, shadow)) = registry.split_mut(index) else {
            debug!("no element at index {}, dropping {} prop(s)", index, props.len());
            return UpdateReport::skipped();
        };
        if node.is_torn_down() {
            debug!("element {} is torn down, dropping {} prop(s)", index, props.len());
            return UpdateReport::skipped();
        }

        let live = node.is_attached();
        let mut report = UpdateReport::default();
        let mut ctx = BindContext {
            materials: self.materials.as_mut(),
        };
        for (name, value) in props {
            match route(&self.shadow_props, &self.props, name, value) {
                Route::Shadow => dispatch(&self.shadow_props, shadow, name, value, &mut ctx, &mut report),
                Route::Node if live => dispatch(&self.props, node, name, value, &mut ctx, &mut report),
                Route::Node => report.skipped = true,
                Route::Unknown => report_unknown(self.config.warn_unknown_props, name, &mut report),
            }
        }
        if report.skipped {
            debug!("element {} is detached, node props dropped", index);
        }
        report
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out every element in the configured viewport and push the bounds
    /// to attached nodes.
    pub fn compute_layout(&self, registry: &mut NodeRegistry<N>) -> Result<ComputedLayout, TaffyError> {
        let [width, height] = self.config.layout_viewport;
        let computed = layout::compute_layout(
            &*registry,
            to_layout_units(width as f64),
            to_layout_units(height as f64),
        )?;
        registry.apply_layout(&computed);
        Ok(computed)
    }

    /// Event name → registration name, for the declaration layer.
    pub fn exported_event_types(&self) -> BTreeMap<&'static str, &'static str> {
        self.events.clone()
    }
}

fn route<N>(shadow_props: &PropTable<ShadowNode>, props: &PropTable<N>, name: &str, value: &PropValue) -> Route {
    match (shadow_props.contains(name), props.contains(name)) {
        (true, true) if matches!(value, PropValue::String(_)) => Route::Shadow,
        (true, true) | (false, true) => Route::Node,
        (true, false) => Route::Shadow,
        (false, false) => Route::Unknown,
    }
}

fn report_unknown(enabled: bool, name: &str, report: &mut UpdateReport) {
    report.unknown += 1;
    if enabled {
        warn!("Unknown property {name}. Doing nothing.");
    }
}

/// Run one setter and log its failure.
fn dispatch<T>(
    table: &PropTable<T>,
    target: &mut T,
    name: &str,
    value: &PropValue,
    ctx: &mut BindContext<'_>,
    report: &mut UpdateReport,
) {
    match table.apply(target, name, value, ctx) {
        Ok(()) => report.applied += 1,
        Err(err @ BindingError::UnsupportedDimensionType { .. }) => {
            warn!("{err}. Doing nothing.");
            report.rejected += 1;
        }
        Err(err) => {
            error!("Error updating {name} property: {err}");
            report.rejected += 1;
        }
    }
}
