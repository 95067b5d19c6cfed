//! Per-vessel handler aggregation.
//!
//! [`VesselData`] owns the handler set of one vessel for one flow domain.
//! Each tick the host calls [`update`](VesselData::update), which brings the
//! set in line with the vessel's current components and polls every handler.
//! Totals are recomputed on every query and never stored.

use std::collections::{BTreeMap, BTreeSet};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::{FlowTotals, HostContext, HostQueryError, ResourceTotals, SceneMode};
use crate::fixed::Fixed64;
use crate::handler::power::PowerHandlerKind;
use crate::handler::thermal::ThermalHandlerKind;
use crate::handler::{DataHandler, HandlerKind};
use crate::id::ModuleId;
use crate::registry::{self, Resolution};
use crate::solar::SolarExposure;
use crate::vessel::Vessel;

/// Electrical handler set of a vessel.
pub type VesselElectricalData = VesselData<PowerHandlerKind>;
/// Thermal handler set of a vessel.
pub type VesselThermalData = VesselData<ThermalHandlerKind>;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// What a [`VesselData::rebuild`] call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub added: usize,
    pub removed: usize,
}

impl RebuildSummary {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// The handler set of one vessel for the flow domain `K`.
///
/// Invariant: at most one handler per [`ModuleId`], and every key refers to
/// a module that was present at the last rebuild.
#[derive(Debug)]
pub struct VesselData<K: HandlerKind> {
    handlers: BTreeMap<ModuleId, Box<dyn DataHandler>>,
    /// Components whose module name has no handler in this domain. Module
    /// names never change, so these are not re-resolved.
    unsupported: BTreeSet<ModuleId>,
    revision: u64,
    debug: bool,
    _kind: PhantomData<K>,
}

impl<K: HandlerKind> Default for VesselData<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HandlerKind> VesselData<K> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            unsupported: BTreeSet::new(),
            revision: next_revision(),
            debug: false,
            _kind: PhantomData,
        }
    }

    /// Build and poll a handler set for a vessel in one step.
    pub fn from_vessel(vessel: &Vessel, ctx: &dyn HostContext) -> Self {
        let mut data = Self::new();
        data.update(vessel, ctx);
        data
    }

    /// Enable per-handler diagnostics on every poll.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Bring the handler set in line with the vessel's components.
    ///
    /// Handlers whose component is gone are dropped; components without a
    /// handler are resolved through the registry. Calling this twice with
    /// the same vessel leaves the set unchanged.
    pub fn rebuild(&mut self, vessel: &Vessel) -> RebuildSummary {
        let before = self.handlers.len();
        self.handlers.retain(|id, _| vessel.contains_module(*id));
        self.unsupported.retain(|id| vessel.contains_module(*id));
        let removed = before - self.handlers.len();

        let mut added = 0;
        for component in vessel.components() {
            if self.handlers.contains_key(&component.id) || self.unsupported.contains(&component.id)
            {
                continue;
            }
            match registry::resolve_detailed::<K>(component) {
                Resolution::Resolved(_, handler) => {
                    self.handlers.insert(component.id, handler);
                    added += 1;
                }
                Resolution::Unsupported => {
                    self.unsupported.insert(component.id);
                }
                // Retried next rebuild: applicability depends on module state.
                Resolution::Inapplicable(_) => {}
            }
        }

        let summary = RebuildSummary { added, removed };
        if !summary.is_unchanged() {
            self.revision = next_revision();
            tracing::debug!(
                resource = ?K::RESOURCE,
                added,
                removed,
                handlers = self.handlers.len(),
                "handler set changed"
            );
        }
        summary
    }

    /// Poll every handler against its live component.
    pub fn poll(&mut self, vessel: &Vessel, scene: SceneMode) {
        for (id, handler) in &mut self.handlers {
            if let Some(module) = vessel.module(*id) {
                handler.poll(module, scene);
            }
        }
        if self.debug {
            for handler in self.handlers.values() {
                tracing::trace!(handler = %handler.describe(), "polled");
            }
        }
    }

    /// Per-tick entry point: rebuild, then poll under the host's scene.
    pub fn update(&mut self, vessel: &Vessel, ctx: &dyn HostContext) -> RebuildSummary {
        let summary = self.rebuild(vessel);
        self.poll(vessel, ctx.scene());
        summary
    }

    /// Changes whenever a rebuild adds or removes handlers. Process-wide
    /// unique, so two handler sets never report the same revision.
    pub fn membership_revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn contains(&self, module: ModuleId) -> bool {
        self.handlers.contains_key(&module)
    }

    pub fn handler(&self, module: ModuleId) -> Option<&dyn DataHandler> {
        self.handlers.get(&module).map(|h| h.as_ref())
    }

    /// All handlers, ordered by module identity.
    pub fn handlers(&self) -> impl Iterator<Item = &dyn DataHandler> + '_ {
        self.handlers.values().map(|h| h.as_ref())
    }

    /// Identities of the current handler set, ordered.
    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.handlers.keys().copied()
    }

    // -----------------------------------------------------------------------
    // Totals
    // -----------------------------------------------------------------------

    /// Production and consumption summed from the handlers' current values.
    pub fn local_totals(&self) -> FlowTotals {
        let mut totals = FlowTotals::default();
        for handler in self.handlers.values() {
            totals.accumulate(handler.value());
        }
        totals
    }

    /// Live production and consumption.
    ///
    /// The host's figure is authoritative; when the host cannot answer, the
    /// locally summed totals are returned instead.
    pub fn live_totals(&self, ctx: &dyn HostContext) -> FlowTotals {
        match ctx.resource_flow(K::RESOURCE) {
            Ok(totals) => totals,
            Err(err) => {
                tracing::debug!(%err, "host flow query unavailable, using local totals");
                self.local_totals()
            }
        }
    }

    /// Production of the simulation-eligible handlers under a solar
    /// exposure, summed locally.
    ///
    /// Only production-direction (negative) contributions are accumulated;
    /// sun-dependent values are scaled before the direction check.
    pub fn sum_simulated_production(&self, solar: SolarExposure) -> Fixed64 {
        self.handlers
            .values()
            .filter(|h| h.is_simulated())
            .map(|h| {
                if h.affected_by_sun_distance() {
                    solar.apply(h.value())
                } else {
                    h.value()
                }
            })
            .filter(|v| *v < Fixed64::ZERO)
            .fold(Fixed64::ZERO, |acc, v| acc.saturating_add(v))
    }

    /// Consumption of the simulation-eligible handlers. Never solar-scaled.
    pub fn simulated_consumption(&self) -> Fixed64 {
        self.handlers
            .values()
            .filter(|h| h.is_simulated())
            .map(|h| h.value())
            .filter(|v| *v > Fixed64::ZERO)
            .fold(Fixed64::ZERO, |acc, v| acc.saturating_add(v))
    }

    /// Production for presentation.
    ///
    /// In the editor this is [`sum_simulated_production`]. In flight the
    /// host's live production is used. If the host cannot answer, the
    /// simulated path stands in without solar scaling, since live values
    /// already reflect the real exposure.
    ///
    /// [`sum_simulated_production`]: VesselData::sum_simulated_production
    pub fn simulated_production(&self, ctx: &dyn HostContext, solar: SolarExposure) -> Fixed64 {
        match ctx.scene() {
            SceneMode::Editor => self.sum_simulated_production(solar),
            SceneMode::Flight => match ctx.resource_flow(K::RESOURCE) {
                Ok(totals) => totals.production,
                Err(err) => {
                    tracing::debug!(%err, "host flow query unavailable, using simulated production");
                    self.sum_simulated_production(SolarExposure::FULL)
                }
            },
        }
    }

    /// Stored amount and capacity of the domain's resource.
    pub fn resource_levels(&self, ctx: &dyn HostContext) -> Result<ResourceTotals, HostQueryError> {
        ctx.resource_totals(K::RESOURCE)
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// One handler per line, or the domain's empty marker.
    pub fn describe(&self) -> String {
        if self.handlers.is_empty() {
            return K::EMPTY_DUMP.to_string();
        }
        self.handlers
            .values()
            .map(|h| h.describe())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
