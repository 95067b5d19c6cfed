//! Panel models that pair a diff cache with a header summary.

use vesselflux_core::context::{FlowTotals, HostContext, SceneMode};
use vesselflux_core::handler::power::PowerHandlerKind;
use vesselflux_core::handler::thermal::ThermalHandlerKind;
use vesselflux_core::solar::SolarExposure;
use vesselflux_core::vessel_data::{VesselElectricalData, VesselThermalData};

use crate::cache::{CacheUpdate, HandlerCache};
use crate::group::CategoryGroup;
use crate::summary::{ElectricalSummary, ThermalSummary, UserHeat};

// ---------------------------------------------------------------------------
// Electrical
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ElectricalView {
    cache: HandlerCache<PowerHandlerKind>,
    solar: SolarExposure,
    simulate_in_editor: bool,
    summary: Option<ElectricalSummary>,
}

impl ElectricalView {
    pub fn new(solar: SolarExposure) -> Self {
        Self {
            cache: HandlerCache::new(),
            solar,
            simulate_in_editor: true,
            summary: None,
        }
    }

    /// When disabled, editor totals use every handler's rating instead of
    /// the simulation-eligible, sun-scaled subset.
    pub fn with_editor_simulation(mut self, enabled: bool) -> Self {
        self.simulate_in_editor = enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.cache = self.cache.with_debug(debug);
        self
    }

    pub fn set_solar_exposure(&mut self, solar: SolarExposure) {
        self.solar = solar;
    }

    pub fn solar_exposure(&self) -> SolarExposure {
        self.solar
    }

    pub fn update(&mut self, data: &VesselElectricalData, ctx: &dyn HostContext) -> CacheUpdate {
        let update = self.cache.update(data);
        let totals = match ctx.scene() {
            SceneMode::Editor if self.simulate_in_editor => FlowTotals {
                production: data.simulated_production(ctx, self.solar),
                consumption: data.simulated_consumption(),
            },
            SceneMode::Editor => data.local_totals(),
            SceneMode::Flight => data.live_totals(ctx),
        };
        let levels = match data.resource_levels(ctx) {
            Ok(levels) => Some(levels),
            Err(err) => {
                tracing::debug!(%err, "charge levels unavailable");
                None
            }
        };
        self.summary = Some(ElectricalSummary::compute(totals, levels));
        update
    }

    /// Summary as of the last update.
    pub fn summary(&self) -> Option<&ElectricalSummary> {
        self.summary.as_ref()
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        self.cache.groups()
    }

    pub fn cache(&self) -> &HandlerCache<PowerHandlerKind> {
        &self.cache
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
        self.summary = None;
    }
}

// ---------------------------------------------------------------------------
// Thermal
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ThermalView {
    cache: HandlerCache<ThermalHandlerKind>,
    user: UserHeat,
    summary: Option<ThermalSummary>,
}

impl ThermalView {
    pub fn new(user: UserHeat) -> Self {
        Self {
            cache: HandlerCache::new(),
            user,
            summary: None,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.cache = self.cache.with_debug(debug);
        self
    }

    pub fn set_user_heat(&mut self, user: UserHeat) {
        self.user = user;
    }

    pub fn user_heat(&self) -> UserHeat {
        self.user
    }

    /// Heat totals come from the host when it can answer, from the handlers
    /// otherwise.
    pub fn update(&mut self, data: &VesselThermalData, ctx: &dyn HostContext) -> CacheUpdate {
        let update = self.cache.update(data);
        self.summary = Some(ThermalSummary::compute(data.live_totals(ctx), self.user));
        update
    }

    pub fn summary(&self) -> Option<&ThermalSummary> {
        self.summary.as_ref()
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        self.cache.groups()
    }

    pub fn cache(&self) -> &HandlerCache<ThermalHandlerKind> {
        &self.cache
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
        self.summary = None;
    }
}
