//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use std::collections::BTreeMap;

use crate::context::{
    FlowTotals, HostContext, HostQueryError, Resource, ResourceTotals, SceneMode,
};
use crate::fixed::Fixed64;
use crate::handler::power::PowerHandlerKind;
use crate::handler::thermal::ThermalHandlerKind;
use crate::handler::HandlerKind;
use crate::id::{ModuleId, PartId};
use crate::vessel::{Component, FieldValue, Vessel};

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Vessel helpers
// ===========================================================================

pub fn empty_vessel() -> Vessel {
    Vessel::new("Test Vessel")
}

/// Borrow a module as a [`Component`]. Panics if the module is absent.
pub fn component(vessel: &Vessel, id: ModuleId) -> Component<'_> {
    Component {
        id,
        module: vessel.module(id).expect("module should exist"),
    }
}

/// Add a module with the given fields to a part.
pub fn add_module_with(
    vessel: &mut Vessel,
    part: PartId,
    module_name: &str,
    fields: &[(&str, FieldValue)],
) -> ModuleId {
    let id = vessel
        .add_module(part, module_name)
        .expect("part should exist");
    let module = vessel.module_mut(id).expect("module just added");
    for (name, value) in fields {
        module.set_field(name, value.clone());
    }
    id
}

/// Minimal fields that make each power kind applicable.
pub fn power_fields(kind: PowerHandlerKind) -> Vec<(&'static str, FieldValue)> {
    match kind {
        PowerHandlerKind::DeployableSolarPanel => vec![("chargeRate", 1.0.into())],
        PowerHandlerKind::Generator => vec![("outputRate", 1.0.into())],
        PowerHandlerKind::ResourceConverter => vec![("ecInputRate", 1.0.into())],
        PowerHandlerKind::ActiveRadiator => vec![("ecInputRate", 1.0.into())],
        PowerHandlerKind::ResourceHarvester => vec![("ecInputRate", 1.0.into())],
        PowerHandlerKind::CurvedSolarPanel => vec![("TotalEnergyRate", 1.0.into())],
        PowerHandlerKind::FissionGenerator => vec![("PowerGeneration", 1.0.into())],
        PowerHandlerKind::RadioisotopeGenerator => vec![("BasePower", 1.0.into())],
        PowerHandlerKind::CryoTank => vec![("CoolingCost", 1.0.into())],
        PowerHandlerKind::AntimatterTank => vec![("ContainmentCost", 1.0.into())],
        PowerHandlerKind::RealBattery => vec![("lastECpower", "0".into())],
    }
}

/// Minimal fields that make each thermal kind applicable.
pub fn thermal_fields(kind: ThermalHandlerKind) -> Vec<(&'static str, FieldValue)> {
    match kind {
        ThermalHandlerKind::ActiveRadiator => vec![("maxEnergyTransfer", 1000.0.into())],
        ThermalHandlerKind::ResourceConverter | ThermalHandlerKind::ResourceHarvester => vec![
            ("GeneratesHeat", true.into()),
            ("heatOutput", 10.0.into()),
        ],
        ThermalHandlerKind::CoreHeat => vec![("heatFlux", 5.0.into())],
        ThermalHandlerKind::FissionReactor => vec![("HeatGeneration", 100.0.into())],
    }
}

/// A single-part vessel holding one applicable module of `kind`.
pub fn minimal_power_vessel(kind: PowerHandlerKind) -> (Vessel, ModuleId) {
    let mut vessel = empty_vessel();
    let part = vessel.add_part("part");
    let id = add_module_with(&mut vessel, part, kind.module_name(), &power_fields(kind));
    (vessel, id)
}

/// A single-part vessel holding one applicable module of `kind`.
pub fn minimal_thermal_vessel(kind: ThermalHandlerKind) -> (Vessel, ModuleId) {
    let mut vessel = empty_vessel();
    let part = vessel.add_part("part");
    let id = add_module_with(&mut vessel, part, kind.module_name(), &thermal_fields(kind));
    (vessel, id)
}

// ===========================================================================
// Module builders
// ===========================================================================

/// Deployable solar panel producing `rate` EC/s at full exposure. In flight
/// it reports no output until `flowRate` is set.
pub fn add_solar_panel(vessel: &mut Vessel, part: PartId, rate: f64) -> ModuleId {
    add_module_with(
        vessel,
        part,
        "ModuleDeployableSolarPanel",
        &[("chargeRate", rate.into())],
    )
}

/// Radioisotope generator whose live output equals its rating.
pub fn add_rtg(vessel: &mut Vessel, part: PartId, power: f64) -> ModuleId {
    add_module_with(
        vessel,
        part,
        "ModuleRadioisotopeGenerator",
        &[("BasePower", power.into()), ("ActualPower", power.into())],
    )
}

/// Activated resource converter drawing `draw` EC/s.
pub fn add_converter(vessel: &mut Vessel, part: PartId, draw: f64) -> ModuleId {
    add_module_with(
        vessel,
        part,
        "ModuleResourceConverter",
        &[("ecInputRate", draw.into()), ("IsActivated", true.into())],
    )
}

/// Active radiator drawing `draw` EC/s and rejecting `transfer / 50` kW
/// while cooling.
pub fn add_radiator(vessel: &mut Vessel, part: PartId, draw: f64, transfer: f64) -> ModuleId {
    add_module_with(
        vessel,
        part,
        "ModuleActiveRadiator",
        &[
            ("ecInputRate", draw.into()),
            ("maxEnergyTransfer", transfer.into()),
            ("IsCooling", true.into()),
        ],
    )
}

/// Battery reporting `last_power` verbatim in `lastECpower`.
pub fn add_real_battery(vessel: &mut Vessel, part: PartId, last_power: &str) -> ModuleId {
    add_module_with(vessel, part, "RealBattery", &[("lastECpower", last_power.into())])
}

/// Engine core heat reporting `flux` kW of generated heat.
pub fn add_core_heat(vessel: &mut Vessel, part: PartId, flux: f64) -> ModuleId {
    add_module_with(vessel, part, "ModuleCoreHeat", &[("heatFlux", flux.into())])
}

/// Part ids of [`sample_vessel`].
#[derive(Debug, Clone, Copy)]
pub struct SampleParts {
    pub solar: PartId,
    pub bus: PartId,
    pub radiator: PartId,
}

/// A small vessel with a solar panel, an RTG, a converter, a radiator, and
/// an unsupported module.
pub fn sample_vessel() -> (Vessel, SampleParts) {
    let mut vessel = empty_vessel();
    let solar = vessel.add_part("solarPanels4");
    let bus = vessel.add_part("probeCoreOcto");
    let radiator = vessel.add_part("radPanelLg");
    add_solar_panel(&mut vessel, solar, 1.64);
    add_rtg(&mut vessel, bus, 0.75);
    add_converter(&mut vessel, bus, 2.0);
    vessel
        .add_module(bus, "ModuleCommand")
        .expect("part should exist");
    add_radiator(&mut vessel, radiator, 0.5, 2500.0);
    (vessel, SampleParts { solar, bus, radiator })
}

// ===========================================================================
// Host stub
// ===========================================================================

/// A [`HostContext`] that answers from fixed tables. Unset resources report
/// [`HostQueryError::Unavailable`].
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub scene: SceneMode,
    pub flows: BTreeMap<Resource, FlowTotals>,
    pub totals: BTreeMap<Resource, ResourceTotals>,
}

impl StaticHost {
    pub fn new(scene: SceneMode) -> Self {
        Self {
            scene,
            flows: BTreeMap::new(),
            totals: BTreeMap::new(),
        }
    }

    pub fn editor() -> Self {
        Self::new(SceneMode::Editor)
    }

    pub fn flight() -> Self {
        Self::new(SceneMode::Flight)
    }

    pub fn with_flow(mut self, resource: Resource, flow: FlowTotals) -> Self {
        self.flows.insert(resource, flow);
        self
    }

    pub fn with_totals(mut self, resource: Resource, totals: ResourceTotals) -> Self {
        self.totals.insert(resource, totals);
        self
    }
}

impl HostContext for StaticHost {
    fn scene(&self) -> SceneMode {
        self.scene
    }

    fn resource_totals(&self, resource: Resource) -> Result<ResourceTotals, HostQueryError> {
        self.totals
            .get(&resource)
            .copied()
            .ok_or(HostQueryError::Unavailable { resource })
    }

    fn resource_flow(&self, resource: Resource) -> Result<FlowTotals, HostQueryError> {
        self.flows
            .get(&resource)
            .copied()
            .ok_or(HostQueryError::Unavailable { resource })
    }
}
