//! Handlers for Near Future Technologies modules.

use crate::context::SceneMode;
use crate::fixed::Fixed64;
use crate::handler::power::{PowerHandlerKind, describe_power};
use crate::handler::{
    DataHandler, FlowRole, HandlerError, poll_flag, poll_number, require_number,
};
use crate::id::ModuleId;
use crate::vessel::{Component, PartModule};

/// A generator with a rated output (read once) and a live output field
/// (read every poll). Editor scenes report the rating.
#[derive(Debug)]
struct RatedGenerator {
    module: ModuleId,
    rated: Fixed64,
    value: Fixed64,
}

impl RatedGenerator {
    fn new(module: ModuleId) -> Self {
        Self {
            module,
            rated: Fixed64::ZERO,
            value: Fixed64::ZERO,
        }
    }

    fn initialize(&mut self, module: &PartModule, rated_field: &str) -> Result<(), HandlerError> {
        self.rated = require_number(module, rated_field)?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode, live_field: &str) {
        self.value = if scene.is_editor() {
            self.rated.saturating_neg()
        } else {
            poll_number(module, live_field, Fixed64::ZERO)
                .saturating_abs()
                .saturating_neg()
        };
    }
}

// ---------------------------------------------------------------------------
// ModuleCurvedSolarPanel
// ---------------------------------------------------------------------------

/// Curved and blanket solar panels.
#[derive(Debug)]
pub struct CurvedSolarPanelHandler(RatedGenerator);

impl CurvedSolarPanelHandler {
    pub fn new(module: ModuleId) -> Self {
        Self(RatedGenerator::new(module))
    }
}

impl DataHandler for CurvedSolarPanelHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.0.initialize(component.module, "TotalEnergyRate")
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.0.poll(module, scene, "EnergyFlow");
    }

    fn value(&self) -> Fixed64 {
        self.0.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn affected_by_sun_distance(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "Solar Panels"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Producer
    }

    fn module(&self) -> ModuleId {
        self.0.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::CurvedSolarPanel,
            self.category(),
            self.0.value,
            &format!("rated {:.3}", self.0.rated.to_num::<f64>()),
        )
    }
}

// ---------------------------------------------------------------------------
// FissionGenerator
// ---------------------------------------------------------------------------

/// Electrical output of a fission reactor.
#[derive(Debug)]
pub struct FissionGeneratorHandler(RatedGenerator);

impl FissionGeneratorHandler {
    pub fn new(module: ModuleId) -> Self {
        Self(RatedGenerator::new(module))
    }
}

impl DataHandler for FissionGeneratorHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.0.initialize(component.module, "PowerGeneration")
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.0.poll(module, scene, "CurrentGeneration");
    }

    fn value(&self) -> Fixed64 {
        self.0.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "Fission Reactors"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Producer
    }

    fn module(&self) -> ModuleId {
        self.0.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::FissionGenerator,
            self.category(),
            self.0.value,
            &format!("max {:.3}", self.0.rated.to_num::<f64>()),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleRadioisotopeGenerator
// ---------------------------------------------------------------------------

/// Decaying radioisotope generators.
#[derive(Debug)]
pub struct RadioisotopeGeneratorHandler(RatedGenerator);

impl RadioisotopeGeneratorHandler {
    pub fn new(module: ModuleId) -> Self {
        Self(RatedGenerator::new(module))
    }
}

impl DataHandler for RadioisotopeGeneratorHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.0.initialize(component.module, "BasePower")
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.0.poll(module, scene, "ActualPower");
    }

    fn value(&self) -> Fixed64 {
        self.0.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "RTGs"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Producer
    }

    fn module(&self) -> ModuleId {
        self.0.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::RadioisotopeGenerator,
            self.category(),
            self.0.value,
            &format!("base {:.3}", self.0.rated.to_num::<f64>()),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleCryoTank
// ---------------------------------------------------------------------------

/// Cryogenic tanks draw EC to keep boil-off in check while cooling is on.
#[derive(Debug)]
pub struct CryoTankHandler {
    module: ModuleId,
    cost: Fixed64,
    enabled: bool,
    value: Fixed64,
}

impl CryoTankHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            cost: Fixed64::ZERO,
            enabled: true,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for CryoTankHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.cost = require_number(component.module, "CoolingCost")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.enabled = poll_flag(module, "CoolingEnabled", true);
        self.value = if !self.enabled {
            Fixed64::ZERO
        } else if scene.is_editor() {
            self.cost
        } else {
            poll_number(module, "currentCoolingCost", self.cost).saturating_abs()
        };
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "Cryo Tanks"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Consumer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::CryoTank,
            self.category(),
            self.value,
            &format!("cooling: {}", self.enabled),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleAntimatterTank
// ---------------------------------------------------------------------------

/// Antimatter containment draws a flat EC cost while enabled.
#[derive(Debug)]
pub struct AntimatterTankHandler {
    module: ModuleId,
    cost: Fixed64,
    enabled: bool,
    value: Fixed64,
}

impl AntimatterTankHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            cost: Fixed64::ZERO,
            enabled: true,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for AntimatterTankHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.cost = require_number(component.module, "ContainmentCost")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, _scene: SceneMode) {
        self.enabled = poll_flag(module, "ContainmentEnabled", true);
        self.value = if self.enabled { self.cost } else { Fixed64::ZERO };
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "Antimatter Tanks"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Consumer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::AntimatterTank,
            self.category(),
            self.value,
            &format!("containment: {}", self.enabled),
        )
    }
}
