//! Thermal (heat flux) handlers.
//!
//! Values are in kW. Under the crate sign convention a heat source is a
//! producer (negative) and a radiator rejecting heat is a consumer
//! (positive).

use crate::context::{Resource, SceneMode};
use crate::fixed::{Fixed64, fixed64_to_f64};
use crate::handler::{
    DataHandler, FlowRole, HandlerError, HandlerKind, poll_flag, poll_number, require_number,
};
use crate::id::ModuleId;
use crate::vessel::{Component, PartModule};

/// Radiator `maxEnergyTransfer` is per 50 physics frames.
const RADIATOR_TRANSFER_DIVISOR: i32 = 50;

/// Every module type with a thermal handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThermalHandlerKind {
    ActiveRadiator,
    ResourceConverter,
    ResourceHarvester,
    CoreHeat,
    FissionReactor,
}

impl ThermalHandlerKind {
    const ALL: [ThermalHandlerKind; 5] = [
        ThermalHandlerKind::ActiveRadiator,
        ThermalHandlerKind::ResourceConverter,
        ThermalHandlerKind::ResourceHarvester,
        ThermalHandlerKind::CoreHeat,
        ThermalHandlerKind::FissionReactor,
    ];
}

impl HandlerKind for ThermalHandlerKind {
    const RESOURCE: Resource = Resource::Heat;
    const EMPTY_DUMP: &'static str = "No Thermal Handlers";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn module_name(self) -> &'static str {
        match self {
            ThermalHandlerKind::ActiveRadiator => "ModuleActiveRadiator",
            ThermalHandlerKind::ResourceConverter => "ModuleResourceConverter",
            ThermalHandlerKind::ResourceHarvester => "ModuleResourceHarvester",
            ThermalHandlerKind::CoreHeat => "ModuleCoreHeat",
            ThermalHandlerKind::FissionReactor => "FissionReactor",
        }
    }

    fn instantiate(self, module: ModuleId) -> Box<dyn DataHandler> {
        match self {
            ThermalHandlerKind::ActiveRadiator => Box::new(ActiveRadiatorHeatHandler::new(module)),
            ThermalHandlerKind::ResourceConverter => Box::new(HeatGeneratorHandler::new(
                module,
                ThermalHandlerKind::ResourceConverter,
                "Converters",
            )),
            ThermalHandlerKind::ResourceHarvester => Box::new(HeatGeneratorHandler::new(
                module,
                ThermalHandlerKind::ResourceHarvester,
                "Harvesters",
            )),
            ThermalHandlerKind::CoreHeat => Box::new(CoreHeatHandler::new(module)),
            ThermalHandlerKind::FissionReactor => Box::new(FissionReactorHeatHandler::new(module)),
        }
    }
}

fn describe_heat(kind: ThermalHandlerKind, category: &str, value: Fixed64, detail: &str) -> String {
    format!(
        "{} [{}]: {:.3} kW ({})",
        kind.module_name(),
        category,
        fixed64_to_f64(value),
        detail
    )
}

// ---------------------------------------------------------------------------
// ModuleActiveRadiator
// ---------------------------------------------------------------------------

/// Rejects heat while cooling.
#[derive(Debug)]
pub struct ActiveRadiatorHeatHandler {
    module: ModuleId,
    rejection: Fixed64,
    cooling: bool,
    value: Fixed64,
}

impl ActiveRadiatorHeatHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            rejection: Fixed64::ZERO,
            cooling: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for ActiveRadiatorHeatHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        let transfer = require_number(component.module, "maxEnergyTransfer")?.saturating_abs();
        self.rejection = transfer / Fixed64::from_num(RADIATOR_TRANSFER_DIVISOR);
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.cooling = poll_flag(module, "IsCooling", false);
        self.value = if scene.is_editor() || self.cooling {
            self.rejection
        } else {
            Fixed64::ZERO
        };
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        "Radiators"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Consumer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_heat(
            ThermalHandlerKind::ActiveRadiator,
            self.category(),
            self.value,
            &format!("cooling: {}", self.cooling),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleResourceConverter / ModuleResourceHarvester
// ---------------------------------------------------------------------------

/// Converters and harvesters that generate heat while running. Modules with
/// `GeneratesHeat` off are not applicable.
#[derive(Debug)]
pub struct HeatGeneratorHandler {
    module: ModuleId,
    kind: ThermalHandlerKind,
    category: &'static str,
    heat_output: Fixed64,
    active: bool,
    value: Fixed64,
}

impl HeatGeneratorHandler {
    pub fn new(module: ModuleId, kind: ThermalHandlerKind, category: &'static str) -> Self {
        Self {
            module,
            kind,
            category,
            heat_output: Fixed64::ZERO,
            active: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for HeatGeneratorHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        let m = component.module;
        if !poll_flag(m, "GeneratesHeat", false) {
            return Err(HandlerError::inapplicable(m, "module does not generate heat"));
        }
        self.heat_output = require_number(m, "heatOutput")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.active = poll_flag(module, "IsActivated", false);
        self.value = if scene.is_editor() {
            self.heat_output.saturating_neg()
        } else if self.active {
            self.heat_output
                .saturating_mul(poll_number(module, "efficiency", Fixed64::ONE))
                .saturating_neg()
        } else {
            Fixed64::ZERO
        };
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    fn is_simulated(&self) -> bool {
        true
    }

    fn category(&self) -> &'static str {
        self.category
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Producer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_heat(
            self.kind,
            self.category,
            self.value,
            &format!("active: {}", self.active),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleCoreHeat
// ---------------------------------------------------------------------------

/// Core heat reported by the part's own heat model. Only meaningful live.
#[derive(Debug)]
pub struct CoreHeatHandler {
    module: ModuleId,
    value: Fixed64,
}

impl CoreHeatHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for CoreHeatHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        require_number(component.module, "heatFlux")?;
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, _scene: SceneMode) {
        self.value = poll_number(module, "heatFlux", Fixed64::ZERO).saturating_neg();
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    fn is_simulated(&self) -> bool {
        false
    }

    fn category(&self) -> &'static str {
        "Core Heat"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Producer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_heat(ThermalHandlerKind::CoreHeat, self.category(), self.value, "live")
    }
}

// ---------------------------------------------------------------------------
// FissionReactor
// ---------------------------------------------------------------------------

/// Heat generated by a fission reactor core.
#[derive(Debug)]
pub struct FissionReactorHeatHandler {
    module: ModuleId,
    rated: Fixed64,
    enabled: bool,
    value: Fixed64,
}

impl FissionReactorHeatHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            rated: Fixed64::ZERO,
            enabled: true,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for FissionReactorHeatHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.rated = require_number(component.module, "HeatGeneration")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.enabled = poll_flag(module, "Enabled", true);
        self.value = if !self.enabled {
            Fixed64::ZERO
        } else if scene.is_editor() {
            self.rated.saturating_neg()
        } else {
            poll_number(module, "CurrentHeatGeneration", Fixed64::ZERO)
                .saturating_abs()
                .saturating_neg()
        };
    }

    fn value(&self) -> Fixed64 {
        self.value
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
        self.module
    }

    fn describe(&self) -> String {
        describe_heat(
            ThermalHandlerKind::FissionReactor,
            self.category(),
            self.value,
            &format!("enabled: {}", self.enabled),
        )
    }
}
