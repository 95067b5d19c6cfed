//! Handlers for stock part modules.

use crate::context::SceneMode;
use crate::fixed::Fixed64;
use crate::handler::power::{PowerHandlerKind, describe_power};
use crate::handler::{
    DataHandler, FlowRole, HandlerError, poll_flag, poll_number, require_number,
};
use crate::id::ModuleId;
use crate::vessel::{Component, PartModule};

/// Net EC draw of a module with optional EC input and output rates.
fn ec_balance(input: Fixed64, output: Fixed64) -> Fixed64 {
    input.saturating_sub(output)
}

// ---------------------------------------------------------------------------
// ModuleDeployableSolarPanel
// ---------------------------------------------------------------------------

/// Deployable (and fixed) solar panels.
///
/// In the editor the panel reports its rated `chargeRate`; in flight it
/// reports the live `flowRate`. A `BROKEN` panel produces nothing.
#[derive(Debug)]
pub struct DeployableSolarPanelHandler {
    module: ModuleId,
    charge_rate: Fixed64,
    broken: bool,
    value: Fixed64,
}

impl DeployableSolarPanelHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            charge_rate: Fixed64::ZERO,
            broken: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for DeployableSolarPanelHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        let rate = require_number(component.module, "chargeRate")?;
        if rate <= Fixed64::ZERO {
            return Err(HandlerError::inapplicable(component.module, "panel has no charge rate"));
        }
        self.charge_rate = rate;
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.broken = module
            .text("deployState")
            .is_ok_and(|s| s.eq_ignore_ascii_case("BROKEN"));
        self.value = if self.broken {
            Fixed64::ZERO
        } else if scene.is_editor() {
            self.charge_rate.saturating_neg()
        } else {
            poll_number(module, "flowRate", Fixed64::ZERO)
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
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::DeployableSolarPanel,
            self.category(),
            self.value,
            &format!("rated {:.3}, broken: {}", self.charge_rate.to_num::<f64>(), self.broken),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleGenerator
// ---------------------------------------------------------------------------

/// Generic generators (RTGs, fuel cells). Reads the EC `outputRate` and
/// optional `inputRate`; always-active generators count even when switched
/// off.
#[derive(Debug)]
pub struct GeneratorHandler {
    module: ModuleId,
    input: Fixed64,
    output: Fixed64,
    active: bool,
    value: Fixed64,
}

impl GeneratorHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            input: Fixed64::ZERO,
            output: Fixed64::ZERO,
            active: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for GeneratorHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        let m = component.module;
        if !m.has_field("outputRate") && !m.has_field("inputRate") {
            return Err(HandlerError::inapplicable(m, "generator does not use ElectricCharge"));
        }
        self.output = poll_number(m, "outputRate", Fixed64::ZERO);
        self.input = poll_number(m, "inputRate", Fixed64::ZERO);
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.active =
            poll_flag(module, "isAlwaysActive", false) || poll_flag(module, "generatorIsActive", false);
        let nominal = ec_balance(self.input, self.output);
        self.value = if scene.is_editor() {
            nominal
        } else if self.active {
            nominal.saturating_mul(poll_number(module, "efficiency", Fixed64::ONE))
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
        "Generators"
    }

    fn nominal_role(&self) -> FlowRole {
        if self.output >= self.input {
            FlowRole::Producer
        } else {
            FlowRole::Consumer
        }
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::Generator,
            self.category(),
            self.value,
            &format!("active: {}", self.active),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleResourceConverter
// ---------------------------------------------------------------------------

/// Resource converters. Only converters that consume or produce electric
/// charge are applicable.
#[derive(Debug)]
pub struct ResourceConverterPowerHandler {
    module: ModuleId,
    input: Fixed64,
    output: Fixed64,
    active: bool,
    value: Fixed64,
}

impl ResourceConverterPowerHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            input: Fixed64::ZERO,
            output: Fixed64::ZERO,
            active: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for ResourceConverterPowerHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        let m = component.module;
        if !m.has_field("ecInputRate") && !m.has_field("ecOutputRate") {
            return Err(HandlerError::inapplicable(m, "converter does not use ElectricCharge"));
        }
        self.input = poll_number(m, "ecInputRate", Fixed64::ZERO);
        self.output = poll_number(m, "ecOutputRate", Fixed64::ZERO);
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.active = poll_flag(module, "IsActivated", false);
        let nominal = ec_balance(self.input, self.output);
        self.value = if scene.is_editor() {
            nominal
        } else if self.active {
            nominal.saturating_mul(poll_number(module, "efficiency", Fixed64::ONE))
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
        "Converters"
    }

    fn nominal_role(&self) -> FlowRole {
        if self.output > self.input {
            FlowRole::Producer
        } else {
            FlowRole::Consumer
        }
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::ResourceConverter,
            self.category(),
            self.value,
            &format!("active: {}", self.active),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleActiveRadiator
// ---------------------------------------------------------------------------

/// Active radiators draw EC while cooling.
#[derive(Debug)]
pub struct ActiveRadiatorPowerHandler {
    module: ModuleId,
    draw: Fixed64,
    cooling: bool,
    value: Fixed64,
}

impl ActiveRadiatorPowerHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            draw: Fixed64::ZERO,
            cooling: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for ActiveRadiatorPowerHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.draw = require_number(component.module, "ecInputRate")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.cooling = poll_flag(module, "IsCooling", false);
        self.value = if scene.is_editor() || self.cooling {
            self.draw
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
        describe_power(
            PowerHandlerKind::ActiveRadiator,
            self.category(),
            self.value,
            &format!("cooling: {}", self.cooling),
        )
    }
}

// ---------------------------------------------------------------------------
// ModuleResourceHarvester
// ---------------------------------------------------------------------------

/// Drills and intakes draw EC while activated.
#[derive(Debug)]
pub struct ResourceHarvesterPowerHandler {
    module: ModuleId,
    draw: Fixed64,
    active: bool,
    value: Fixed64,
}

impl ResourceHarvesterPowerHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            draw: Fixed64::ZERO,
            active: false,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for ResourceHarvesterPowerHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        self.draw = require_number(component.module, "ecInputRate")?.saturating_abs();
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, scene: SceneMode) {
        self.active = poll_flag(module, "IsActivated", false);
        self.value = if scene.is_editor() {
            self.draw
        } else if self.active {
            self.draw
                .saturating_mul(poll_number(module, "efficiency", Fixed64::ONE))
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
        "Harvesters"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Consumer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        describe_power(
            PowerHandlerKind::ResourceHarvester,
            self.category(),
            self.value,
            &format!("active: {}", self.active),
        )
    }
}
