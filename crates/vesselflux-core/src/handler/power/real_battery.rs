//! RealBattery: batteries with charge/discharge behavior reported by the
//! module itself.

use crate::context::SceneMode;
use crate::fixed::Fixed64;
use crate::handler::power::{PowerHandlerKind, describe_power};
use crate::handler::{DataHandler, FlowRole, HandlerError, poll_number};
use crate::id::ModuleId;
use crate::vessel::{Component, PartModule};

/// Reads `lastECpower`. A positive value means the battery is charging,
/// i.e. consuming EC, which already matches the crate sign convention.
#[derive(Debug)]
pub struct RealBatteryHandler {
    module: ModuleId,
    value: Fixed64,
}

impl RealBatteryHandler {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            value: Fixed64::ZERO,
        }
    }
}

impl DataHandler for RealBatteryHandler {
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError> {
        if !component.module.has_field("lastECpower") {
            return Err(HandlerError::inapplicable(
                component.module,
                "battery does not report lastECpower",
            ));
        }
        Ok(())
    }

    fn poll(&mut self, module: &PartModule, _scene: SceneMode) {
        self.value = poll_number(module, "lastECpower", Fixed64::ZERO);
    }

    fn value(&self) -> Fixed64 {
        self.value
    }

    // Charge state only exists in flight.
    fn is_simulated(&self) -> bool {
        false
    }

    fn category(&self) -> &'static str {
        "Batteries"
    }

    fn nominal_role(&self) -> FlowRole {
        FlowRole::Consumer
    }

    fn module(&self) -> ModuleId {
        self.module
    }

    fn describe(&self) -> String {
        let state = match self.role() {
            FlowRole::Producer => "discharging",
            FlowRole::Consumer if self.value > Fixed64::ZERO => "charging",
            FlowRole::Consumer => "idle",
        };
        describe_power(PowerHandlerKind::RealBattery, self.category(), self.value, state)
    }
}
