//! Electrical (electric charge) handlers.
//!
//! Values are in EC per second. Stock modules live in [`stock`], Near Future
//! modules in [`nft`], and the RealBattery integration in [`real_battery`].

pub mod nft;
pub mod real_battery;
pub mod stock;

use crate::context::Resource;
use crate::fixed::{Fixed64, fixed64_to_f64};
use crate::handler::{DataHandler, HandlerKind};
use crate::id::ModuleId;

pub use nft::{
    AntimatterTankHandler, CryoTankHandler, CurvedSolarPanelHandler, FissionGeneratorHandler,
    RadioisotopeGeneratorHandler,
};
pub use real_battery::RealBatteryHandler;
pub use stock::{
    ActiveRadiatorPowerHandler, DeployableSolarPanelHandler, GeneratorHandler,
    ResourceConverterPowerHandler, ResourceHarvesterPowerHandler,
};

/// Every module type with an electrical handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerHandlerKind {
    // Stock
    DeployableSolarPanel,
    Generator,
    ResourceConverter,
    ActiveRadiator,
    ResourceHarvester,

    // Near Future
    CurvedSolarPanel,
    FissionGenerator,
    RadioisotopeGenerator,
    CryoTank,
    AntimatterTank,

    // RealBattery
    RealBattery,
}

impl PowerHandlerKind {
    const ALL: [PowerHandlerKind; 11] = [
        PowerHandlerKind::DeployableSolarPanel,
        PowerHandlerKind::Generator,
        PowerHandlerKind::ResourceConverter,
        PowerHandlerKind::ActiveRadiator,
        PowerHandlerKind::ResourceHarvester,
        PowerHandlerKind::CurvedSolarPanel,
        PowerHandlerKind::FissionGenerator,
        PowerHandlerKind::RadioisotopeGenerator,
        PowerHandlerKind::CryoTank,
        PowerHandlerKind::AntimatterTank,
        PowerHandlerKind::RealBattery,
    ];
}

impl HandlerKind for PowerHandlerKind {
    const RESOURCE: Resource = Resource::ElectricCharge;
    const EMPTY_DUMP: &'static str = "No Power Handlers";

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn module_name(self) -> &'static str {
        match self {
            PowerHandlerKind::DeployableSolarPanel => "ModuleDeployableSolarPanel",
            PowerHandlerKind::Generator => "ModuleGenerator",
            PowerHandlerKind::ResourceConverter => "ModuleResourceConverter",
            PowerHandlerKind::ActiveRadiator => "ModuleActiveRadiator",
            PowerHandlerKind::ResourceHarvester => "ModuleResourceHarvester",
            PowerHandlerKind::CurvedSolarPanel => "ModuleCurvedSolarPanel",
            PowerHandlerKind::FissionGenerator => "FissionGenerator",
            PowerHandlerKind::RadioisotopeGenerator => "ModuleRadioisotopeGenerator",
            PowerHandlerKind::CryoTank => "ModuleCryoTank",
            PowerHandlerKind::AntimatterTank => "ModuleAntimatterTank",
            PowerHandlerKind::RealBattery => "RealBattery",
        }
    }

    fn instantiate(self, module: ModuleId) -> Box<dyn DataHandler> {
        match self {
            PowerHandlerKind::DeployableSolarPanel => {
                Box::new(DeployableSolarPanelHandler::new(module))
            }
            PowerHandlerKind::Generator => Box::new(GeneratorHandler::new(module)),
            PowerHandlerKind::ResourceConverter => {
                Box::new(ResourceConverterPowerHandler::new(module))
            }
            PowerHandlerKind::ActiveRadiator => Box::new(ActiveRadiatorPowerHandler::new(module)),
            PowerHandlerKind::ResourceHarvester => {
                Box::new(ResourceHarvesterPowerHandler::new(module))
            }
            PowerHandlerKind::CurvedSolarPanel => Box::new(CurvedSolarPanelHandler::new(module)),
            PowerHandlerKind::FissionGenerator => Box::new(FissionGeneratorHandler::new(module)),
            PowerHandlerKind::RadioisotopeGenerator => {
                Box::new(RadioisotopeGeneratorHandler::new(module))
            }
            PowerHandlerKind::CryoTank => Box::new(CryoTankHandler::new(module)),
            PowerHandlerKind::AntimatterTank => Box::new(AntimatterTankHandler::new(module)),
            PowerHandlerKind::RealBattery => Box::new(RealBatteryHandler::new(module)),
        }
    }
}

/// Shared one-line format for electrical handler dumps.
pub(crate) fn describe_power(
    kind: PowerHandlerKind,
    category: &str,
    value: Fixed64,
    detail: &str,
) -> String {
    format!(
        "{} [{}]: {:.3} EC/s ({})",
        kind.module_name(),
        category,
        fixed64_to_f64(value),
        detail
    )
}
