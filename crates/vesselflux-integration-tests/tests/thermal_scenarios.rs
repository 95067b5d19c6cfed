//! Integration test: thermal panel with user-entered heat from settings.
//!
//! Loads settings from a temporary directory, builds the thermal view from
//! them, and checks the overheating status as radiators are switched on
//! and off across ticks.

use std::fs;

use vesselflux_core::context::{FlowTotals, Resource};
use vesselflux_core::test_utils::*;
use vesselflux_core::vessel_data::VesselThermalData;
use vesselflux_data::load_settings_from_dir;
use vesselflux_view::{CacheUpdate, HeatStatus, ThermalView, UserHeat};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn radiator_toggle_flips_heat_status() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("vesselflux.toml"),
        "[thermal]\nuser_generation = 5.0\nuser_consumption = 0.0\n",
    )
    .unwrap();
    let settings = load_settings_from_dir(dir.path()).unwrap();
    let (generation, consumption) = settings.user_heat();

    let mut vessel = empty_vessel();
    let engine = vessel.add_part("nuclearEngine");
    add_core_heat(&mut vessel, engine, 20.0);
    let panel = vessel.add_part("radPanelLg");
    let radiator = add_radiator(&mut vessel, panel, 0.5, 1250.0);

    let host = StaticHost::flight();
    let mut data = VesselThermalData::new().with_debug(settings.debug_mode);
    let mut view = ThermalView::new(UserHeat {
        generation,
        consumption,
    })
    .with_debug(settings.debug_ui_mode);

    data.update(&vessel, &host);
    assert!(view.update(&data, &host).is_rebuild());
    let summary = view.summary().unwrap();
    // 20 kW core heat + 5 kW user, 25 kW rejected.
    assert_eq!(summary.net, fixed(0.0));
    assert_eq!(summary.status, HeatStatus::Ok);
    assert_eq!(summary.net_header(), "0.00 kW");

    vessel
        .module_mut(radiator)
        .unwrap()
        .set_field("IsCooling", false);
    data.update(&vessel, &host);
    assert_eq!(view.update(&data, &host), CacheUpdate::Refreshed);
    let summary = view.summary().unwrap();
    assert_eq!(summary.status, HeatStatus::Overheating);
    assert_eq!(summary.net_header(), "▲ 25.00 kW");

    let radiators = view.cache().group("Radiators").unwrap();
    assert_eq!(radiators.consumption(), fixed(0.0));
}

#[test]
fn host_heat_flow_overrides_handlers() {
    init_tracing();
    let (vessel, _) = sample_vessel();
    let host = StaticHost::flight().with_flow(
        Resource::Heat,
        FlowTotals {
            production: fixed(-40.0),
            consumption: fixed(10.0),
        },
    );
    let data = VesselThermalData::from_vessel(&vessel, &host);
    let mut view = ThermalView::new(UserHeat::default());
    view.update(&data, &host);
    let summary = view.summary().unwrap();
    assert_eq!(summary.generated, fixed(40.0));
    assert_eq!(summary.rejected, fixed(10.0));
    assert_eq!(summary.rejected_header(), "▼ 10.00 kW");
}

#[test]
fn empty_thermal_vessel_dumps_marker() {
    init_tracing();
    let mut vessel = empty_vessel();
    let part = vessel.add_part("solarPanels4");
    add_solar_panel(&mut vessel, part, 1.0);
    let data = VesselThermalData::from_vessel(&vessel, &StaticHost::editor());
    assert!(data.is_empty());
    assert_eq!(data.describe(), "No Thermal Handlers");
}

#[test]
fn converter_without_heat_is_skipped_until_it_generates() {
    init_tracing();
    let mut vessel = empty_vessel();
    let part = vessel.add_part("isru");
    let converter = add_converter(&mut vessel, part, 30.0);
    let host = StaticHost::editor();
    let mut data = VesselThermalData::new();
    data.update(&vessel, &host);
    assert!(!data.contains(converter));

    let module = vessel.module_mut(converter).unwrap();
    module.set_field("GeneratesHeat", true);
    module.set_field("heatOutput", 12.0);
    let summary = data.update(&vessel, &host);
    assert_eq!(summary.added, 1);
    assert_eq!(data.local_totals().production, fixed(-12.0));
}
