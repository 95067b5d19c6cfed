//! Criterion benchmarks for the handler cache.
//!
//! Two benchmark groups on the same 200-part vessel:
//! - `cache_refresh`: membership unchanged, values re-read each tick
//! - `cache_rebuild`: cache invalidated before each update

use criterion::{Criterion, criterion_group, criterion_main};
use vesselflux_core::PowerHandlerKind;
use vesselflux_core::test_utils::*;
use vesselflux_core::vessel::Vessel;
use vesselflux_core::vessel_data::VesselElectricalData;
use vesselflux_view::cache::HandlerCache;

// ===========================================================================
// Vessel builder
// ===========================================================================

/// 200 parts cycling through panels, RTGs, converters and radiators, plus
/// one unsupported module per part.
fn build_large_vessel() -> Vessel {
    let mut vessel = empty_vessel();
    for i in 0..200 {
        let part = vessel.add_part(&format!("part{i}"));
        match i % 4 {
            0 => add_solar_panel(&mut vessel, part, 1.64),
            1 => add_rtg(&mut vessel, part, 0.75),
            2 => add_converter(&mut vessel, part, 2.0),
            _ => add_radiator(&mut vessel, part, 0.5, 2500.0),
        };
        vessel.add_module(part, "ModuleCommand");
    }
    vessel
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_refresh");
    group.sample_size(50);

    let vessel = build_large_vessel();
    let host = StaticHost::flight();
    let mut data = VesselElectricalData::from_vessel(&vessel, &host);
    let mut cache = HandlerCache::<PowerHandlerKind>::new();
    cache.update(&data);

    group.bench_function("200_parts_unchanged", |b| {
        b.iter(|| {
            data.update(&vessel, &host);
            cache.update(&data);
        });
    });

    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_rebuild");
    group.sample_size(50);

    let vessel = build_large_vessel();
    let host = StaticHost::flight();
    let mut data = VesselElectricalData::from_vessel(&vessel, &host);
    let mut cache = HandlerCache::<PowerHandlerKind>::new();

    group.bench_function("200_parts_invalidated", |b| {
        b.iter(|| {
            data.update(&vessel, &host);
            cache.invalidate();
            cache.update(&data);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_refresh, bench_rebuild);
criterion_main!(benches);
