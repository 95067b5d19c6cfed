//! Property-based tests for the diff cache across random edit sequences.
//!
//! Each sequence mixes part additions, part removals and idle ticks. After
//! every tick the cache must agree with a freshly built view, and it must
//! rebuild exactly when the handler set's membership changed.

use proptest::prelude::*;
use vesselflux_core::PowerHandlerKind;
use vesselflux_core::id::PartId;
use vesselflux_core::test_utils::*;
use vesselflux_core::vessel::Vessel;
use vesselflux_core::vessel_data::VesselElectricalData;
use vesselflux_view::group::build_groups;
use vesselflux_view::{CacheUpdate, HandlerCache};

// ===========================================================================
// Generators
// ===========================================================================

#[derive(Debug, Clone)]
enum Edit {
    AddPanel(f64),
    AddConverter(f64),
    AddUnsupported,
    RemovePart(usize),
    Toggle(usize),
    Idle,
}

fn arb_edits(max_ops: usize) -> impl Strategy<Value = Vec<Edit>> {
    proptest::collection::vec(
        prop_oneof![
            (0.1..20.0f64).prop_map(Edit::AddPanel),
            (0.1..20.0f64).prop_map(Edit::AddConverter),
            Just(Edit::AddUnsupported),
            (0..32usize).prop_map(Edit::RemovePart),
            (0..32usize).prop_map(Edit::Toggle),
            Just(Edit::Idle),
        ],
        1..=max_ops,
    )
}

/// Apply an edit. Returns whether the supported membership changed.
fn apply(vessel: &mut Vessel, parts: &mut Vec<(PartId, bool)>, edit: &Edit) -> bool {
    match edit {
        Edit::AddPanel(rate) => {
            let part = vessel.add_part("panel");
            add_solar_panel(vessel, part, *rate);
            parts.push((part, true));
            true
        }
        Edit::AddConverter(rate) => {
            let part = vessel.add_part("converter");
            add_converter(vessel, part, *rate);
            parts.push((part, true));
            true
        }
        Edit::AddUnsupported => {
            let part = vessel.add_part("decoupler");
            vessel.add_module(part, "ModuleDecouple");
            parts.push((part, false));
            false
        }
        Edit::RemovePart(i) if !parts.is_empty() => {
            let (part, supported) = parts.remove(i % parts.len());
            vessel.remove_part(part);
            supported
        }
        Edit::Toggle(i) if !parts.is_empty() => {
            let (part, _) = parts[i % parts.len()];
            let modules = vessel.part(part).map(|p| p.modules().to_vec()).unwrap_or_default();
            for id in modules {
                if let Some(module) = vessel.module_mut(id) {
                    let active = module.flag("IsActivated").unwrap_or(false);
                    module.set_field("IsActivated", !active);
                }
            }
            false
        }
        _ => false,
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The cache rebuilds exactly on membership changes and otherwise only
    /// refreshes.
    #[test]
    fn rebuilds_track_membership_changes(edits in arb_edits(30)) {
        let host = StaticHost::flight();
        let mut vessel = empty_vessel();
        let mut parts = Vec::new();
        let mut data = VesselElectricalData::new();
        let mut cache = HandlerCache::<PowerHandlerKind>::new();

        data.update(&vessel, &host);
        prop_assert!(cache.update(&data).is_rebuild());
        let mut expected_rebuilds = 1;

        for edit in &edits {
            let changed = apply(&mut vessel, &mut parts, edit);
            data.update(&vessel, &host);
            let update = cache.update(&data);
            if changed {
                expected_rebuilds += 1;
                prop_assert!(update.is_rebuild(), "edit {:?} should rebuild", edit);
            } else {
                prop_assert_eq!(update, CacheUpdate::Refreshed, "edit {:?} should refresh", edit);
            }
        }
        prop_assert_eq!(cache.rebuild_count(), expected_rebuilds);
        prop_assert_eq!(cache.refresh_count(), edits.len() as u64 + 1 - expected_rebuilds);
    }

    /// Refreshed groups report the same totals as groups built from scratch.
    #[test]
    fn refreshed_totals_match_fresh_build(edits in arb_edits(30)) {
        let host = StaticHost::flight();
        let mut vessel = empty_vessel();
        let mut parts = Vec::new();
        let mut data = VesselElectricalData::new();
        let mut cache = HandlerCache::<PowerHandlerKind>::new();

        for edit in &edits {
            apply(&mut vessel, &mut parts, edit);
            data.update(&vessel, &host);
            cache.update(&data);

            let fresh = build_groups(&data);
            prop_assert_eq!(cache.groups().len(), fresh.len());
            for (cached, built) in cache.groups().iter().zip(&fresh) {
                prop_assert_eq!(cached.name(), built.name());
                prop_assert_eq!(cached.production(), built.production());
                prop_assert_eq!(cached.consumption(), built.consumption());
            }
            prop_assert_eq!(cache.totals(), data.local_totals());
        }
    }
}
