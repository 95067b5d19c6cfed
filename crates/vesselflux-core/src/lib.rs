//! VesselFlux Core -- per-vessel resource flow aggregation.
//!
//! A host vessel is a set of parts, each carrying named modules with loosely
//! typed fields. For each flow domain (electrical charge, heat) this crate
//! resolves the supported modules to handlers, polls them every tick, and
//! sums their contributions.
//!
//! # Per-Tick Pipeline
//!
//! Each call to [`vessel_data::VesselData::update`] does two things:
//!
//! 1. **Rebuild** -- Drop handlers whose module left the vessel, resolve
//!    newly present modules through the [`registry`].
//! 2. **Poll** -- Every handler reads its module's current fields under the
//!    host's [`context::SceneMode`].
//!
//! Totals are then queried on demand; nothing is cached between queries.
//!
//! # Sign Convention
//!
//! Positive values are consumption, negative values are production, in the
//! domain's unit per second (EC/s or kW).
//!
//! # Key Types
//!
//! - [`vessel::Vessel`] -- Parts and modules, addressed by generational ids.
//! - [`handler::DataHandler`] -- Uniform contract every handler implements.
//! - [`handler::HandlerKind`] -- Closed set of supported module names per
//!   domain ([`handler::power::PowerHandlerKind`],
//!   [`handler::thermal::ThermalHandlerKind`]).
//! - [`vessel_data::VesselData`] -- Handler set and aggregation for one
//!   vessel and one domain.
//! - [`context::HostContext`] -- Scene and resource queries supplied by the
//!   host.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic sums.

pub mod context;
pub mod fixed;
pub mod handler;
pub mod id;
pub mod registry;
pub mod solar;
pub mod vessel;
pub mod vessel_data;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use context::{FlowTotals, HostContext, HostQueryError, Resource, ResourceTotals, SceneMode};
pub use fixed::Fixed64;
pub use handler::power::PowerHandlerKind;
pub use handler::thermal::ThermalHandlerKind;
pub use handler::{DataHandler, FlowRole, HandlerError, HandlerKind};
pub use id::{ModuleId, PartId};
pub use solar::SolarExposure;
pub use vessel::{Component, FieldValue, PartModule, Vessel};
pub use vessel_data::{RebuildSummary, VesselData, VesselElectricalData, VesselThermalData};
