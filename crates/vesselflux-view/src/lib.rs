//! VesselFlux View -- presentation-facing models over a vessel's handler set.
//!
//! - [`cache::HandlerCache`] keeps category groups in step with the
//!   aggregator, rebuilding only when membership changes.
//! - [`summary`] computes the panel header figures.
//! - [`view::ElectricalView`] and [`view::ThermalView`] tie the two together
//!   for each flow domain.

pub mod cache;
pub mod diff;
pub mod group;
pub mod summary;
pub mod view;

pub use cache::{CacheUpdate, HandlerCache};
pub use diff::MembershipDiff;
pub use group::CategoryGroup;
pub use summary::{ChargeTrend, ElectricalSummary, HeatStatus, ThermalSummary, UserHeat};
pub use view::{ElectricalView, ThermalView};
