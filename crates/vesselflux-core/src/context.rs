//! Host context: the explicit surface through which the aggregation code
//! learns the current scene and queries the host's live resource accounting.

use serde::{Deserialize, Serialize};

use crate::fixed::Fixed64;

/// Which host scene the vessel is being observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneMode {
    /// Design-time editor. The host has no live resource system, so totals
    /// are simulated from handler ratings.
    Editor,
    /// Live flight. The host's resource accounting is authoritative.
    Flight,
}

impl SceneMode {
    pub fn is_editor(self) -> bool {
        matches!(self, SceneMode::Editor)
    }
}

/// Resources the aggregation code knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    ElectricCharge,
    Heat,
}

/// Stored amount and capacity of a resource, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub amount: Fixed64,
    pub capacity: Fixed64,
}

/// Production and consumption of a resource, under the crate-wide sign
/// convention: `production` is zero or negative, `consumption` is zero or
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowTotals {
    pub production: Fixed64,
    pub consumption: Fixed64,
}

impl FlowTotals {
    /// Signed net flow. Negative means the vessel gains the resource.
    pub fn net(&self) -> Fixed64 {
        self.production.saturating_add(self.consumption)
    }

    /// Fold one signed contribution into the matching direction.
    pub fn accumulate(&mut self, value: Fixed64) {
        if value < Fixed64::ZERO {
            self.production = self.production.saturating_add(value);
        } else {
            self.consumption = self.consumption.saturating_add(value);
        }
    }
}

/// Errors from the host's live resource queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostQueryError {
    #[error("live resource data for {resource:?} is unavailable")]
    Unavailable { resource: Resource },
}

/// Queries the aggregation code is allowed to make against the host.
pub trait HostContext {
    /// The scene the vessel is currently observed in.
    fn scene(&self) -> SceneMode;

    /// Stored amount and capacity of a resource across the vessel.
    fn resource_totals(&self, resource: Resource) -> Result<ResourceTotals, HostQueryError>;

    /// Live production/consumption of a resource across the vessel.
    fn resource_flow(&self, resource: Resource) -> Result<FlowTotals, HostQueryError>;
}
