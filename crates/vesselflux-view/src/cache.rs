//! Diff cache over a vessel's handler set.
//!
//! Each tick, [`HandlerCache::update`] compares the live handler set against
//! the snapshot taken at the last rebuild. A non-empty difference (or no
//! snapshot at all) rebuilds the category groups; otherwise the existing
//! groups only re-read their members' values. The set comparison is skipped
//! while the aggregator's membership revision is unchanged.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use vesselflux_core::context::FlowTotals;
use vesselflux_core::handler::HandlerKind;
use vesselflux_core::id::ModuleId;
use vesselflux_core::vessel_data::VesselData;

use crate::diff::MembershipDiff;
use crate::group::{CategoryGroup, build_groups};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CacheState {
    Uninitialized,
    Synced {
        snapshot: BTreeSet<ModuleId>,
        revision: u64,
    },
}

/// What a call to [`HandlerCache::update`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheUpdate {
    /// Groups were rebuilt. `diff` is relative to the previous snapshot (or
    /// to an empty set when the cache was uninitialized).
    Rebuilt { diff: MembershipDiff },
    /// Membership was unchanged; only values were re-read.
    Refreshed,
}

impl CacheUpdate {
    pub fn is_rebuild(&self) -> bool {
        matches!(self, CacheUpdate::Rebuilt { .. })
    }
}

#[derive(Debug)]
pub struct HandlerCache<K: HandlerKind> {
    state: CacheState,
    groups: Vec<CategoryGroup>,
    rebuilds: u64,
    refreshes: u64,
    debug: bool,
    _kind: PhantomData<K>,
}

impl<K: HandlerKind> Default for HandlerCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: HandlerKind> HandlerCache<K> {
    pub fn new() -> Self {
        Self {
            state: CacheState::Uninitialized,
            groups: Vec::new(),
            rebuilds: 0,
            refreshes: 0,
            debug: false,
            _kind: PhantomData,
        }
    }

    /// Log the individual added/removed ids on every rebuild.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn update(&mut self, data: &VesselData<K>) -> CacheUpdate {
        let revision = data.membership_revision();
        let changed = match &mut self.state {
            CacheState::Synced { revision: seen, .. } if *seen == revision => None,
            CacheState::Synced {
                snapshot,
                revision: seen,
            } => {
                let current: BTreeSet<ModuleId> = data.module_ids().collect();
                let diff = MembershipDiff::between(snapshot, &current);
                if diff.is_empty() {
                    *seen = revision;
                    None
                } else {
                    Some((diff, current))
                }
            }
            CacheState::Uninitialized => {
                let current: BTreeSet<ModuleId> = data.module_ids().collect();
                Some((MembershipDiff::between(&BTreeSet::new(), &current), current))
            }
        };

        match changed {
            Some((diff, current)) => {
                self.groups = build_groups(data);
                self.state = CacheState::Synced {
                    snapshot: current,
                    revision,
                };
                self.rebuilds += 1;
                tracing::debug!(
                    resource = ?K::RESOURCE,
                    added = diff.added().len(),
                    removed = diff.removed().len(),
                    groups = self.groups.len(),
                    "rebuilt handler groups"
                );
                if self.debug {
                    tracing::debug!(added = ?diff.added(), removed = ?diff.removed(), "membership diff");
                }
                CacheUpdate::Rebuilt { diff }
            }
            None => {
                for group in &mut self.groups {
                    group.refresh(data);
                }
                self.refreshes += 1;
                tracing::trace!(resource = ?K::RESOURCE, "refreshed handler groups");
                CacheUpdate::Refreshed
            }
        }
    }

    /// Drop the snapshot so the next update rebuilds, e.g. after switching
    /// to a different vessel.
    pub fn invalidate(&mut self) {
        self.state = CacheState::Uninitialized;
        self.groups.clear();
    }

    pub fn is_synced(&self) -> bool {
        matches!(self.state, CacheState::Synced { .. })
    }

    /// Groups in category-name order.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Totals across all groups as of the last update.
    pub fn totals(&self) -> FlowTotals {
        self.groups.iter().fold(FlowTotals::default(), |mut acc, g| {
            acc.production = acc.production.saturating_add(g.production());
            acc.consumption = acc.consumption.saturating_add(g.consumption());
            acc
        })
    }

    /// Number of full rebuilds since creation.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Number of value-only refreshes since creation.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }
}
