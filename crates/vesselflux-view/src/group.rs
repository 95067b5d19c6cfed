//! Category groups: handlers bucketed by category name, split into producer
//! and consumer views.
//!
//! Groups hold module ids only. Every read goes back through the
//! [`VesselData`] the group was built from, so a handler that has been
//! removed is simply skipped.

use std::collections::BTreeMap;

use vesselflux_core::fixed::Fixed64;
use vesselflux_core::handler::{DataHandler, FlowRole, HandlerKind};
use vesselflux_core::id::ModuleId;
use vesselflux_core::vessel_data::VesselData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    name: &'static str,
    producers: Vec<ModuleId>,
    consumers: Vec<ModuleId>,
    production: Fixed64,
    consumption: Fixed64,
}

impl CategoryGroup {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            producers: Vec::new(),
            consumers: Vec::new(),
            production: Fixed64::ZERO,
            consumption: Fixed64::ZERO,
        }
    }

    fn insert(&mut self, id: ModuleId, handler: &dyn DataHandler) {
        match handler.role() {
            FlowRole::Producer => self.producers.push(id),
            FlowRole::Consumer => self.consumers.push(id),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Members classified as producers when the group was last built.
    pub fn producers(&self) -> &[ModuleId] {
        &self.producers
    }

    /// Members classified as consumers when the group was last built.
    pub fn consumers(&self) -> &[ModuleId] {
        &self.consumers
    }

    pub fn members(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.producers.iter().chain(&self.consumers).copied()
    }

    pub fn len(&self) -> usize {
        self.producers.len() + self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed production of the members at the last refresh (zero or
    /// negative).
    pub fn production(&self) -> Fixed64 {
        self.production
    }

    /// Summed consumption of the members at the last refresh (zero or
    /// positive).
    pub fn consumption(&self) -> Fixed64 {
        self.consumption
    }

    pub fn net(&self) -> Fixed64 {
        self.production.saturating_add(self.consumption)
    }

    /// Re-read the current values of the members without restructuring.
    ///
    /// Values are split by their current sign, so a member that changed role
    /// since the last build is counted on its new side.
    pub fn refresh<K: HandlerKind>(&mut self, data: &VesselData<K>) {
        let mut production = Fixed64::ZERO;
        let mut consumption = Fixed64::ZERO;
        for id in self.producers.iter().chain(&self.consumers) {
            let Some(handler) = data.handler(*id) else {
                continue;
            };
            let value = handler.value();
            if value < Fixed64::ZERO {
                production = production.saturating_add(value);
            } else {
                consumption = consumption.saturating_add(value);
            }
        }
        self.production = production;
        self.consumption = consumption;
    }
}

/// Build the groups of every handler, sorted by category name, with
/// totals already refreshed.
pub fn build_groups<K: HandlerKind>(data: &VesselData<K>) -> Vec<CategoryGroup> {
    let mut by_name: BTreeMap<&'static str, CategoryGroup> = BTreeMap::new();
    for handler in data.handlers() {
        by_name
            .entry(handler.category())
            .or_insert_with(|| CategoryGroup::new(handler.category()))
            .insert(handler.module(), handler);
    }
    let mut groups: Vec<CategoryGroup> = by_name.into_values().collect();
    for group in &mut groups {
        group.refresh(data);
    }
    groups
}
