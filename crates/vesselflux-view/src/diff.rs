use std::collections::BTreeSet;

use vesselflux_core::id::ModuleId;

/// Membership change between two handler-set snapshots, keyed by component
/// identity.
///
/// Both sides are ordered so that logging and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    added: BTreeSet<ModuleId>,
    removed: BTreeSet<ModuleId>,
}

impl MembershipDiff {
    /// Symmetric difference of `previous` and `current`, split by side.
    pub fn between(previous: &BTreeSet<ModuleId>, current: &BTreeSet<ModuleId>) -> Self {
        Self {
            added: current.difference(previous).copied().collect(),
            removed: previous.difference(current).copied().collect(),
        }
    }

    /// Returns `true` if the two snapshots had the same membership.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Size of the symmetric difference.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Components present now but not in the previous snapshot.
    pub fn added(&self) -> &BTreeSet<ModuleId> {
        &self.added
    }

    /// Components in the previous snapshot that are gone now.
    pub fn removed(&self) -> &BTreeSet<ModuleId> {
        &self.removed
    }
}
