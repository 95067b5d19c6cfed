//! The handler contract and its implementations.
//!
//! A handler binds to exactly one host [`Component`] and normalizes whatever
//! that component reports into a single signed [`Fixed64`] flow:
//!
//! - positive: the component consumes the domain's resource,
//! - negative: the component produces it.
//!
//! Every implementation in [`power`] and [`thermal`] uses this convention.
//! Handlers never own their component; they keep its [`ModuleId`] and
//! re-read its fields when polled.

pub mod power;
pub mod thermal;

use std::fmt;

use crate::context::{Resource, SceneMode};
use crate::fixed::Fixed64;
use crate::id::ModuleId;
use crate::vessel::{Component, FieldError, PartModule};

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Whether a handler currently adds to or draws from the domain's resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlowRole {
    Producer,
    Consumer,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while binding a handler to a component.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HandlerError {
    /// The component type is supported but its current state cannot be
    /// handled (e.g. a required field is absent).
    #[error("{module} is not applicable: {reason}")]
    Inapplicable { module: String, reason: String },
    /// A numeric field could not be parsed.
    #[error("field '{field}' holds unparseable value '{raw}'")]
    MalformedValue { field: String, raw: String },
}

impl HandlerError {
    pub(crate) fn inapplicable(module: &PartModule, reason: impl Into<String>) -> Self {
        HandlerError::Inapplicable {
            module: module.module_name().to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler contract
// ---------------------------------------------------------------------------

/// The normalized interface every concrete handler implements.
///
/// Lifecycle: the registry creates a handler, calls [`initialize`] once, and
/// discards it on error. The aggregator then calls [`poll`] once per tick
/// with the live component; every other method reads the last-polled state.
///
/// [`initialize`]: DataHandler::initialize
/// [`poll`]: DataHandler::poll
pub trait DataHandler: fmt::Debug {
    /// Bind to a component. An error means the handler must be discarded.
    fn initialize(&mut self, component: Component<'_>) -> Result<(), HandlerError>;

    /// Re-read the component's fields for this tick.
    fn poll(&mut self, module: &PartModule, scene: SceneMode);

    /// Current signed contribution (positive = consuming, negative = producing).
    fn value(&self) -> Fixed64;

    /// Whether [`value`](DataHandler::value) may stand in for live data in
    /// a pre-commit simulation.
    fn is_simulated(&self) -> bool;

    /// Whether the simulated value must be scaled by solar exposure.
    fn affected_by_sun_distance(&self) -> bool {
        false
    }

    /// Name of the category group this handler is listed under.
    fn category(&self) -> &'static str;

    /// Role used when the current value is exactly zero.
    fn nominal_role(&self) -> FlowRole;

    /// Role derived from the sign of the current value.
    fn role(&self) -> FlowRole {
        let value = self.value();
        if value < Fixed64::ZERO {
            FlowRole::Producer
        } else if value > Fixed64::ZERO {
            FlowRole::Consumer
        } else {
            self.nominal_role()
        }
    }

    /// Identity of the bound component.
    fn module(&self) -> ModuleId;

    /// Single-line diagnostic dump. Never used as identity.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Handler kinds
// ---------------------------------------------------------------------------

/// A closed enumeration of the component types a flow domain supports.
///
/// Each variant maps to exactly one [`DataHandler`] implementation through
/// [`instantiate`](HandlerKind::instantiate), an exhaustive `match`, so the
/// supported set is fixed at build time.
pub trait HandlerKind: Copy + Eq + fmt::Debug + 'static {
    /// The resource this domain accounts for.
    const RESOURCE: Resource;
    /// Dump text for an empty handler set.
    const EMPTY_DUMP: &'static str;

    /// Every supported variant.
    fn all() -> &'static [Self];

    /// The host module name this variant matches (exact, case-sensitive).
    fn module_name(self) -> &'static str;

    /// Look up a variant by host module name.
    fn from_module_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.module_name() == name)
    }

    /// Create an uninitialized handler for a component of this kind.
    fn instantiate(self, module: ModuleId) -> Box<dyn DataHandler>;
}

// ---------------------------------------------------------------------------
// Field helpers shared by implementations
// ---------------------------------------------------------------------------

/// Read a field that must be present and numeric at initialization.
pub(crate) fn require_number(module: &PartModule, field: &str) -> Result<Fixed64, HandlerError> {
    module.number(field).map_err(|e| match e {
        FieldError::Malformed { field, raw } => HandlerError::MalformedValue { field, raw },
        other => HandlerError::inapplicable(module, other.to_string()),
    })
}

/// Read a numeric field during polling.
///
/// Missing fields degrade to `default`; malformed ones degrade to zero for
/// this tick and are logged.
pub(crate) fn poll_number(module: &PartModule, field: &str, default: Fixed64) -> Fixed64 {
    match module.number(field) {
        Ok(v) => v,
        Err(FieldError::Missing(_)) => default,
        Err(err) => {
            tracing::debug!(
                module = module.module_name(),
                %err,
                "malformed value, treating as zero for this tick"
            );
            Fixed64::ZERO
        }
    }
}

/// Read a boolean field, falling back to `default` when absent or unreadable.
pub(crate) fn poll_flag(module: &PartModule, field: &str, default: bool) -> bool {
    match module.flag(field) {
        Ok(v) => v,
        Err(FieldError::Missing(_)) => default,
        Err(err) => {
            tracing::debug!(module = module.module_name(), %err, "unreadable flag, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::Vessel;

    fn module_with(fields: &[(&str, crate::vessel::FieldValue)]) -> (Vessel, ModuleId) {
        let mut vessel = Vessel::new("test");
        let part = vessel.add_part("part");
        let id = vessel.add_module(part, "ModuleGenerator").unwrap();
        let m = vessel.module_mut(id).unwrap();
        for (name, value) in fields {
            m.set_field(name, value.clone());
        }
        (vessel, id)
    }

    #[test]
    fn require_number_missing_is_inapplicable() {
        let (vessel, id) = module_with(&[]);
        let err = require_number(vessel.module(id).unwrap(), "outputRate").unwrap_err();
        assert!(matches!(err, HandlerError::Inapplicable { .. }));
    }

    #[test]
    fn require_number_malformed_is_malformed_value() {
        let (vessel, id) = module_with(&[("outputRate", "lots".into())]);
        let err = require_number(vessel.module(id).unwrap(), "outputRate").unwrap_err();
        assert_eq!(
            err,
            HandlerError::MalformedValue {
                field: "outputRate".to_string(),
                raw: "lots".to_string()
            }
        );
    }

    #[test]
    fn poll_number_degrades() {
        let (vessel, id) = module_with(&[("efficiency", "??".into())]);
        let m = vessel.module(id).unwrap();
        let one = Fixed64::ONE;
        assert_eq!(poll_number(m, "efficiency", one), Fixed64::ZERO);
        assert_eq!(poll_number(m, "absent", one), one);
    }

    #[test]
    fn poll_flag_defaults_when_absent() {
        let (vessel, id) = module_with(&[("isActive", true.into())]);
        let m = vessel.module(id).unwrap();
        assert!(poll_flag(m, "isActive", false));
        assert!(poll_flag(m, "absent", true));
    }
}
