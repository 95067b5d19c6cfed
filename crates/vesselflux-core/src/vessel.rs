//! Host-side vessel model: parts, their modules, and module fields.
//!
//! The vessel is owned by the host. The aggregation code only reads it: it
//! enumerates [`Component`]s, looks modules up by [`ModuleId`], and reads
//! named fields. Nothing here is mutated by handlers.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::fixed::{Fixed64, f64_to_fixed64, parse_fixed64};
use crate::id::{ModuleId, PartId};

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A raw field value as the host exposes it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Flag(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// Errors reading a typed value out of a module field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("field '{0}' is not present")]
    Missing(String),
    #[error("field '{field}' holds unparseable value '{raw}'")]
    Malformed { field: String, raw: String },
    #[error("field '{field}' has the wrong type")]
    WrongType { field: String },
}

// ---------------------------------------------------------------------------
// Part module
// ---------------------------------------------------------------------------

/// A single host component: a declared module name plus named fields.
#[derive(Debug, Clone)]
pub struct PartModule {
    part: PartId,
    module_name: String,
    fields: BTreeMap<String, FieldValue>,
}

impl PartModule {
    /// The declared type identifier, e.g. `"ModuleDeployableSolarPanel"`.
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// The part this module is mounted on.
    pub fn part(&self) -> PartId {
        self.part
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Set or replace a field. Used by the host when module state changes.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn remove_field(&mut self, name: &str) {
        self.fields.remove(name);
    }

    /// Read a numeric field.
    ///
    /// Numbers are converted to [`Fixed64`]; text is parsed. Flags are a type
    /// error. Non-finite or out-of-range numbers are reported as malformed.
    pub fn number(&self, name: &str) -> Result<Fixed64, FieldError> {
        match self.fields.get(name) {
            None => Err(FieldError::Missing(name.to_string())),
            Some(FieldValue::Number(v)) => f64_to_fixed64(*v).ok_or_else(|| FieldError::Malformed {
                field: name.to_string(),
                raw: v.to_string(),
            }),
            Some(FieldValue::Text(raw)) => parse_fixed64(raw).ok_or_else(|| FieldError::Malformed {
                field: name.to_string(),
                raw: raw.clone(),
            }),
            Some(FieldValue::Flag(_)) => Err(FieldError::WrongType {
                field: name.to_string(),
            }),
        }
    }

    /// Read a boolean field. Text `"true"`/`"false"` (any case) is accepted.
    pub fn flag(&self, name: &str) -> Result<bool, FieldError> {
        match self.fields.get(name) {
            None => Err(FieldError::Missing(name.to_string())),
            Some(FieldValue::Flag(b)) => Ok(*b),
            Some(FieldValue::Text(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(FieldError::Malformed {
                    field: name.to_string(),
                    raw: raw.clone(),
                }),
            },
            Some(FieldValue::Number(_)) => Err(FieldError::WrongType {
                field: name.to_string(),
            }),
        }
    }

    /// Read a text field.
    pub fn text(&self, name: &str) -> Result<&str, FieldError> {
        match self.fields.get(name) {
            None => Err(FieldError::Missing(name.to_string())),
            Some(FieldValue::Text(raw)) => Ok(raw),
            Some(_) => Err(FieldError::WrongType {
                field: name.to_string(),
            }),
        }
    }
}

/// A borrowed view of one module together with its identity.
///
/// This is what the registry resolves and what handlers bind to.
#[derive(Debug, Clone, Copy)]
pub struct Component<'a> {
    pub id: ModuleId,
    pub module: &'a PartModule,
}

impl<'a> Component<'a> {
    pub fn module_name(&self) -> &'a str {
        self.module.module_name()
    }
}

// ---------------------------------------------------------------------------
// Part
// ---------------------------------------------------------------------------

/// A part attached to the vessel. Holds its modules in declaration order.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    modules: Vec<ModuleId>,
}

impl Part {
    pub fn modules(&self) -> &[ModuleId] {
        &self.modules
    }
}

// ---------------------------------------------------------------------------
// Vessel
// ---------------------------------------------------------------------------

/// A vessel: the host-controlled entity composed of parts.
///
/// Parts and modules live in slotmaps so identities stay stable while other
/// parts are attached or detached.
#[derive(Debug, Clone, Default)]
pub struct Vessel {
    pub name: String,
    parts: SlotMap<PartId, Part>,
    modules: SlotMap<ModuleId, PartModule>,
}

impl Vessel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Attach a new, empty part.
    pub fn add_part(&mut self, name: &str) -> PartId {
        self.parts.insert(Part {
            name: name.to_string(),
            modules: Vec::new(),
        })
    }

    /// Detach a part and every module on it. Returns `false` if the part was
    /// not attached.
    pub fn remove_part(&mut self, part: PartId) -> bool {
        let Some(removed) = self.parts.remove(part) else {
            return false;
        };
        for module in removed.modules {
            self.modules.remove(module);
        }
        true
    }

    /// Add a module to a part. Returns `None` if the part does not exist.
    pub fn add_module(&mut self, part: PartId, module_name: &str) -> Option<ModuleId> {
        let p = self.parts.get_mut(part)?;
        let id = self.modules.insert(PartModule {
            part,
            module_name: module_name.to_string(),
            fields: BTreeMap::new(),
        });
        p.modules.push(id);
        Some(id)
    }

    /// Remove a single module from its part.
    pub fn remove_module(&mut self, module: ModuleId) -> bool {
        let Some(removed) = self.modules.remove(module) else {
            return false;
        };
        if let Some(part) = self.parts.get_mut(removed.part) {
            part.modules.retain(|m| *m != module);
        }
        true
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id)
    }

    pub fn module(&self, id: ModuleId) -> Option<&PartModule> {
        self.modules.get(id)
    }

    pub fn module_mut(&mut self, id: ModuleId) -> Option<&mut PartModule> {
        self.modules.get_mut(id)
    }

    pub fn contains_module(&self, id: ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Enumerate every component, part by part. Modules keep their order
    /// within a part.
    pub fn components(&self) -> impl Iterator<Item = Component<'_>> + '_ {
        self.parts.values().flat_map(move |part| {
            part.modules.iter().filter_map(move |&id| {
                self.modules.get(id).map(|module| Component { id, module })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_vessel() -> (Vessel, PartId, ModuleId) {
        let mut vessel = Vessel::new("probe");
        let part = vessel.add_part("solarPanels4");
        let module = vessel
            .add_module(part, "ModuleDeployableSolarPanel")
            .unwrap();
        vessel
            .module_mut(module)
            .unwrap()
            .set_field("chargeRate", 1.64);
        (vessel, part, module)
    }

    #[test]
    fn components_enumerate_all_modules() {
        let (mut vessel, part, _) = panel_vessel();
        vessel.add_module(part, "ModuleAnimateGeneric").unwrap();
        let names: Vec<&str> = vessel.components().map(|c| c.module_name()).collect();
        assert_eq!(names, vec!["ModuleDeployableSolarPanel", "ModuleAnimateGeneric"]);
    }

    #[test]
    fn remove_part_drops_its_modules() {
        let (mut vessel, part, module) = panel_vessel();
        assert!(vessel.remove_part(part));
        assert!(!vessel.contains_module(module));
        assert_eq!(vessel.components().count(), 0);
        assert!(!vessel.remove_part(part));
    }

    #[test]
    fn remove_module_detaches_from_part() {
        let (mut vessel, part, module) = panel_vessel();
        assert!(vessel.remove_module(module));
        assert!(vessel.part(part).unwrap().modules().is_empty());
    }

    #[test]
    fn add_module_to_missing_part_is_none() {
        let (mut vessel, part, _) = panel_vessel();
        vessel.remove_part(part);
        assert!(vessel.add_module(part, "ModuleGenerator").is_none());
    }

    #[test]
    fn number_reads_numbers_and_text() {
        let (mut vessel, _, module) = panel_vessel();
        let m = vessel.module_mut(module).unwrap();
        m.set_field("flowRate", "0.82");
        assert_eq!(m.number("chargeRate").unwrap(), Fixed64::from_num(1.64));
        assert_eq!(m.number("flowRate").unwrap(), Fixed64::from_num(0.82));
    }

    #[test]
    fn number_reports_missing_and_malformed() {
        let (mut vessel, _, module) = panel_vessel();
        let m = vessel.module_mut(module).unwrap();
        m.set_field("flowRate", "n/a");
        m.set_field("isTracking", true);
        assert_eq!(
            m.number("efficiency"),
            Err(FieldError::Missing("efficiency".to_string()))
        );
        assert!(matches!(m.number("flowRate"), Err(FieldError::Malformed { .. })));
        assert!(matches!(m.number("isTracking"), Err(FieldError::WrongType { .. })));
    }

    #[test]
    fn flag_accepts_text_booleans() {
        let (mut vessel, _, module) = panel_vessel();
        let m = vessel.module_mut(module).unwrap();
        m.set_field("isTracking", "True");
        assert_eq!(m.flag("isTracking"), Ok(true));
        m.set_field("isTracking", "maybe");
        assert!(m.flag("isTracking").is_err());
    }
}
