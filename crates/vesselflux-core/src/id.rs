use slotmap::new_key_type;

new_key_type! {
    /// Identifies a part attached to a vessel.
    pub struct PartId;

    /// Identifies a single module (component) on a part.
    ///
    /// This is the identity key handlers, diffs and category groups use.
    /// Keys are generational: a module removed and re-added never gets the
    /// old key back.
    pub struct ModuleId;
}
