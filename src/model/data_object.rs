//! # DataObject Trait
//!
//! The `DataObject` trait is the contract every record handled by this crate
//! implements. A record is always identified by a [`Key`]; richer shapes expose
//! their extra field groups through capability accessors:
//!
//! - base shape: only the key.
//! - user-editable shape: [`Audit`] fields (name, description, edit history).
//! - sub-user-editable shape: [`Audit`] plus [`Ownership`].
//!
//! # Copying between shapes
//!
//! [`map_properties`] copies a compatible source onto a target as an ordered
//! sequence of steps. Each step runs only when both sides expose the field
//! group, so copying from an unrelated shape leaves the target's extra fields
//! untouched. Inherited steps always run before the type's own step.

use crate::model::Key;
use crate::result::ServerSideValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

/// Property name reported when a required name is missing.
pub const NAME_PROPERTY: &str = "Name";

/// Trait that any record must implement to be read, written or queried.
///
/// # Provided Methods
/// The shape accessors default to `None`, so a plain keyed record only needs
/// [`key`](DataObject::key), [`key_mut`](DataObject::key_mut) and
/// [`as_any`](DataObject::as_any).
pub trait DataObject: Any + Debug + Send + Sync {
    fn key(&self) -> &Key;

    fn key_mut(&mut self) -> &mut Key;

    /// Audit fields, present on user-editable shapes.
    fn audit(&self) -> Option<&Audit> {
        None
    }

    fn audit_mut(&mut self) -> Option<&mut Audit> {
        None
    }

    /// Owner reference, present on sub-user-editable shapes.
    fn ownership(&self) -> Option<&Ownership> {
        None
    }

    fn ownership_mut(&mut self) -> Option<&mut Ownership> {
        None
    }

    /// Used to match the concrete type during copying.
    fn as_any(&self) -> &dyn Any;

    /// Copies the fields declared by the concrete type itself.
    ///
    /// Called last by [`map_properties`]; implementations should downcast the
    /// source through [`as_any`](DataObject::as_any) and leave themselves
    /// unchanged when it is a different type.
    fn map_own_properties(&mut self, _source: &dyn DataObject) {}

    /// Hook for checks beyond the declared required fields.
    fn extra_validation(&self, _errors: &mut Vec<ServerSideValidationError>) {}

    /// Runs every declared check and returns the violations.
    fn validate(&self) -> Vec<ServerSideValidationError> {
        let mut errors = Vec::new();
        if let Some(audit) = self.audit() {
            if audit.name.trim().is_empty() {
                errors.push(ServerSideValidationError::new(
                    NAME_PROPERTY,
                    "The Name field is required.",
                ));
            }
        }
        self.extra_validation(&mut errors);
        errors
    }

    /// Copies every compatible field from `source` onto `self`.
    fn map_properties(&mut self, source: &dyn DataObject)
    where
        Self: Sized,
    {
        map_properties(self, source);
    }
}

/// Copies `source` onto `target`, one shape level at a time.
///
/// The order is fixed: key, audit fields, ownership, then the concrete
/// type's own fields. Every step is a field-wise assignment.
pub fn map_properties(target: &mut dyn DataObject, source: &dyn DataObject) {
    *target.key_mut() = source.key().clone();

    if let (Some(to), Some(from)) = (target.audit_mut(), source.audit()) {
        to.copy_from(from);
    }

    if let (Some(to), Some(from)) = (target.ownership_mut(), source.ownership()) {
        to.copy_from(from);
    }

    target.map_own_properties(source);
}

/// Audit attributes of a user-editable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default = "Utc::now")]
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_edited_by: Option<String>,
    #[serde(default)]
    pub last_edited_by_id: Option<Key>,
    #[serde(default)]
    pub last_edited_on: Option<DateTime<Utc>>,
    /// Required; an empty name fails validation.
    #[serde(default)]
    pub name: String,
}

impl Audit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            created_on: Utc::now(),
            description: None,
            last_edited_by: None,
            last_edited_by_id: None,
            last_edited_on: None,
            name: name.into(),
        }
    }

    /// Records an edit by `actor` at the current time.
    pub fn touch(&mut self, actor: impl Into<String>, actor_id: Option<Key>) {
        self.last_edited_by = Some(actor.into());
        self.last_edited_by_id = actor_id;
        self.last_edited_on = Some(Utc::now());
    }

    fn copy_from(&mut self, other: &Audit) {
        self.created_on = other.created_on;
        self.description = other.description.clone();
        self.last_edited_by = other.last_edited_by.clone();
        self.last_edited_by_id = other.last_edited_by_id.clone();
        self.last_edited_on = other.last_edited_on;
        self.name = other.name.clone();
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Owner reference of a sub-user-editable record.
///
/// Whether deployments use numeric or textual owner ids is up to the
/// deployment; the [`Key`] holds either.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    #[serde(default)]
    pub owner_id: Key,
}

impl Ownership {
    pub fn new(owner_id: impl Into<Key>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }

    fn copy_from(&mut self, other: &Ownership) {
        self.owner_id = other.owner_id.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigurationItem, Workspace};

    #[derive(Debug, Clone, Default)]
    struct Bare {
        key: Key,
    }

    impl DataObject for Bare {
        fn key(&self) -> &Key {
            &self.key
        }
        fn key_mut(&mut self) -> &mut Key {
            &mut self.key
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn workspace() -> Workspace {
        let mut ws = Workspace::new("Main", "user-9");
        ws.key = Key::Int(3);
        ws.color = "teal".into();
        ws.audit.description = Some("primary".into());
        ws
    }

    #[test]
    fn test_map_properties_is_idempotent() {
        let mut target = workspace();
        let source = target.clone();
        target.map_properties(&source);
        let once = target.clone();
        target.map_properties(&source);
        assert_eq!(target, once);
        assert_eq!(target, source);
    }

    #[test]
    fn test_same_shape_copies_every_level() {
        let source = workspace();
        let mut target = Workspace::new("Other", "user-1");
        target.map_properties(&source);
        assert_eq!(target, source);
    }

    #[test]
    fn test_unrelated_shape_copies_only_the_key() {
        let source = Bare { key: Key::from("b-1") };
        let mut target = workspace();
        let before = target.clone();
        target.map_properties(&source);
        assert_eq!(target.key, Key::from("b-1"));
        assert_eq!(target.audit, before.audit);
        assert_eq!(target.ownership, before.ownership);
        assert_eq!(target.color, before.color);
    }

    #[test]
    fn test_derived_source_onto_parent_shape_copies_shared_levels() {
        let source = workspace();
        let mut target = ConfigurationItem::new("Cfg", "value");
        target.map_properties(&source);
        assert_eq!(target.key, source.key);
        assert_eq!(target.audit, source.audit);
        // own field of a different concrete type stays unchanged
        assert_eq!(target.value, "value");
    }

    #[test]
    fn test_parent_source_leaves_owner_untouched() {
        let mut source = ConfigurationItem::new("Cfg", "v");
        source.key = Key::Int(11);
        let mut target = workspace();
        target.map_properties(&source);
        assert_eq!(target.key, Key::Int(11));
        assert_eq!(target.audit.name, "Cfg");
        assert_eq!(target.ownership.owner_id, Key::from("user-9"));
        assert_eq!(target.color, "teal");
    }

    #[test]
    fn test_key_copy_is_the_same_for_every_shape() {
        let source = Bare { key: Key::Int(99) };
        let mut a = Bare::default();
        let mut b = ConfigurationItem::new("x", "y");
        let mut c = workspace();
        map_properties(&mut a, &source);
        map_properties(&mut b, &source);
        map_properties(&mut c, &source);
        assert_eq!(a.key, Key::Int(99));
        assert_eq!(b.key, Key::Int(99));
        assert_eq!(c.key, Key::Int(99));
    }

    #[test]
    fn test_validate_requires_name() {
        let item = ConfigurationItem::new("  ", "v");
        let errors = item.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].property_name, NAME_PROPERTY);

        assert!(Bare::default().validate().is_empty());
        assert!(ConfigurationItem::new("ok", "v").validate().is_empty());
    }
}
