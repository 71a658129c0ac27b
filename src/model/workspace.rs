use crate::framework::Resource;
use crate::model::{Audit, DataObject, Key, Ownership};
use crate::query::FieldValue;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A workspace owned by one user, the sub-user-editable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub key: Key,
    #[serde(flatten)]
    pub audit: Audit,
    #[serde(flatten)]
    pub ownership: Ownership,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub member_count: u32,
}

impl Workspace {
    /// Creates a workspace owned by `owner_id`.
    ///
    /// # Notes
    /// The key stays blank until the remote service assigns one.
    pub fn new(name: impl Into<String>, owner_id: impl Into<Key>) -> Self {
        Self {
            key: Key::default(),
            audit: Audit::new(name),
            ownership: Ownership::new(owner_id),
            color: String::new(),
            member_count: 0,
        }
    }
}

impl DataObject for Workspace {
    fn key(&self) -> &Key {
        &self.key
    }

    fn key_mut(&mut self) -> &mut Key {
        &mut self.key
    }

    fn audit(&self) -> Option<&Audit> {
        Some(&self.audit)
    }

    fn audit_mut(&mut self) -> Option<&mut Audit> {
        Some(&mut self.audit)
    }

    fn ownership(&self) -> Option<&Ownership> {
        Some(&self.ownership)
    }

    fn ownership_mut(&mut self) -> Option<&mut Ownership> {
        Some(&mut self.ownership)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn map_own_properties(&mut self, source: &dyn DataObject) {
        if let Some(other) = source.as_any().downcast_ref::<Workspace>() {
            self.color = other.color.clone();
            self.member_count = other.member_count;
        }
    }
}

impl Resource for Workspace {}

crate::queryable!(Workspace {
    "key" => |ws| FieldValue::from(&ws.key),
    "name" => |ws| FieldValue::from(ws.audit.name.as_str()),
    "description" => |ws| FieldValue::from(ws.audit.description.as_deref()),
    "createdOn" => |ws| FieldValue::from(ws.audit.created_on),
    "lastEditedOn" => |ws| FieldValue::from(ws.audit.last_edited_on),
    "ownerId" => |ws| FieldValue::from(&ws.ownership.owner_id),
    "color" => |ws| FieldValue::from(ws.color.as_str()),
    "memberCount" => |ws| FieldValue::from(ws.member_count),
});
