use crate::framework::Resource;
use crate::model::{Audit, DataObject, Key, ListView};
use crate::query::FieldValue;
use crate::result::ServerSideValidationError;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A named configuration entry, the user-editable shape.
///
/// Served by configuration-style endpoints, which also expose the
/// `All/ListView` projection (see [`ConfigurationClient`](crate::clients::ConfigurationClient)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    #[serde(default)]
    pub key: Key,
    #[serde(flatten)]
    pub audit: Audit,
    #[serde(default)]
    pub value: String,
}

impl ConfigurationItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Key::default(),
            audit: Audit::new(name),
            value: value.into(),
        }
    }

    pub fn to_list_view(&self) -> ListView {
        ListView::from_data_object(self)
    }
}

impl DataObject for ConfigurationItem {
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

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn map_own_properties(&mut self, source: &dyn DataObject) {
        if let Some(other) = source.as_any().downcast_ref::<ConfigurationItem>() {
            self.value = other.value.clone();
        }
    }

    fn extra_validation(&self, errors: &mut Vec<ServerSideValidationError>) {
        if self.value.len() > 4096 {
            errors.push(ServerSideValidationError::new(
                "Value",
                "The Value field must be at most 4096 characters.",
            ));
        }
    }
}

impl Resource for ConfigurationItem {
    fn resource_name() -> &'static str {
        "Configuration"
    }
}

crate::queryable!(ConfigurationItem {
    "key" => |item| FieldValue::from(&item.key),
    "name" => |item| FieldValue::from(item.audit.name.as_str()),
    "description" => |item| FieldValue::from(item.audit.description.as_deref()),
    "createdOn" => |item| FieldValue::from(item.audit.created_on),
    "lastEditedBy" => |item| FieldValue::from(item.audit.last_edited_by.as_deref()),
    "lastEditedOn" => |item| FieldValue::from(item.audit.last_edited_on),
    "value" => |item| FieldValue::from(item.value.as_str()),
});
