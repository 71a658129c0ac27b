use crate::model::{DataObject, Key};
use serde::{Deserialize, Serialize};

/// Minimal display projection of a data object: its key and name.
///
/// Built from a source record or cloned from another view. Records without
/// audit fields project with an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    #[serde(alias = "key")]
    pub id: Key,
    #[serde(default)]
    pub name: String,
}

impl ListView {
    pub fn from_data_object(source: &dyn DataObject) -> Self {
        Self {
            id: source.key().clone(),
            name: source
                .audit()
                .map(|audit| audit.name.clone())
                .unwrap_or_default(),
        }
    }

    pub fn id(&self) -> &Key {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigurationItem;

    #[test]
    fn test_projection_from_record() {
        let mut item = ConfigurationItem::new("Theme", "dark");
        item.key = Key::Int(4);
        let view = ListView::from_data_object(&item);
        assert_eq!(view.id().as_i32(), 4);
        assert_eq!(view.name(), "Theme");
        assert_eq!(view.clone(), view);
    }

    #[test]
    fn test_accepts_key_alias_on_the_wire() {
        let view: ListView = serde_json::from_str(r#"{"key":"a-1","name":"A"}"#).unwrap();
        assert_eq!(view.id, Key::from("a-1"));
        assert_eq!(view.name, "A");
    }
}
