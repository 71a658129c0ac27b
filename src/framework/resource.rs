//! # Resource Trait
//!
//! A [`Resource`] is a data object that lives in a remote collection. The
//! collection is addressed by the resource name, which forms the first path
//! segment of every request (`{name}/Count`, `{name}/All`, ...).

use crate::model::DataObject;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Resource: DataObject + Clone + Serialize + DeserializeOwned {
    /// Base path segment of the remote collection.
    ///
    /// Defaults to the unqualified type name (e.g. `Workspace` instead of
    /// `remote_crud::model::workspace::Workspace`).
    fn resource_name() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
    }
}
