//! Data objects: the keyed base shape, its user-editable and owned variants,
//! and the display projections built from them.

pub mod configuration;
pub mod data_object;
pub mod key;
pub mod list_view;
pub mod paged_list;
pub mod workspace;

pub use configuration::*;
pub use data_object::*;
pub use key::*;
pub use list_view::*;
pub use paged_list::*;
pub use workspace::*;
