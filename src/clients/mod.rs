//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod configuration_client;
pub mod data_client;
pub mod workspace_client;

pub use configuration_client::*;
pub use data_client::*;
pub use workspace_client::*;
