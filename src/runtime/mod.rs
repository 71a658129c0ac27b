//! Process-level plumbing: settings, logging and the wiring of clients onto
//! a shared transport.
//!
//! - [`ClientSettings`] - base address, timeout and user agent
//! - [`setup_tracing`] - subscriber for binaries
//! - [`DataAccess`] - every concrete client over one transport

pub mod config;
pub mod data_access;
pub mod tracing;

pub use config::*;
pub use data_access::*;
pub use tracing::*;
