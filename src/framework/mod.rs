//! Generic data-access engine.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that record types implement to live in a remote collection
//! - [`ResourceClient`] - Generic typed CRUD client
//! - [`HttpTransport`] - The network boundary, with [`ReqwestTransport`] for production
//! - [`ClientError`] / [`TransportError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a scripted transport that needs no server.

pub mod client;
pub mod error;
pub mod mock;
pub mod resource;
pub mod transport;

pub use client::ResourceClient;
pub use error::{ClientError, TransportError};
pub use resource::Resource;
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
