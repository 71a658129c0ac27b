//! # Remote CRUD
//!
//! > **A typed client-side data-access layer for REST-style record collections.**
//!
//! Every record type in a remote collection shares the same shape: a key,
//! audit metadata and optionally an owner. This crate gives such records one
//! generic CRUD client, an in-memory query engine driven by plain data, and a
//! small set of result types that tell callers what the server said.
//!
//! ## Core Concepts
//!
//! ### Records ([`model`])
//! [`DataObject`](model::DataObject) is the common record contract. Capabilities
//! (audit, ownership) are optional; [`map_properties`](model::map_properties)
//! copies whatever two records have in common.
//!
//! ### Queries ([`query`])
//! A [`QueryDefinition`](query::QueryDefinition) is data: filters, sorts and
//! paging that can be built at runtime, serialised, and compiled against any
//! [`Queryable`](query::Queryable) type. Field names resolve case-insensitively;
//! unknown names fail at compile time of the query, not during evaluation.
//!
//! ### Results ([`result`])
//! Write operations return an [`OperationResult`](result::OperationResult)
//! carrying the server's status code and, when there was one, the returned
//! record. Validation answers come back as a
//! [`ServerSideValidationResult`](result::ServerSideValidationResult).
//!
//! ### Clients ([`framework`], [`clients`])
//! [`ResourceClient<T>`](framework::ResourceClient) performs the CRUD contract
//! over an [`HttpTransport`](framework::HttpTransport). Concrete clients such as
//! [`ConfigurationClient`](clients::ConfigurationClient) wrap it and add
//! resource-specific calls.
//!
//! ### Wiring ([`runtime`])
//! [`ClientSettings`](runtime::ClientSettings) come from the environment and
//! [`DataAccess`](runtime::DataAccess) builds every client over one transport.
//!
//! ## Quick Start
//!
//! ```bash
//! REMOTE_CRUD_BASE_URL=http://localhost:5000/api/ RUST_LOG=info cargo run
//! ```
//!
//! ## Testing
//!
//! [`MockTransport`](framework::mock::MockTransport) scripts responses so
//! clients can be exercised without a server.

pub mod clients;
pub mod framework;
pub mod model;
pub mod query;
pub mod result;
pub mod runtime;
