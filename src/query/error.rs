//! # Query Errors
//!
//! Raised while compiling filter, sort and paging definitions. These are
//! caller mistakes and surface at construction time, never as a silently
//! empty result.

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Field '{field}' does not exist on {type_name}")]
    FieldResolution {
        field: String,
        type_name: &'static str,
    },
    #[error("Unsupported filter operator: {0}")]
    UnsupportedOperator(String),
    #[error("Negative {name} is not allowed: {value}")]
    NegativePaging { name: &'static str, value: i64 },
}
