//! Uniform outcome types for remote operations.

pub mod operation;
pub mod validation;

pub use operation::*;
pub use validation::*;
