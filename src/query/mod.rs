//! Dynamic query definitions: string-named filters and sorts compiled into
//! predicates and comparators over any [`Queryable`] record type, plus paging.

pub mod definition;
pub mod error;
pub mod field;
pub mod filter;
pub mod sort;

pub use definition::*;
pub use error::QueryError;
pub use field::*;
pub use filter::*;
pub use sort::*;
