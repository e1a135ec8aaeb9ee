//! Rebuilds named rows from paginated, columnar query results.
//!
//! Query services deliver results as flat value sequences plus a schema naming
//! and typing each column. [`loader::accumulator::RowAccumulator`] slices those
//! values back into [`conversions::row::Row`]s, across page boundaries, so that
//! fields can be read by name with a type checked against the schema.

pub mod conversions;
pub mod error;
pub mod loader;
mod macros;
pub mod schema;

pub use conversions::Value;
pub use conversions::from_value::FromValue;
pub use conversions::row::Row;
pub use error::{ErrorKind, RowMapError, RowMapResult};
pub use loader::accumulator::{LoadState, RowAccumulator, collect_rows};
pub use loader::{Fetch, Page, PageSource, Pages, ValueLoader};
pub use schema::{FieldIndex, FieldSchema, FieldType, Schema};
