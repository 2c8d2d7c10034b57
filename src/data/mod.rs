//! Table data handling module
//!
//! This module holds the in-memory table, the CSV reader/writer that fills
//! and persists it, search, and the adapter grid widgets talk to.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Errors fall into four kinds (see [`ErrorKind`]):
//! - `Parse`: malformed or oversized input
//! - `Index`: row/column index out of bounds
//! - `Io`: file system errors
//! - `Edit`: rejected edits

mod adapter;
mod csv_parser;
mod error;
mod search;
mod store;

pub use adapter::*;
pub use csv_parser::*;
pub use error::*;
pub use search::*;
pub use store::*;
