//! Value extraction for Insight
//!
//! Typed access to `sea_query::Value`s coming back from the executor: keys read by
//! `find`, the scalar produced by `count`, and arbitrary column values on a cursor.

pub mod try_getable;

pub use try_getable::{TryGetable, ValueExtractionError};
