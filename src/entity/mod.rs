//! Entity lifecycle layer.
//!
//! - [`EntityTrait`]: what a concrete entity supplies (table factory, key
//!   generation, key predicate) plus its lifecycle hooks
//! - [`ActiveEntity`]: the adapter running count/find/read/create/update/remove for
//!   one entity against an [`InsightExecutor`](crate::InsightExecutor)

pub mod active;
pub mod traits;

pub use active::ActiveEntity;
pub use traits::{ColumnOf, EntityTrait};
