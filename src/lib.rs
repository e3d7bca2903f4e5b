//! # Insight ORM
//!
//! Entity lifecycle layer for PostgreSQL on the `may` coroutine runtime.
//!
//! An entity supplies a [`Table`] description, a key type and a handful of
//! capabilities ([`EntityTrait`]); [`ActiveEntity`] then provides count, find,
//! general reads through a [`Cursor`], conditional create, update and remove, with
//! hooks around each mutation. Statements are built with SeaQuery and executed
//! through an [`InsightExecutor`].
//!
//! ```no_run
//! use insight_orm::{connect_with, DatabaseConfig};
//!
//! let config = DatabaseConfig::load()?;
//! let executor = connect_with(&config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod connection;
pub mod coroutine;
pub mod entity;
pub mod executor;
pub mod metrics;
pub mod query;
pub mod row;
pub mod table;
pub mod value;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

mod tests_cfg;

pub use config::DatabaseConfig;
pub use connection::{check_connection_health, connect, connect_with, url_style, UrlStyle};
pub use entity::{ActiveEntity, ColumnOf, EntityTrait};
pub use executor::{InsightError, InsightExecutor, MayPostgresExecutor};
pub use query::{ColumnTrait, Cursor, PostgresVendor, ReadRequest, SortInfo, Vendor};
pub use row::Row;
pub use table::{ActiveValue, Table};
pub use value::{TryGetable, ValueExtractionError};
