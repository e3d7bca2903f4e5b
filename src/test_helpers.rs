//! Database fixture for integration tests (feature `test-helpers`).
//!
//! `TestDatabase` takes its URL from `TEST_DATABASE_URL`, falling back to the
//! `database.url` of [`DatabaseConfig::load`].

use crate::config::DatabaseConfig;
use crate::connection::connect;
use crate::executor::{InsightError, InsightExecutor, MayPostgresExecutor};
use sea_query::Values;

pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

#[derive(Debug, Clone)]
pub struct TestDatabase {
    url: String,
}

impl TestDatabase {
    /// Fixture pointing at `TEST_DATABASE_URL` or the configured database
    ///
    /// # Errors
    ///
    /// Returns `InsightError::Other` if the configuration cannot be loaded.
    pub fn new() -> Result<Self, InsightError> {
        if let Some(db) = Self::from_env() {
            return Ok(db);
        }
        let config = DatabaseConfig::load()
            .map_err(|e| InsightError::Other(format!("failed to load database config: {e}")))?;
        Ok(Self { url: config.url })
    }

    /// Fixture only if `TEST_DATABASE_URL` is set; tests use this to skip quietly
    pub fn from_env() -> Option<Self> {
        std::env::var(TEST_DATABASE_URL)
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open a new connection wrapped in an executor
    ///
    /// # Errors
    ///
    /// Propagates connection failures.
    pub fn executor(&self) -> Result<MayPostgresExecutor, InsightError> {
        connect(&self.url)
    }

    /// Run a list of plain statements (schema setup, cleanup)
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing statement's error.
    pub fn run_script<Ex>(executor: &Ex, statements: &[&str]) -> Result<(), InsightError>
    where
        Ex: InsightExecutor + ?Sized,
    {
        let no_values = Values(Vec::new());
        for statement in statements {
            executor.execute(statement, &no_values)?;
        }
        Ok(())
    }
}
