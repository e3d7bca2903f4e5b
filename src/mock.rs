//! Scripted executor for tests.
//!
//! [`MockExecutor`] follows the `MockDatabase` pattern: queue the results each
//! statement should produce, run the code under test, then inspect the log of
//! statements it issued.
//!
//! ```
//! use insight_orm::mock::MockExecutor;
//! use insight_orm::{InsightExecutor, Row};
//! use sea_query::Values;
//!
//! let mock = MockExecutor::new()
//!     .append_query_results([vec![Row::from_pairs([("id", 7i64)])]])
//!     .append_exec_results([1]);
//!
//! let rows = mock.query_all("SELECT id FROM users", &Values(vec![])).unwrap();
//! assert_eq!(rows[0].try_get::<i64>(0).unwrap(), 7);
//! assert_eq!(mock.execute("DELETE FROM users", &Values(vec![])).unwrap(), 1);
//! assert_eq!(mock.statements().len(), 2);
//! ```

use crate::executor::{InsightError, InsightExecutor};
use crate::row::Row;
use sea_query::{Value, Values};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// A statement as seen by the executor
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<Value>,
}

#[derive(Default)]
struct MockState {
    query_results: VecDeque<Result<Vec<Row>, InsightError>>,
    exec_results: VecDeque<Result<u64, InsightError>>,
    log: Vec<Statement>,
}

/// Executor returning pre-queued results in FIFO order
#[derive(Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one row set per future `query_all`
    pub fn append_query_results<I>(self, results: I) -> Self
    where
        I: IntoIterator<Item = Vec<Row>>,
    {
        self.lock().query_results.extend(results.into_iter().map(Ok));
        self
    }

    /// Queue failures for future `query_all` calls
    pub fn append_query_errors<I>(self, errors: I) -> Self
    where
        I: IntoIterator<Item = InsightError>,
    {
        self.lock().query_results.extend(errors.into_iter().map(Err));
        self
    }

    /// Queue one affected-row count per future `execute`
    pub fn append_exec_results<I>(self, results: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.lock().exec_results.extend(results.into_iter().map(Ok));
        self
    }

    /// Queue failures for future `execute` calls
    pub fn append_exec_errors<I>(self, errors: I) -> Self
    where
        I: IntoIterator<Item = InsightError>,
    {
        self.lock().exec_results.extend(errors.into_iter().map(Err));
        self
    }

    /// Every statement issued so far, oldest first
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().log.clone()
    }

    /// SQL text of every statement issued so far
    pub fn sql_log(&self) -> Vec<String> {
        self.lock().log.iter().map(|s| s.sql.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // a panicking test thread must not poison the script for the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(state: &mut MockState, query: &str, values: &Values) {
        state.log.push(Statement {
            sql: query.to_string(),
            values: values.0.clone(),
        });
    }
}

impl InsightExecutor for MockExecutor {
    fn execute(&self, query: &str, values: &Values) -> Result<u64, InsightError> {
        let mut state = self.lock();
        Self::record(&mut state, query, values);
        state.exec_results.pop_front().unwrap_or_else(|| {
            Err(InsightError::Other(format!(
                "MockExecutor has no exec result queued for: {query}"
            )))
        })
    }

    fn query_all(&self, query: &str, values: &Values) -> Result<Vec<Row>, InsightError> {
        let mut state = self.lock();
        Self::record(&mut state, query, values);
        state.query_results.pop_front().unwrap_or_else(|| {
            Err(InsightError::Other(format!(
                "MockExecutor has no query result queued for: {query}"
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_script_is_an_error() {
        let mock = MockExecutor::new();
        let err = mock.execute("DELETE FROM t", &Values(vec![])).unwrap_err();
        assert!(matches!(err, InsightError::Other(_)));
        assert!(mock.query_all("SELECT 1", &Values(vec![])).is_err());
        assert_eq!(mock.sql_log(), vec!["DELETE FROM t", "SELECT 1"]);
    }

    #[test]
    fn test_errors_are_replayed_in_order() {
        let mock = MockExecutor::new()
            .append_exec_errors([InsightError::QueryError("boom".into())])
            .append_exec_results([3]);
        assert!(mock.execute("UPDATE t SET a = 1", &Values(vec![])).is_err());
        assert_eq!(mock.execute("UPDATE t SET a = 1", &Values(vec![])).unwrap(), 3);
    }

    #[test]
    fn test_values_are_logged() {
        let mock = MockExecutor::new().append_exec_results([1]);
        mock.execute("DELETE FROM t WHERE id = $1", &Values(vec![9i64.into()]))
            .unwrap();
        assert_eq!(mock.statements()[0].values, vec![Value::from(9i64)]);
    }
}
