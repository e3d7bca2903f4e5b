//! Result cursors.
//!
//! `ActiveEntity::read` returns a [`Cursor`] by value. It owns its rows, so several
//! reads can be in flight against the same entity without one discarding another.

use crate::executor::InsightError;
use crate::row::Row;
use crate::value::TryGetable;

/// Row iterator produced by executing a read
///
/// The cursor starts *before* the first row; call [`Cursor::next`] to position it.
///
/// ```
/// use insight_orm::{Cursor, Row};
///
/// let mut cursor = Cursor::new(vec![Row::from_pairs([("id", 1i64)]), Row::from_pairs([("id", 2i64)])]);
/// let mut ids = Vec::new();
/// while cursor.next() {
///     ids.push(cursor.get::<i64>(0).unwrap());
/// }
/// assert_eq!(ids, vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct Cursor {
    rows: std::vec::IntoIter<Row>,
    current: Option<Row>,
}

impl Cursor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
            current: None,
        }
    }

    /// Advance to the next row; `false` once the rows are exhausted
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    /// The row the cursor is positioned on
    pub fn current(&self) -> Option<&Row> {
        self.current.as_ref()
    }

    /// Rows not yet visited
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }

    /// Typed value at `index` of the current row
    ///
    /// # Errors
    ///
    /// Returns `InsightError::CursorNotPositioned` before the first `next()` or after
    /// exhaustion, and `InsightError::ParseError` if the value cannot be converted.
    pub fn get<T: TryGetable>(&self, index: usize) -> Result<T, InsightError> {
        self.current
            .as_ref()
            .ok_or(InsightError::CursorNotPositioned)?
            .try_get(index)
    }

    /// Typed value of the column named `name` in the current row
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::get`].
    pub fn get_by_name<T: TryGetable>(&self, name: &str) -> Result<T, InsightError> {
        self.current
            .as_ref()
            .ok_or(InsightError::CursorNotPositioned)?
            .try_get_by_name(name)
    }
}
