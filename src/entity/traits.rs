//! `EntityTrait`: the capabilities and lifecycle hooks of a concrete entity.

use crate::executor::InsightError;
use crate::table::Table;
use crate::value::TryGetable;
use sea_query::{Expr, SelectStatement, Value};
use std::fmt::Debug;

/// Column handle type of an entity's table
pub type ColumnOf<E> = <<E as EntityTrait>::Table as Table>::Column;

/// Strategy binding a key type to a table type
///
/// The five required methods describe how keys live in the table. The hooks default
/// to no-ops; returning `Err` from a hook aborts the operation before its statement
/// is issued.
///
/// # Example
///
/// ```ignore
/// impl EntityTrait for UserEntity {
///     type Key = i64;
///     type Table = Users;
///
///     fn table_factory(&self) -> Users { Users::default() }
///     fn generate_key(&self) -> i64 { self.next_id.fetch_add(1, Ordering::SeqCst) }
///     fn setup_id(&self, table: &mut Users, id: &i64) -> Result<(), InsightError> {
///         table.set(UserColumn::Id, (*id).into())
///     }
///     fn eq_id_expr(&self, _table: &Users, id: &i64) -> Expr { UserColumn::Id.eq(*id) }
///     fn id_col(&self, _table: &Users) -> UserColumn { UserColumn::Id }
///
///     fn before_update(&self, table: &mut Users, _id: &i64, _stored: &Users) -> Result<(), InsightError> {
///         table.set(UserColumn::UpdatedAt, chrono::Utc::now().into())
///     }
/// }
/// ```
pub trait EntityTrait {
    /// Domain identifier of a record
    type Key: Clone + Debug + Into<Value> + TryGetable;

    /// Row shape the entity is stored in
    type Table: Table;

    /// Produce a fresh, empty table instance
    fn table_factory(&self) -> Self::Table;

    /// Generate a new key for `ActiveEntity::create`
    fn generate_key(&self) -> Self::Key;

    /// Write `id` into `table`
    ///
    /// # Errors
    ///
    /// Propagates the table's rejection of the key value.
    fn setup_id(&self, table: &mut Self::Table, id: &Self::Key) -> Result<(), InsightError>;

    /// Predicate selecting the row whose key is `id`
    fn eq_id_expr(&self, table: &Self::Table, id: &Self::Key) -> Expr;

    /// The key column
    fn id_col(&self, table: &Self::Table) -> ColumnOf<Self>;

    /// Called with the built select right before any `read` executes
    fn before_read(&self, _select: &mut SelectStatement, _is_count: bool) -> Result<(), InsightError> {
        Ok(())
    }

    /// Called after the key is installed and before the insert
    fn before_create(&self, _table: &mut Self::Table, _id: &Self::Key) -> Result<(), InsightError> {
        Ok(())
    }

    /// Columns loaded into the stored instance by the existence check of
    /// `update`/`remove`
    fn fields_to_check(&self, table: &Self::Table) -> Vec<ColumnOf<Self>> {
        vec![self.id_col(table)]
    }

    /// Called once the row is known to exist, before the update; `stored` holds the
    /// `fields_to_check` columns as currently persisted
    fn before_update(
        &self,
        _table: &mut Self::Table,
        _id: &Self::Key,
        _stored: &Self::Table,
    ) -> Result<(), InsightError> {
        Ok(())
    }

    /// Called once the row is known to exist, before the delete
    fn before_remove(&self, _id: &Self::Key, _stored: &Self::Table) -> Result<(), InsightError> {
        Ok(())
    }
}
