//! The `Table` trait: schema and row shape of one entity.

use super::value::ActiveValue;
use crate::executor::InsightError;
use crate::query::vendor::{PostgresVendor, Vendor};
use sea_query::{Iden, IdenStatic, Value};

/// A typed schema description that also carries one row's worth of column state
///
/// Implementations are usually a struct with one `ActiveValue` per column plus a
/// `Column` enum implementing `Iden`/`IdenStatic`.
///
/// # Example
///
/// ```
/// use insight_orm::{ActiveValue, InsightError, Table};
/// use sea_query::{Iden, IdenStatic, Value};
///
/// #[derive(Copy, Clone, Debug, PartialEq)]
/// enum UserColumn { Id, Name }
///
/// impl Iden for UserColumn {
///     fn unquoted(&self) -> &str { self.as_str() }
/// }
///
/// impl IdenStatic for UserColumn {
///     fn as_str(&self) -> &'static str {
///         match self { UserColumn::Id => "id", UserColumn::Name => "name" }
///     }
/// }
///
/// #[derive(Clone, Debug, Default)]
/// struct Users { id: ActiveValue, name: ActiveValue }
///
/// impl Table for Users {
///     type Column = UserColumn;
///
///     fn table_name(&self) -> &'static str { "users" }
///
///     fn columns(&self) -> Vec<UserColumn> { vec![UserColumn::Id, UserColumn::Name] }
///
///     fn get(&self, column: UserColumn) -> ActiveValue {
///         match column {
///             UserColumn::Id => self.id.clone(),
///             UserColumn::Name => self.name.clone(),
///         }
///     }
///
///     fn set(&mut self, column: UserColumn, value: Value) -> Result<(), InsightError> {
///         match column {
///             UserColumn::Id => self.id = ActiveValue::Set(value),
///             UserColumn::Name => self.name = ActiveValue::Set(value),
///         }
///         Ok(())
///     }
/// }
///
/// let mut users = Users::default();
/// users.set(UserColumn::Name, "Ada".into()).unwrap();
/// assert_eq!(users.set_values().len(), 1);
/// ```
pub trait Table {
    /// Column handle type
    type Column: Iden + IdenStatic + Copy + PartialEq + std::fmt::Debug + 'static;

    /// Name of the table in the database
    fn table_name(&self) -> &'static str;

    /// All columns, in declaration order
    fn columns(&self) -> Vec<Self::Column>;

    /// Dialect handle used to render statements for this table
    fn vendor(&self) -> &'static dyn Vendor {
        &PostgresVendor
    }

    /// Current state of `column`
    fn get(&self, column: Self::Column) -> ActiveValue;

    /// Assign `value` to `column`
    ///
    /// # Errors
    ///
    /// Implementations may reject values of the wrong type.
    fn set(&mut self, column: Self::Column, value: Value) -> Result<(), InsightError>;

    /// `(column, value)` pairs of every `Set` column, in `columns()` order
    fn set_values(&self) -> Vec<(Self::Column, Value)> {
        self.columns()
            .into_iter()
            .filter_map(|column| self.get(column).into_value().map(|v| (column, v)))
            .collect()
    }
}
