//! Column trait for typed predicate building.
//!
//! Every column handle of a [`Table`](crate::Table) gets these helpers, which is how
//! entities usually implement `eq_id_expr`.

use sea_query::{Expr, ExprTrait, IdenStatic, IntoColumnRef};

/// Predicate helpers on column handles
///
/// ```
/// use insight_orm::ColumnTrait;
/// use sea_query::{Iden, IdenStatic, PostgresQueryBuilder, Query};
///
/// #[derive(Copy, Clone, Debug)]
/// struct Email;
/// impl Iden for Email { fn unquoted(&self) -> &str { "email" } }
/// impl IdenStatic for Email { fn as_str(&self) -> &'static str { "email" } }
///
/// let sql = Query::select()
///     .column(Email)
///     .from("users")
///     .and_where(Email.eq("a@example.com"))
///     .to_string(PostgresQueryBuilder);
/// assert!(sql.ends_with(r#"WHERE "email" = 'a@example.com'"#));
/// ```
pub trait ColumnTrait: IntoColumnRef + Copy {
    /// `column = value`
    fn eq<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).eq(value)
    }

    /// `column <> value`
    fn ne<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).ne(value)
    }

    /// `column > value`
    fn gt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).gt(value)
    }

    /// `column >= value`
    fn gte<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).gte(value)
    }

    /// `column < value`
    fn lt<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).lt(value)
    }

    /// `column <= value`
    fn lte<T: Into<sea_query::Value>>(self, value: T) -> Expr {
        Expr::col(self).lte(value)
    }

    /// `column LIKE pattern`
    fn like(self, pattern: &str) -> Expr {
        Expr::col(self).like(pattern)
    }

    /// `column IN (values)`
    #[allow(clippy::wrong_self_convention)]
    fn is_in<T, I>(self, values: I) -> Expr
    where
        T: Into<sea_query::Value>,
        I: IntoIterator<Item = T>,
    {
        Expr::col(self).is_in(values)
    }

    /// `column IS NULL`
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Expr {
        Expr::col(self).is_null()
    }

    /// `column IS NOT NULL`
    #[allow(clippy::wrong_self_convention)]
    fn is_not_null(self) -> Expr {
        Expr::col(self).is_not_null()
    }
}

impl<C> ColumnTrait for C where C: IdenStatic + IntoColumnRef + Copy {}
