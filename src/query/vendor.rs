//! SQL dialect handles.
//!
//! A [`Vendor`] renders SeaQuery statements for one database and supplies the
//! dialect-specific expressions the entity layer needs (currently the row-count
//! aggregate).

use sea_query::{
    DeleteStatement, Expr, InsertStatement, PostgresQueryBuilder, SelectStatement,
    UpdateStatement, Values,
};

/// Dialect-specific capability provider
pub trait Vendor: Send + Sync {
    /// Short dialect name, prefixed to the entity layer's log lines
    fn name(&self) -> &'static str;

    /// Aggregate expression counting matching rows
    fn count_expression(&self) -> Expr;

    fn build_select(&self, statement: &SelectStatement) -> (String, Values);

    fn build_insert(&self, statement: &InsertStatement) -> (String, Values);

    fn build_update(&self, statement: &UpdateStatement) -> (String, Values);

    fn build_delete(&self, statement: &DeleteStatement) -> (String, Values);
}

/// PostgreSQL dialect (`$n` placeholders, double-quoted identifiers)
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresVendor;

impl Vendor for PostgresVendor {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn count_expression(&self) -> Expr {
        Expr::cust("COUNT(*)")
    }

    fn build_select(&self, statement: &SelectStatement) -> (String, Values) {
        statement.build(PostgresQueryBuilder)
    }

    fn build_insert(&self, statement: &InsertStatement) -> (String, Values) {
        statement.build(PostgresQueryBuilder)
    }

    fn build_update(&self, statement: &UpdateStatement) -> (String, Values) {
        statement.build(PostgresQueryBuilder)
    }

    fn build_delete(&self, statement: &DeleteStatement) -> (String, Values) {
        statement.build(PostgresQueryBuilder)
    }
}
