//! Driver-independent result rows.
//!
//! A [`Row`] is an ordered list of column names and `sea_query::Value`s. The
//! `may_postgres` executor decodes driver rows into this shape by column type so that
//! cursors, key extraction and the mock executor all work on the same representation.

use crate::executor::InsightError;
use crate::value::TryGetable;
use may_postgres::types::Type;
use sea_query::Value;
use std::sync::Arc;

/// A single result row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Build a row from column names and values
    ///
    /// # Errors
    ///
    /// Returns `InsightError::ParseError` if the two lists differ in length.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Result<Self, InsightError> {
        if columns.len() != values.len() {
            return Err(InsightError::ParseError(format!(
                "row has {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self {
            columns: columns.into(),
            values,
        })
    }

    /// Build a row from `(column, value)` pairs
    pub fn from_pairs<C, V, I>(pairs: I) -> Self
    where
        C: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (C, V)>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(c, v)| (c.into(), v.into()))
            .unzip();
        Self {
            columns: columns.into(),
            values,
        }
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column names, in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw value at `index`
    pub fn get_value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Position of the column named `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extract a typed value at `index`
    ///
    /// # Errors
    ///
    /// Returns `InsightError::ParseError` if the index is out of range or the value
    /// cannot be converted to `T`.
    pub fn try_get<T: TryGetable>(&self, index: usize) -> Result<T, InsightError> {
        let value = self.get_value(index).ok_or_else(|| {
            InsightError::ParseError(format!(
                "column index {index} out of range (row has {} columns)",
                self.len()
            ))
        })?;
        Ok(T::try_get(value.clone())?)
    }

    /// Extract a typed value by column name
    ///
    /// # Errors
    ///
    /// Returns `InsightError::ParseError` if no such column exists or the value cannot
    /// be converted to `T`.
    pub fn try_get_by_name<T: TryGetable>(&self, name: &str) -> Result<T, InsightError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| InsightError::ParseError(format!("no column named {name}")))?;
        self.try_get(index)
    }

    /// Consume the row, yielding its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Decode a `may_postgres` row by column type
    ///
    /// # Errors
    ///
    /// Returns `InsightError::ParseError` for column types without a `Value` mapping,
    /// and the driver error if decoding a supported type fails.
    pub fn from_pg_row(row: &may_postgres::Row) -> Result<Self, InsightError> {
        let mut columns = Vec::with_capacity(row.len());
        let mut values = Vec::with_capacity(row.len());
        for (idx, column) in row.columns().iter().enumerate() {
            let ty = column.type_();
            let value = if *ty == Type::BOOL {
                Value::from(row.try_get::<_, Option<bool>>(idx)?)
            } else if *ty == Type::INT2 {
                Value::from(row.try_get::<_, Option<i16>>(idx)?)
            } else if *ty == Type::INT4 {
                Value::from(row.try_get::<_, Option<i32>>(idx)?)
            } else if *ty == Type::INT8 {
                Value::from(row.try_get::<_, Option<i64>>(idx)?)
            } else if *ty == Type::FLOAT4 {
                Value::from(row.try_get::<_, Option<f32>>(idx)?)
            } else if *ty == Type::FLOAT8 {
                Value::from(row.try_get::<_, Option<f64>>(idx)?)
            } else if *ty == Type::TEXT
                || *ty == Type::VARCHAR
                || *ty == Type::BPCHAR
                || *ty == Type::NAME
            {
                Value::from(row.try_get::<_, Option<String>>(idx)?)
            } else if *ty == Type::BYTEA {
                Value::from(row.try_get::<_, Option<Vec<u8>>>(idx)?)
            } else if *ty == Type::UUID {
                Value::from(row.try_get::<_, Option<uuid::Uuid>>(idx)?)
            } else if *ty == Type::JSON || *ty == Type::JSONB {
                Value::from(row.try_get::<_, Option<serde_json::Value>>(idx)?)
            } else if *ty == Type::TIMESTAMPTZ {
                Value::from(row.try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)?)
            } else {
                return Err(InsightError::ParseError(format!(
                    "unsupported column type {} for column {}",
                    ty.name(),
                    column.name()
                )));
            };
            columns.push(column.name().to_string());
            values.push(value);
        }
        Self::new(columns, values)
    }
}
