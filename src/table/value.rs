//! `ActiveValue` enum for per-column state.
//!
//! Each column of a [`Table`](super::Table) instance holds one `ActiveValue`, which
//! tells inserts and updates whether the column takes part in the statement.

use sea_query::Value;

/// State of one column on a table instance
///
/// Only `Set` columns are written by `create` and `update`. `NotSet` marks a column
/// that was explicitly cleared, `Unset` one that was never touched.
///
/// ```
/// use insight_orm::ActiveValue;
///
/// let name = ActiveValue::Set(sea_query::Value::from("Ada"));
/// assert!(name.is_set());
/// assert!(ActiveValue::default().is_unset());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveValue {
    /// Column carries a value
    Set(Value),
    /// Column was explicitly cleared
    NotSet,
    /// Column was never assigned
    #[default]
    Unset,
}

impl ActiveValue {
    /// `Some(value)` if set
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            ActiveValue::Set(v) => Some(v),
            ActiveValue::NotSet | ActiveValue::Unset => None,
        }
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, ActiveValue::Set(_))
    }

    #[must_use]
    pub fn is_not_set(&self) -> bool {
        matches!(self, ActiveValue::NotSet)
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, ActiveValue::Unset)
    }

    /// Borrow the value if set
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ActiveValue::Set(v) => Some(v),
            ActiveValue::NotSet | ActiveValue::Unset => None,
        }
    }

    /// Move the value out, leaving `Unset` behind
    pub fn take(&mut self) -> Option<Value> {
        std::mem::take(self).into_value()
    }
}

impl From<Value> for ActiveValue {
    fn from(value: Value) -> Self {
        ActiveValue::Set(value)
    }
}

impl From<Option<Value>> for ActiveValue {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => ActiveValue::Set(v),
            None => ActiveValue::NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_leaves_unset() {
        let mut value = ActiveValue::Set(Value::Int(Some(1)));
        assert_eq!(value.take(), Some(Value::Int(Some(1))));
        assert!(value.is_unset());
        assert_eq!(value.take(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(ActiveValue::from(None).is_not_set());
        assert_eq!(
            ActiveValue::from(Some(Value::Bool(Some(true)))).as_value(),
            Some(&Value::Bool(Some(true)))
        );
    }
}
