//! TryGetable trait for safe value extraction
//!
//! Extracts Rust values (keys, counts, column values) out of `sea_query::Value` with
//! proper error handling. Integer targets accept any narrower integer variant, because
//! drivers report `COUNT(*)` and serial keys with whatever width the column has.

use sea_query::Value;

/// Error type for value extraction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExtractionError {
    /// The value is null (None variant)
    NullValue,
    /// The value type doesn't match the expected type
    TypeMismatch {
        expected: String,
        actual: String,
    },
    /// Value conversion failed (e.g., overflow, invalid format)
    ConversionError(String),
}

impl std::fmt::Display for ValueExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueExtractionError::NullValue => write!(f, "Value is null"),
            ValueExtractionError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            ValueExtractionError::ConversionError(msg) => {
                write!(f, "Conversion error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValueExtractionError {}

/// Trait for safe value extraction with error handling
///
/// ```rust
/// use insight_orm::{TryGetable, ValueExtractionError};
/// use sea_query::Value;
///
/// let result: Result<i64, ValueExtractionError> = TryGetable::try_get(Value::Int(Some(42)));
/// assert_eq!(result, Ok(42));
///
/// let result: Result<i32, ValueExtractionError> = TryGetable::try_get(Value::Int(None));
/// assert!(matches!(result, Err(ValueExtractionError::NullValue)));
/// ```
pub trait TryGetable: Sized {
    /// Try to extract a value from `sea_query::Value`.
    ///
    /// - `Err(ValueExtractionError::NullValue)` if the value is null
    /// - `Err(ValueExtractionError::TypeMismatch)` if the variant doesn't match
    /// - `Err(ValueExtractionError::ConversionError)` if conversion overflows
    fn try_get(value: Value) -> Result<Self, ValueExtractionError>;

    /// Like `try_get`, but a null value yields `Ok(None)`.
    fn try_get_opt(value: Value) -> Result<Option<Self>, ValueExtractionError> {
        match Self::try_get(value) {
            Ok(v) => Ok(Some(v)),
            Err(ValueExtractionError::NullValue) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn mismatch(expected: &str, value: &Value) -> ValueExtractionError {
    ValueExtractionError::TypeMismatch {
        expected: expected.to_string(),
        actual: format!("{:?}", value),
    }
}

/// Widen any integer variant to `i128` so the target type can range-check it.
fn integer_of(value: &Value) -> Option<Option<i128>> {
    let widened = match value {
        Value::TinyInt(v) => v.map(i128::from),
        Value::SmallInt(v) => v.map(i128::from),
        Value::Int(v) => v.map(i128::from),
        Value::BigInt(v) => v.map(i128::from),
        Value::TinyUnsigned(v) => v.map(i128::from),
        Value::SmallUnsigned(v) => v.map(i128::from),
        Value::Unsigned(v) => v.map(i128::from),
        Value::BigUnsigned(v) => v.map(i128::from),
        _ => return None,
    };
    Some(widened)
}

macro_rules! impl_try_getable_int {
    ($type:ty, $expected:expr) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
                match integer_of(&value) {
                    Some(Some(v)) => <$type>::try_from(v).map_err(|_| {
                        ValueExtractionError::ConversionError(format!(
                            "{} does not fit in {}",
                            v, $expected
                        ))
                    }),
                    Some(None) => Err(ValueExtractionError::NullValue),
                    None => Err(mismatch($expected, &value)),
                }
            }
        }
    };
}

impl_try_getable_int!(i16, "i16");
impl_try_getable_int!(i32, "i32");
impl_try_getable_int!(i64, "i64");
impl_try_getable_int!(u32, "u32");
impl_try_getable_int!(u64, "u64");

macro_rules! impl_try_getable {
    ($type:ty, $variant:ident, $expected:expr) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
                match value {
                    Value::$variant(Some(v)) => Ok(v),
                    Value::$variant(None) => Err(ValueExtractionError::NullValue),
                    _ => Err(mismatch($expected, &value)),
                }
            }
        }
    };
}

impl_try_getable!(f32, Float, "Float");
impl_try_getable!(bool, Bool, "Bool");
impl_try_getable!(String, String, "String");
impl_try_getable!(Vec<u8>, Bytes, "Bytes");

impl TryGetable for f64 {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Double(Some(v)) => Ok(v),
            Value::Float(Some(v)) => Ok(f64::from(v)),
            Value::Double(None) | Value::Float(None) => Err(ValueExtractionError::NullValue),
            _ => Err(mismatch("Double or Float", &value)),
        }
    }
}

impl TryGetable for uuid::Uuid {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match &value {
            Value::Uuid(Some(v)) => Ok(uuid::Uuid::from_bytes(*v.as_bytes())),
            Value::Uuid(None) => Err(ValueExtractionError::NullValue),
            Value::String(Some(s)) => uuid::Uuid::parse_str(s)
                .map_err(|e| ValueExtractionError::ConversionError(e.to_string())),
            _ => Err(mismatch("Uuid", &value)),
        }
    }
}

impl TryGetable for serde_json::Value {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Json(Some(v)) => Ok(*v),
            Value::Json(None) => Err(ValueExtractionError::NullValue),
            _ => Err(mismatch("Json", &value)),
        }
    }
}

impl<T: TryGetable> TryGetable for Option<T> {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        T::try_get_opt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_get_success() {
        let result: Result<i32, _> = TryGetable::try_get(Value::Int(Some(42)));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_try_get_null() {
        let result: Result<i32, _> = TryGetable::try_get(Value::Int(None));
        assert!(matches!(result, Err(ValueExtractionError::NullValue)));
    }

    #[test]
    fn test_try_get_type_mismatch() {
        let result: Result<i32, _> = TryGetable::try_get(Value::String(Some("hello".to_string())));
        assert!(matches!(result, Err(ValueExtractionError::TypeMismatch { .. })));
    }

    #[test]
    fn test_integer_widening_and_overflow() {
        // COUNT(*) comes back as BIGINT, serial keys as INT
        assert_eq!(i64::try_get(Value::Int(Some(7))), Ok(7));
        assert_eq!(u64::try_get(Value::BigInt(Some(3))), Ok(3));
        assert!(matches!(
            u64::try_get(Value::BigInt(Some(-1))),
            Err(ValueExtractionError::ConversionError(_))
        ));
        assert!(matches!(
            i16::try_get(Value::BigInt(Some(i64::from(i16::MAX) + 1))),
            Err(ValueExtractionError::ConversionError(_))
        ));
    }

    #[test]
    fn test_try_get_opt() {
        let result: Result<Option<i32>, _> = TryGetable::try_get_opt(Value::Int(Some(42)));
        assert_eq!(result, Ok(Some(42)));

        let result: Result<Option<i32>, _> = TryGetable::try_get_opt(Value::Int(None));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_uuid_from_uuid_and_text() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(uuid::Uuid::try_get(Value::from(id)), Ok(id));
        assert_eq!(uuid::Uuid::try_get(Value::from(id.to_string())), Ok(id));
        assert!(matches!(
            uuid::Uuid::try_get(Value::from("not-a-uuid")),
            Err(ValueExtractionError::ConversionError(_))
        ));
    }
}
