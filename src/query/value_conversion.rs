//! Value conversion from SeaQuery to may_postgres.
//!
//! Statements are rendered with SeaQuery, which hands back the bound values as
//! `sea_query::Values`. The driver wants `ToSql` trait objects instead. Each value is
//! moved into an owned, typed box first; the closure then receives references into
//! those boxes, which stay alive for the duration of the call.

use crate::executor::InsightError;
use may_postgres::types::ToSql;
use sea_query::{Value, Values};

type OwnedParam = Box<dyn ToSql + Sync>;

/// Convert one bound value. NULLs keep their column type so the server can check them.
fn to_owned_param(value: &Value) -> Result<OwnedParam, InsightError> {
    let param: OwnedParam = match value {
        Value::Bool(v) => Box::new(*v),
        Value::TinyInt(v) => Box::new(v.map(i16::from)),
        Value::SmallInt(v) => Box::new(*v),
        Value::Int(v) => Box::new(*v),
        Value::BigInt(v) => Box::new(*v),
        Value::TinyUnsigned(v) => Box::new(v.map(i16::from)),
        Value::SmallUnsigned(v) => Box::new(v.map(i32::from)),
        Value::Unsigned(v) => Box::new(v.map(i64::from)),
        Value::BigUnsigned(v) => {
            let converted = match v {
                Some(u) => Some(i64::try_from(*u).map_err(|_| {
                    InsightError::Other(format!(
                        "BigUnsigned value {} exceeds i64::MAX ({}), cannot be safely cast to i64",
                        u,
                        i64::MAX
                    ))
                })?),
                None => None,
            };
            Box::new(converted)
        }
        Value::Float(v) => Box::new(*v),
        Value::Double(v) => Box::new(*v),
        Value::String(v) => Box::new(v.as_ref().map(|s| s.to_string())),
        Value::Bytes(v) => Box::new(v.as_ref().map(|b| b.to_vec())),
        Value::Json(v) => Box::new(v.as_ref().map(|j| serde_json::Value::clone(j))),
        Value::Uuid(v) => Box::new(v.as_ref().map(|u| uuid::Uuid::from_bytes(*u.as_bytes()))),
        Value::ChronoDateTimeUtc(v) => {
            Box::new(v.as_ref().map(|d| d.with_timezone(&chrono::Utc)))
        }
        _ => {
            return Err(InsightError::Other(format!(
                "Unsupported value type in query: {:?}",
                value
            )));
        }
    };
    Ok(param)
}

/// Convert SeaQuery values to may_postgres `ToSql` parameters and run `f` with them.
///
/// # Errors
///
/// Returns `InsightError::Other` if an unsupported value type is encountered or an
/// unsigned value does not fit in `i64`; otherwise whatever `f` returns.
pub fn with_converted_params<F, R>(values: &Values, f: F) -> Result<R, InsightError>
where
    F: FnOnce(&[&dyn ToSql]) -> Result<R, InsightError>,
{
    let owned = values
        .iter()
        .map(to_owned_param)
        .collect::<Result<Vec<_>, _>>()?;
    let params: Vec<&dyn ToSql> = owned.iter().map(|p| p.as_ref() as &dyn ToSql).collect();
    f(&params)
}
