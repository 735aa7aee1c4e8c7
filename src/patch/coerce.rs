//! Conversion of raw JSON values into typed field values

use chrono::NaiveDate;
use serde_json::Value;

use super::{FieldDescriptor, FieldType, FieldValue, PatchError};

/// Convert `raw` to the semantic type of `field`.
///
/// Relation fields are never coerced here; they must be routed to the
/// [`RelationResolver`](super::RelationResolver) first.
pub fn coerce(raw: &Value, field: &FieldDescriptor) -> Result<FieldValue, PatchError> {
    let invalid = || PatchError::invalid(field.name, raw);

    if raw.is_null() {
        return if field.nullable {
            Ok(FieldValue::Null)
        } else {
            Err(invalid())
        };
    }

    match field.field_type {
        FieldType::Text => raw
            .as_str()
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(invalid),
        FieldType::Integer => parse_integer(raw)
            .and_then(|n| i32::try_from(n).ok())
            .map(FieldValue::Integer)
            .ok_or_else(invalid),
        FieldType::LongInteger => parse_integer(raw)
            .map(FieldValue::LongInteger)
            .ok_or_else(invalid),
        FieldType::Real => parse_real(raw).map(FieldValue::Real).ok_or_else(invalid),
        FieldType::Boolean => parse_boolean(raw)
            .map(FieldValue::Boolean)
            .ok_or_else(invalid),
        FieldType::Date => raw
            .as_str()
            .and_then(parse_date)
            .map(FieldValue::Date)
            .ok_or_else(invalid),
        FieldType::Relation(_) => Err(PatchError::UnsupportedRelationUpdate {
            field: field.name.to_string(),
        }),
    }
}

fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        // Whole floats such as 7.0 are accepted, fractions are not
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn parse_real(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn parse_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Strict `YYYY-MM-DD`
fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
