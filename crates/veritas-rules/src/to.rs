//! Conversions applied before validation
//!
//! The functions named after a target kind ([`string`], [`int`], [`uint`],
//! [`float`]) wrap their rules in [`veritas_core::to`] with the matching
//! conversion. Conversions look through pointer layers and map an absent
//! value to an absent value, so optional fields stay optional.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use veritas_core::{to, BoxError, CombinationRule, ConversionError, Kind, RuleRef, Value};

fn unsupported(value: &Value, to: Kind) -> ConversionError {
    ConversionError::Unsupported { from: value.kind(), to }
}

fn parse_error(value: &str, to: Kind, reason: impl ToString) -> ConversionError {
    ConversionError::Parse {
        value: value.to_owned(),
        to,
        reason: reason.to_string(),
    }
}

fn overflow(value: impl ToString, to: Kind) -> ConversionError {
    ConversionError::Overflow {
        value: value.to_string(),
        to,
    }
}

/// Convert a scalar to its string form. Floats use the shortest
/// representation that round-trips (`3.0` becomes `"3"`).
pub fn to_string_value(value: &Value) -> Result<Value, ConversionError> {
    let value = value.indirect();
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Int(n) => Ok(Value::String(n.to_string())),
        Value::Uint(n) => Ok(Value::String(n.to_string())),
        Value::Float(n) => Ok(Value::String(n.to_string())),
        other => Err(unsupported(other, Kind::String)),
    }
}

/// Convert to a signed integer. Floats are truncated toward zero.
pub fn to_int_value(value: &Value) -> Result<Value, ConversionError> {
    let value = value.indirect();
    match value {
        Value::Null => Ok(Value::Null),
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Uint(n) => i64::try_from(*n).map(Value::Int).map_err(|_| overflow(n, Kind::Int)),
        Value::Float(n) => {
            let truncated = n.trunc();
            if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(overflow(n, Kind::Int));
            }
            Ok(Value::Int(truncated as i64))
        }
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::String(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|e| parse_error(s, Kind::Int, e)),
        other => Err(unsupported(other, Kind::Int)),
    }
}

/// Convert to an unsigned integer. Negative numbers overflow.
pub fn to_uint_value(value: &Value) -> Result<Value, ConversionError> {
    let value = value.indirect();
    match value {
        Value::Null => Ok(Value::Null),
        Value::Uint(n) => Ok(Value::Uint(*n)),
        Value::Int(n) => u64::try_from(*n).map(Value::Uint).map_err(|_| overflow(n, Kind::Uint)),
        Value::Float(n) => {
            let truncated = n.trunc();
            if !truncated.is_finite() || truncated < 0.0 || truncated >= u64::MAX as f64 {
                return Err(overflow(n, Kind::Uint));
            }
            Ok(Value::Uint(truncated as u64))
        }
        Value::Bool(b) => Ok(Value::Uint(u64::from(*b))),
        Value::String(s) => s.trim().parse::<u64>().map(Value::Uint).map_err(|e| parse_error(s, Kind::Uint, e)),
        other => Err(unsupported(other, Kind::Uint)),
    }
}

/// Convert to a float
pub fn to_float_value(value: &Value) -> Result<Value, ConversionError> {
    let value = value.indirect();
    match value {
        Value::Null => Ok(Value::Null),
        Value::Float(n) => Ok(Value::Float(*n)),
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Uint(n) => Ok(Value::Float(*n as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s.trim().parse::<f64>().map(Value::Float).map_err(|e| parse_error(s, Kind::Float, e)),
        other => Err(unsupported(other, Kind::Float)),
    }
}

/// Validate the value converted to a string
pub fn string<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    to(to_string_value, rules)
}

/// Validate the value converted to a signed integer
pub fn int<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    to(to_int_value, rules)
}

/// Validate the value converted to an unsigned integer
pub fn uint<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    to(to_uint_value, rules)
}

/// Validate the value converted to a float
pub fn float<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    to(to_float_value, rules)
}

/// Package a conversion as a [`CombinationRule`] that can be handed around
/// and applied to rule lists later
pub fn combination<F, E>(convert: F) -> CombinationRule
where
    F: Fn(&Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError> + 'static,
{
    let convert = Arc::new(convert);
    Arc::new(move |rules: Vec<RuleRef>| {
        let convert = convert.clone();
        to(move |value: &Value| convert(value), rules)
    })
}

/// Split a string on `sep` and validate the resulting sequence
pub fn split(sep: impl Into<String>) -> CombinationRule {
    let sep = sep.into();
    combination(move |value: &Value| -> Result<Value, ConversionError> {
        match value.indirect() {
            Value::Null => Ok(Value::Null),
            Value::String(s) => Ok(Value::Seq(s.split(sep.as_str()).map(Value::from).collect())),
            other => Err(unsupported(other, Kind::Seq)),
        }
    })
}
