/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;
use std::str::FromStr;

use rmpv::Value;

use g3_monitoring_client::{MetricDescriptor, TypedValue, ValueType};

use crate::ValueMapError;

/// Convert a raw record value to the value type declared by the descriptor.
///
/// A missing record field should be passed in as [`Value::Nil`].
pub fn to_typed_value(
    descriptor: &MetricDescriptor,
    value: &Value,
) -> Result<TypedValue, ValueMapError> {
    match descriptor.value_type {
        ValueType::Bool => Ok(TypedValue::Bool(as_bool(value))),
        ValueType::Int64 => as_i64(value)
            .map(TypedValue::Int64)
            .ok_or_else(|| coercion_error(ValueType::Int64, value)),
        ValueType::Double => as_f64(value)
            .map(TypedValue::Double)
            .ok_or_else(|| coercion_error(ValueType::Double, value)),
        ValueType::String => Ok(TypedValue::String(as_string(value))),
        ValueType::Distribution | ValueType::Money => {
            Err(ValueMapError::UnsupportedValueType(descriptor.value_type))
        }
    }
}

fn coercion_error(value_type: ValueType, value: &Value) -> ValueMapError {
    ValueMapError::Coercion {
        value_type,
        value: value.to_string(),
    }
}

fn as_bool(value: &Value) -> bool {
    match value {
        Value::Nil => false,
        Value::Boolean(b) => *b,
        _ => true,
    }
}

fn str_value(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => s.as_str().map(Cow::Borrowed),
        Value::Binary(b) => std::str::from_utf8(b).ok().map(Cow::Borrowed),
        _ => None,
    }
}

fn f64_to_i64(f: f64) -> Option<i64> {
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => i.as_i64(),
        Value::F32(f) => f64_to_i64(f64::from(*f)),
        Value::F64(f) => f64_to_i64(*f),
        Value::String(_) | Value::Binary(_) => {
            let s = str_value(value)?;
            let s = s.trim();
            match i64::from_str(s) {
                Ok(i) => Some(i),
                Err(_) => f64::from_str(s).ok().and_then(f64_to_i64),
            }
        }
        Value::Nil | Value::Boolean(_) | Value::Array(_) | Value::Map(_) | Value::Ext(..) => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => i.as_f64(),
        Value::F32(f) => Some(f64::from(*f)),
        Value::F64(f) => Some(*f),
        Value::String(_) | Value::Binary(_) => {
            let s = str_value(value)?;
            f64::from_str(s.trim()).ok().filter(|f| f.is_finite())
        }
        Value::Nil | Value::Boolean(_) | Value::Array(_) | Value::Map(_) | Value::Ext(..) => None,
    }
}

fn as_string(value: &Value) -> String {
    match value {
        Value::Nil => String::new(),
        Value::String(s) => String::from_utf8_lossy(s.as_bytes()).into_owned(),
        Value::Binary(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::F32(f) => f.to_string(),
        Value::F64(f) => f.to_string(),
        Value::Array(_) | Value::Map(_) | Value::Ext(..) => value.to_string(),
    }
}
