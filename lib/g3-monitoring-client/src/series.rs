/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use chrono::{DateTime, Utc};

use super::{MetricKind, ValueType};

#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Int64(i64),
    Double(f64),
    String(String),
}

impl TypedValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            TypedValue::Bool(_) => ValueType::Bool,
            TypedValue::Int64(_) => ValueType::Int64,
            TypedValue::Double(_) => ValueType::Double,
            TypedValue::String(_) => ValueType::String,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub interval: TimeInterval,
    pub value: TypedValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metric {
    pub metric_type: String,
}

/// A series handle for one metric. The backend accepts only one point per
/// series in each create request.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    pub metric: Metric,
    pub metric_kind: MetricKind,
    pub value_type: ValueType,
    pub points: Vec<Point>,
}

impl TimeSeries {
    pub fn new(metric_type: &str, metric_kind: MetricKind, value_type: ValueType) -> Self {
        TimeSeries {
            metric: Metric {
                metric_type: metric_type.to_string(),
            },
            metric_kind,
            value_type,
            points: Vec::with_capacity(1),
        }
    }
}
