/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid {kind} name: {value}")]
pub struct ParseMetricEnumError {
    kind: &'static str,
    value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Delta,
    Cumulative,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "GAUGE",
            MetricKind::Delta => "DELTA",
            MetricKind::Cumulative => "CUMULATIVE",
        }
    }
}

impl FromStr for MetricKind {
    type Err = ParseMetricEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GAUGE" => Ok(MetricKind::Gauge),
            "DELTA" => Ok(MetricKind::Delta),
            "CUMULATIVE" => Ok(MetricKind::Cumulative),
            _ => Err(ParseMetricEnumError {
                kind: "metric kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int64,
    Double,
    String,
    Distribution,
    Money,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Bool => "BOOL",
            ValueType::Int64 => "INT64",
            ValueType::Double => "DOUBLE",
            ValueType::String => "STRING",
            ValueType::Distribution => "DISTRIBUTION",
            ValueType::Money => "MONEY",
        }
    }
}

impl FromStr for ValueType {
    type Err = ParseMetricEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BOOL" => Ok(ValueType::Bool),
            "INT64" => Ok(ValueType::Int64),
            "DOUBLE" => Ok(ValueType::Double),
            "STRING" => Ok(ValueType::String),
            "DISTRIBUTION" => Ok(ValueType::Distribution),
            "MONEY" => Ok(ValueType::Money),
            _ => Err(ParseMetricEnumError {
                kind: "value type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The schema the backend holds for one metric type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Full resource name, assigned by the backend. Empty in create requests.
    pub name: String,
    pub metric_type: String,
    pub metric_kind: MetricKind,
    pub value_type: ValueType,
}

impl MetricDescriptor {
    pub fn new(metric_type: &str, metric_kind: MetricKind, value_type: ValueType) -> Self {
        MetricDescriptor {
            name: String::new(),
            metric_type: metric_type.to_string(),
            metric_kind,
            value_type,
        }
    }
}
