/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use thiserror::Error;
use yaml_rust::Yaml;

use g3_monitoring_client::{MetricKind, ValueType};

pub const CUSTOM_METRIC_TYPE_PREFIX: &str = "custom.googleapis.com/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("custom_metrics.type must start with \"{CUSTOM_METRIC_TYPE_PREFIX}\", got \"{0}\"")]
    InvalidMetricType(String),
    #[error("time_interval must be a whole number of seconds, got {0:?}")]
    FractionalTimeInterval(Duration),
    #[error("time_interval must be greater than 0 if metric_kind is set to {0}")]
    ZeroTimeInterval(MetricKind),
    #[error("custom metric does not support {1} value type if metric_kind is set to {0}")]
    KindValueTypeMismatch(MetricKind, ValueType),
    #[error("value type {0} is not implemented")]
    ValueTypeNotImplemented(ValueType),
    #[error("custom_metrics.key should not be empty")]
    EmptyRecordKey,
}

/// The custom metric every record is converted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricDefinition {
    record_key: String,
    metric_type: String,
    metric_kind: MetricKind,
    value_type: ValueType,
    time_interval: Duration,
}

impl MetricDefinition {
    pub fn new(
        record_key: &str,
        metric_type: &str,
        metric_kind: MetricKind,
        value_type: ValueType,
        time_interval: Duration,
    ) -> Result<Self, ConfigError> {
        let definition = MetricDefinition {
            record_key: record_key.to_string(),
            metric_type: metric_type.to_string(),
            metric_kind,
            value_type,
            time_interval,
        };
        definition.check()?;
        Ok(definition)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !self.metric_type.starts_with(CUSTOM_METRIC_TYPE_PREFIX) {
            return Err(ConfigError::InvalidMetricType(self.metric_type.clone()));
        }

        // points are written at whole second granularity
        if self.time_interval.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalTimeInterval(self.time_interval));
        }

        if self.metric_kind != MetricKind::Gauge {
            if self.time_interval.is_zero() {
                return Err(ConfigError::ZeroTimeInterval(self.metric_kind));
            }
            if matches!(self.value_type, ValueType::Bool | ValueType::String) {
                return Err(ConfigError::KindValueTypeMismatch(
                    self.metric_kind,
                    self.value_type,
                ));
            }
        }

        match self.value_type {
            ValueType::Distribution | ValueType::Money => {
                return Err(ConfigError::ValueTypeNotImplemented(self.value_type));
            }
            ValueType::Bool | ValueType::Int64 | ValueType::Double | ValueType::String => {}
        }

        if self.record_key.is_empty() {
            return Err(ConfigError::EmptyRecordKey);
        }
        Ok(())
    }

    #[inline]
    pub fn record_key(&self) -> &str {
        &self.record_key
    }

    #[inline]
    pub fn metric_type(&self) -> &str {
        &self.metric_type
    }

    #[inline]
    pub fn metric_kind(&self) -> MetricKind {
        self.metric_kind
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[inline]
    pub fn time_interval(&self) -> Duration {
        self.time_interval
    }

    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!(
                "yaml value type for 'custom metrics' should be 'map'"
            ));
        };

        let mut builder = MetricDefinitionBuilder::default();
        super::foreach_kv(map, |k, v| builder.set_by_yaml_kv(k, v))?;
        builder.build()
    }
}

#[derive(Default)]
struct MetricDefinitionBuilder {
    record_key: Option<String>,
    metric_type: Option<String>,
    metric_kind: Option<MetricKind>,
    value_type: Option<ValueType>,
    time_interval: Duration,
}

impl MetricDefinitionBuilder {
    fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match super::normalize_key(k).as_str() {
            "key" => {
                let key = super::as_string(v).context(format!("invalid string value for key {k}"))?;
                self.record_key = Some(key);
            }
            "type" => {
                let metric_type =
                    super::as_string(v).context(format!("invalid string value for key {k}"))?;
                self.metric_type = Some(metric_type);
            }
            "metric_kind" => {
                let s = super::as_string(v).context(format!("invalid string value for key {k}"))?;
                let kind = MetricKind::from_str(&s)?;
                self.metric_kind = Some(kind);
            }
            "value_type" => {
                let s = super::as_string(v).context(format!("invalid string value for key {k}"))?;
                let value_type = ValueType::from_str(&s)?;
                self.value_type = Some(value_type);
            }
            "time_interval" => {
                self.time_interval = super::as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
            }
            _ => return Err(anyhow!("invalid key {k}")),
        }
        Ok(())
    }

    fn build(self) -> anyhow::Result<MetricDefinition> {
        let record_key = self.record_key.ok_or_else(|| anyhow!("key is not set"))?;
        let metric_type = self.metric_type.ok_or_else(|| anyhow!("type is not set"))?;
        let metric_kind = self
            .metric_kind
            .ok_or_else(|| anyhow!("metric_kind is not set"))?;
        let value_type = self
            .value_type
            .ok_or_else(|| anyhow!("value_type is not set"))?;
        let definition = MetricDefinition::new(
            &record_key,
            &metric_type,
            metric_kind,
            value_type,
            self.time_interval,
        )?;
        Ok(definition)
    }
}
