/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use yaml_rust::{Yaml, yaml};

mod metric;
pub use metric::{CUSTOM_METRIC_TYPE_PREFIX, ConfigError, MetricDefinition};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    project: String,
    custom_metrics: MetricDefinition,
}

impl OutputConfig {
    pub fn new(project: &str, custom_metrics: MetricDefinition) -> Self {
        OutputConfig {
            project: project.to_string(),
            custom_metrics,
        }
    }

    #[inline]
    pub fn project(&self) -> &str {
        &self.project
    }

    #[inline]
    pub fn custom_metrics(&self) -> &MetricDefinition {
        &self.custom_metrics
    }

    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        let Yaml::Hash(map) = v else {
            return Err(anyhow!(
                "yaml value type for 'output config' should be 'map'"
            ));
        };

        let mut project = String::new();
        let mut custom_metrics: Option<MetricDefinition> = None;
        foreach_kv(map, |k, v| match normalize_key(k).as_str() {
            "project" => {
                project = as_string(v).context(format!("invalid string value for key {k}"))?;
                Ok(())
            }
            "custom_metrics" => {
                let definition = MetricDefinition::parse_yaml(v)
                    .context(format!("invalid custom metrics value for key {k}"))?;
                custom_metrics = Some(definition);
                Ok(())
            }
            _ => Err(anyhow!("invalid key {k}")),
        })?;

        if project.is_empty() {
            return Err(anyhow!("project is not set"));
        }
        let Some(custom_metrics) = custom_metrics else {
            return Err(anyhow!("custom_metrics is not set"));
        };
        Ok(OutputConfig::new(&project, custom_metrics))
    }
}

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(map: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in map.iter() {
        let Yaml::String(key) = k else {
            return Err(anyhow!("key in hash should be string"));
        };
        f(key, v).context(format!("failed to parse value of key {key}"))?;
    }
    Ok(())
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for 'string' should be 'string', 'integer' or 'real'"
        )),
    }
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(s) => match humanize_rs::duration::parse(s) {
            Ok(d) => Ok(d),
            Err(ParseError::MissingUnit) => {
                let secs = u64::from_str(s).map_err(|e| anyhow!("invalid seconds value: {e}"))?;
                Ok(Duration::from_secs(secs))
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(i) => {
            let secs = u64::try_from(*i).map_err(|e| anyhow!("invalid seconds value: {e}"))?;
            Ok(Duration::from_secs(secs))
        }
        _ => Err(anyhow!(
            "yaml value type for 'duration' should be 'string' or 'integer'"
        )),
    }
}
