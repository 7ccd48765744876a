/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rmpv::Value;

use g3_monitoring_client::{
    MetricDescriptor, MetricServiceClient, Point, TimeInterval, TimeSeries,
};

use crate::config::MetricDefinition;
use crate::{DescriptorResolutionError, OutputStats, WriteError};

/// Total attempts for one point, including the first one.
pub const RETRY_LIMIT: usize = 5;
/// The backend accepts at most one point per time series every 30 seconds.
pub const RETRY_WAIT: Duration = Duration::from_secs(30);

pub struct MetricWriter<C> {
    client: C,
    project_name: String,
    metric_name: String,
    descriptor: MetricDescriptor,
    stats: Arc<OutputStats>,
}

impl<C: MetricServiceClient> MetricWriter<C> {
    /// Resolve the remote metric descriptor and build a writer bound to it.
    pub async fn start(
        client: C,
        project: &str,
        definition: &MetricDefinition,
        stats: Arc<OutputStats>,
    ) -> Result<Self, DescriptorResolutionError> {
        let descriptor = crate::reconcile(&client, project, definition).await?;
        Ok(MetricWriter {
            client,
            project_name: g3_monitoring_client::project_path(project),
            metric_name: g3_monitoring_client::metric_descriptor_path(
                project,
                definition.metric_type(),
            ),
            descriptor,
            stats,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    fn create_time_series(&self, point: Point) -> TimeSeries {
        let mut time_series = TimeSeries::new(
            &self.descriptor.metric_type,
            self.descriptor.metric_kind,
            self.descriptor.value_type,
        );
        time_series.points.push(point);
        time_series
    }

    /// Write one point covering `[start_time, end_time]`, in unix seconds.
    pub async fn write(
        &self,
        start_time: i64,
        end_time: i64,
        value: &Value,
    ) -> Result<(), WriteError> {
        let interval = TimeInterval {
            start_time: timestamp(start_time)?,
            end_time: timestamp(end_time)?,
        };
        let typed_value = crate::to_typed_value(&self.descriptor, value)?;
        debug_assert_eq!(typed_value.value_type(), self.descriptor.value_type);
        let time_series = self.create_time_series(Point {
            interval,
            value: typed_value,
        });

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(
                "create time series for {}: start_time {start_time}, end_time {end_time}, value {value}, attempt {attempt}",
                self.metric_name
            );
            let Err(e) = self
                .client
                .create_time_series(&self.project_name, std::slice::from_ref(&time_series))
                .await
            else {
                return Ok(());
            };

            if !e.is_transient() {
                return Err(WriteError::Rejected(e));
            }
            if attempt >= RETRY_LIMIT {
                return Err(WriteError::RetryExhausted {
                    attempts: attempt,
                    source: e,
                });
            }

            info!(
                "transient error when creating time series for {}: {e}, will retry in {}s",
                self.metric_name,
                RETRY_WAIT.as_secs()
            );
            self.stats.add_retried();
            tokio::time::sleep(RETRY_WAIT).await;
        }
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, WriteError> {
    DateTime::from_timestamp(secs, 0).ok_or(WriteError::InvalidTimestamp(secs))
}
