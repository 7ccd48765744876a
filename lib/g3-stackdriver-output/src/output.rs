/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use chrono::Utc;
use log::warn;
use rmpv::Value;

use g3_monitoring_client::{MetricDescriptor, MetricServiceClient};

use crate::config::{MetricDefinition, OutputConfig};
use crate::{
    DescriptorResolutionError, EventEntry, MetricWriter, OutputSnapshot, OutputStats, WriteError,
};

/// The backend rejects points older than 24 hours.
pub const MAX_POINT_AGE_SECS: i64 = 24 * 60 * 60;

pub struct StackdriverMonitoringOutput<C> {
    custom_metrics: MetricDefinition,
    interval_secs: i64,
    writer: MetricWriter<C>,
    stats: Arc<OutputStats>,
}

impl<C: MetricServiceClient> StackdriverMonitoringOutput<C> {
    /// Resolve the metric descriptor and get ready for writing.
    ///
    /// Any error here should stop this output from starting.
    pub async fn start(
        config: OutputConfig,
        client: C,
    ) -> Result<Self, DescriptorResolutionError> {
        let stats = Arc::new(OutputStats::default());
        let writer = MetricWriter::start(
            client,
            config.project(),
            config.custom_metrics(),
            stats.clone(),
        )
        .await?;
        let custom_metrics = config.custom_metrics().clone();
        let interval_secs = i64::try_from(custom_metrics.time_interval().as_secs())
            .unwrap_or(i64::MAX);
        Ok(StackdriverMonitoringOutput {
            custom_metrics,
            interval_secs,
            writer,
            stats,
        })
    }

    #[inline]
    pub fn descriptor(&self) -> &MetricDescriptor {
        self.writer.descriptor()
    }

    pub fn snapshot(&self) -> OutputSnapshot {
        self.stats.snapshot()
    }

    /// Decode a buffered chunk and write all events in it.
    pub async fn write_chunk(&self, chunk: &[u8]) -> Result<(), WriteError> {
        let entries = crate::decode_chunk(chunk)?;
        self.write_batch(&entries).await
    }

    pub async fn write_batch(&self, entries: &[EventEntry]) -> Result<(), WriteError> {
        self.write_batch_at(entries, Utc::now().timestamp()).await
    }

    /// Write events in order, using `now` (unix seconds) as the current time.
    ///
    /// The first failed event stops the batch, and the error is returned.
    pub async fn write_batch_at(&self, entries: &[EventEntry], now: i64) -> Result<(), WriteError> {
        for entry in entries {
            if now.saturating_sub(entry.time) >= MAX_POINT_AGE_SECS {
                warn!(
                    "drop stale event with tag {} and time {} for metric {}, it's older than {}s",
                    entry.tag,
                    entry.time,
                    self.custom_metrics.metric_type(),
                    MAX_POINT_AGE_SECS
                );
                self.stats.add_dropped_stale();
                continue;
            }

            let value = entry
                .get(self.custom_metrics.record_key())
                .unwrap_or(&Value::Nil);
            let start_time = entry.time.saturating_sub(self.interval_secs);
            match self.writer.write(start_time, entry.time, value).await {
                Ok(_) => self.stats.add_written(),
                Err(e) => {
                    self.stats.add_failed();
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use g3_monitoring_client::{MetricKind, MetricServiceError, TypedValue, ValueType};

    use crate::test_client::TestMetricClient;

    async fn start_output(
        client: Arc<TestMetricClient>,
        kind: MetricKind,
        value_type: ValueType,
        interval: Duration,
    ) -> StackdriverMonitoringOutput<Arc<TestMetricClient>> {
        let definition =
            MetricDefinition::new("k", "custom.googleapis.com/m", kind, value_type, interval)
                .unwrap();
        let config = OutputConfig::new("p", definition);
        StackdriverMonitoringOutput::start(config, client)
            .await
            .unwrap()
    }

    fn entry(time: i64, value: Value) -> EventEntry {
        EventEntry::new("test", time, vec![(Value::from("k"), value)])
    }

    #[tokio::test(start_paused = true)]
    async fn freshness() {
        let client = Arc::new(TestMetricClient::not_found());
        let output = start_output(
            client.clone(),
            MetricKind::Gauge,
            ValueType::Int64,
            Duration::ZERO,
        )
        .await;

        let now = 1000;
        output
            .write_batch_at(&[entry(now - 86400, Value::from(1))], now)
            .await
            .unwrap();
        assert_eq!(client.write_calls(), 0);
        assert_eq!(output.snapshot().dropped_stale, 1);

        output
            .write_batch_at(&[entry(now - 86399, Value::from(2))], now)
            .await
            .unwrap();
        assert_eq!(client.write_calls(), 1);
        let written = client.written();
        assert_eq!(written[0].1.points[0].value, TypedValue::Int64(2));
        assert_eq!(
            written[0].1.points[0].interval.end_time.timestamp(),
            now - 86399
        );

        let snapshot = output.snapshot();
        assert_eq!(snapshot.written, 1);
        assert_eq!(snapshot.dropped_stale, 1);
        assert_eq!(snapshot.failed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval() {
        let client = Arc::new(TestMetricClient::not_found());
        let output = start_output(
            client.clone(),
            MetricKind::Cumulative,
            ValueType::Double,
            Duration::from_secs(60),
        )
        .await;

        output
            .write_batch_at(&[entry(10_000, Value::from("2.5"))], 10_001)
            .await
            .unwrap();
        let written = client.written();
        let point = &written[0].1.points[0];
        assert_eq!(point.interval.start_time.timestamp(), 10_000 - 60);
        assert_eq!(point.interval.end_time.timestamp(), 10_000);
        assert_eq!(point.value, TypedValue::Double(2.5));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_field() {
        let client = Arc::new(TestMetricClient::not_found());
        let output = start_output(
            client.clone(),
            MetricKind::Gauge,
            ValueType::Bool,
            Duration::ZERO,
        )
        .await;

        let no_field = EventEntry::new("test", 1000, vec![(Value::from("x"), Value::from(1))]);
        output
            .write_batch_at(&[no_field, entry(1000, Value::from("yes"))], 1000)
            .await
            .unwrap();
        let written = client.written();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].1.points[0].value, TypedValue::Bool(false));
        assert_eq!(written[1].1.points[0].value, TypedValue::Bool(true));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_at_first_error() {
        let client = Arc::new(TestMetricClient::not_found());
        let output = start_output(
            client.clone(),
            MetricKind::Gauge,
            ValueType::Int64,
            Duration::ZERO,
        )
        .await;

        let entries = [
            entry(1000, Value::from(1)),
            entry(1001, Value::from("not a number")),
            entry(1002, Value::from(3)),
        ];
        let e = output.write_batch_at(&entries, 1002).await.unwrap_err();
        assert!(matches!(e, WriteError::ValueMap(_)));
        assert_eq!(client.write_calls(), 1);

        let snapshot = output.snapshot();
        assert_eq!(snapshot.written, 1);
        assert_eq!(snapshot.failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_exhausted_in_batch() {
        let client = Arc::new(TestMetricClient::not_found());
        client.push_write_errors(
            MetricServiceError::ResourceExhausted("quota".to_string()),
            5,
        );
        let output = start_output(
            client.clone(),
            MetricKind::Gauge,
            ValueType::Int64,
            Duration::ZERO,
        )
        .await;

        let e = output
            .write_batch_at(&[entry(1000, Value::from(1)), entry(1001, Value::from(2))], 1001)
            .await
            .unwrap_err();
        assert!(matches!(e, WriteError::RetryExhausted { attempts: 5, .. }));
        assert_eq!(client.write_calls(), 5);
        assert_eq!(output.snapshot().retried, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn write_chunk() {
        let client = Arc::new(TestMetricClient::not_found());
        let output = start_output(
            client.clone(),
            MetricKind::Gauge,
            ValueType::Int64,
            Duration::ZERO,
        )
        .await;

        let now = Utc::now().timestamp();
        let mut chunk =
            crate::format_entry("test", now, &[(Value::from("k"), Value::from(5))]).unwrap();
        let stale = crate::format_entry(
            "test",
            now - MAX_POINT_AGE_SECS - 1,
            &[(Value::from("k"), Value::from(6))],
        )
        .unwrap();
        chunk.extend(stale);
        output.write_chunk(&chunk).await.unwrap();

        let written = client.written();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1.points[0].value, TypedValue::Int64(5));
        assert_eq!(output.snapshot().dropped_stale, 1);

        let e = output.write_chunk(&[0x93]).await.unwrap_err();
        assert!(matches!(e, WriteError::Decode(_)));
    }

    #[tokio::test]
    async fn start_failure() {
        let client = TestMetricClient::get_failure(MetricServiceError::Unavailable(
            "down".to_string(),
        ));
        let definition = MetricDefinition::new(
            "k",
            "custom.googleapis.com/m",
            MetricKind::Gauge,
            ValueType::Int64,
            Duration::ZERO,
        )
        .unwrap();
        let r = StackdriverMonitoringOutput::start(OutputConfig::new("p", definition), client).await;
        assert!(matches!(r, Err(DescriptorResolutionError::Get { .. })));
    }
}
