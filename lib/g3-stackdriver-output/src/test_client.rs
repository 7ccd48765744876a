/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use g3_monitoring_client::{
    MetricDescriptor, MetricServiceClient, MetricServiceError, TimeSeries,
};

pub(crate) struct TestMetricClient {
    get_response: Result<MetricDescriptor, MetricServiceError>,
    create_error: Option<MetricServiceError>,
    write_errors: Mutex<VecDeque<MetricServiceError>>,
    get_calls: AtomicUsize,
    create_calls: AtomicUsize,
    write_calls: AtomicUsize,
    written: Mutex<Vec<(String, TimeSeries)>>,
}

impl TestMetricClient {
    fn new(get_response: Result<MetricDescriptor, MetricServiceError>) -> Self {
        TestMetricClient {
            get_response,
            create_error: None,
            write_errors: Mutex::new(VecDeque::new()),
            get_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
            written: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_existing(descriptor: MetricDescriptor) -> Self {
        TestMetricClient::new(Ok(descriptor))
    }

    pub(crate) fn not_found() -> Self {
        TestMetricClient::new(Err(MetricServiceError::NotFound(
            "metric descriptor".to_string(),
        )))
    }

    pub(crate) fn get_failure(e: MetricServiceError) -> Self {
        TestMetricClient::new(Err(e))
    }

    pub(crate) fn set_create_error(&mut self, e: MetricServiceError) {
        self.create_error = Some(e);
    }

    /// Queue errors returned by the next create_time_series calls.
    pub(crate) fn push_write_errors(&self, e: MetricServiceError, count: usize) {
        let mut errors = self.write_errors.lock().unwrap();
        for _ in 0..count {
            errors.push_back(e.clone());
        }
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::Relaxed)
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::Relaxed)
    }

    pub(crate) fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::Relaxed)
    }

    pub(crate) fn written(&self) -> Vec<(String, TimeSeries)> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricServiceClient for TestMetricClient {
    async fn get_metric_descriptor(
        &self,
        _name: &str,
    ) -> Result<MetricDescriptor, MetricServiceError> {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        self.get_response.clone()
    }

    async fn create_metric_descriptor(
        &self,
        project_name: &str,
        mut descriptor: MetricDescriptor,
    ) -> Result<MetricDescriptor, MetricServiceError> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(e) = &self.create_error {
            return Err(e.clone());
        }
        descriptor.name = format!(
            "{project_name}/metricDescriptors/{}",
            descriptor.metric_type
        );
        Ok(descriptor)
    }

    async fn create_time_series(
        &self,
        project_name: &str,
        time_series: &[TimeSeries],
    ) -> Result<(), MetricServiceError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(e) = self.write_errors.lock().unwrap().pop_front() {
            return Err(e);
        }
        let mut written = self.written.lock().unwrap();
        for ts in time_series {
            written.push((project_name.to_string(), ts.clone()));
        }
        Ok(())
    }
}
