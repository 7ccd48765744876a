/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::Arc;

use async_trait::async_trait;

use super::{MetricDescriptor, MetricServiceError, TimeSeries};

/// The metric service RPC surface used by writers.
///
/// `name` and `project_name` arguments are resource paths built with
/// [`crate::metric_descriptor_path`] and [`crate::project_path`].
#[async_trait]
pub trait MetricServiceClient: Send + Sync {
    async fn get_metric_descriptor(
        &self,
        name: &str,
    ) -> Result<MetricDescriptor, MetricServiceError>;

    async fn create_metric_descriptor(
        &self,
        project_name: &str,
        descriptor: MetricDescriptor,
    ) -> Result<MetricDescriptor, MetricServiceError>;

    async fn create_time_series(
        &self,
        project_name: &str,
        time_series: &[TimeSeries],
    ) -> Result<(), MetricServiceError>;
}

#[async_trait]
impl<T: MetricServiceClient + ?Sized> MetricServiceClient for Arc<T> {
    async fn get_metric_descriptor(
        &self,
        name: &str,
    ) -> Result<MetricDescriptor, MetricServiceError> {
        self.as_ref().get_metric_descriptor(name).await
    }

    async fn create_metric_descriptor(
        &self,
        project_name: &str,
        descriptor: MetricDescriptor,
    ) -> Result<MetricDescriptor, MetricServiceError> {
        self.as_ref()
            .create_metric_descriptor(project_name, descriptor)
            .await
    }

    async fn create_time_series(
        &self,
        project_name: &str,
        time_series: &[TimeSeries],
    ) -> Result<(), MetricServiceError> {
        self.as_ref()
            .create_time_series(project_name, time_series)
            .await
    }
}
