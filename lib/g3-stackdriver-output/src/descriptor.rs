/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use log::info;

use g3_monitoring_client::{MetricDescriptor, MetricServiceClient};

use crate::DescriptorResolutionError;
use crate::config::MetricDefinition;

/// Make sure the backend has a descriptor for the configured metric.
///
/// An existing descriptor is adopted as-is, even if its kind or value type
/// differs from the local definition. A new one is only created when the
/// backend reports that it does not exist. Nothing is retried here.
pub async fn reconcile<C>(
    client: &C,
    project: &str,
    definition: &MetricDefinition,
) -> Result<MetricDescriptor, DescriptorResolutionError>
where
    C: MetricServiceClient + ?Sized,
{
    let metric_name =
        g3_monitoring_client::metric_descriptor_path(project, definition.metric_type());

    match client.get_metric_descriptor(&metric_name).await {
        Ok(descriptor) => {
            info!("succeed to get metric descriptor {metric_name}");
            return Ok(descriptor);
        }
        Err(e) if e.is_not_found() => {
            info!("metric descriptor {metric_name} not found, will create it");
        }
        Err(e) => {
            return Err(DescriptorResolutionError::Get {
                name: metric_name,
                source: e,
            });
        }
    }

    let project_name = g3_monitoring_client::project_path(project);
    let descriptor = MetricDescriptor::new(
        definition.metric_type(),
        definition.metric_kind(),
        definition.value_type(),
    );
    match client
        .create_metric_descriptor(&project_name, descriptor)
        .await
    {
        Ok(descriptor) => {
            info!("succeed to create metric descriptor {metric_name}");
            Ok(descriptor)
        }
        Err(e) => Err(DescriptorResolutionError::Create {
            name: metric_name,
            source: e,
        }),
    }
}
