/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

pub fn project_path(project: &str) -> String {
    format!("projects/{project}")
}

pub fn metric_descriptor_path(project: &str, metric_type: &str) -> String {
    format!("projects/{project}/metricDescriptors/{metric_type}")
}
