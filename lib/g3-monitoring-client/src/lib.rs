/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

mod error;
pub use error::MetricServiceError;

mod metric;
pub use metric::{MetricDescriptor, MetricKind, ParseMetricEnumError, ValueType};

mod series;
pub use series::{Metric, Point, TimeInterval, TimeSeries, TypedValue};

mod path;
pub use path::{metric_descriptor_path, project_path};

mod service;
pub use service::MetricServiceClient;
