/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use g3_monitoring_client::{MetricServiceError, ValueType};

use crate::DecodeError;

#[derive(Debug, Error)]
pub enum DescriptorResolutionError {
    #[error("failed to get metric descriptor {name}: {source}")]
    Get {
        name: String,
        source: MetricServiceError,
    },
    #[error("failed to create metric descriptor {name}: {source}")]
    Create {
        name: String,
        source: MetricServiceError,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueMapError {
    #[error("unable to coerce value {value} to {value_type}")]
    Coercion {
        value_type: ValueType,
        value: String,
    },
    #[error("unsupported value type {0}")]
    UnsupportedValueType(ValueType),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("invalid value: {0}")]
    ValueMap(#[from] ValueMapError),
    #[error("timestamp {0} out of range")]
    InvalidTimestamp(i64),
    #[error("time series rejected: {0}")]
    Rejected(MetricServiceError),
    #[error("failed to create time series after {attempts} attempts: {source}")]
    RetryExhausted {
        attempts: usize,
        source: MetricServiceError,
    },
    #[error("invalid chunk data: {0}")]
    Decode(#[from] DecodeError),
}
