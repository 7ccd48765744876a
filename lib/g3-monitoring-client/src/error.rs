/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MetricServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error("aborted: {0}")]
    Aborted(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl MetricServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MetricServiceError::NotFound(_))
    }

    /// Rate limiting and temporary unavailability, which are expected to
    /// succeed if the same request is sent again later.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            MetricServiceError::ResourceExhausted(_)
                | MetricServiceError::Unavailable(_)
                | MetricServiceError::DeadlineExceeded
                | MetricServiceError::Aborted(_)
        )
    }
}
