/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

pub mod config;

mod error;
pub use error::{DescriptorResolutionError, ValueMapError, WriteError};

mod descriptor;
pub use descriptor::reconcile;

mod value;
pub use value::to_typed_value;

mod writer;
pub use writer::{MetricWriter, RETRY_LIMIT, RETRY_WAIT};

mod format;
pub use format::{DecodeError, EncodeError, EventEntry, decode_chunk, format_entry};

mod stats;
pub use stats::{OutputSnapshot, OutputStats};

mod output;
pub use output::{MAX_POINT_AGE_SECS, StackdriverMonitoringOutput};

#[cfg(test)]
mod test_client;
