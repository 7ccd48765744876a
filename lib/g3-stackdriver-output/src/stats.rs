/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default, Debug, Eq, PartialEq)]
pub struct OutputSnapshot {
    pub written: u64,
    pub dropped_stale: u64,
    pub failed: u64,
    pub retried: u64,
}

#[derive(Default)]
pub struct OutputStats {
    written: AtomicU64,
    dropped_stale: AtomicU64,
    failed: AtomicU64,
    retried: AtomicU64,
}

impl OutputStats {
    pub fn snapshot(&self) -> OutputSnapshot {
        OutputSnapshot {
            written: self.written.load(Ordering::Relaxed),
            dropped_stale: self.dropped_stale.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            retried: self.retried.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn add_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_dropped_stale(&self) {
        self.dropped_stale.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_retried(&self) {
        self.retried.fetch_add(1, Ordering::Relaxed);
    }
}
