// src/analytics/mod.rs
//! Run statistics: how many pages were written and why others were not.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every stage of a run.
#[derive(Debug, Default)]
pub struct RunCounts {
    pub output_normally: AtomicUsize,
    pub skipped_because_empty: AtomicUsize,
    pub skipped_because_status: AtomicUsize,
    pub skipped_because_level_cannot_have_content: AtomicUsize,
}

/// Plain snapshot of [`RunCounts`] for reporting and assertions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub output_normally: usize,
    pub skipped_because_empty: usize,
    pub skipped_because_status: usize,
    pub skipped_because_level_cannot_have_content: usize,
}

impl RunCounts {
    pub fn increment(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            output_normally: self.output_normally.load(Ordering::Relaxed),
            skipped_because_empty: self.skipped_because_empty.load(Ordering::Relaxed),
            skipped_because_status: self.skipped_because_status.load(Ordering::Relaxed),
            skipped_because_level_cannot_have_content: self
                .skipped_because_level_cannot_have_content
                .load(Ordering::Relaxed),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output_normally: {}, skipped_because_empty: {}, skipped_because_status: {}, \
             skipped_because_level_cannot_have_content: {}",
            self.output_normally,
            self.skipped_because_empty,
            self.skipped_because_status,
            self.skipped_because_level_cannot_have_content
        )
    }
}
