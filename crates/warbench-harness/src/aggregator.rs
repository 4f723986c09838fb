//! ---
//! wb_section: "02-harness"
//! wb_subsection: "module"
//! wb_type: "source"
//! wb_scope: "code"
//! wb_description: "Bounded, non-blocking collector for errors raised inside a timed loop."
//! wb_version: "v0.1.0"
//! wb_owner: "tbd"
//! ---
use tracing::{trace, warn};

use crate::workload::{ErrorSink, Repetitions, WorkloadError};

/// Upper bound on the storage reserved before the first error arrives.
pub const MAX_PREALLOCATED_ERRORS: usize = 4096;

/// Fixed-capacity, append-only error collector for one benchmark run.
///
/// Storage for up to [`MAX_PREALLOCATED_ERRORS`] entries is allocated up front,
/// so `record` does not grow for typical capacities. Errors past
/// capacity are dropped and counted; the first drop is logged at `warn`, the
/// rest at `trace`, and the total is reported again by [`ErrorAggregator::drain`].
#[derive(Debug)]
pub struct ErrorAggregator {
    label: String,
    errors: Vec<WorkloadError>,
    capacity: usize,
    dropped: u64,
}

/// Contents of a drained aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainedErrors {
    pub errors: Vec<WorkloadError>,
    pub dropped: u64,
}

impl ErrorAggregator {
    pub fn with_capacity(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            errors: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_ERRORS)),
            capacity,
            dropped: 0,
        }
    }

    /// Capacity sized to the expected repetition count plus `slack`.
    pub fn for_repetitions(label: impl Into<String>, repetitions: Repetitions, slack: usize) -> Self {
        let expected = usize::try_from(repetitions.get()).unwrap_or(usize::MAX);
        Self::with_capacity(label, expected.saturating_add(slack))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Consume the aggregator, returning errors in insertion order.
    pub fn drain(self) -> DrainedErrors {
        if self.dropped > 0 {
            warn!(
                operation = %self.label,
                kept = self.errors.len(),
                dropped = self.dropped,
                "error aggregator overflowed during benchmark"
            );
        }
        DrainedErrors {
            errors: self.errors,
            dropped: self.dropped,
        }
    }
}

impl ErrorSink for ErrorAggregator {
    fn record(&mut self, error: WorkloadError) {
        if self.errors.len() < self.capacity {
            self.errors.push(error);
            return;
        }
        self.dropped += 1;
        if self.dropped == 1 {
            warn!(operation = %self.label, capacity = self.capacity, error = %error, "error aggregator full, dropping error");
        } else {
            trace!(operation = %self.label, dropped = self.dropped, error = %error, "dropping error");
        }
    }
}
