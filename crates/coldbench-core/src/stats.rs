// Run statistics aggregation
//
// Accumulates per-invocation samples into summary statistics for one
// endpoint's warm runs. The driver is strictly sequential, so plain fields
// suffice; the aggregate is order-independent.

use serde::{Deserialize, Serialize};

/// Metrics recovered from a single invocation attempt
///
/// Both fields default to 0 when the log tail was absent or carried no
/// recognizable metric line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationSample {
    /// Billed execution duration in ms
    pub billed_duration_ms: u64,
    /// Peak memory used in MB
    pub max_memory_used_mb: u64,
}

/// Summary statistics over one endpoint's warm-run samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Number of samples folded in
    pub total_runs: u64,
    /// Sum of billed durations in ms
    pub total_billed_duration_ms: u64,
    /// Mean billed duration in ms (float, no integer truncation)
    pub average_duration_ms: f64,
    /// Minimum billed duration in ms
    pub min_duration_ms: u64,
    /// Maximum billed duration in ms
    pub max_duration_ms: u64,
    /// Maximum memory used across all samples, in MB
    pub peak_memory_mb: u64,
}

/// Accumulator for a finite sequence of invocation samples
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    count: u64,
    total_duration_ms: u64,
    min_duration_ms: u64,
    max_duration_ms: u64,
    peak_memory_mb: u64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sample into the running totals
    pub fn record(&mut self, sample: InvocationSample) {
        if self.count == 0 {
            self.min_duration_ms = sample.billed_duration_ms;
            self.max_duration_ms = sample.billed_duration_ms;
        } else {
            self.min_duration_ms = self.min_duration_ms.min(sample.billed_duration_ms);
            self.max_duration_ms = self.max_duration_ms.max(sample.billed_duration_ms);
        }
        self.count += 1;
        self.total_duration_ms += sample.billed_duration_ms;
        self.peak_memory_mb = self.peak_memory_mb.max(sample.max_memory_used_mb);
    }

    /// Number of samples recorded so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Compute the summary statistics
    ///
    /// Defined only for at least one recorded sample; the warm-run count is
    /// always >= 1, so an empty accumulator here is a programming error.
    pub fn finalize(&self) -> RunStatistics {
        assert!(self.count > 0, "statistics require at least one sample");

        RunStatistics {
            total_runs: self.count,
            total_billed_duration_ms: self.total_duration_ms,
            average_duration_ms: self.total_duration_ms as f64 / self.count as f64,
            min_duration_ms: self.min_duration_ms,
            max_duration_ms: self.max_duration_ms,
            peak_memory_mb: self.peak_memory_mb,
        }
    }
}
