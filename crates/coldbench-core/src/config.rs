// Benchmark configuration

use serde_json::{json, Value};

/// Default number of warm runs per endpoint
///
/// Trades total benchmark wall-clock time against statistical stability of
/// the warm-run aggregate.
pub const DEFAULT_WARM_RUNS: u64 = 100;

/// Configuration for one benchmark run
///
/// The payload is a fixed minimal JSON object and is not varied across
/// attempts: the harness measures endpoint overhead, not payload-dependent
/// behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Number of warm invocations per endpoint (after the single cold one)
    pub warm_runs: u64,
    /// Invocation payload sent on every attempt
    pub payload: Value,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warm_runs: DEFAULT_WARM_RUNS,
            payload: json!({"key1": "value1"}),
        }
    }
}

impl BenchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the warm-run count
    ///
    /// Must be at least 1; the driver rejects a zero count as invalid input.
    pub fn with_warm_runs(mut self, warm_runs: u64) -> Self {
        self.warm_runs = warm_runs;
        self
    }

    /// Set the invocation payload
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}
