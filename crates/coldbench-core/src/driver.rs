// Invocation driver
//
// Executes one cold invocation followed by the configured number of warm
// invocations against a single endpoint, all under one shared deadline.
// Attempts are strictly sequential: attempt k+1 is never started before
// attempt k's response is observed.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::config::BenchConfig;
use crate::deadline::Deadline;
use crate::endpoint::TargetEndpoint;
use crate::error::{BenchError, Result};
use crate::logs::{extract_billed_duration_ms, extract_max_memory_used_mb};
use crate::stats::{InvocationSample, RunStatistics, StatsAccumulator};
use crate::traits::InvocationClient;

/// Which attempt of the cycle is being issued, for reporting only
///
/// The invocation mechanism itself is identical for cold and warm runs; the
/// first attempt is surfaced separately to characterize cold-start overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Cold,
    Warm(u64),
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Run::Cold => f.write_str("cold"),
            Run::Warm(n) => write!(f, "warm #{n}"),
        }
    }
}

/// Results of one endpoint's full test cycle
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRuns {
    /// Metrics of the single cold invocation, reported separately and never
    /// folded into the warm aggregate
    pub cold: InvocationSample,
    /// Aggregate statistics over the warm invocations
    pub warm: RunStatistics,
}

/// Drives the cold + warm invocation loop for a single endpoint
pub struct InvocationDriver {
    client: Arc<dyn InvocationClient>,
    config: BenchConfig,
}

impl InvocationDriver {
    pub fn new(client: Arc<dyn InvocationClient>, config: BenchConfig) -> Self {
        Self { client, config }
    }

    /// Run 1 cold + `config.warm_runs` warm invocations under `deadline`
    ///
    /// The warm-run count must be at least 1: the aggregate statistics are
    /// undefined over zero samples, so a zero count is rejected as invalid
    /// input before any attempt is issued.
    ///
    /// Application-level function errors are reported and do not stop the
    /// loop; whatever metrics were extractable (possibly 0/0) still count.
    /// A transport or deadline failure on any attempt propagates immediately
    /// and no later attempts are issued.
    pub async fn run(&self, endpoint: &TargetEndpoint, deadline: Deadline) -> Result<EndpointRuns> {
        if self.config.warm_runs == 0 {
            return Err(BenchError::invalid_input(
                "warm-run count must be at least 1",
            ));
        }

        let cold = self.attempt(endpoint, deadline, Run::Cold).await?;
        tracing::info!(
            endpoint = %endpoint.display_name(),
            billed_duration_ms = cold.billed_duration_ms,
            max_memory_used_mb = cold.max_memory_used_mb,
            "Cold run complete"
        );

        let mut acc = StatsAccumulator::new();
        for run in 1..=self.config.warm_runs {
            let sample = self.attempt(endpoint, deadline, Run::Warm(run)).await?;
            acc.record(sample);
        }
        let warm = acc.finalize();

        tracing::info!(
            endpoint = %endpoint.display_name(),
            total_runs = warm.total_runs,
            total_billed_duration_ms = warm.total_billed_duration_ms,
            average_duration_ms = warm.average_duration_ms,
            min_duration_ms = warm.min_duration_ms,
            max_duration_ms = warm.max_duration_ms,
            peak_memory_mb = warm.peak_memory_mb,
            "Warm runs complete"
        );

        Ok(EndpointRuns { cold, warm })
    }

    /// Issue a single invocation attempt and extract its metrics
    async fn attempt(
        &self,
        endpoint: &TargetEndpoint,
        deadline: Deadline,
        run: Run,
    ) -> Result<InvocationSample> {
        // Remaining budget recomputed per attempt; an elapsed deadline fails
        // the attempt before it is issued.
        let remaining = deadline
            .remaining()
            .ok_or_else(|| BenchError::deadline(endpoint.as_str()))?;

        // The transport is handed the remaining budget and is expected to
        // cancel at the connection level; the outer timeout holds the
        // deadline invariant even against a client that does not.
        let outcome = tokio::time::timeout(
            remaining,
            self.client.invoke(endpoint, &self.config.payload, remaining),
        )
        .await
        .map_err(|_| BenchError::deadline(endpoint.as_str()))??;

        let sample = match outcome.log_result.as_deref() {
            Some(encoded) if !encoded.is_empty() => decode_and_extract(endpoint, encoded),
            _ => InvocationSample::default(),
        };

        if let Some(function_error) = &outcome.function_error {
            tracing::error!(
                endpoint = %endpoint.display_name(),
                run = %run,
                error = %function_error,
                "Endpoint reported a function error"
            );
        }

        Ok(sample)
    }
}

/// Decode a base64 log tail and pull the metric lines out of it
///
/// An undecodable tail is treated the same as an absent one: zero metrics.
fn decode_and_extract(endpoint: &TargetEndpoint, encoded: &str) -> InvocationSample {
    let log_text = match BASE64.decode(encoded) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            tracing::warn!(
                endpoint = %endpoint.display_name(),
                error = %err,
                "Log tail was not valid base64, treating metrics as absent"
            );
            return InvocationSample::default();
        }
    };

    InvocationSample {
        billed_duration_ms: extract_billed_duration_ms(&log_text),
        max_memory_used_mb: extract_max_memory_used_mb(&log_text),
    }
}
