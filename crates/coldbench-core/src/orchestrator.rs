// Benchmark orchestrator
//
// Iterates over the target endpoints in order, strictly sequentially: each
// endpoint is fully benchmarked (cold + warm runs) before the next one
// starts, so cross-endpoint contention cannot skew individual measurements.
//
// Failure isolation: a transport or deadline failure aborts only the current
// endpoint's test; it is reported, recorded in that endpoint's outcome, and
// the remaining endpoints still run. Only input validation fails the batch.

use std::sync::Arc;
use std::time::Duration;

use crate::config::BenchConfig;
use crate::deadline::Deadline;
use crate::driver::{EndpointRuns, InvocationDriver};
use crate::endpoint::{EndpointMetadata, TargetEndpoint};
use crate::error::{BenchError, Result};
use crate::traits::InvocationClient;

/// Outcome of one endpoint's test cycle
#[derive(Debug, Clone)]
pub enum EndpointOutcome {
    /// The full cold + warm cycle completed
    Completed(EndpointRuns),
    /// The cycle was aborted by a transport, deadline, or metadata failure
    Failed(String),
}

impl EndpointOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, EndpointOutcome::Completed(_))
    }

    pub fn runs(&self) -> Option<&EndpointRuns> {
        match self {
            EndpointOutcome::Completed(runs) => Some(runs),
            EndpointOutcome::Failed(_) => None,
        }
    }
}

/// Per-endpoint report, in input order
#[derive(Debug, Clone)]
pub struct EndpointReport {
    pub endpoint: TargetEndpoint,
    /// Metadata, when the registry lookup succeeded
    pub metadata: Option<EndpointMetadata>,
    pub outcome: EndpointOutcome,
}

/// Runs the benchmark over an ordered list of endpoints
pub struct Orchestrator {
    client: Arc<dyn InvocationClient>,
    driver: InvocationDriver,
    /// Overall time budget, split into one fresh deadline per endpoint from
    /// whatever remains when that endpoint's test begins
    budget: Duration,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn InvocationClient>, config: BenchConfig, budget: Duration) -> Self {
        Self {
            driver: InvocationDriver::new(client.clone(), config),
            client,
            budget,
        }
    }

    /// Benchmark every endpoint in order, returning per-endpoint reports
    ///
    /// An empty endpoint list is an input-validation failure raised before
    /// any invocation work begins.
    pub async fn run(&self, endpoints: &[TargetEndpoint]) -> Result<Vec<EndpointReport>> {
        if endpoints.is_empty() {
            tracing::error!("No target endpoints provided");
            return Err(BenchError::invalid_input(
                "target endpoint list cannot be empty",
            ));
        }

        tracing::info!(count = endpoints.len(), "Starting benchmark");
        let overall = Deadline::after(self.budget);

        let mut reports = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            reports.push(self.run_endpoint(endpoint, overall).await);
        }

        let completed = reports.iter().filter(|r| r.outcome.is_completed()).count();
        tracing::info!(
            completed,
            failed = reports.len() - completed,
            "Benchmark finished"
        );

        Ok(reports)
    }

    async fn run_endpoint(&self, endpoint: &TargetEndpoint, overall: Deadline) -> EndpointReport {
        let metadata = match self.client.fetch_metadata(endpoint).await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::error!(endpoint = %endpoint, error = %err, "Metadata lookup failed");
                return EndpointReport {
                    endpoint: endpoint.clone(),
                    metadata: None,
                    outcome: EndpointOutcome::Failed(err.to_string()),
                };
            }
        };

        tracing::info!(
            endpoint = %metadata.display_name,
            package_size_mb = metadata.package_size_mb(),
            "Testing function"
        );

        // Each endpoint gets a fresh deadline from the remaining overall
        // budget at the moment its test begins.
        let deadline = Deadline::after(overall.remaining().unwrap_or(Duration::ZERO));

        let outcome = match self.driver.run(endpoint, deadline).await {
            Ok(runs) => EndpointOutcome::Completed(runs),
            Err(err) => {
                tracing::error!(endpoint = %endpoint, error = %err, "Endpoint test aborted");
                EndpointOutcome::Failed(err.to_string())
            }
        };

        EndpointReport {
            endpoint: endpoint.clone(),
            metadata: Some(metadata),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InvocationOutcome;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Client that succeeds for every endpoint except the ones listed
    struct SelectiveClient {
        failing: Vec<&'static str>,
        invocations: AtomicUsize,
    }

    impl SelectiveClient {
        fn new(failing: Vec<&'static str>) -> Self {
            Self {
                failing,
                invocations: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl InvocationClient for SelectiveClient {
        async fn invoke(
            &self,
            endpoint: &TargetEndpoint,
            _payload: &Value,
            _timeout: Duration,
        ) -> Result<InvocationOutcome> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&endpoint.display_name()) {
                return Err(BenchError::transport("connection refused"));
            }
            Ok(InvocationOutcome {
                log_result: Some(
                    BASE64.encode("Billed Duration: 50 ms\nMax Memory Used: 64 MB"),
                ),
                function_error: None,
            })
        }

        async fn fetch_metadata(&self, endpoint: &TargetEndpoint) -> Result<EndpointMetadata> {
            Ok(EndpointMetadata {
                display_name: endpoint.display_name().to_string(),
                package_size_bytes: 2 * 1024 * 1024,
            })
        }
    }

    fn orchestrator(client: Arc<SelectiveClient>, warm_runs: u64) -> Orchestrator {
        Orchestrator::new(
            client,
            BenchConfig::new().with_warm_runs(warm_runs),
            Duration::from_secs(300),
        )
    }

    #[tokio::test]
    async fn empty_endpoint_list_is_an_input_error() {
        let client = Arc::new(SelectiveClient::new(vec![]));
        let err = orchestrator(client.clone(), 2).run(&[]).await.unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)));
        assert_eq!(client.invocations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn benchmarks_endpoints_in_order() {
        let client = Arc::new(SelectiveClient::new(vec![]));
        let endpoints = [
            TargetEndpoint::new("arn:aws:lambda:us-east-1:123:function:alpha"),
            TargetEndpoint::new("arn:aws:lambda:us-east-1:123:function:beta"),
        ];

        let reports = orchestrator(client.clone(), 3).run(&endpoints).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].endpoint.display_name(), "alpha");
        assert_eq!(reports[1].endpoint.display_name(), "beta");
        assert!(reports.iter().all(|r| r.outcome.is_completed()));
        // (1 cold + 3 warm) per endpoint
        assert_eq!(client.invocations.load(Ordering::SeqCst), 8);

        let runs = reports[0].outcome.runs().unwrap();
        assert_eq!(runs.cold.billed_duration_ms, 50);
        assert_eq!(runs.warm.total_runs, 3);
        assert_eq!(runs.warm.peak_memory_mb, 64);
    }

    #[tokio::test]
    async fn one_failing_endpoint_does_not_abort_the_batch() {
        let client = Arc::new(SelectiveClient::new(vec!["alpha"]));
        let endpoints = [
            TargetEndpoint::new("arn:aws:lambda:us-east-1:123:function:alpha"),
            TargetEndpoint::new("arn:aws:lambda:us-east-1:123:function:beta"),
        ];

        let reports = orchestrator(client, 2).run(&endpoints).await.unwrap();
        assert!(matches!(reports[0].outcome, EndpointOutcome::Failed(_)));
        assert!(reports[0].outcome.runs().is_none());
        assert!(reports[1].outcome.is_completed());
    }

    #[tokio::test]
    async fn metadata_is_attached_to_reports() {
        let client = Arc::new(SelectiveClient::new(vec![]));
        let endpoints = [TargetEndpoint::new("arn:aws:lambda:us-east-1:123:function:foo")];

        let reports = orchestrator(client, 1).run(&endpoints).await.unwrap();
        let metadata = reports[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.display_name, "foo");
        assert_eq!(metadata.package_size_mb(), 2.0);
    }
}
