// Capability traits for pluggable transports
//
// These traits keep the benchmark core transport-agnostic:
// - HTTP implementation for production (coldbench-http)
// - Scripted in-memory implementations for tests

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::endpoint::{EndpointMetadata, TargetEndpoint};
use crate::error::Result;

/// Outcome of a single invocation attempt, as returned by the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOutcome {
    /// Base64-encoded execution-log tail, when the platform returned one
    pub log_result: Option<String>,
    /// Application-level error reported by the endpoint (the transport call
    /// itself succeeded)
    pub function_error: Option<String>,
}

/// Trait for the remote invocation capability
///
/// The client is stateless from the caller's perspective and is reused across
/// all attempts and endpoints; the harness issues calls strictly
/// sequentially, so no additional synchronization is required.
#[async_trait]
pub trait InvocationClient: Send + Sync {
    /// Invoke the endpoint once, requesting the full log tail
    ///
    /// `timeout` is the remaining deadline budget for this attempt. The
    /// implementation must cancel the underlying request (and release its
    /// connection) when the timeout elapses, surfacing a deadline error.
    async fn invoke(
        &self,
        endpoint: &TargetEndpoint,
        payload: &Value,
        timeout: Duration,
    ) -> Result<InvocationOutcome>;

    /// Resolve an endpoint identifier to its descriptive metadata
    async fn fetch_metadata(&self, endpoint: &TargetEndpoint) -> Result<EndpointMetadata>;
}
