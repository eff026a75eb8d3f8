// Cold-start Benchmark Core
//
// This crate provides a transport-agnostic harness for measuring cold-start
// and steady-state performance of remote invocable functions: one cold
// invocation, a configurable number of warm invocations, per-invocation
// metrics recovered from execution-log tails, and aggregate statistics per
// endpoint, all bounded by a shared deadline.
//
// Key design decisions:
// - Uses a trait (InvocationClient) for the pluggable transport backend
// - One Deadline per endpoint-test cycle, threaded down to every attempt and
//   carried to the transport as a per-request timeout
// - Best-effort log parsing: a missing metric label yields 0, never an error

pub mod config;
pub mod deadline;
pub mod driver;
pub mod endpoint;
pub mod error;
pub mod logs;
pub mod orchestrator;
pub mod stats;
pub mod traits;

// Re-exports for convenience
pub use config::BenchConfig;
pub use deadline::Deadline;
pub use driver::{EndpointRuns, InvocationDriver};
pub use endpoint::{EndpointMetadata, TargetEndpoint};
pub use error::{BenchError, Result};
pub use orchestrator::{EndpointOutcome, EndpointReport, Orchestrator};
pub use stats::{InvocationSample, RunStatistics, StatsAccumulator};
pub use traits::{InvocationClient, InvocationOutcome};
