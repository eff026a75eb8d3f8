// Target endpoint model
//
// A TargetEndpoint is an opaque identifier (typically an ARN) naming a remote
// invocable function. It is read from input and never mutated.

use serde::{Deserialize, Serialize};

/// Bytes per MB for package-size display
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Opaque identifier for a remote invocable function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetEndpoint(String);

impl TargetEndpoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The full identifier as given
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable name: the last colon-delimited segment of the
    /// identifier (ARN format: arn:aws:lambda:region:account:function:name),
    /// or the full identifier if it contains no colon.
    pub fn display_name(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for TargetEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetEndpoint {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TargetEndpoint {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Descriptive metadata for an endpoint, fetched once per endpoint-test cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMetadata {
    /// Human-readable function name
    pub display_name: String,
    /// Deployed package size in bytes
    pub package_size_bytes: u64,
}

impl EndpointMetadata {
    /// Package size in MB, for display only
    pub fn package_size_mb(&self) -> f64 {
        self.package_size_bytes as f64 / BYTES_PER_MB
    }
}
