// Lambda-style HTTP invocation client
//
// Invocation: POST /2015-03-31/functions/{id}/invocations with
// `X-Amz-Invocation-Type: RequestResponse` and `X-Amz-Log-Type: Tail`. The
// platform returns the base64-encoded log tail in the `X-Amz-Log-Result`
// response header and flags application-level failures with
// `X-Amz-Function-Error`.
//
// Metadata: GET /2015-03-31/functions/{id}, which carries the function name
// and deployed package size in its Configuration block.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use coldbench_core::{
    BenchError, EndpointMetadata, InvocationClient, InvocationOutcome, Result, TargetEndpoint,
};

const INVOCATION_TYPE_HEADER: &str = "X-Amz-Invocation-Type";
const LOG_TYPE_HEADER: &str = "X-Amz-Log-Type";
const LOG_RESULT_HEADER: &str = "X-Amz-Log-Result";
const FUNCTION_ERROR_HEADER: &str = "X-Amz-Function-Error";

/// HTTP implementation of the invocation capability
///
/// Stateless from the caller's perspective; one instance is shared across
/// all attempts and endpoints. Each request carries the attempt's remaining
/// deadline as its timeout, so an expired deadline aborts the request and
/// releases the connection rather than waiting for a natural response.
#[derive(Clone)]
pub struct HttpInvocationClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpInvocationClient {
    /// Create a client against the given API endpoint (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attach a bearer credential to every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn invoke_url(&self, endpoint: &TargetEndpoint) -> String {
        format!(
            "{}/2015-03-31/functions/{}/invocations",
            self.base_url,
            endpoint.as_str()
        )
    }

    fn metadata_url(&self, endpoint: &TargetEndpoint) -> String {
        format!("{}/2015-03-31/functions/{}", self.base_url, endpoint.as_str())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Map a reqwest failure: an elapsed timeout is a deadline condition, the
/// rest are transport faults.
fn map_request_error(endpoint: &TargetEndpoint, err: reqwest::Error) -> BenchError {
    if err.is_timeout() {
        BenchError::deadline(endpoint.as_str())
    } else {
        BenchError::transport(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GetFunctionResponse {
    #[serde(rename = "Configuration")]
    configuration: FunctionConfiguration,
}

#[derive(Debug, Deserialize)]
struct FunctionConfiguration {
    #[serde(rename = "FunctionName")]
    function_name: String,
    #[serde(rename = "CodeSize")]
    code_size: u64,
}

#[async_trait]
impl InvocationClient for HttpInvocationClient {
    async fn invoke(
        &self,
        endpoint: &TargetEndpoint,
        payload: &Value,
        timeout: Duration,
    ) -> Result<InvocationOutcome> {
        tracing::debug!(endpoint = %endpoint, timeout_ms = timeout.as_millis() as u64, "Invoking function");

        let request = self
            .client
            .post(self.invoke_url(endpoint))
            .header(INVOCATION_TYPE_HEADER, "RequestResponse")
            .header(LOG_TYPE_HEADER, "Tail")
            .timeout(timeout)
            .json(payload);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| map_request_error(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BenchError::transport(format!(
                "invoke returned {status} for {endpoint}"
            )));
        }

        let outcome = InvocationOutcome {
            log_result: header_string(response.headers(), LOG_RESULT_HEADER),
            function_error: header_string(response.headers(), FUNCTION_ERROR_HEADER),
        };

        // Drain the function's response body so the connection is returned
        // to the pool; the harness only cares about the log headers.
        response
            .bytes()
            .await
            .map_err(|err| map_request_error(endpoint, err))?;

        Ok(outcome)
    }

    async fn fetch_metadata(&self, endpoint: &TargetEndpoint) -> Result<EndpointMetadata> {
        let request = self.client.get(self.metadata_url(endpoint));
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| BenchError::metadata(err.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BenchError::metadata(format!("function not found: {endpoint}")));
        }
        if !response.status().is_success() {
            return Err(BenchError::metadata(format!(
                "metadata lookup returned {} for {endpoint}",
                response.status()
            )));
        }

        let body: GetFunctionResponse = response
            .json()
            .await
            .map_err(|err| BenchError::metadata(err.to_string()))?;

        Ok(EndpointMetadata {
            display_name: body.configuration.function_name,
            package_size_bytes: body.configuration.code_size,
        })
    }
}

impl std::fmt::Debug for HttpInvocationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInvocationClient")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
