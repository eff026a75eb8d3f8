// Coldbench CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: All results are reported through tracing; the process exit
// code distinguishes input errors and fully-failed batches.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coldbench_core::{BenchConfig, Orchestrator, TargetEndpoint};
use coldbench_http::HttpInvocationClient;

#[derive(Parser)]
#[command(name = "coldbench")]
#[command(about = "Benchmark cold-start and warm performance of remote functions")]
#[command(version)]
struct Cli {
    /// Target endpoint identifiers (ARNs), benchmarked in order
    #[arg(required = true)]
    endpoints: Vec<String>,

    /// Invocation API base URL
    #[arg(
        long,
        env = "COLDBENCH_ENDPOINT_URL",
        default_value = "https://lambda.us-east-1.amazonaws.com"
    )]
    endpoint_url: String,

    /// Bearer credential for the invocation API
    #[arg(long, env = "COLDBENCH_AUTH_TOKEN")]
    auth_token: Option<String>,

    /// Overall time budget in seconds
    #[arg(long, default_value = "900")]
    budget: u64,

    /// Warm invocations per endpoint (after the single cold one)
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    warm_runs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coldbench=info,coldbench_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut client = HttpInvocationClient::new(cli.endpoint_url.trim_end_matches('/'));
    if let Some(token) = &cli.auth_token {
        client = client.with_auth_token(token);
    }

    let endpoints: Vec<TargetEndpoint> = cli.endpoints.into_iter().map(TargetEndpoint::from).collect();

    let orchestrator = Orchestrator::new(
        Arc::new(client),
        BenchConfig::new().with_warm_runs(cli.warm_runs),
        Duration::from_secs(cli.budget),
    );

    let reports = orchestrator.run(&endpoints).await?;

    if reports.iter().all(|r| !r.outcome.is_completed()) {
        anyhow::bail!("every endpoint failed to complete its benchmark");
    }

    Ok(())
}
