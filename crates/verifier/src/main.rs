use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use signing_interceptor::SigningConfig;
use signing_verifier::{AppState, run, tolerance_from_secs};
use tracing::info;

#[derive(Parser)]
struct Args {
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    #[clap(long, default_value = "1337")]
    port: u16,
    #[clap(long, env = "SIGNING_SECRET_KEY", hide_env_values = true)]
    signing_secret_key: String,
    #[clap(long, env = "SIGNING_ALGORITHM", default_value = "SHA-256")]
    signing_algorithm: String,
    #[clap(long, env = "TIMESTAMP_TOLERANCE_SECS", default_value = "10")]
    timestamp_tolerance_secs: u64,
}

/// `VERIFIER_LOG_FORMAT=json` switches to JSON lines; `RUST_LOG` sets the level.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let format = std::env::var("VERIFIER_LOG_FORMAT")
        .unwrap_or_else(|_| "pretty".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("signing_verifier=info,signing_interceptor=info"));

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = SigningConfig::new(args.signing_secret_key, args.signing_algorithm);
    if let Err(e) = config.algorithm() {
        anyhow::bail!("invalid --signing-algorithm: {e}");
    }

    let tolerance = tolerance_from_secs(args.timestamp_tolerance_secs)?;
    let state = AppState::new(Arc::new(config)).with_timestamp_tolerance(tolerance);

    info!("Starting verifier");
    run(args.host, args.port, state).await
}
