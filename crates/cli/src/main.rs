//! `x1` -- command-line client for the X1 dataset API.
//!
//! # Environment variables
//!
//! | Variable                  | Required | Default                     | Description                  |
//! |---------------------------|----------|-----------------------------|------------------------------|
//! | `X1_API_URL`              | no       | `http://localhost:8190/api` | Backend API base URL         |
//! | `X1_API_TOKEN`            | no       | --                          | Bearer token for the backend |
//! | `X1_REQUEST_TIMEOUT_SECS` | no       | `30`                        | Per-request timeout          |
//! | `RUST_LOG`                | no       | `x1=info`                   | Log filter                   |

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use x1_cli::commands::{self, Cli};
use x1_client::config::ClientConfig;
use x1_client::{DatasetApi, ReqwestClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "x1=info,x1_cli=info,x1_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;

    tracing::debug!(api_url = %config.api_url, "Starting x1");

    let api = DatasetApi::new(ReqwestClient::new(&config)?);

    let signal = CancellationToken::new();
    let ctrl_c = signal.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight request");
            ctrl_c.cancel();
        }
    });

    let output = commands::run(&api, cli.command, &signal).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
