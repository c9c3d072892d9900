//! Generation worker binary.
//!
//! Reads one job description from the environment, runs it through the
//! orchestrator, relays progress notifications to the log, and prints
//! the final outcome as JSON on stdout.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediaforge_orchestrator::{run_job, ChannelSink};
use mediaforge_provider::HttpOperationsClient;
use mediaforge_storage::HttpArtifactStager;

mod config;

use config::WorkerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediaforge_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            std::process::exit(1);
        }
    };

    let client = match HttpOperationsClient::new(config.provider.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build provider client");
            std::process::exit(1);
        }
    };
    let stager = HttpArtifactStager::new();

    // Ctrl-C cancels the caller lifetime; the poller handles the rest.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received; cancelling job");
            signal_cancel.cancel();
        }
    });

    let (sink, mut notifications) = ChannelSink::new();
    let relay = tokio::spawn(async move {
        while let Some(n) = notifications.recv().await {
            match n.progress_percent {
                Some(percent) => {
                    tracing::info!(status = ?n.status, percent, "{}", n.message);
                }
                None => {
                    tracing::info!(status = ?n.status, "{}", n.message);
                }
            }
        }
    });

    let outcome = run_job(
        &client,
        &stager,
        &config.spec,
        &sink,
        &cancel,
        &config.poller,
    )
    .await;

    drop(sink);
    let _ = relay.await;

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialize outcome"),
    }
}
