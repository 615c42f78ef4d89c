//! lexingest HTTP service — a thin adapter over the ingestion pipeline.
//!
//! Exposes two operations: trigger a full discovery-and-ingest run, and
//! ingest a single explicitly named document synchronously.

mod routes;

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use lexingest_core::{Pipeline, PipelineConfig};
use lexingest_shared::load_config;
use tracing::info;

/// lexingest HTTP service.
#[derive(Parser)]
#[command(name = "lexingest-server", version, about = "HTTP adapter for the lexingest pipeline.")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "lexingest=info,tower_http=info",
        1 => "lexingest=debug,tower_http=debug",
        _ => "lexingest=trace,tower_http=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let config = load_config()?;
    let pipeline = Pipeline::new(PipelineConfig::from_app_config(&config)?)?;
    let app = routes::router(Arc::new(pipeline));

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!(bind = %args.bind, "lexingest server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
