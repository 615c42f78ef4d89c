//! lexingest CLI — legal-document ingestion tool.
//!
//! Discovers PDF publications on the configured listing page, downloads
//! each exactly once, extracts its text, and persists structured JSON
//! records for downstream enrichment.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
