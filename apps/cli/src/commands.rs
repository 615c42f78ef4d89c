//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use lexingest_core::{IngestSummary, Pipeline, PipelineConfig, ProgressReporter};
use lexingest_shared::{AppConfig, init_config, load_config};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// lexingest — ingest legal PDF publications into structured records.
#[derive(Parser)]
#[command(
    name = "lexingest",
    version,
    about = "Discover, download, and ingest legal PDF publications as structured JSON records.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Discover links on the listing page and ingest every document.
    Run {
        /// Override the configured listing page URL.
        #[arg(long)]
        listing: Option<String>,
    },

    /// Discover links only, writing them to the link list file.
    ScrapeLinks {
        /// Output path (defaults to the configured link list).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Ingest documents from a previously written link list.
    IngestList {
        /// Link list path (defaults to the configured link list).
        #[arg(long)]
        links: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "lexingest=info",
        1 => "lexingest=debug",
        _ => "lexingest=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run { listing } => cmd_run(listing.as_deref()).await,
        Command::ScrapeLinks { out } => cmd_scrape_links(out.as_deref()).await,
        Command::IngestList { links } => cmd_ingest_list(links.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn build_pipeline(config: &AppConfig, listing_override: Option<&str>) -> Result<Pipeline> {
    let mut pipeline_config = PipelineConfig::from_app_config(config)?;

    if let Some(listing) = listing_override {
        pipeline_config.listing_url =
            Url::parse(listing).map_err(|e| eyre!("invalid listing URL '{listing}': {e}"))?;
    }

    Ok(Pipeline::new(pipeline_config)?)
}

fn print_summary(summary: &IngestSummary) {
    println!();
    println!("  Ingestion run complete.");
    println!("  Links discovered: {}", summary.links_discovered);
    println!("  Persisted:        {}", summary.persisted);
    println!("  Skipped existing: {}", summary.skipped_existing);
    println!("  Rejected:         {}", summary.rejected);
    println!("  Failed:           {}", summary.failed);
    println!();
}

async fn cmd_run(listing: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let pipeline = build_pipeline(&config, listing)?;

    info!(
        listing_url = listing.unwrap_or(&config.source.listing_url),
        "starting discovery and ingestion"
    );

    let reporter = CliProgress::new();
    let summary = pipeline.run(&reporter).await;
    print_summary(&summary);

    Ok(())
}

async fn cmd_scrape_links(out: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let pipeline_config = PipelineConfig::from_app_config(&config)?;
    let out = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.link_list));

    let client = reqwest_client()?;
    let links = lexingest_discovery::discover_pdf_links(
        &client,
        &pipeline_config.listing_url,
        &pipeline_config.base_url,
        pipeline_config.discovery_timeout,
    )
    .await?;

    lexingest_discovery::save_links(&out, &links)?;
    println!("Extracted {} PDF URLs to {}", links.len(), out.display());

    Ok(())
}

async fn cmd_ingest_list(links: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let path = links
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.link_list));

    // The only fatal condition for the batch entry point: no link list.
    // Per-document failures are logged and absorbed by the pipeline.
    let links = lexingest_discovery::load_links(&path)
        .map_err(|e| eyre!("cannot load link list {}: {e}", path.display()))?;

    let pipeline = build_pipeline(&config, None)?;

    info!(count = links.len(), list = %path.display(), "ingesting from link list");

    let reporter = CliProgress::new();
    let summary = pipeline.ingest_links(&links, &reporter).await;
    print_summary(&summary);

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn reqwest_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(lexingest_core::fetcher::USER_AGENT)
        .build()?)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_started(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Processing [{current}/{total}] {url}"));
    }

    fn done(&self, _summary: &IngestSummary) {
        self.spinner.finish_and_clear();
    }
}
