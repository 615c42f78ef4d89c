//! Application configuration for lexingest.
//!
//! User config lives at `~/.lexingest/lexingest.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LexIngestError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "lexingest.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".lexingest";

// ---------------------------------------------------------------------------
// Config structs (matching lexingest.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output sink settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base origin used to resolve relative hyperlinks.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Listing page enumerating candidate PDF documents.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            listing_url: default_listing_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.fsc.gov.et".into()
}
fn default_listing_url() -> String {
    "https://www.fsc.gov.et/Digital-Law-Library/Publications/Federal-Cassation-Decision-Series/category/cassation-volumes-1".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for raw PDF artifacts.
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: String,

    /// Directory for persisted JSON records.
    #[serde(default = "default_record_dir")]
    pub record_dir: String,

    /// Path of the persisted link list (JSON array of URLs).
    #[serde(default = "default_link_list")]
    pub link_list: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pdf_dir: default_pdf_dir(),
            record_dir: default_record_dir(),
            link_list: default_link_list(),
        }
    }
}

fn default_pdf_dir() -> String {
    "downloaded_pdfs".into()
}
fn default_record_dir() -> String {
    "output_json".into()
}
fn default_link_list() -> String {
    "pdf_links.json".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout in seconds for the listing page fetch.
    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_secs: u64,

    /// Timeout in seconds for each document download.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_secs: default_discovery_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_discovery_timeout() -> u64 {
    30
}
fn default_fetch_timeout() -> u64 {
    60
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.lexingest/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LexIngestError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.lexingest/lexingest.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LexIngestError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        LexIngestError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LexIngestError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LexIngestError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LexIngestError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
