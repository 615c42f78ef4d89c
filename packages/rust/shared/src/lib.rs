//! Shared types, error model, and configuration for lexingest.
//!
//! This crate is the foundation depended on by all other lexingest crates.
//! It provides:
//! - [`LexIngestError`] — the unified error type
//! - Domain types ([`DocumentIdentity`], [`IngestedRecord`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, HttpConfig, OutputConfig, SourceConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{LexIngestError, Result};
pub use types::{
    CATEGORY, CaseFields, DocumentIdentity, IngestedRecord, LegisFields, TemplateFields,
};
