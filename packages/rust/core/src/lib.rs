//! Per-document ingestion pipeline: discover → fetch → extract → infer
//! → build → persist, with skip-on-exists idempotency and per-document
//! failure isolation.

pub mod fetcher;
pub mod metadata;
pub mod pipeline;
pub mod record;
pub mod store;

pub use fetcher::DocumentFetcher;
pub use pipeline::{
    IngestSummary, Pipeline, PipelineConfig, ProgressReporter, SilentProgress,
};
pub use store::DocumentStore;
