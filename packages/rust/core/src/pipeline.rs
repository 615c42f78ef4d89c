//! End-to-end ingestion: discover links once, then for each link run
//! fetch → validate → extract → infer → build → persist.
//!
//! Per-document state machine:
//! `Pending → Skipped(AlreadyExists) | Fetched → Rejected(NotPdf) |
//! Stored → ExtractFailed | TextEmpty(cleaned up) | Extracted → Built
//! → Persisted`. No failure of one document ever aborts the run; each
//! is caught at this boundary, logged with its URL and cause, and the
//! loop moves on.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info, instrument, warn};
use url::Url;

use lexingest_shared::{
    AppConfig, DocumentIdentity, IngestedRecord, LexIngestError, Result,
};

use crate::fetcher::DocumentFetcher;
use crate::metadata::infer_year;
use crate::record::build_record;
use crate::store::DocumentStore;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration for one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Listing page enumerating candidate documents.
    pub listing_url: Url,
    /// Base origin for resolving relative hyperlinks.
    pub base_url: Url,
    /// Directory for raw PDF artifacts.
    pub pdf_dir: PathBuf,
    /// Directory for persisted records.
    pub record_dir: PathBuf,
    /// Timeout for the listing page fetch.
    pub discovery_timeout: Duration,
    /// Timeout for each document download.
    pub fetch_timeout: Duration,
}

impl PipelineConfig {
    /// Build the runtime config from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        let listing_url = Url::parse(&config.source.listing_url).map_err(|e| {
            LexIngestError::config(format!(
                "invalid listing_url '{}': {e}",
                config.source.listing_url
            ))
        })?;
        let base_url = Url::parse(&config.source.base_url).map_err(|e| {
            LexIngestError::config(format!("invalid base_url '{}': {e}", config.source.base_url))
        })?;

        Ok(Self {
            listing_url,
            base_url,
            pdf_dir: PathBuf::from(&config.output.pdf_dir),
            record_dir: PathBuf::from(&config.output.record_dir),
            discovery_timeout: Duration::from_secs(config.http.discovery_timeout_secs),
            fetch_timeout: Duration::from_secs(config.http.fetch_timeout_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Summary and progress
// ---------------------------------------------------------------------------

/// Summary of a completed ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestSummary {
    /// Links found on the listing page (or loaded from the link list).
    pub links_discovered: usize,
    /// New records written this run.
    pub persisted: usize,
    /// Documents skipped because their record already existed.
    pub skipped_existing: usize,
    /// Responses rejected for not being PDFs.
    pub rejected: usize,
    /// Documents whose pipeline failed (network, parse, empty text).
    pub failed: usize,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a document's processing starts.
    fn document_started(&self, url: &str, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, summary: &IngestSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_started(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _summary: &IngestSummary) {}
}

/// Terminal success states of one document's pipeline. Rejections and
/// failures travel as errors and are tallied by the caller.
enum DocumentOutcome {
    Persisted,
    SkippedExisting,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// The ingestion orchestrator. Sequential by design: one document is
/// fully processed before the next begins, so the check-then-write on
/// the record sink never races with itself.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: DocumentFetcher,
    store: DocumentStore,
}

impl Pipeline {
    /// Build a pipeline: opens both sinks and the pooled HTTP client.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let fetcher = DocumentFetcher::new(config.fetch_timeout)?;
        let store = DocumentStore::open(&config.pdf_dir, &config.record_dir)?;

        Ok(Self {
            config,
            fetcher,
            store,
        })
    }

    /// The document store backing this pipeline.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Run discovery once, then ingest every discovered link.
    ///
    /// A discovery failure is surfaced in the log and yields an empty
    /// run (zero links) rather than an error: there is simply nothing
    /// to iterate over.
    #[instrument(skip_all, fields(listing_url = %self.config.listing_url))]
    pub async fn run(&self, progress: &dyn ProgressReporter) -> IngestSummary {
        progress.phase("Discovering PDF links");

        let links = match lexingest_discovery::discover_pdf_links(
            self.fetcher.client(),
            &self.config.listing_url,
            &self.config.base_url,
            self.config.discovery_timeout,
        )
        .await
        {
            Ok(links) => links,
            Err(e) => {
                error!(error = %e, "discovery failed, nothing to ingest");
                let summary = IngestSummary::default();
                progress.done(&summary);
                return summary;
            }
        };

        self.ingest_links(&links, progress).await
    }

    /// Ingest a prepared ordered sequence of document URLs.
    ///
    /// This is the alternate entry point fed from the persisted link
    /// list, and the second half of [`run`](Self::run).
    pub async fn ingest_links(
        &self,
        links: &[Url],
        progress: &dyn ProgressReporter,
    ) -> IngestSummary {
        let mut summary = IngestSummary {
            links_discovered: links.len(),
            ..Default::default()
        };

        progress.phase("Ingesting documents");

        for (i, url) in links.iter().enumerate() {
            progress.document_started(url.as_str(), i + 1, links.len());

            match self.ingest_document(url).await {
                Ok(DocumentOutcome::Persisted) => summary.persisted += 1,
                Ok(DocumentOutcome::SkippedExisting) => summary.skipped_existing += 1,
                Err(e) if e.is_rejection() => {
                    warn!(%url, error = %e, "not a PDF, skipping");
                    summary.rejected += 1;
                }
                Err(e) => {
                    error!(%url, error = %e, "document ingestion failed");
                    summary.failed += 1;
                }
            }
        }

        info!(
            links_discovered = summary.links_discovered,
            persisted = summary.persisted,
            skipped_existing = summary.skipped_existing,
            rejected = summary.rejected,
            failed = summary.failed,
            "ingestion run complete"
        );

        progress.done(&summary);
        summary
    }

    /// Run the full per-document pipeline for one URL.
    async fn ingest_document(&self, url: &Url) -> Result<DocumentOutcome> {
        let identity = DocumentIdentity::from_url(url);

        // Idempotency: a persisted record means done, no fetch at all.
        if self.store.record_exists(&identity) {
            info!(%url, identity = %identity, "skipping, record already exists");
            return Ok(DocumentOutcome::SkippedExisting);
        }

        info!(%url, identity = %identity, "processing document");

        let bytes = self.fetcher.fetch(url).await?;

        // The artifact is written before extraction so it survives a
        // later parse failure and can be inspected.
        self.store.write_pdf(&identity, &bytes)?;

        let text = lexingest_pdftext::extract_text(&bytes)?;

        if text.trim().is_empty() {
            // A download with no usable text is worthless; remove it so
            // no orphaned binary remains.
            self.store.remove_pdf(&identity)?;
            return Err(LexIngestError::NoTextExtracted {
                identity: identity.to_string(),
            });
        }

        let year = infer_year(&text);
        let record = build_record(&identity, url, text, year, Local::now().date_naive());

        self.store.write_record(&identity, &record)?;
        info!(%url, identity = %identity, "document persisted");

        Ok(DocumentOutcome::Persisted)
    }

    /// Ingest one explicitly named document synchronously and return
    /// its record (the service-boundary entry point).
    ///
    /// If a record already exists at the identity it is returned as-is;
    /// re-ingestion is skipped, never merged.
    #[instrument(skip_all, fields(identity = %identity, url = %pdf_url))]
    pub async fn ingest_single(
        &self,
        identity: &DocumentIdentity,
        pdf_url: &Url,
    ) -> Result<IngestedRecord> {
        if self.store.record_exists(identity) {
            info!("record already exists, returning persisted copy");
            return self.store.read_record(identity);
        }

        let bytes = self.fetcher.fetch(pdf_url).await?;
        self.store.write_pdf(identity, &bytes)?;

        let text = lexingest_pdftext::extract_text(&bytes)?;
        if text.trim().is_empty() {
            self.store.remove_pdf(identity)?;
            return Err(LexIngestError::NoTextExtracted {
                identity: identity.to_string(),
            });
        }

        let year = infer_year(&text);
        let record = build_record(identity, pdf_url, text, year, Local::now().date_naive());
        self.store.write_record(identity, &record)?;

        Ok(record)
    }
}
