//! Single-attempt document retrieval with content-type validation.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use lexingest_shared::{LexIngestError, Result};

/// User-Agent string for all pipeline requests.
pub const USER_AGENT: &str = concat!("lexingest/", env!("CARGO_PKG_VERSION"));

/// Retrieves PDF byte payloads over HTTP.
///
/// Holds one pooled [`Client`] reused across every document in a run.
/// Each fetch is a single bounded-timeout attempt; retry policy is
/// deliberately out of scope.
pub struct DocumentFetcher {
    client: Client,
    timeout: Duration,
}

impl DocumentFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| LexIngestError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// The underlying pooled client, shared with discovery.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetch the raw byte payload for a document URL.
    ///
    /// Fails with [`LexIngestError::Fetch`] on network failure or a
    /// non-success status, and with [`LexIngestError::NotPdf`] when the
    /// declared content type does not contain `application/pdf` — the
    /// latter is a deliberate skip the orchestrator handles separately.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "downloading document");

        let response = self
            .client
            .get(url.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LexIngestError::Fetch(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LexIngestError::Fetch(format!("{url}: HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("application/pdf") {
            return Err(LexIngestError::NotPdf {
                url: url.to_string(),
                content_type,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LexIngestError::Fetch(format!("{url}: body read failed: {e}")))?;

        Ok(bytes.to_vec())
    }
}
