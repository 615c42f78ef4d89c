//! Route handlers: full-run trigger and single-document ingestion.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use url::Url;

use lexingest_core::{Pipeline, SilentProgress};
use lexingest_shared::{DocumentIdentity, LexIngestError};

/// Build the service router.
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/run", post(run_ingest))
        .route("/ingest", post(ingest_document))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Request to ingest one explicitly named document.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Document identity, e.g. a volume name. Spaces become underscores.
    pub identity: String,
    /// Direct URL of the PDF.
    pub pdf_url: String,
    /// Free-form source label, recorded in the log only.
    #[serde(default)]
    pub source: Option<String>,
}

/// Response for a completed full run.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub status: String,
    pub links_discovered: usize,
    pub persisted: usize,
    pub skipped_existing: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Error payload returned for per-request failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(err: &LexIngestError) -> Response {
    let status = match err {
        LexIngestError::Discovery(_) | LexIngestError::Fetch(_) => StatusCode::BAD_GATEWAY,
        LexIngestError::NotPdf { .. }
        | LexIngestError::Extraction(_)
        | LexIngestError::NoTextExtracted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        LexIngestError::Config { .. }
        | LexIngestError::Persistence(_)
        | LexIngestError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Trigger a full discovery-and-ingest run and report its summary.
async fn run_ingest(State(pipeline): State<Arc<Pipeline>>) -> impl IntoResponse {
    info!("full ingestion run requested");
    let summary = pipeline.run(&SilentProgress).await;

    Json(RunResponse {
        status: "completed".into(),
        links_discovered: summary.links_discovered,
        persisted: summary.persisted,
        skipped_existing: summary.skipped_existing,
        rejected: summary.rejected,
        failed: summary.failed,
    })
}

/// Ingest one named document synchronously, returning the assembled
/// record, or an error payload on fetch/parse failure.
async fn ingest_document(
    State(pipeline): State<Arc<Pipeline>>,
    Json(request): Json<IngestRequest>,
) -> Response {
    let identity = DocumentIdentity::from_name(&request.identity);

    let pdf_url = match Url::parse(&request.pdf_url) {
        Ok(url) => url,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: format!("invalid pdf_url '{}': {e}", request.pdf_url),
                }),
            )
                .into_response();
        }
    };

    info!(
        identity = %identity,
        url = %pdf_url,
        source = request.source.as_deref().unwrap_or("unspecified"),
        "single-document ingestion requested"
    );

    match pipeline.ingest_single(&identity, &pdf_url).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => {
            warn!(identity = %identity, error = %e, "single-document ingestion failed");
            error_response(&e)
        }
    }
}
