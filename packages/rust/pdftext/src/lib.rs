//! PDF byte payload → plain text.
//!
//! Opens the stored payload as a paginated document and extracts text
//! page by page. Pages that yield no text (scanned images, decode
//! failures) contribute nothing rather than inserting blank entries;
//! the non-empty page texts are joined with a single newline. Whether
//! an entirely empty result is fatal is the orchestrator's call, since
//! it owns the artifact sink and the cleanup that goes with it.

use lopdf::Document;
use tracing::debug;

use lexingest_shared::{LexIngestError, Result};

/// Extract the text of every page, joined by newlines.
///
/// Fails with [`LexIngestError::Extraction`] only when the payload
/// cannot be opened as a PDF at all. Per-page extraction failures are
/// logged and treated as "page has no extractable text".
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| LexIngestError::Extraction(format!("not a valid PDF: {e}")))?;

    let mut pages_text: Vec<String> = Vec::new();

    for (page_num, _object_id) in doc.get_pages() {
        match doc.extract_text(&[page_num]) {
            Ok(text) => {
                let trimmed = text.trim_end();
                if trimmed.trim().is_empty() {
                    debug!(page = page_num, "page yielded no text, skipping");
                } else {
                    pages_text.push(trimmed.to_string());
                }
            }
            Err(e) => {
                debug!(page = page_num, error = %e, "page text extraction failed, skipping");
            }
        }
    }

    Ok(pages_text.join("\n"))
}
