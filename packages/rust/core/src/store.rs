//! The two per-document sinks: raw PDF artifacts and JSON records.
//!
//! Both are flat directories keyed by [`DocumentIdentity`]. The record
//! sink doubles as the idempotency check: a record on disk means the
//! document is done and is never re-fetched. A PDF artifact without a
//! record does NOT count as done — it is re-fetched on the next run.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use lexingest_shared::{DocumentIdentity, IngestedRecord, LexIngestError, Result};

/// Filesystem sinks for PDF bytes and ingested records.
pub struct DocumentStore {
    pdf_dir: PathBuf,
    record_dir: PathBuf,
}

impl DocumentStore {
    /// Open the store, creating both directories if needed.
    pub fn open(pdf_dir: impl Into<PathBuf>, record_dir: impl Into<PathBuf>) -> Result<Self> {
        let pdf_dir = pdf_dir.into();
        let record_dir = record_dir.into();

        std::fs::create_dir_all(&pdf_dir).map_err(|e| LexIngestError::io(&pdf_dir, e))?;
        std::fs::create_dir_all(&record_dir).map_err(|e| LexIngestError::io(&record_dir, e))?;

        Ok(Self {
            pdf_dir,
            record_dir,
        })
    }

    /// Path of the PDF artifact for an identity.
    pub fn pdf_path(&self, identity: &DocumentIdentity) -> PathBuf {
        self.pdf_dir.join(identity.pdf_file_name())
    }

    /// Path of the persisted record for an identity.
    pub fn record_path(&self, identity: &DocumentIdentity) -> PathBuf {
        self.record_dir.join(identity.record_file_name())
    }

    /// The idempotency check: has this identity already been ingested?
    pub fn record_exists(&self, identity: &DocumentIdentity) -> bool {
        self.record_path(identity).exists()
    }

    /// Write the raw PDF bytes, prior to extraction, so the artifact
    /// exists even if later steps fail.
    pub fn write_pdf(&self, identity: &DocumentIdentity, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.pdf_path(identity);
        std::fs::write(&path, bytes).map_err(|e| LexIngestError::io(&path, e))?;
        debug!(?path, len = bytes.len(), "PDF artifact written");
        Ok(path)
    }

    /// Remove a stored PDF artifact (cleanup of a useless download).
    pub fn remove_pdf(&self, identity: &DocumentIdentity) -> Result<()> {
        let path = self.pdf_path(identity);
        std::fs::remove_file(&path).map_err(|e| LexIngestError::io(&path, e))?;
        info!(?path, "removed PDF artifact with no extractable text");
        Ok(())
    }

    /// Persist the record as pretty-printed UTF-8 JSON. Non-ASCII
    /// characters are preserved literally, not escaped.
    pub fn write_record(
        &self,
        identity: &DocumentIdentity,
        record: &IngestedRecord,
    ) -> Result<PathBuf> {
        let path = self.record_path(identity);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| LexIngestError::Persistence(format!("serializing record: {e}")))?;

        std::fs::write(&path, json).map_err(|e| LexIngestError::io(&path, e))?;
        info!(?path, "record written");
        Ok(path)
    }

    /// Read back a persisted record.
    pub fn read_record(&self, identity: &DocumentIdentity) -> Result<IngestedRecord> {
        let path = self.record_path(identity);
        let content = std::fs::read_to_string(&path).map_err(|e| LexIngestError::io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            LexIngestError::Persistence(format!("parsing record {}: {e}", path.display()))
        })
    }

    /// PDF artifact directory.
    pub fn pdf_dir(&self) -> &Path {
        &self.pdf_dir
    }

    /// Record directory.
    pub fn record_dir(&self) -> &Path {
        &self.record_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexingest_shared::{CaseFields, LegisFields, TemplateFields};
    use url::Url;

    fn temp_store(name: &str) -> (DocumentStore, PathBuf) {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let root = std::env::temp_dir().join(format!("lexingest-store-{nanos}-{name}"));
        let store = DocumentStore::open(root.join("pdfs"), root.join("records")).unwrap();
        (store, root)
    }

    fn sample_record() -> IngestedRecord {
        IngestedRecord {
            title: "Volume 1".into(),
            year: "2003".into(),
            source_url: "https://example.com/Volume%201.pdf".into(),
            date_ingested: "2026-08-23".into(),
            category: "CassationDecision".into(),
            tags: vec!["CassationDecision".into()],
            content: "የሰበር ውሳኔ decided in 2003".into(),
            case_fields: CaseFields::default(),
            legis_fields: LegisFields::default(),
            template_fields: TemplateFields::default(),
        }
    }

    #[test]
    fn pdf_artifact_keeps_original_file_name() {
        let (store, root) = temp_store("pdf-name");
        let url = Url::parse("https://example.com/Volume%201.pdf").unwrap();
        let id = DocumentIdentity::from_url(&url);

        let path = store.write_pdf(&id, b"%PDF-1.5").unwrap();
        assert_eq!(path.file_name().unwrap(), "Volume%201.pdf");
        assert!(path.exists());

        store.remove_pdf(&id).unwrap();
        assert!(!path.exists());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn record_roundtrip_and_existence() {
        let (store, root) = temp_store("record");
        let url = Url::parse("https://example.com/Volume%201.pdf").unwrap();
        let id = DocumentIdentity::from_url(&url);

        assert!(!store.record_exists(&id));
        store.write_record(&id, &sample_record()).unwrap();
        assert!(store.record_exists(&id));

        let loaded = store.read_record(&id).unwrap();
        assert_eq!(loaded.title, "Volume 1");

        // Indented, with non-ASCII preserved literally.
        let raw = std::fs::read_to_string(store.record_path(&id)).unwrap();
        assert!(raw.contains("\n  \"title\""));
        assert!(raw.contains("የሰበር"));
        assert!(!raw.contains("\\u"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn pdf_artifact_alone_does_not_mark_document_done() {
        let (store, root) = temp_store("partial");
        let url = Url::parse("https://example.com/C.pdf").unwrap();
        let id = DocumentIdentity::from_url(&url);

        store.write_pdf(&id, b"%PDF-1.5").unwrap();
        assert!(!store.record_exists(&id));

        let _ = std::fs::remove_dir_all(&root);
    }
}
