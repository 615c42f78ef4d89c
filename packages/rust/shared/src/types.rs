//! Core domain types for the ingestion pipeline.

use serde::{Deserialize, Serialize};
use url::Url;

/// Fixed classification applied to every ingested record.
pub const CATEGORY: &str = "CassationDecision";

/// Identity stem used when a URL has no usable final path segment.
const FALLBACK_STEM: &str = "document";

// ---------------------------------------------------------------------------
// DocumentIdentity
// ---------------------------------------------------------------------------

/// Deterministic, filesystem-safe key derived from a document URL.
///
/// The same URL always yields the same identity. The identity names both
/// the on-disk PDF artifact and the persisted record, which is what makes
/// re-running the pipeline idempotent: a record on disk at the identity's
/// key means the document is never fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentIdentity {
    /// Final path segment as it appears in the URL (original case,
    /// literal `%20` sequences preserved). Used for the PDF artifact.
    file_name: String,
    /// `file_name` with the extension stripped and `%20` replaced by `_`.
    stem: String,
}

impl DocumentIdentity {
    /// Derive the identity from a document URL.
    pub fn from_url(url: &Url) -> Self {
        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_STEM)
            .to_string();

        let without_ext = match file_name.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => file_name.as_str(),
        };
        let stem = without_ext.replace("%20", "_");

        Self { file_name, stem }
    }

    /// Build an identity from an explicit name (service boundary: the
    /// caller names the document instead of deriving it from a URL).
    pub fn from_name(name: &str) -> Self {
        let stem = name.trim().replace("%20", "_").replace(' ', "_");
        let stem = if stem.is_empty() {
            FALLBACK_STEM.to_string()
        } else {
            stem
        };
        Self {
            file_name: format!("{stem}.pdf"),
            stem,
        }
    }

    /// The record key and artifact stem.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name for the PDF artifact sink (original case preserved).
    pub fn pdf_file_name(&self) -> &str {
        &self.file_name
    }

    /// File name for the record sink.
    pub fn record_file_name(&self) -> String {
        format!("{}.json", self.stem)
    }

    /// Human-readable title: the stem with underscores rendered back
    /// to spaces.
    pub fn title(&self) -> String {
        self.stem.replace('_', " ")
    }
}

impl std::fmt::Display for DocumentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stem)
    }
}

// ---------------------------------------------------------------------------
// IngestedRecord
// ---------------------------------------------------------------------------

/// The canonical persisted output unit, one per ingested document.
///
/// Field names follow the downstream consumer's schema, so serde renames
/// are load-bearing: `sourceURL`, `dateIngested`, `caseFields`, etc.
/// The record is written once and never mutated; re-ingestion of the
/// same identity is skipped, not merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedRecord {
    /// Display title derived from the identity.
    pub title: String,
    /// Four-digit year inferred from the text, or empty.
    pub year: String,
    /// Original document URL.
    #[serde(rename = "sourceURL")]
    pub source_url: String,
    /// ISO-8601 calendar date of the ingestion run.
    #[serde(rename = "dateIngested")]
    pub date_ingested: String,
    /// Fixed classification.
    pub category: String,
    /// Fixed classification tags.
    pub tags: Vec<String>,
    /// Full extracted text, pages joined by newlines.
    pub content: String,
    /// Placeholder group for downstream case analysis.
    #[serde(rename = "caseFields")]
    pub case_fields: CaseFields,
    /// Placeholder group for downstream legislation analysis.
    #[serde(rename = "legisFields")]
    pub legis_fields: LegisFields,
    /// Placeholder group for downstream templating.
    #[serde(rename = "templateFields")]
    pub template_fields: TemplateFields,
}

/// Case-law placeholder group, empty at ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFields {
    pub issue: String,
    pub holding: String,
    pub ratio: String,
}

/// Legislation placeholder group, empty at ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegisFields {
    pub scope: String,
    #[serde(rename = "keyArticles")]
    pub key_articles: Vec<String>,
    #[serde(rename = "effectiveDate")]
    pub effective_date: String,
}

/// Templating placeholder group, empty at ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFields {
    pub placeholders: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_replaces_percent20_and_strips_extension() {
        let url = Url::parse("https://example.com/files/A%20B.pdf").unwrap();
        let id = DocumentIdentity::from_url(&url);
        assert_eq!(id.stem(), "A_B");
        assert_eq!(id.pdf_file_name(), "A%20B.pdf");
        assert_eq!(id.record_file_name(), "A_B.json");
        assert_eq!(id.title(), "A B");
    }

    #[test]
    fn identity_plain_name() {
        let url = Url::parse("https://example.com/C.pdf").unwrap();
        let id = DocumentIdentity::from_url(&url);
        assert_eq!(id.stem(), "C");
        assert_eq!(id.pdf_file_name(), "C.pdf");
    }

    #[test]
    fn identity_is_deterministic() {
        let url = Url::parse("https://example.com/vol/Cassation%20Volume%2012.pdf").unwrap();
        let a = DocumentIdentity::from_url(&url);
        let b = DocumentIdentity::from_url(&url);
        assert_eq!(a, b);
        assert_eq!(a.stem(), "Cassation_Volume_12");
    }

    #[test]
    fn identity_falls_back_on_empty_segment() {
        let url = Url::parse("https://example.com/").unwrap();
        let id = DocumentIdentity::from_url(&url);
        assert_eq!(id.stem(), "document");
    }

    #[test]
    fn identity_from_explicit_name() {
        let id = DocumentIdentity::from_name("Volume 3");
        assert_eq!(id.stem(), "Volume_3");
        assert_eq!(id.pdf_file_name(), "Volume_3.pdf");
    }

    #[test]
    fn record_serializes_with_consumer_field_names() {
        let record = IngestedRecord {
            title: "Volume 1".into(),
            year: "2003".into(),
            source_url: "https://example.com/Volume%201.pdf".into(),
            date_ingested: "2026-08-23".into(),
            category: CATEGORY.into(),
            tags: vec![CATEGORY.into()],
            content: "decided in 2003".into(),
            case_fields: CaseFields::default(),
            legis_fields: LegisFields::default(),
            template_fields: TemplateFields::default(),
        };

        let json = serde_json::to_string_pretty(&record).expect("serialize");
        assert!(json.contains("\"sourceURL\""));
        assert!(json.contains("\"dateIngested\""));
        assert!(json.contains("\"caseFields\""));
        assert!(json.contains("\"keyArticles\""));
        assert!(json.contains("\"effectiveDate\""));
        assert!(json.contains("\"templateFields\""));

        let parsed: IngestedRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.year, "2003");
        assert_eq!(parsed.tags, vec!["CassationDecision".to_string()]);
    }

    #[test]
    fn record_preserves_non_ascii_literally() {
        let record = IngestedRecord {
            title: "የሰበር ውሳኔ".into(),
            year: String::new(),
            source_url: "https://example.com/v.pdf".into(),
            date_ingested: "2026-08-23".into(),
            category: CATEGORY.into(),
            tags: vec![CATEGORY.into()],
            content: "የፌዴራል ጠቅላይ ፍርድ ቤት".into(),
            case_fields: CaseFields::default(),
            legis_fields: LegisFields::default(),
            template_fields: TemplateFields::default(),
        };

        let json = serde_json::to_string_pretty(&record).expect("serialize");
        assert!(json.contains("የሰበር ውሳኔ"));
        assert!(!json.contains("\\u"));
    }
}
