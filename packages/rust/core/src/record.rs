//! Assembly of the canonical output record.

use chrono::NaiveDate;
use url::Url;

use lexingest_shared::{
    CATEGORY, CaseFields, DocumentIdentity, IngestedRecord, LegisFields, TemplateFields,
};

/// Assemble the persisted record for one document.
///
/// Pure function: upstream steps have already validated the inputs.
/// All placeholder groups are empty at ingestion time; they belong to
/// downstream enrichment.
pub fn build_record(
    identity: &DocumentIdentity,
    source_url: &Url,
    content: String,
    year: String,
    date_ingested: NaiveDate,
) -> IngestedRecord {
    IngestedRecord {
        title: identity.title(),
        year,
        source_url: source_url.to_string(),
        date_ingested: date_ingested.format("%Y-%m-%d").to_string(),
        category: CATEGORY.into(),
        tags: vec![CATEGORY.into()],
        content,
        case_fields: CaseFields::default(),
        legis_fields: LegisFields::default(),
        template_fields: TemplateFields::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_per_layout() {
        let url = Url::parse("https://example.com/files/Cassation%20Volume%201.pdf").unwrap();
        let identity = DocumentIdentity::from_url(&url);
        let date = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

        let record = build_record(
            &identity,
            &url,
            "decided in 2003".into(),
            "2003".into(),
            date,
        );

        assert_eq!(record.title, "Cassation Volume 1");
        assert_eq!(record.year, "2003");
        assert_eq!(
            record.source_url,
            "https://example.com/files/Cassation%20Volume%201.pdf"
        );
        assert_eq!(record.date_ingested, "2026-08-23");
        assert_eq!(record.category, "CassationDecision");
        assert_eq!(record.tags, vec!["CassationDecision".to_string()]);
        assert!(record.case_fields.issue.is_empty());
        assert!(record.legis_fields.key_articles.is_empty());
        assert!(record.template_fields.placeholders.is_empty());
    }
}
