//! Persisted link list: a JSON array of absolute URL strings.
//!
//! The `scrape-links` entry point writes this file; `ingest-list` reads
//! it back as an alternative to live discovery.

use std::path::Path;

use tracing::info;
use url::Url;

use lexingest_shared::{LexIngestError, Result};

/// Write discovered links to `path` as a pretty-printed JSON array.
pub fn save_links(path: &Path, links: &[Url]) -> Result<()> {
    let strings: Vec<&str> = links.iter().map(Url::as_str).collect();
    let json = serde_json::to_string_pretty(&strings)
        .map_err(|e| LexIngestError::Discovery(format!("serializing link list: {e}")))?;

    std::fs::write(path, json).map_err(|e| LexIngestError::io(path, e))?;
    info!(?path, count = links.len(), "link list written");
    Ok(())
}

/// Load a previously persisted link list.
///
/// Unparseable entries fail the load rather than being silently dropped:
/// a corrupt link list should surface before any network work starts.
pub fn load_links(path: &Path) -> Result<Vec<Url>> {
    let content = std::fs::read_to_string(path).map_err(|e| LexIngestError::io(path, e))?;

    let strings: Vec<String> = serde_json::from_str(&content).map_err(|e| {
        LexIngestError::Discovery(format!("parsing link list {}: {e}", path.display()))
    })?;

    strings
        .iter()
        .map(|s| {
            Url::parse(s).map_err(|e| {
                LexIngestError::Discovery(format!("invalid URL '{s}' in link list: {e}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("lexingest-links-{nanos}-{name}"))
    }

    #[test]
    fn link_list_roundtrip() {
        let path = temp_file("roundtrip.json");
        let links = vec![
            Url::parse("https://example.com/files/A%20B.pdf").unwrap(),
            Url::parse("https://example.com/files/C.pdf").unwrap(),
        ];

        save_links(&path, &links).unwrap();
        let loaded = load_links(&path).unwrap();
        assert_eq!(loaded, links);

        // Persisted form is a plain JSON array of strings.
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0], "https://example.com/files/A%20B.pdf");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_link_list_is_an_io_error() {
        let path = temp_file("missing.json");
        let err = load_links(&path).unwrap_err();
        assert!(matches!(err, LexIngestError::Io { .. }));
    }

    #[test]
    fn invalid_url_fails_the_load() {
        let path = temp_file("bad.json");
        std::fs::write(&path, r#"["not a url"]"#).unwrap();
        let err = load_links(&path).unwrap_err();
        assert!(matches!(err, LexIngestError::Discovery(_)));
        let _ = std::fs::remove_file(&path);
    }
}
