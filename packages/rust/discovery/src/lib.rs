//! PDF link discovery for the listing page.
//!
//! The pipeline starts from one configured listing page that enumerates
//! candidate publications. Discovery fetches that page once and returns
//! the ordered, deduplicated sequence of absolute URLs for every
//! hyperlink whose target ends in `.pdf`. Relative hrefs are resolved
//! against the configured base origin.

mod link_list;

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};
use url::Url;

use lexingest_shared::{LexIngestError, Result};

pub use link_list::{load_links, save_links};

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch the listing page and return every `.pdf` hyperlink on it.
///
/// Duplicate URLs are collapsed to their first occurrence, preserving
/// page order. Fails with [`LexIngestError::Discovery`] when the page
/// is unreachable or returns a non-success status; the caller decides
/// whether that aborts the run (there is nothing to iterate over).
#[instrument(skip_all, fields(listing_url = %listing_url))]
pub async fn discover_pdf_links(
    client: &Client,
    listing_url: &Url,
    base_url: &Url,
    timeout: Duration,
) -> Result<Vec<Url>> {
    info!("scraping listing page for PDF links");

    let response = client
        .get(listing_url.as_str())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| LexIngestError::Discovery(format!("{listing_url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LexIngestError::Discovery(format!(
            "{listing_url}: HTTP {status}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LexIngestError::Discovery(format!("{listing_url}: body read failed: {e}")))?;

    let links = extract_pdf_links(&body, base_url);
    info!(count = links.len(), "PDF links discovered");

    Ok(links)
}

/// Select `.pdf` anchors from an HTML document, resolving relative
/// hrefs against `base_url` and deduplicating by first occurrence.
pub fn extract_pdf_links(html: &str, base_url: &Url) -> Vec<Url> {
    let doc = Html::parse_document(html);
    let pdf_sel = Selector::parse(r#"a[href$=".pdf"]"#).expect("static selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for el in doc.select(&pdf_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };

        let resolved = if href.starts_with("http://") || href.starts_with("https://") {
            Url::parse(href)
        } else {
            base_url.join(href)
        };

        match resolved {
            Ok(url) => {
                if seen.insert(url.to_string()) {
                    links.push(url);
                } else {
                    debug!(%url, "duplicate link on listing page, keeping first occurrence");
                }
            }
            Err(e) => {
                debug!(href, error = %e, "unresolvable href, skipping");
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.fsc.gov.et").unwrap()
    }

    #[test]
    fn extracts_and_resolves_relative_links() {
        let html = r#"<html><body>
            <a href="/files/Volume%201.pdf">Volume 1</a>
            <a href="https://cdn.example.com/Volume2.pdf">Volume 2</a>
            <a href="/about">About</a>
            <a href="/files/notes.txt">Notes</a>
        </body></html>"#;

        let links = extract_pdf_links(html, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[0].as_str(),
            "https://www.fsc.gov.et/files/Volume%201.pdf"
        );
        assert_eq!(links[1].as_str(), "https://cdn.example.com/Volume2.pdf");
    }

    #[test]
    fn duplicate_anchors_collapse_to_first_position() {
        let html = r#"<html><body>
            <a href="/a.pdf">first</a>
            <a href="/b.pdf">other</a>
            <a href="/a.pdf">again</a>
        </body></html>"#;

        let links = extract_pdf_links(html, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].path(), "/a.pdf");
        assert_eq!(links[1].path(), "/b.pdf");
    }

    #[test]
    fn page_without_pdf_links_yields_empty() {
        let html = "<html><body><a href=\"/x.html\">x</a></body></html>";
        assert!(extract_pdf_links(html, &base()).is_empty());
    }

    #[tokio::test]
    async fn discover_with_mock_server() {
        let server = wiremock::MockServer::start().await;

        let listing = r#"<html><body>
            <a href="/files/Cassation%20Volume%201.pdf">Vol 1</a>
            <a href="/files/Cassation%20Volume%201.pdf">Vol 1 (again)</a>
            <a href="/files/Volume2.pdf">Vol 2</a>
        </body></html>"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/listing"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(listing))
            .mount(&server)
            .await;

        let client = Client::new();
        let listing_url = Url::parse(&format!("{}/listing", server.uri())).unwrap();
        let base_url = Url::parse(&server.uri()).unwrap();

        let links = discover_pdf_links(&client, &listing_url, &base_url, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].path(), "/files/Cassation%20Volume%201.pdf");
    }

    #[tokio::test]
    async fn discover_non_success_is_an_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/listing"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = Client::new();
        let listing_url = Url::parse(&format!("{}/listing", server.uri())).unwrap();
        let base_url = Url::parse(&server.uri()).unwrap();

        let err = discover_pdf_links(&client, &listing_url, &base_url, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, LexIngestError::Discovery(_)));
        assert!(err.to_string().contains("503"));
    }
}
