use anyhow::{Context, Result};
use lection_model::{PassageResponse, VerseRange};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::strip::strip_verse_text;

/// Fetch a verse range and return its cleaned plain text.
///
/// Composes `fetch_passage_html` with the text cleanup. A 404 from the
/// endpoint and a fragment that strips down to nothing both come back
/// as an empty string; everything else is an error.
pub async fn fetch_verse(
    verse_range: &str,
    show_verse_num: bool,
    endpoint: &str,
) -> Result<String> {
    match fetch_passage_html(verse_range, endpoint).await? {
        Some(html) => {
            let text = strip_verse_text(&html, show_verse_num).unwrap_or_default();
            tracing::info!(chars = text.len(), "Cleaned passage text");
            Ok(text)
        }
        None => Ok(String::new()),
    }
}

/// Fetch the raw passage HTML fragment for a verse range.
///
/// Makes exactly one GET request to `endpoint` + query token, asking
/// for JSON. HTTP 404 means the range is unknown and returns `Ok(None)`
/// whatever the body says. Every other status has its body interpreted
/// as a passage response; a body that does not parse as one is an
/// error.
pub async fn fetch_passage_html(verse_range: &str, endpoint: &str) -> Result<Option<String>> {
    let range = VerseRange::new(verse_range);
    let url = build_url(endpoint, &range);

    tracing::info!(url = %url, "Fetching passage");
    let client = reqwest::Client::builder()
        .user_agent("lection/0.1 (scripture passage tool)")
        .build()?;

    let response = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .context("Failed to fetch passage")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;
    tracing::info!(status = %status, bytes = body.len(), "Received response");

    let html = interpret_response(status, &body)?;
    if html.is_none() {
        tracing::info!(range = %range, "Range not found (404)");
    }
    Ok(html)
}

/// Decide what a response means. 404 is the one status with semantics
/// of its own (unknown range; the body is ignored). Every other status
/// has its body read as a passage response and fails if it is not one.
fn interpret_response(status: StatusCode, body: &str) -> Result<Option<String>> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    extract_passage_html(body).map(Some)
}

/// Pull the first range's HTML fragment out of a response body.
fn extract_passage_html(body: &str) -> Result<String> {
    let response: PassageResponse =
        serde_json::from_str(body).context("Response body is not valid passage JSON")?;

    let (key, html) = response.first_range()?;
    tracing::debug!(range = %key, bytes = html.len(), "Selected first range");

    Ok(html.to_string())
}

fn build_url(endpoint: &str, range: &VerseRange) -> String {
    format!("{endpoint}{}", range.query_token())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_strips_leading_zero() {
        let range = VerseRange::new("01 1:1");
        assert_eq!(
            build_url("https://example.com/api/range/?q=", &range),
            "https://example.com/api/range/?q=1 1:1"
        );
    }

    #[test]
    fn test_build_url_unpadded_unchanged() {
        let range = VerseRange::new("43 3:16-3:17");
        assert_eq!(
            build_url("https://example.com/api/range/?q=", &range),
            "https://example.com/api/range/?q=43 3:16-3:17"
        );
    }

    #[test]
    fn test_not_found_means_no_passage_whatever_the_body() {
        let result = interpret_response(StatusCode::NOT_FOUND, "<html>not json</html>").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_ok_response_yields_fragment() {
        let body = r#"{"ranges": {"43 3:16": {"html": "<p>x</p>"}}}"#;
        assert_eq!(
            interpret_response(StatusCode::OK, body).unwrap(),
            Some("<p>x</p>".to_string())
        );
    }

    #[test]
    fn test_only_404_short_circuits() {
        // A 500 still has its body interpreted; a styled error page
        // then fails as a malformed body.
        let body = r#"{"ranges": {"43 3:16": {"html": "<p>x</p>"}}}"#;
        assert!(interpret_response(StatusCode::INTERNAL_SERVER_ERROR, body).is_ok());
        assert!(
            interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>").is_err()
        );
    }

    #[test]
    fn test_extract_passage_html() {
        let body = r#"{"ranges": {"43 3:16": {"html": "<p>For God so loved</p>"}}}"#;
        assert_eq!(
            extract_passage_html(body).unwrap(),
            "<p>For God so loved</p>"
        );
    }

    #[test]
    fn test_extract_takes_first_range() {
        let body = r#"{
            "ranges": {
                "43 3:16": {"html": "first"},
                "01 1:1": {"html": "second"}
            }
        }"#;
        assert_eq!(extract_passage_html(body).unwrap(), "first");
    }

    #[test]
    fn test_extract_rejects_non_json() {
        assert!(extract_passage_html("<html>Server Error</html>").is_err());
    }

    #[test]
    fn test_extract_rejects_missing_ranges_field() {
        assert!(extract_passage_html(r#"{"verses": []}"#).is_err());
    }

    #[test]
    fn test_extract_rejects_empty_ranges() {
        assert!(extract_passage_html(r#"{"ranges": {}}"#).is_err());
    }

    #[test]
    fn test_extract_rejects_range_without_html() {
        assert!(extract_passage_html(r#"{"ranges": {"43 3:16": {}}}"#).is_err());
    }
}
