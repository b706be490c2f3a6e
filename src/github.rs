//! GitHub REST client for issue listing and markdown rendering.
//!
//! This module talks to the two hosted endpoints the generator depends on:
//!
//! 1. **Issue listing**: `GET /repos/{owner}/{repo}/issues`, paginated.
//!    The full list is materialized into a `Vec` up front because it is
//!    consumed several times downstream (index page, per-issue pages, feed).
//! 2. **Markdown rendering**: `POST /markdown` with `{text, mode: "gfm"}`.
//!    The 2xx response body is the rendered HTML, returned verbatim.
//!
//! Authentication failures and unknown repositories surface as HTTP errors
//! from the listing call and abort the run. The markdown boundary is the one
//! place failures are wrapped: every transport error or non-2xx status
//! becomes a [`MarkdownError`] carrying the original message, with no retry
//! and no backoff.

use crate::models::Issue;
use reqwest::{header, Client, StatusCode};
use serde_json::json;
use std::error::Error;
use thiserror::Error as ThisError;
use tracing::{debug, info, instrument};

const API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// Error wrapping any failure of the markdown rendering endpoint.
///
/// Callers cannot distinguish a timeout from a rate limit through this type;
/// the original status and message are only recoverable from its text.
#[derive(Debug, ThisError)]
#[error("markdown rendering failed: {0}")]
pub struct MarkdownError(pub String);

/// Authenticated client for the GitHub REST API.
pub struct GithubClient {
    client: Client,
}

impl GithubClient {
    /// Build a client that sends the token on every request.
    pub fn new(token: &str) -> Result<Self, Box<dyn Error>> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("token {token}"))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the complete open-issue list for `owner/name`, in API order.
    ///
    /// Pages of [`PER_PAGE`] are requested until a short page arrives. Pull
    /// requests, which the listing endpoint interleaves with issues, are
    /// dropped. An invalid token or missing repository propagates as the
    /// HTTP error of the first request.
    #[instrument(level = "info", skip(self))]
    pub async fn list_issues(&self, repo: &str) -> Result<Vec<Issue>, Box<dyn Error>> {
        let (owner, name) = parse_repo(repo)?;
        let url = format!("{API_BASE_URL}/repos/{owner}/{name}/issues");

        let per_page = PER_PAGE.to_string();
        let mut issues = Vec::new();
        let mut page = 1usize;
        loop {
            let page_param = page.to_string();
            let batch: Vec<Issue> = self
                .client
                .get(&url)
                .query(&[
                    ("state", "open"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            debug!(page, count = batch.len(), "Fetched issue page");
            let last_page = batch.len() < PER_PAGE;
            issues.extend(without_pull_requests(batch));
            if last_page {
                break;
            }
            page += 1;
        }

        info!(repo, count = issues.len(), "Fetched issue list");
        Ok(issues)
    }

    /// Convert one raw GFM string to HTML via `POST /markdown`.
    ///
    /// One network request per call; no batching, no caching. The rendered
    /// HTML is returned exactly as the endpoint sent it.
    #[instrument(level = "info", skip_all, fields(bytes = text.len()))]
    pub async fn render_markdown(&self, text: &str) -> Result<String, MarkdownError> {
        let response = self
            .client
            .post(format!("{API_BASE_URL}/markdown"))
            .json(&json!({ "text": text, "mode": "gfm" }))
            .send()
            .await
            .map_err(|e| MarkdownError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_failure(status, &body));
        }

        response.text().await.map_err(|e| MarkdownError(e.to_string()))
    }
}

/// Split an "owner/name" repository identifier.
fn parse_repo(repo: &str) -> Result<(&str, &str), Box<dyn Error>> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(format!("invalid repository '{repo}', expected owner/name").into()),
    }
}

/// Wrap a non-2xx markdown response, keeping status and body recoverable
/// from the error text.
fn http_failure(status: StatusCode, body: &str) -> MarkdownError {
    MarkdownError(format!("endpoint returned {status}: {body}"))
}

/// The issues listing includes pull requests; drop them.
fn without_pull_requests(batch: Vec<Issue>) -> impl Iterator<Item = Issue> {
    batch.into_iter().filter(|issue| !issue.is_pull_request())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(parse_repo("octocat/hello-world").unwrap(), ("octocat", "hello-world"));
    }

    #[test]
    fn test_parse_repo_rejects_malformed() {
        for bad in ["octocat", "octocat/", "/hello-world", "a/b/c", ""] {
            let err = parse_repo(bad).unwrap_err();
            assert!(err.to_string().contains("expected owner/name"), "{bad}");
        }
    }

    #[test]
    fn test_http_failure_keeps_status_and_body() {
        let err = http_failure(StatusCode::FORBIDDEN, "API rate limit exceeded");
        let text = err.to_string();
        assert!(text.contains("markdown rendering failed"));
        assert!(text.contains("403"));
        assert!(text.contains("API rate limit exceeded"));
    }

    #[test]
    fn test_without_pull_requests_filters_marked_entries() {
        let batch: Vec<Issue> = serde_json::from_str(
            r#"[
                {"number": 1, "title": "issue", "body": "a",
                 "created_at": "2024-03-01T12:00:00Z",
                 "html_url": "https://github.com/o/r/issues/1"},
                {"number": 2, "title": "pr", "body": "b",
                 "created_at": "2024-03-01T12:00:00Z",
                 "html_url": "https://github.com/o/r/pull/2",
                 "pull_request": {"url": "https://api.github.com/repos/o/r/pulls/2"}}
            ]"#,
        )
        .unwrap();

        let issues: Vec<Issue> = without_pull_requests(batch).collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].number, 1);
    }

    #[test]
    fn test_client_rejects_token_with_control_chars() {
        assert!(GithubClient::new("bad\ntoken").is_err());
    }
}
