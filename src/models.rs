//! Data models for issues and their rendered representations.
//!
//! This module defines the core data structures used throughout the
//! generator:
//! - [`Issue`]: one issue as deserialized from the GitHub REST payload
//! - [`RenderedPost`]: an issue paired with its converted HTML body
//!
//! Issues are immutable from this system's perspective; they are owned by
//! the remote repository and fetched fresh on every run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters of raw Markdown used for list and feed excerpts.
pub const EXCERPT_CHARS: usize = 100;

/// A single issue from the source repository, used as blog-post content.
///
/// Only the fields the generator consumes are deserialized; everything else
/// in the REST payload is ignored. `body` is optional because the API sends
/// `null` for issues opened without a description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    /// Unique issue number; keys the per-issue output file.
    pub number: u64,
    /// Issue title, used as the post title.
    pub title: String,
    /// Raw GitHub-Flavored-Markdown body.
    pub body: Option<String>,
    /// Creation timestamp, used as the publish date.
    pub created_at: DateTime<Utc>,
    /// Canonical URL of the issue on the forge.
    pub html_url: String,
    /// Present when the entry is actually a pull request. The REST issues
    /// listing interleaves pull requests with issues; the fetcher drops
    /// entries carrying this marker.
    #[serde(default, skip_serializing)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// The raw Markdown body, or the empty string for body-less issues.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// First [`EXCERPT_CHARS`] characters of the raw body.
    ///
    /// Operates on characters rather than bytes so a multi-byte body is
    /// never split mid-character.
    pub fn excerpt(&self) -> String {
        self.body_text().chars().take(EXCERPT_CHARS).collect()
    }

    /// Whether this listing entry is a pull request rather than an issue.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// An issue together with its converted HTML body, ready for the post
/// template and the feed.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub issue: Issue,
    /// HTML returned by the markdown rendering endpoint, verbatim.
    pub html_body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(number: u64, body: Option<&str>) -> Issue {
        Issue {
            number,
            title: format!("Issue {number}"),
            body: body.map(str::to_string),
            created_at: "2024-03-01T12:00:00Z".parse().unwrap(),
            html_url: format!("https://github.com/octocat/hello-world/issues/{number}"),
            pull_request: None,
        }
    }

    #[test]
    fn test_issue_deserialization() {
        let json = r#"{
            "number": 101,
            "title": "hello",
            "body": "first post",
            "created_at": "2024-03-01T12:00:00Z",
            "html_url": "https://github.com/octocat/hello-world/issues/101",
            "state": "open",
            "labels": []
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, 101);
        assert_eq!(issue.title, "hello");
        assert_eq!(issue.body.as_deref(), Some("first post"));
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_null_body_deserializes() {
        let json = r#"{
            "number": 7,
            "title": "no body",
            "body": null,
            "created_at": "2024-03-01T12:00:00Z",
            "html_url": "https://github.com/octocat/hello-world/issues/7"
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.body, None);
        assert_eq!(issue.body_text(), "");
        assert_eq!(issue.excerpt(), "");
    }

    #[test]
    fn test_pull_request_marker() {
        let json = r#"{
            "number": 8,
            "title": "a PR",
            "body": "diff",
            "created_at": "2024-03-01T12:00:00Z",
            "html_url": "https://github.com/octocat/hello-world/pull/8",
            "pull_request": {"url": "https://api.github.com/repos/octocat/hello-world/pulls/8"}
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.is_pull_request());
    }

    #[test]
    fn test_excerpt_is_first_100_chars_of_raw_body() {
        let body = "x".repeat(250);
        let issue = issue(1, Some(&body));
        assert_eq!(issue.excerpt(), "x".repeat(100));
    }

    #[test]
    fn test_excerpt_short_body_is_untruncated() {
        let issue = issue(2, Some("hello"));
        assert_eq!(issue.excerpt(), "hello");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(150);
        let issue = issue(3, Some(&body));
        assert_eq!(issue.excerpt(), "é".repeat(100));
    }

    #[test]
    fn test_issue_serializes_without_pull_request_field() {
        let json = serde_json::to_string(&issue(9, Some("body"))).unwrap();
        assert!(json.contains("\"number\":9"));
        assert!(!json.contains("pull_request"));
    }
}
