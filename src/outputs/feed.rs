//! Atom feed generation.
//!
//! One entry per issue: id and alternate link point at the generated page
//! when a base URL is configured and fall back to the issue's canonical URL
//! otherwise; the summary is an excerpt of the raw Markdown body while the
//! content carries the full converted HTML. Conversions are reused from the
//! post-rendering stage, so building the feed costs no extra network calls.

use crate::config::SiteConfig;
use crate::models::RenderedPost;
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, Link, LinkBuilder, Text,
};
use chrono::Utc;
use std::error::Error;
use tracing::{info, instrument};

use super::tree;

/// Build the feed document for a repository's posts.
pub fn build_feed(config: &SiteConfig, repo: &str, posts: &[RenderedPost]) -> Feed {
    let feed_id = match &config.base_url {
        Some(base) => base.to_string(),
        None => format!("https://github.com/{repo}"),
    };

    FeedBuilder::default()
        .title(Text::plain(repo))
        .id(feed_id.clone())
        .updated(latest_update(posts))
        .links(vec![alternate_link(feed_id)])
        .entries(
            posts
                .iter()
                .map(|post| entry(config, post))
                .collect::<Vec<_>>(),
        )
        .build()
}

/// Serialize the feed for `posts` to `atom.xml` in the output tree.
#[instrument(level = "info", skip_all, fields(count = posts.len()))]
pub async fn write_feed(
    config: &SiteConfig,
    repo: &str,
    posts: &[RenderedPost],
) -> Result<(), Box<dyn Error>> {
    let feed = build_feed(config, repo, posts);
    let xml = feed.write_to(Vec::new())?;
    tree::write_page(&config.feed_path(), &String::from_utf8(xml)?).await?;
    info!(path = %config.feed_path().display(), "Wrote Atom feed");
    Ok(())
}

fn entry(config: &SiteConfig, post: &RenderedPost) -> Entry {
    let issue = &post.issue;
    let url = match config.post_url(issue.number) {
        Some(url) => url.to_string(),
        None => issue.html_url.clone(),
    };
    let date = issue.created_at.fixed_offset();

    EntryBuilder::default()
        .id(url.clone())
        .title(Text::plain(issue.title.clone()))
        .updated(date)
        .published(date)
        .links(vec![alternate_link(url)])
        .summary(Text::plain(issue.excerpt()))
        .content(
            ContentBuilder::default()
                .value(post.html_body.clone())
                .content_type("html".to_string())
                .build(),
        )
        .build()
}

fn alternate_link(href: String) -> Link {
    LinkBuilder::default().href(href).rel("alternate").build()
}

/// Most recent issue timestamp, falling back to now for an empty feed.
fn latest_update(posts: &[RenderedPost]) -> FixedDateTime {
    posts
        .iter()
        .map(|post| post.issue.created_at)
        .max()
        .unwrap_or_else(Utc::now)
        .fixed_offset()
}
