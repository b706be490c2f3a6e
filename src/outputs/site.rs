//! Page generation: the rendered list page and the per-issue pages.

use crate::config::SiteConfig;
use crate::models::{Issue, RenderedPost};
use crate::render::Renderer;
use std::error::Error;
use tracing::{info, instrument};

use super::tree;

/// Render the list template over the full issue collection and write it to
/// the layout's index file.
#[instrument(level = "info", skip_all, fields(count = issues.len()))]
pub async fn write_index(
    config: &SiteConfig,
    renderer: &Renderer,
    issues: &[Issue],
) -> Result<(), Box<dyn Error>> {
    let html = renderer.render_index(issues)?;
    tree::write_page(&config.index_path(), &html).await?;
    info!(path = %config.index_path().display(), "Wrote index page");
    Ok(())
}

/// Render the post template for one converted issue and write the page
/// keyed by its issue number.
#[instrument(level = "debug", skip_all, fields(number = post.issue.number))]
pub async fn write_post(
    config: &SiteConfig,
    renderer: &Renderer,
    post: &RenderedPost,
) -> Result<(), Box<dyn Error>> {
    let html = renderer.render_post(&post.issue, &post.html_body)?;
    tree::write_page(&config.post_path(post.issue.number), &html).await?;
    Ok(())
}
