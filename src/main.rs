//! # issuepress
//!
//! A static-site generator that turns the issues of a GitHub repository
//! into a blog: issues are fetched through the REST API, each body is
//! converted from GitHub-Flavored Markdown to HTML through the hosted
//! `/markdown` endpoint, Handlebars templates produce an index page and one
//! page per issue, and an Atom feed can be serialized alongside them.
//!
//! ## Usage
//!
//! ```sh
//! issuepress <github_token> <github_repo> [--layout blog|flat] [--feed]
//! ```
//!
//! ## Architecture
//!
//! One linear pipeline, executed once per invocation:
//! 1. **Initialize**: destroy and recreate the output and backup trees,
//!    copy static assets
//! 2. **Fetch**: page through the repository's open issues and materialize
//!    the full list
//! 3. **Render**: fill the list template, then for each issue convert its
//!    body and fill the per-issue template
//! 4. **Output**: write every page, plus raw-Markdown backups and the
//!    optional Atom feed
//!
//! Everything runs sequentially; a failure at any stage aborts the run and
//! may leave the output tree partially populated.

use clap::Parser;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod github;
mod models;
mod outputs;
mod render;

use cli::Cli;
use config::SiteConfig;
use github::GithubClient;
use models::RenderedPost;
use outputs::{feed, site, tree};
use render::Renderer;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("issuepress starting up");

    // Parse CLI and build the run configuration
    let args = Cli::parse();
    debug!(repo = %args.github_repo, ?args.layout, feed = args.feed, "Parsed CLI arguments");
    let config = SiteConfig::from_cli(&args)?;

    // Templates are loaded before any directory is touched or request sent,
    // so a broken template set fails fast.
    let renderer = Renderer::from_dir(&config.template_dir, config.layout)?;
    let client = GithubClient::new(&args.github_token)?;

    // ---- Initialize the output tree ----
    tree::init(&config)?;

    // ---- Fetch issues ----
    let issues = client.list_issues(&args.github_repo).await?;
    info!(count = issues.len(), "Issues to publish");

    tree::write_backups(&config, &issues).await?;

    // ---- Index page ----
    site::write_index(&config, &renderer, &issues).await?;

    // ---- Per-issue pages, converted and written strictly in order ----
    let posts: Vec<RenderedPost> = stream::iter(issues)
        .then(|issue| {
            let client = &client;
            let config = &config;
            let renderer = &renderer;
            async move {
                debug!(number = issue.number, title = %issue.title, "Converting issue body");
                let html_body = client.render_markdown(issue.body_text()).await?;
                let post = RenderedPost { issue, html_body };
                site::write_post(config, renderer, &post).await?;
                Ok::<_, Box<dyn Error>>(post)
            }
        })
        .try_collect()
        .await?;
    info!(count = posts.len(), "Wrote per-issue pages");

    // ---- Atom feed ----
    if config.feed {
        feed::write_feed(&config, &args.github_repo, &posts).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        pages = posts.len() + 1,
        "Generation complete"
    );

    Ok(())
}
