//! Output tree handling: directory lifecycle, backups, and the file writer.
//!
//! The output and backup directories are destroyed and recreated on every
//! run; there is no incremental update and no rollback, so a failure mid-run
//! leaves a partially populated tree. Filesystem errors propagate uncaught
//! and abort the run.

use crate::config::SiteConfig;
use crate::models::Issue;
use fs_extra::dir::{self, CopyOptions};
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Destroy and recreate the output and backup directories, then copy the
/// static asset tree into the output when the source directory exists.
#[instrument(level = "info", skip_all, fields(output = %config.output_dir.display()))]
pub fn init(config: &SiteConfig) -> Result<(), Box<dyn Error>> {
    dir::remove(&config.output_dir)?;
    dir::remove(&config.backup_dir)?;
    dir::create_all(&config.output_dir, false)?;
    dir::create_all(&config.backup_dir, false)?;

    if config.static_dir.is_dir() {
        let mut opts = CopyOptions::new();
        opts.copy_inside = true;
        opts.content_only = true;
        opts.overwrite = true;
        dir::copy(&config.static_dir, config.static_dest(), &opts)?;
        info!(
            from = %config.static_dir.display(),
            to = %config.static_dest().display(),
            "Copied static assets"
        );
    }

    info!("Initialized output tree");
    Ok(())
}

/// Write one rendered document, truncating any existing file.
///
/// Parent directories are created on demand so layouts with a `blog/`
/// subdirectory need no separate setup. No atomic replace and no fsync; a
/// crash mid-write leaves a truncated file.
#[instrument(level = "debug", skip(content), fields(path = %path.display(), bytes = content.len()))]
pub async fn write_page(path: &Path, content: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, content).await?;
    debug!("Wrote page");
    Ok(())
}

/// Persist each issue's raw Markdown body to `backup/<number>.md`.
#[instrument(level = "info", skip_all, fields(backup = %config.backup_dir.display()))]
pub async fn write_backups(config: &SiteConfig, issues: &[Issue]) -> Result<(), Box<dyn Error>> {
    for issue in issues {
        let content = format!("# {}\n\n{}\n", issue.title, issue.body_text());
        write_page(&config.backup_path(issue.number), &content).await?;
    }
    info!(count = issues.len(), "Wrote raw Markdown backups");
    Ok(())
}
