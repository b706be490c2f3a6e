//! Explicit site configuration threaded through the pipeline.
//!
//! The upstream generator variants read their paths from module-level
//! globals and differed only in filenames; here every path and toggle lives
//! in one [`SiteConfig`] value built from the parsed CLI and passed by
//! reference to each stage that needs it.

use crate::cli::{Cli, LayoutArg};
use std::error::Error;
use std::path::PathBuf;
use url::Url;

/// Output layout, unifying the upstream script variants.
///
/// The layout decides which template set is loaded, what the list page is
/// called, and where the per-issue pages land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `index.html` + `post.html` templates, posts under `blog/`.
    Blog,
    /// `article_list.html` + `articles.html` templates, posts at the root.
    Flat,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Blog => Layout::Blog,
            LayoutArg::Flat => Layout::Flat,
        }
    }
}

impl Layout {
    /// Template name for the list page, also its file stem in the template
    /// directory and its output filename stem.
    pub fn index_template(&self) -> &'static str {
        match self {
            Layout::Blog => "index",
            Layout::Flat => "article_list",
        }
    }

    /// Template name for the per-issue page.
    pub fn post_template(&self) -> &'static str {
        match self {
            Layout::Blog => "post",
            Layout::Flat => "articles",
        }
    }

    /// Output filename of the list page.
    pub fn index_file(&self) -> String {
        format!("{}.html", self.index_template())
    }

    /// Path of a per-issue page relative to the output root.
    pub fn post_rel(&self, number: u64) -> String {
        match self {
            Layout::Blog => format!("blog/{number}.html"),
            Layout::Flat => format!("{number}.html"),
        }
    }
}

/// All paths and toggles for one generator run.
#[derive(Debug)]
pub struct SiteConfig {
    /// Root of the generated site, destroyed and recreated each run.
    pub output_dir: PathBuf,
    /// Raw-Markdown backup directory, destroyed and recreated each run.
    pub backup_dir: PathBuf,
    /// Static asset source tree, copied into the output when present.
    pub static_dir: PathBuf,
    /// Directory the Handlebars templates are resolved from by name.
    pub template_dir: PathBuf,
    pub layout: Layout,
    /// Whether to serialize an Atom feed to `atom.xml`.
    pub feed: bool,
    /// Public base URL of the site; feed entry links join against it.
    pub base_url: Option<Url>,
}

impl SiteConfig {
    /// Build the run configuration from parsed CLI arguments.
    ///
    /// Fails only if `--base-url` is present but not a valid absolute URL.
    pub fn from_cli(args: &Cli) -> Result<Self, Box<dyn Error>> {
        let base_url = match &args.base_url {
            Some(raw) => Some(Url::parse(raw)?),
            None => None,
        };

        Ok(Self {
            output_dir: PathBuf::from(&args.output_dir),
            backup_dir: PathBuf::from(&args.backup_dir),
            static_dir: PathBuf::from(&args.static_dir),
            template_dir: PathBuf::from(&args.template_dir),
            layout: args.layout.into(),
            feed: args.feed,
            base_url,
        })
    }

    /// Absolute (config-relative) path of the list page.
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(self.layout.index_file())
    }

    /// Path of the page for one issue number.
    pub fn post_path(&self, number: u64) -> PathBuf {
        self.output_dir.join(self.layout.post_rel(number))
    }

    /// Path of the Atom feed.
    pub fn feed_path(&self) -> PathBuf {
        self.output_dir.join("atom.xml")
    }

    /// Path of the raw-Markdown backup for one issue number.
    pub fn backup_path(&self, number: u64) -> PathBuf {
        self.backup_dir.join(format!("{number}.md"))
    }

    /// Destination of the copied static asset tree.
    pub fn static_dest(&self) -> PathBuf {
        self.output_dir
            .join(self.static_dir.file_name().unwrap_or("static".as_ref()))
    }

    /// Public URL of a per-issue page, when a base URL is configured.
    pub fn post_url(&self, number: u64) -> Option<Url> {
        self.base_url
            .as_ref()
            .and_then(|base| base.join(&self.layout.post_rel(number)).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn config_for(argv: &[&str]) -> SiteConfig {
        let cli = Cli::parse_from(argv);
        SiteConfig::from_cli(&cli).unwrap()
    }

    #[test]
    fn test_blog_layout_paths() {
        let config = config_for(&["issuepress", "t", "o/r"]);
        assert_eq!(config.index_path(), Path::new("out/index.html"));
        assert_eq!(config.post_path(101), Path::new("out/blog/101.html"));
        assert_eq!(config.feed_path(), Path::new("out/atom.xml"));
        assert_eq!(config.backup_path(101), Path::new("backup/101.md"));
    }

    #[test]
    fn test_flat_layout_paths() {
        let config = config_for(&["issuepress", "t", "o/r", "--layout", "flat"]);
        assert_eq!(config.index_path(), Path::new("out/article_list.html"));
        assert_eq!(config.post_path(7), Path::new("out/7.html"));
        assert_eq!(config.layout.index_template(), "article_list");
        assert_eq!(config.layout.post_template(), "articles");
    }

    #[test]
    fn test_post_url_joins_base() {
        let config = config_for(&[
            "issuepress",
            "t",
            "o/r",
            "--base-url",
            "https://blog.example.com/",
        ]);
        assert_eq!(
            config.post_url(3).unwrap().as_str(),
            "https://blog.example.com/blog/3.html"
        );
    }

    #[test]
    fn test_post_url_without_base() {
        let config = config_for(&["issuepress", "t", "o/r"]);
        assert!(config.post_url(3).is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let cli = Cli::parse_from(["issuepress", "t", "o/r", "--base-url", "not a url"]);
        assert!(SiteConfig::from_cli(&cli).is_err());
    }
}
