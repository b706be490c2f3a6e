//! Command-line interface definitions for issuepress.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The token and repository are positional to stay compatible with the
//! original `issuepress <github_token> <github_repo>` invocation; everything
//! that used to be hardcoded across the upstream script variants is a flag.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the issuepress generator.
///
/// # Examples
///
/// ```sh
/// # Generate the default blog layout into ./out
/// issuepress ghp_XXXX octocat/hello-world
///
/// # Flat layout with an Atom feed, published under a site URL
/// issuepress ghp_XXXX octocat/hello-world --layout flat --feed \
///     --base-url https://blog.example.com/
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// GitHub personal access token used for both the issue listing and the
    /// markdown rendering endpoints
    pub github_token: String,

    /// GitHub repository in "owner/name" form
    pub github_repo: String,

    /// Output directory for the generated site (removed and recreated)
    #[arg(short, long, default_value = "out")]
    pub output_dir: String,

    /// Directory for raw Markdown backups (removed and recreated)
    #[arg(short, long, default_value = "backup")]
    pub backup_dir: String,

    /// Directory of static assets copied into the output tree, if it exists
    #[arg(short, long, default_value = "static")]
    pub static_dir: String,

    /// Directory containing the Handlebars template files
    #[arg(short, long, default_value = "templates")]
    pub template_dir: String,

    /// Output layout and template set
    #[arg(long, value_enum, default_value_t = LayoutArg::Blog)]
    pub layout: LayoutArg,

    /// Also generate an Atom feed at atom.xml
    #[arg(long)]
    pub feed: bool,

    /// Public base URL of the site, used for feed entry links
    #[arg(long, env = "ISSUEPRESS_BASE_URL")]
    pub base_url: Option<String>,
}

/// Which of the upstream page layouts to generate.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutArg {
    /// `index.html` plus a `blog/` directory of per-issue pages
    Blog,
    /// `article_list.html` plus per-issue pages at the output root
    Flat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_positional_args() {
        let cli = Cli::parse_from(["issuepress", "ghp_token", "octocat/hello-world"]);

        assert_eq!(cli.github_token, "ghp_token");
        assert_eq!(cli.github_repo, "octocat/hello-world");
        assert_eq!(cli.output_dir, "out");
        assert_eq!(cli.layout, LayoutArg::Blog);
        assert!(!cli.feed);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "issuepress",
            "ghp_token",
            "octocat/hello-world",
            "--output-dir",
            "/tmp/site",
            "--layout",
            "flat",
            "--feed",
            "--base-url",
            "https://blog.example.com/",
        ]);

        assert_eq!(cli.output_dir, "/tmp/site");
        assert_eq!(cli.layout, LayoutArg::Flat);
        assert!(cli.feed);
        assert_eq!(cli.base_url.as_deref(), Some("https://blog.example.com/"));
    }

    #[test]
    fn test_cli_missing_repo_is_an_error() {
        assert!(Cli::try_parse_from(["issuepress", "ghp_token"]).is_err());
    }
}
