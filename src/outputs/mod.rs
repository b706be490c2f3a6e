//! Output generation modules for the site tree, pages, and feed.
//!
//! # Submodules
//!
//! - [`tree`]: destroy-then-recreate directory handling, asset copying,
//!   raw-Markdown backups, and the single file writer every stage uses
//! - [`site`]: writes the rendered list page and per-issue pages
//! - [`feed`]: builds and writes the Atom feed
//!
//! # Output structure
//!
//! ```text
//! out/                      out/                    backup/
//! ├── index.html            ├── article_list.html   ├── 101.md
//! ├── blog/                 ├── 101.html            └── 102.md
//! │   ├── 101.html          ├── 102.html
//! │   └── 102.html          ├── static/...
//! ├── static/...            └── atom.xml
//! └── atom.xml              (flat layout)
//! (blog layout)
//! ```

pub mod feed;
pub mod site;
pub mod tree;
