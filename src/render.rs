//! Handlebars rendering for the list and per-issue pages.
//!
//! Templates are external files resolved by name from the configured
//! template directory; which two files are loaded is decided by the
//! [`Layout`]. Rendering itself is pure data to string, no I/O.
//!
//! The template variable contract is part of the system boundary: the list
//! template receives `issues`, the post template receives `issue` and
//! `html_body` (pre-rendered HTML, so post templates should use the
//! triple-stache form).

use crate::config::Layout;
use crate::models::Issue;
use handlebars::Handlebars;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct IndexContext<'a> {
    issues: &'a [Issue],
}

#[derive(Serialize)]
struct PostContext<'a> {
    issue: &'a Issue,
    html_body: &'a str,
}

/// Template registry for one generator run.
pub struct Renderer {
    handlebars: Handlebars<'static>,
    layout: Layout,
}

impl Renderer {
    /// Load the layout's template set from `template_dir`.
    ///
    /// A missing or unparsable template file fails here, before any network
    /// call is made.
    #[instrument(level = "info", skip_all, fields(dir = %template_dir.display()))]
    pub fn from_dir(template_dir: &Path, layout: Layout) -> Result<Self, Box<dyn Error>> {
        let mut handlebars = Handlebars::new();
        for name in [layout.index_template(), layout.post_template()] {
            let path = template_dir.join(format!("{name}.html"));
            handlebars.register_template_file(name, &path)?;
            debug!(name, path = %path.display(), "Registered template");
        }
        Ok(Self { handlebars, layout })
    }

    /// Fill the list template with the full issue collection.
    pub fn render_index(&self, issues: &[Issue]) -> Result<String, Box<dyn Error>> {
        let html = self
            .handlebars
            .render(self.layout.index_template(), &IndexContext { issues })?;
        Ok(html)
    }

    /// Fill the per-issue template with one issue and its converted body.
    pub fn render_post(&self, issue: &Issue, html_body: &str) -> Result<String, Box<dyn Error>> {
        let html = self
            .handlebars
            .render(self.layout.post_template(), &PostContext { issue, html_body })?;
        Ok(html)
    }
}
