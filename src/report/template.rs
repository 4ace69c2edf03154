// src/report/template.rs
// =============================================================================
// Loads the report template and fills it in.
//
// The template is a mustache file that is read at runtime, so it can be
// edited without rebuilding the tool. The `mustache` crate does the parsing
// and rendering; any Serialize value can be used as template data.
//
// Rust concepts:
// - Wrapping a third-party error in our own enum with thiserror
// - Generic functions bounded by a trait (T: Serialize)
// =============================================================================

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template error: {0}")]
    Mustache(#[from] mustache::Error),
}

// A compiled template, ready to be rendered any number of times
pub struct Template {
    inner: mustache::Template,
}

impl Template {
    // Compiles template source; unbalanced sections are rejected here
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let inner = mustache::compile_str(source)?;
        Ok(Self { inner })
    }

    // Reads and compiles a template file
    pub async fn load(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read template {}", path.display()))?;

        Self::parse(&source).with_context(|| format!("invalid template {}", path.display()))
    }

    pub fn render<T: Serialize>(&self, data: &T) -> Result<String, TemplateError> {
        Ok(self.inner.render_to_string(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct View {
        title: &'static str,
        links: Vec<&'static str>,
    }

    #[test]
    fn test_render_escapes_values() {
        let template = Template::parse("<h1>{{title}}</h1>{{#links}}<li>{{.}}</li>{{/links}}").unwrap();
        let html = template
            .render(&View {
                title: "Spam & Eggs",
                links: vec!["<a>"],
            })
            .unwrap();

        assert!(html.contains("<h1>Spam &amp; Eggs</h1>"));
        assert!(html.contains("<li>&lt;a&gt;</li>"));
    }

    #[test]
    fn test_unclosed_section_is_rejected() {
        assert!(Template::parse("{{#links}}<li>{{.}}</li>").is_err());
    }

    #[tokio::test]
    async fn test_load_missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Template::load(&dir.path().join("none.html")).await.err().unwrap();
        assert!(err.to_string().contains("failed to read template"));
    }
}
