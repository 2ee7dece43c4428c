#![deny(missing_docs)]

//! # Document Renderer
//!
//! Walks a bundled [`Document`] and produces HTML fragments.
//!
//! - **info**: title, description, version.
//! - **endpoints**: routes, operations, parameter tables.
//! - **content**: request bodies and responses (media types, schemas, examples).
//! - **components**: reusable definitions with `schema-{name}` anchors.
//!
//! Schemas are never interpreted: a schema that carries a `$ref` gets an
//! anchor link to its component, and every schema is dumped as
//! pretty-printed JSON.

mod components;
mod content;
mod endpoints;
pub mod html;
mod info;

use crate::config::EscapeMode;
use crate::document::Document;
use crate::markdown::MarkdownRenderer;
use serde_json::Value;
use std::borrow::Cow;

/// Fragment renderer over a markdown collaborator.
pub struct Renderer<'a, M: MarkdownRenderer + ?Sized> {
    markdown: &'a M,
    escape: EscapeMode,
}

impl<'a, M: MarkdownRenderer + ?Sized> Renderer<'a, M> {
    /// Creates a renderer.
    pub fn new(markdown: &'a M, escape: EscapeMode) -> Self {
        Self { markdown, escape }
    }

    /// Renders info, endpoints and components, concatenated in that order.
    pub fn render_body(&self, document: &Document) -> String {
        let mut body = self.render_info(&document.info);
        body.push_str(&self.render_endpoints(&document.paths));
        body.push_str(&self.render_components(&document.components));
        body
    }

    /// Applies the escaping policy to a document-sourced string.
    fn text<'s>(&self, value: &'s str) -> Cow<'s, str> {
        match self.escape {
            EscapeMode::Trusted => Cow::Borrowed(value),
            EscapeMode::Escaped => html::escape_html(value),
        }
    }

    /// Markdown for an optional description; empty when absent.
    fn markdown(&self, text: Option<&str>) -> String {
        text.map(|t| self.markdown.render(t, self.escape))
            .unwrap_or_default()
    }

    /// A `<pre>` block holding `value` as two-space indented JSON.
    fn json_block(&self, value: &Value) -> String {
        let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        format!("<pre>{}</pre>", self.text(&pretty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::CommonMark;
    use serde_json::json;

    #[test]
    fn test_render_body_orders_sections() {
        let document = Document::from_value(json!({
            "info": {"title": "Pet Store", "version": "1.0.0"},
            "paths": {"/pets": {"get": {"summary": "List pets"}}},
            "components": {"schemas": {"Pet": {"type": "object"}}}
        }))
        .unwrap();
        let md = CommonMark::new();
        let body = Renderer::new(&md, EscapeMode::Trusted).render_body(&document);

        let info = body.find("Pet Store").unwrap();
        let endpoints = body.find("API Endpoints").unwrap();
        let components = body.find("<h2>Components</h2>").unwrap();
        assert!(info < endpoints && endpoints < components);
    }

    #[test]
    fn test_json_block_is_two_space_indented() {
        let md = CommonMark::new();
        let renderer = Renderer::new(&md, EscapeMode::Trusted);
        assert_eq!(
            renderer.json_block(&json!({"a": [1]})),
            "<pre>{\n  \"a\": [\n    1\n  ]\n}</pre>"
        );
    }

    #[test]
    fn test_markdown_follows_renderer_escape_mode() {
        let md = CommonMark::new();
        let raw = Some("Use <em>care</em>");
        assert!(Renderer::new(&md, EscapeMode::Trusted)
            .markdown(raw)
            .contains("<em>care</em>"));
        assert!(Renderer::new(&md, EscapeMode::Escaped)
            .markdown(raw)
            .contains("&lt;em&gt;care&lt;/em&gt;"));
    }

    #[test]
    fn test_json_block_escaped() {
        let md = CommonMark::new();
        let renderer = Renderer::new(&md, EscapeMode::Escaped);
        assert_eq!(
            renderer.json_block(&json!("<b>")),
            "<pre>&quot;&lt;b&gt;&quot;</pre>"
        );
    }
}
