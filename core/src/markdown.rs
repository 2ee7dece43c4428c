#![deny(missing_docs)]

//! # Markdown Rendering
//!
//! Descriptions in an API document are CommonMark. The renderer only depends
//! on [`MarkdownRenderer`]; [`CommonMark`] is the `pulldown-cmark` backed
//! implementation.

use crate::config::EscapeMode;
use pulldown_cmark::{html, Event, Options, Parser};

/// Converts markdown text into an HTML fragment.
///
/// Implementations must be total: empty input yields an empty fragment.
pub trait MarkdownRenderer {
    /// Renders `text` to HTML. With [`EscapeMode::Escaped`], raw HTML in the
    /// source must come out as text.
    fn render(&self, text: &str, escape: EscapeMode) -> String;
}

/// `pulldown-cmark` renderer.
#[derive(Debug, Clone, Copy)]
pub struct CommonMark {
    gfm: bool,
}

impl Default for CommonMark {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl CommonMark {
    /// Creates a renderer with GitHub Flavored Markdown enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable GitHub Flavored Markdown features
    /// (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl MarkdownRenderer for CommonMark {
    fn render(&self, text: &str, escape: EscapeMode) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let parser = Parser::new_ext(text, self.parser_options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        match escape {
            EscapeMode::Trusted => html::push_html(&mut out, parser),
            EscapeMode::Escaped => html::push_html(
                &mut out,
                parser.map(|event| match event {
                    Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
                    other => other,
                }),
            ),
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TRUSTED: EscapeMode = EscapeMode::Trusted;

    #[test]
    fn test_empty_input_renders_nothing() {
        let md = CommonMark::new();
        assert_eq!(md.render("", TRUSTED), "");
        assert_eq!(md.render("  \n\t", TRUSTED), "");
    }

    #[test]
    fn test_paragraph_and_emphasis() {
        let md = CommonMark::new();
        assert_eq!(
            md.render("Lists **all** pets.", TRUSTED),
            "<p>Lists <strong>all</strong> pets.</p>\n"
        );
    }

    #[test]
    fn test_gfm_tables_toggle() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert!(CommonMark::new().render(table, TRUSTED).contains("<table>"));
        assert!(!CommonMark::new()
            .with_gfm(false)
            .render(table, TRUSTED)
            .contains("<table>"));
    }

    #[test]
    fn test_raw_html_passes_through_when_trusted() {
        let md = CommonMark::new();
        assert!(md.render("Hi <b>there</b>", TRUSTED).contains("<b>there</b>"));
    }

    #[test]
    fn test_raw_html_is_text_when_escaped() {
        let md = CommonMark::new();
        let out = md.render("Hi <script>alert(1)</script>", EscapeMode::Escaped);
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }
}
