#![deny(missing_docs)]

//! # Page Shell
//!
//! Wraps a rendered body in a complete HTML document: meta tags, the inline
//! stylesheet and the version-pinned front-end assets.

use crate::config::EscapeMode;
use crate::render::html::escape_html;
use std::borrow::Cow;

/// Bootstrap stylesheet.
pub const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_CSS_INTEGRITY: &str =
    "sha384-EVSTQN3/azprG1Anm3QDgpJLIm9Nao0Yz57+ZrXrY686NEJoaghKYF8CNE3wBug7";

/// jQuery (slim), required by the Bootstrap bundle.
pub const JQUERY_JS: &str = "https://code.jquery.com/jquery-3.5.1.slim.min.js";
const JQUERY_JS_INTEGRITY: &str =
    "sha384-DfXdz2htPH0lsSSs5nCTpuj/zy4C+OGpamoFVy38MVBnE+IbbVYUew+OrCXaRkfj";

/// Bootstrap script bundle.
pub const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/js/bootstrap.bundle.min.js";
const BOOTSTRAP_JS_INTEGRITY: &str =
    "sha384-Fy6S3B9q64WdZWQUiUq4/2Lc9npb8tCaSX9FK7E8HnRr0Jz8D6OP9dO5Vg3Q9ct";

const STYLESHEET: &str = r#"    body { font-family: Arial, sans-serif; margin: 0; padding: 0; line-height: 1.6; color: #333; background: #fff; }
    .container { max-width: 960px; margin: 20px auto; padding: 20px; }
    h1, h2, h3, h4, h5, h6 { border-bottom: 2px solid #eee; padding-bottom: 5px; margin-top: 20px; }
    pre { background: #f8f8f8; padding: 10px; border-radius: 5px; overflow: auto; white-space: pre-wrap; }
    .endpoint, .component-section, .operation, .section, .responses, .response { margin-bottom: 30px; padding: 15px; border: 1px solid #ddd; border-radius: 5px; background: #fdfdfd; }
    .method { font-weight: bold; text-transform: uppercase; padding: 4px 10px; margin-right: 10px; border-radius: 3px; color: #fff; display: inline-block; }
    .method.get { background: #28a745; }
    .method.post { background: #007bff; }
    .method.put { background: #ffc107; }
    .method.delete { background: #dc3545; }
    .method.patch { background: #6f42c1; }
    .badge { font-size: 0.8em; margin-right: 4px; }
    table { width: 100%; border-collapse: collapse; margin-top: 10px; }
    th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
    th { background: #f0f0f0; }
    @media print { body, .container { margin: 0; padding: 0; width: 100%; } }
"#;

/// Builds the full page. `title` is the document's `info.title`.
pub fn assemble_page(title: &str, body: &str, escape: EscapeMode) -> String {
    let title = match escape {
        EscapeMode::Trusted => Cow::Borrowed(title),
        EscapeMode::Escaped => escape_html(title),
    };

    let mut page = String::with_capacity(body.len() + STYLESHEET.len() + 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("  <meta charset=\"utf-8\">\n");
    page.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1, shrink-to-fit=no\">\n",
    );
    page.push_str(&format!("  <title>{} API Documentation</title>\n", title));
    page.push_str(&format!(
        "  <link rel=\"stylesheet\" href=\"{}\" integrity=\"{}\" crossorigin=\"anonymous\">\n",
        BOOTSTRAP_CSS, BOOTSTRAP_CSS_INTEGRITY
    ));
    page.push_str("  <style>\n");
    page.push_str(STYLESHEET);
    page.push_str("  </style>\n</head>\n<body>\n  <div class=\"container\">\n");
    page.push_str(body);
    page.push_str("  </div>\n");
    page.push_str(&script_tag(JQUERY_JS, JQUERY_JS_INTEGRITY));
    page.push_str(&script_tag(BOOTSTRAP_JS, BOOTSTRAP_JS_INTEGRITY));
    page.push_str("</body>\n</html>\n");
    page
}

fn script_tag(src: &str, integrity: &str) -> String {
    format!(
        "  <script src=\"{}\" integrity=\"{}\" crossorigin=\"anonymous\"></script>\n",
        src, integrity
    )
}
