//! Small HTML helpers shared by the fragment renderers and the page shell.

use std::borrow::Cow;

/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// Borrows when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Upper-cases the first character: `schemas` -> `Schemas`.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Anchor id of a component.
pub(crate) fn component_anchor(name: &str) -> String {
    format!("schema-{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_borrows_clean_input() {
        assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("schemas"), "Schemas");
        assert_eq!(capitalize("requestBodies"), "RequestBodies");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }
}
