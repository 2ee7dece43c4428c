#![deny(missing_docs)]

//! # Generator Configuration
//!
//! Input/output locations and the escaping policy. The defaults reproduce
//! the historical fixed-path behaviour: read `swagger.json`, write
//! `index.html`, interpolate document strings verbatim.

use std::path::PathBuf;

/// Default input document, relative to the working directory.
pub const DEFAULT_INPUT: &str = "swagger.json";

/// Default output page, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "index.html";

/// How document-sourced strings are interpolated into the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// The document is trusted: strings, JSON dumps and raw HTML inside
    /// markdown are inserted as-is.
    #[default]
    Trusted,
    /// Every document-sourced string is HTML-escaped, and raw HTML inside
    /// markdown is shown as text.
    Escaped,
}

impl EscapeMode {
    /// Picks `Escaped` when `escape` is set.
    pub fn from_flag(escape: bool) -> Self {
        if escape {
            Self::Escaped
        } else {
            Self::Trusted
        }
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// The API description to read.
    pub input: PathBuf,
    /// The HTML page to write (fully overwritten).
    pub output: PathBuf,
    /// Interpolation policy.
    pub escape: EscapeMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            escape: EscapeMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_paths() {
        let config = GeneratorConfig::default();
        assert_eq!(config.input, PathBuf::from("swagger.json"));
        assert_eq!(config.output, PathBuf::from("index.html"));
        assert_eq!(config.escape, EscapeMode::Trusted);
    }

    #[test]
    fn test_escape_mode_from_flag() {
        assert_eq!(EscapeMode::from_flag(true), EscapeMode::Escaped);
        assert_eq!(EscapeMode::from_flag(false), EscapeMode::Trusted);
    }
}
