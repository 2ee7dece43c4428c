#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for taking `$ref` strings apart: splitting the document part
//! from the fragment, parsing and evaluating JSON Pointers, and extracting
//! component names. Nothing in here touches the filesystem.

use percent_encoding::percent_decode_str;
use serde_json::Value;

/// The keyword carrying a cross-reference.
pub const REF_KEY: &str = "$ref";

/// A `$ref` string split at the first `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedReference<'a> {
    /// Everything before `#`. Empty for local references.
    pub document: &'a str,
    /// Everything after `#`, if a `#` is present.
    pub fragment: Option<&'a str>,
}

impl ParsedReference<'_> {
    /// True when the reference targets the document it appears in.
    pub fn is_local(&self) -> bool {
        self.document.is_empty()
    }
}

/// Splits a reference into its document and fragment parts.
pub(crate) fn parse_reference(ref_str: &str) -> ParsedReference<'_> {
    match ref_str.split_once('#') {
        Some((document, fragment)) => ParsedReference {
            document,
            fragment: Some(fragment),
        },
        None => ParsedReference {
            document: ref_str,
            fragment: None,
        },
    }
}

/// Parses a JSON Pointer fragment (`/a/b~1c`) into decoded segments.
///
/// The empty pointer addresses the whole document.
pub(crate) fn parse_pointer(fragment: &str) -> Result<Vec<String>, String> {
    if fragment.is_empty() {
        return Ok(Vec::new());
    }
    let Some(rest) = fragment.strip_prefix('/') else {
        return Err(format!(
            "fragment '{}' is not a JSON pointer (must start with '/')",
            fragment
        ));
    };
    Ok(rest.split('/').map(decode_pointer_segment).collect())
}

/// Walks `root` along already-decoded pointer segments.
pub(crate) fn lookup<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Returns `(category, name)` when the reference is exactly
/// `#/components/{category}/{name}`.
pub(crate) fn local_component(ref_str: &str) -> Option<(String, String)> {
    let parsed = parse_reference(ref_str);
    if !parsed.is_local() {
        return None;
    }
    let segments = parse_pointer(parsed.fragment?).ok()?;
    match segments.as_slice() {
        [root, category, name] if root == "components" && !name.is_empty() => {
            Some((category.clone(), name.clone()))
        }
        _ => None,
    }
}

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
pub fn extract_ref_name(ref_loc: &str) -> String {
    decode_pointer_segment(ref_loc.rsplit('/').next().unwrap_or_default())
}

/// Returns the `$ref` string when `value` is an object carrying one.
pub fn ref_of(value: &Value) -> Option<&str> {
    value.as_object()?.get(REF_KEY)?.as_str()
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
