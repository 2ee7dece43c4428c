#![deny(missing_docs)]

//! # Resolver Module
//!
//! Loads an API description from disk and bundles its cross-references into
//! one self-contained tree.
//!
//! Handles:
//! - JSON and YAML documents (YAML mapping keys such as `200` become strings).
//! - Local references (`#/...`), inlined in place. A local reference that
//!   re-enters itself (a recursive schema) is left as `$ref` at the point of
//!   recursion.
//! - References into the root document's `components`, kept as `$ref` so the
//!   page can link to them. Their targets must exist.
//! - External file references (`pet.yaml#/Pet`, `file:///specs/pet.yaml`),
//!   resolved as URI references against the referencing file and inlined.
//!   Everything inside an external file is inlined, including its own
//!   component references. Cycles through external files are errors.
//!
//! No network access is performed; non-`file` URIs are rejected.

use crate::document::Document;
use crate::error::{AppError, AppResult, ResolutionError};
use crate::ref_utils::{local_component, lookup, parse_pointer, parse_reference, REF_KEY};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use url::Url;

/// Produces the bundled document for a path.
///
/// The renderer only ever sees the output of this trait, so tests can swap in
/// [`StaticResolver`] and never touch the filesystem.
pub trait DocumentResolver {
    /// Loads `path` and returns the bundled raw tree.
    fn resolve_value(&self, path: &Path) -> AppResult<Value>;

    /// Loads `path` and returns the typed bundled document.
    fn resolve(&self, path: &Path) -> AppResult<Document> {
        Document::from_value(self.resolve_value(path)?)
    }
}

/// Filesystem-backed bundler.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBundler;

impl FsBundler {
    /// Creates a bundler.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentResolver for FsBundler {
    fn resolve_value(&self, path: &Path) -> AppResult<Value> {
        if !path.exists() {
            return Err(AppError::MissingInput(path.to_path_buf()));
        }
        let root_path = path.canonicalize()?;
        let mut session = BundleSession::new(root_path.clone());
        let root = session.document(&root_path, None)?;
        let bundled = session.bundle(&root, &Scope { file: root_path })?;
        tracing::info!(
            path = %path.display(),
            external_files = session.documents.len() - 1,
            "bundled document"
        );
        Ok(bundled)
    }
}

/// Returns a fixed tree for any path.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    value: Value,
}

impl StaticResolver {
    /// Wraps an already-bundled tree.
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl DocumentResolver for StaticResolver {
    fn resolve_value(&self, _path: &Path) -> AppResult<Value> {
        Ok(self.value.clone())
    }
}

/// The file a node was read from.
struct Scope {
    file: PathBuf,
}

/// A reference currently being expanded.
struct ActiveReference {
    key: String,
    in_root: bool,
}

struct BundleSession {
    root_path: PathBuf,
    documents: HashMap<PathBuf, Rc<Value>>,
    active: Vec<ActiveReference>,
}

impl BundleSession {
    fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            documents: HashMap::new(),
            active: Vec::new(),
        }
    }

    /// Returns the parsed file, loading it on first use.
    ///
    /// `reference` is the `$ref` that asked for it; load failures of external
    /// files are reported as resolution errors against it.
    fn document(&mut self, path: &Path, reference: Option<&str>) -> AppResult<Rc<Value>> {
        if let Some(doc) = self.documents.get(path) {
            return Ok(Rc::clone(doc));
        }
        let loaded = load_document(path).map_err(|e| match reference {
            Some(reference) => ResolutionError::ExternalLoad {
                reference: reference.to_string(),
                message: e.to_string(),
            }
            .into(),
            None => e,
        })?;
        let loaded = Rc::new(loaded);
        self.documents.insert(path.to_path_buf(), Rc::clone(&loaded));
        Ok(loaded)
    }

    fn bundle(&mut self, node: &Value, scope: &Scope) -> AppResult<Value> {
        match node {
            Value::Object(map) => match map.get(REF_KEY) {
                Some(reference) => self.bundle_reference(reference, map, scope),
                None => self.bundle_map(map, scope).map(Value::Object),
            },
            Value::Array(items) => items
                .iter()
                .map(|item| self.bundle(item, scope))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn bundle_map(
        &mut self,
        map: &Map<String, Value>,
        scope: &Scope,
    ) -> AppResult<Map<String, Value>> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            out.insert(key.clone(), self.bundle(value, scope)?);
        }
        Ok(out)
    }

    fn bundle_reference(
        &mut self,
        reference: &Value,
        map: &Map<String, Value>,
        scope: &Scope,
    ) -> AppResult<Value> {
        let Some(reference) = reference.as_str() else {
            return Err(ResolutionError::Malformed {
                reference: reference.to_string(),
                reason: "$ref must be a string".to_string(),
            }
            .into());
        };
        let parsed = parse_reference(reference);
        let target_file = if parsed.is_local() {
            scope.file.clone()
        } else {
            document_path(reference, parsed.document, &scope.file)?
        };
        let fragment = parsed.fragment.unwrap_or_default();
        let targets_root = target_file == self.root_path;

        // Component references into the root document stay links.
        let local_form = format!("#{}", fragment);
        if targets_root && local_component(&local_form).is_some() {
            self.ensure_root_target(reference, &local_form)?;
            tracing::debug!(reference, "keeping component reference");
            return self.keep_reference(&local_form, map, scope);
        }

        let segments = parse_pointer(fragment).map_err(|reason| ResolutionError::Malformed {
            reference: reference.to_string(),
            reason,
        })?;

        let key = format!("{}#{}", target_file.display(), fragment);
        if let Some(start) = self.active.iter().position(|entry| entry.key == key) {
            if self.active[start..].iter().all(|entry| entry.in_root) {
                tracing::debug!(reference, "keeping recursive reference");
                return self.keep_reference(&local_form, map, scope);
            }
            return Err(ResolutionError::Cyclic {
                reference: reference.to_string(),
            }
            .into());
        }

        let document = self.document(&target_file, Some(reference))?;
        let target = lookup(&document, &segments)
            .cloned()
            .ok_or_else(|| ResolutionError::Dangling {
                reference: reference.to_string(),
            })?;

        tracing::debug!(reference, file = %target_file.display(), "inlining reference");
        self.active.push(ActiveReference {
            key,
            in_root: targets_root,
        });
        let inner_scope = Scope { file: target_file };
        let bundled = self.bundle(&target, &inner_scope);
        self.active.pop();
        let mut bundled = bundled?;

        if map.len() > 1 {
            match bundled.as_object_mut() {
                Some(target_map) => {
                    for (key, value) in map.iter().filter(|(k, _)| k.as_str() != REF_KEY) {
                        let value = self.bundle(value, scope)?;
                        target_map.insert(key.clone(), value);
                    }
                }
                None => tracing::debug!(reference, "dropping siblings of non-object reference"),
            }
        }

        Ok(bundled)
    }

    /// Fails with `Dangling` unless `local_form` points at a node of the
    /// root document.
    fn ensure_root_target(&mut self, reference: &str, local_form: &str) -> AppResult<()> {
        let root_path = self.root_path.clone();
        let root = self.document(&root_path, None)?;
        let exists = parse_pointer(local_form.trim_start_matches('#'))
            .is_ok_and(|segments| lookup(&root, &segments).is_some());
        if exists {
            Ok(())
        } else {
            Err(ResolutionError::Dangling {
                reference: reference.to_string(),
            }
            .into())
        }
    }

    /// Leaves the reference in place as `local_form`, bundling its siblings.
    fn keep_reference(
        &mut self,
        local_form: &str,
        map: &Map<String, Value>,
        scope: &Scope,
    ) -> AppResult<Value> {
        let mut kept = Map::with_capacity(map.len());
        for (key, value) in map {
            if key == REF_KEY {
                kept.insert(key.clone(), Value::String(local_form.to_string()));
            } else {
                kept.insert(key.clone(), self.bundle(value, scope)?);
            }
        }
        Ok(Value::Object(kept))
    }
}

/// Resolves the document part of a `$ref` against the referencing file.
///
/// The document part is a URI reference: relative paths are percent-decoded
/// and `file:` URIs are accepted. Any other scheme is refused.
fn document_path(reference: &str, document: &str, base_file: &Path) -> AppResult<PathBuf> {
    let load_error = |message: String| ResolutionError::ExternalLoad {
        reference: reference.to_string(),
        message,
    };

    let base = Url::from_file_path(base_file).map_err(|()| {
        load_error(format!("'{}' is not an absolute path", base_file.display()))
    })?;
    let url = base.join(document).map_err(|e| load_error(e.to_string()))?;
    if url.scheme() != "file" {
        return Err(load_error(format!(
            "remote references are not fetched ({} scheme)",
            url.scheme()
        ))
        .into());
    }

    let path = url
        .to_file_path()
        .map_err(|()| load_error(format!("'{}' is not a local file", url)))?;
    path.canonicalize()
        .map_err(|e| load_error(e.to_string()).into())
}

/// Reads and parses one file. `.json` files are parsed as JSON, everything
/// else as YAML.
fn load_document(path: &Path) -> AppResult<Value> {
    let text = fs::read_to_string(path)?;
    let parse_error = |message: String| AppError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return serde_json::from_str(&text).map_err(|e| parse_error(e.to_string()));
    }

    serde_yaml::from_str(&text).map_err(|e| parse_error(e.to_string()))
}
