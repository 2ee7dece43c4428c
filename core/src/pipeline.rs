#![deny(missing_docs)]

//! # Generation Pipeline
//!
//! resolve -> render (info, endpoints, components) -> assemble -> write.
//!
//! Nothing is written until the whole page has been rendered, and the page
//! is written through a temporary file in the destination directory, so a
//! failed run leaves any previous output untouched.

use crate::config::{EscapeMode, GeneratorConfig};
use crate::document::Document;
use crate::error::{AppError, AppResult};
use crate::markdown::MarkdownRenderer;
use crate::page::assemble_page;
use crate::render::Renderer;
use crate::resolver::DocumentResolver;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Runs one generation and returns the path written.
///
/// # Arguments
///
/// * `config` - Input/output locations and escaping policy.
/// * `resolver` - Produces the bundled document (e.g. `FsBundler`).
/// * `markdown` - Renders description fields.
pub fn generate<R, M>(config: &GeneratorConfig, resolver: &R, markdown: &M) -> AppResult<PathBuf>
where
    R: DocumentResolver + ?Sized,
    M: MarkdownRenderer + ?Sized,
{
    let document = resolver.resolve(&config.input)?;
    tracing::info!(
        title = %document.info.title,
        routes = document.paths.items.len(),
        "resolved document"
    );

    let html = render_page(&document, markdown, config.escape);
    write_output(&config.output, &html)?;
    tracing::info!(path = %config.output.display(), bytes = html.len(), "wrote documentation");

    Ok(config.output.clone())
}

/// Renders the complete HTML page for a bundled document.
pub fn render_page<M>(document: &Document, markdown: &M, escape: EscapeMode) -> String
where
    M: MarkdownRenderer + ?Sized,
{
    let body = Renderer::new(markdown, escape).render_body(document);
    assemble_page(&document.info.title, &body, escape)
}

/// Replaces `path` with `contents` via a sibling temporary file.
fn write_output(path: &Path, contents: &str) -> AppResult<()> {
    let write_err = |source: std::io::Error| AppError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".oas-html")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;

    // Temporary files are created 0600; keep the page world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)
            .map(|meta| meta.permissions().mode())
            .unwrap_or(0o644);
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
