#![deny(missing_docs)]

//! # OAS HTML Core
//!
//! Turns an API description (OpenAPI / Swagger, JSON or YAML) into a single
//! static HTML page.
//!
//! The pipeline is linear: a [`DocumentResolver`] bundles the document's
//! `$ref`s, the [`Renderer`] walks the bundled [`Document`] into HTML
//! fragments, [`assemble_page`] wraps them in the page shell and
//! [`generate`] writes the result.

/// Shared error types.
pub mod error;

/// Input/output and escaping settings.
pub mod config;

/// `$ref` string and JSON Pointer helpers.
pub mod ref_utils;

/// Typed view of a bundled document.
pub mod document;

/// Reference bundling.
pub mod resolver;

/// Markdown collaborator.
pub mod markdown;

/// HTML fragment rendering.
pub mod render;

/// Page shell.
pub mod page;

/// End-to-end orchestration.
pub mod pipeline;

pub use config::{EscapeMode, GeneratorConfig, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use document::{
    schema_ref_target, Components, Document, Info, MediaType, Operation, Parameter, PathItem,
    Paths, RequestBody, Response,
};
pub use error::{AppError, AppResult, ResolutionError};
pub use markdown::{CommonMark, MarkdownRenderer};
pub use page::assemble_page;
pub use pipeline::{generate, render_page};
pub use render::Renderer;
pub use resolver::{DocumentResolver, FsBundler, StaticResolver};
