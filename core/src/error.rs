#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// Failures raised while bundling `$ref` cross-references.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The reference points at nothing.
    #[display("Dangling reference: {reference}")]
    Dangling {
        /// The `$ref` string as written in the document.
        reference: String,
    },

    /// The reference is re-entered while it is still being expanded.
    #[display("Cyclic reference: {reference}")]
    Cyclic {
        /// The `$ref` string that closed the cycle.
        reference: String,
    },

    /// The reference is not a usable pointer.
    #[display("Malformed reference '{reference}': {reason}")]
    Malformed {
        /// The offending `$ref` value.
        reference: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An external document named by the reference could not be loaded.
    #[display("Unable to load external reference '{reference}': {message}")]
    ExternalLoad {
        /// The `$ref` string.
        reference: String,
        /// Underlying failure.
        message: String,
    },
}

/// The Global Error Enum.
///
/// `derive_more` covers the boilerplate. Plain IO errors convert to `Io`;
/// everything else is constructed explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The input document does not exist.
    #[from(ignore)]
    #[display("Spec file not found at: {}", _0.display())]
    MissingInput(PathBuf),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document is neither valid JSON nor valid YAML.
    #[from(ignore)]
    #[display("Failed to parse '{}': {message}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Reference bundling failed.
    #[display("{_0}")]
    Resolution(ResolutionError),

    /// The bundled tree does not have the shape of an API description.
    #[from(ignore)]
    #[display("Invalid document: {_0}")]
    Document(String),

    /// The output file could not be written.
    #[from(ignore)]
    #[display("Failed to write '{}': {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
