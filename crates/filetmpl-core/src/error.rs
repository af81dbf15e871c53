//! Unified error types for filetmpl.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while discovering and rendering templates.
#[derive(Error, Debug)]
pub enum TmplError {
    // --- Configuration ---

    /// The project descriptor (`filetmpl.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project descriptor exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The descriptor could not be serialized for writing.
    #[error("failed to serialize config for {path}")]
    ConfigSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value is present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The scan root does not exist or is not a directory.
    #[error("scan root is not a directory: {0}")]
    MissingRoot(PathBuf),

    /// The configured text encoding is not supported.
    #[error("unsupported charset: {0} (supported: UTF-8, US-ASCII, ISO-8859-1)")]
    UnknownCharset(String),

    /// An include or exclude pattern is not a valid glob.
    #[error("invalid file pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Attempted to write a descriptor where one already exists.
    #[error("config file already exists: {0}")]
    ConfigExists(PathBuf),

    // --- Discovery ---

    /// Walking the scan root failed.
    #[error("unable to scan files under {root}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    // --- Per-task ---

    /// The input bytes are not valid in the configured charset.
    #[error("{path} is not valid {charset}")]
    Decode { path: PathBuf, charset: &'static str },

    /// The rendered text contains characters the charset cannot represent.
    #[error("rendered output for {path} cannot be encoded as {charset}")]
    Encode { path: PathBuf, charset: &'static str },

    /// Template rendering failed (unterminated site or invalid expression).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, TmplError>`.
pub type Result<T> = std::result::Result<T, TmplError>;
