//! Error types for patch emission and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from rendering, writing, or re-parsing patch text.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Failed to read a patch file.
    #[error("failed to read patch '{path}': {source}")]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a patch file.
    #[error("failed to write patch '{path}': {source}")]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text does not start with the canvas header line.
    #[error("missing canvas header line")]
    MissingHeader,

    /// The text does not end with the trailing coords line.
    #[error("missing trailing coords line")]
    MissingTrailer,

    /// A node line names a kind the format does not define.
    #[error("line {line}: unknown node kind '{name}'")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// The unrecognized kind token.
        name: String,
    },

    /// A line violates the format in some other way.
    #[error("line {line}: {message}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Description of the violation.
        message: String,
    },

    /// Rebuilding the graph rejected the parsed content (dangling
    /// connection ids, parameter shape violations).
    #[error(transparent)]
    Graph(#[from] anillo_core::GraphError),
}
