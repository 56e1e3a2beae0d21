//! Loader error type.
//!
//! I/O and parse failures are confined to this crate and surfaced to the
//! caller as recoverable errors; they never reach `rp-graph`.

use thiserror::Error;

use rp_graph::GraphError;

/// Errors produced while reading an FMI graph file.
#[derive(Debug, Error)]
pub enum FmiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("file ends early at line {line}")]
    TruncatedFile { line: usize },

    #[error("graph construction rejected the file contents: {0}")]
    Graph(#[from] GraphError),
}

pub type FmiResult<T> = Result<T, FmiError>;
