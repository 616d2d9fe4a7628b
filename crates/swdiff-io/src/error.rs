//! Error types for the I/O crate.

use std::path::PathBuf;

/// Errors from file readers and output sinks.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// A file could not be opened. Fatal for the operation that needed it;
    /// reported once, before any output is produced.
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to an output sink failed.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    /// Serializing an event for structured output failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
