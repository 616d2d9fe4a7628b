//! Error types for the core crate.

/// Errors reported by a line source pull.
///
/// End-of-input is *not* an error; sources report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying reader failed mid-stream.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// Source-specific failure that is not an I/O error.
    #[error("source error: {0}")]
    Other(String),
}
