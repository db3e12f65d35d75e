//! Error types for the gatelife_io crate.

use thiserror::Error;

/// Failures while writing data files, merging replicates or moving
/// population snapshots to and from disk.
#[derive(Error, Debug)]
pub enum IoError {
    /// A genome or snapshot could not be encoded, e.g. an instruction list
    /// that does not survive the hex encoding.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A `.rkyv` snapshot failed to archive, failed the archive validity
    /// check, or could not be rebuilt into a `PopulationSnapshot`.
    #[error("Rkyv error: {0}")]
    Rkyv(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Snapshot JSON (plain or inside a `.json.gz`) is malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gzip stream of a `.json.gz` snapshot is truncated or corrupt.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Well-formed bytes with the wrong shape: odd-length or non-hex genome
    /// strings, a data row whose task columns disagree with the file header,
    /// or a replicate file row too short for the requested task column.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A replicate data file or snapshot path that does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any of the above, tagged with the file or replicate being processed.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for gatelife_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    #[must_use]
    pub fn rkyv<S: Into<String>>(msg: S) -> Self {
        Self::Rkyv(msg.into())
    }

    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound(resource.into())
    }

    #[must_use]
    pub fn compression<S: Into<String>>(msg: S) -> Self {
        Self::Compression(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
