//! Fatal fixture-compiler errors.
//!
//! Problems inside a single definition file are not errors; they surface
//! as [`crate::compiler::Diagnostic`]s so one bad file cannot block the
//! rest of the batch.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for fixture results.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// A problem that stops the whole compilation.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The definitions directory or the output file could not be accessed.
    #[error("{path}: {source}")]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The compiled fixture could not be serialized.
    #[error("failed to serialize fixture: {0}")]
    Serialize(#[from] serde_json::Error),
}
