//! Error types for IR code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for QBE code generation and the backend pipeline.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A type name with no IR mapping.
    #[error("unknown type '{0}'")]
    UnknownType(String),

    /// An identifier that resolves in no enclosing scope.
    #[error("unresolved identifier '{0}'")]
    UnresolvedIdentifier(String),

    /// A binary operator the emitter cannot lower.
    #[error("unsupported binary operator '{0}'")]
    UnsupportedOperator(&'static str),

    /// Operands or operand/slot types that do not agree.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// File I/O failed while writing or removing outputs.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external tool could not be spawned.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited with a non-zero status.
    #[error("{tool} failed:\n{stderr}")]
    Backend { tool: &'static str, stderr: String },
}

/// Result type alias for code generation operations.
pub type Result<T> = std::result::Result<T, CodeGenError>;
