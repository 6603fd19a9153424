//! Error types for JSAF auditing
//!
//! Only the loading boundary and explicit lookups can fail. Integrity
//! problems found inside a document are report entries, never errors.

use thiserror::Error;

/// Main error type for audit operations
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid JSAF document: {0}")]
    InvalidDocument(String),

    #[error("No result for member '{owner}' under load '{load}'")]
    ResultNotFound { owner: String, load: String },

    #[error("Unknown result kind '{0}' (expected '1d' or 'mesh')")]
    UnknownResultKind(String),

    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
