//! Storage error types for `passforge-store`.

use passforge_core::GeneratorError;
use thiserror::Error;

/// Errors produced by the storage delegates.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Generation failed (delegated from passforge-core).
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// No encryption key is loaded.
    ///
    /// History reads and writes treat this as "empty" and "no-op"; only the
    /// cipher itself returns it.
    #[error("encryption key unavailable")]
    KeyUnavailable,

    /// Encryption failed or the key material is malformed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authentication failed: tampered blob, wrong key, or bad encoding.
    #[error("decryption failed")]
    Decryption,

    /// The state backend rejected the request.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored value did not have the expected shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error from the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
