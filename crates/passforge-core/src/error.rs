//! Error types for `passforge-core`.

use thiserror::Error;

/// Errors produced by credential generation.
///
/// Policy merging and normalization never fail. Generation only fails when
/// the caller hands it options that were not normalized first.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    /// Options violate an invariant that normalization establishes
    /// (for example, every character class disabled).
    #[error("invalid generator configuration: {0}")]
    Configuration(String),
}
