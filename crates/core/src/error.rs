//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic value failures.
/// Remote failures are classified by the infra layer instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A memory or disk quantity could not be parsed.
    #[error("invalid size '{0}': expected a number followed by M, MB, G or GB")]
    InvalidSize(String),
}

impl DomainError {
    pub fn invalid_size(raw: impl Into<String>) -> Self {
        Self::InvalidSize(raw.into())
    }
}
