//! Domain-level error type used by the fallible edges of the engine.
//!
//! The scoring rules themselves never fail: invalid scores are reported as
//! data (`GameValidation`, `SaveCheck`). `DomainError` covers configuration,
//! construction of bounded values, and the persistence port.

use thiserror::Error;

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    DuplicateMatchId,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error: {0}")]
    Validation(String),
    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
}
