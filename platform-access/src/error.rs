//! Error types for access aggregation
//!
//! Every failure aborts the whole query: there is no partial result.

use std::time::Duration;
use thiserror::Error;

/// Access aggregation error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A binding references a role or cluster role missing from the input
    #[error("{kind} {name:?} referenced by a binding not found{}", namespace_suffix(.namespace))]
    ReferenceNotFound {
        /// Referenced kind
        kind: String,
        /// Referenced name
        name: String,
        /// Namespace searched, for `Role` references
        namespace: Option<String>,
    },

    /// A binding references a kind it may not reference
    #[error("Binding {binding:?} references unsupported kind {kind:?}")]
    UnsupportedReferenceKind {
        /// The offending kind
        kind: String,
        /// Name of the binding carrying the reference
        binding: String,
    },

    /// The authorization-state provider failed a list call
    #[error("Provider error: {0}")]
    Provider(String),

    /// Fetching from the provider exceeded its deadline
    #[error("Provider fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

fn namespace_suffix(namespace: &Option<String>) -> String {
    match namespace {
        Some(ns) => format!(" in namespace {:?}", ns),
        None => String::new(),
    }
}

impl AccessError {
    /// Check if the error comes from an inconsistent or malformed binding
    /// rather than from fetching.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            AccessError::ReferenceNotFound { .. } | AccessError::UnsupportedReferenceKind { .. }
        )
    }

    /// Get error code for reports.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            AccessError::UnsupportedReferenceKind { .. } => "UNSUPPORTED_REFERENCE_KIND",
            AccessError::Provider(_) => "PROVIDER_ERROR",
            AccessError::Timeout(_) => "TIMEOUT",
        }
    }
}
