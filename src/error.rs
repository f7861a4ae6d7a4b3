//! Engine error types.
//!
//! Only structural problems with the item graph are errors. Budget shortfalls
//! and degenerate numeric inputs are reported inside results instead.

use thiserror::Error;

/// Result alias for fallible engine operations.
pub type ScopeResult<T> = Result<T, ScopeError>;

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// An item's `depends_on` names an ID that is not in the batch.
    UnknownDependency,
}

/// Fatal structural errors. Computation for the whole batch is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// The item batch is malformed.
    #[error("validation failed ({kind:?}): {message}")]
    Validation {
        /// Error category.
        kind: ValidationErrorKind,
        /// Human-readable description.
        message: String,
    },
    /// The dependency graph contains a cycle.
    #[error("circular dependency detected among items: {}", item_ids.join(" -> "))]
    CycleDetected {
        /// IDs of the items forming the cycle, in dependency order.
        item_ids: Vec<String>,
    },
}

impl ScopeError {
    pub(crate) fn validation(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            message: message.into(),
        }
    }

    /// The validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            Self::Validation { kind, .. } => Some(*kind),
            Self::CycleDetected { .. } => None,
        }
    }
}
