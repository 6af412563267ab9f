//! Contract error types for lab loans
//!
//! These errors are transport-agnostic; the REST layer maps them to Problem Details.

use super::model::Id;

/// Lab loans domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoansError {
    /// Record not found
    NotFound {
        /// Resource name (alumno, kit, ...)
        resource: String,
        /// Record identifier
        id: Id,
    },
    /// Draft failed validation before reaching storage
    Validation {
        /// Validation error message
        message: String,
    },
    /// A referenced record does not exist
    UnknownReference {
        /// Resource name of the missing record
        resource: String,
        /// Identifier that was referenced
        id: Id,
    },
    /// Conflict (duplicate code, record still referenced, ...)
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Internal error
    Internal,
}

impl LoansError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: Id) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id,
        }
    }
}

impl std::fmt::Display for LoansError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::UnknownReference { resource, id } => {
                write!(f, "Referenced {} does not exist: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for LoansError {}
