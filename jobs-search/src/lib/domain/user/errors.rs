use thiserror::Error;

pub use crate::domain::errors::ValidationError;

/// Failure classes of the identity core.
///
/// Callers branch on this instead of on error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    Unauthenticated,
    HashMismatch,
    Internal,
}

/// Top-level error for all user-related operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not found with username: {0}")]
    NotFound(String),

    /// Unknown username and wrong password both end up here.
    #[error("Invalid credentials")]
    Unauthenticated,

    #[error("Password does not match stored hash")]
    HashMismatch,

    // Infrastructure errors (store, hashing engine, signing, deadlines)
    #[error("Internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Validation(_) => ErrorKind::ValidationFailed,
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::Unauthenticated => ErrorKind::Unauthenticated,
            UserError::HashMismatch => ErrorKind::HashMismatch,
            UserError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            UserError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Internal(err)
    }
}
