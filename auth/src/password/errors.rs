use thiserror::Error;

/// Error type for password operations.
///
/// A password that simply does not match its hash is not an error; see
/// [`PasswordHasher::verify`](super::PasswordHasher::verify).
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
