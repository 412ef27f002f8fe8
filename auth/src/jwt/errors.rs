use thiserror::Error;

/// Why a session token could not be produced or accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    Signing(String),

    /// Not a structurally valid token.
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token has expired")]
    Expired,

    /// Signature, issuer or algorithm does not match this handler.
    #[error("Token rejected: {0}")]
    Rejected(String),

    #[error("Token lacks required claim: {0}")]
    MissingClaim(String),
}
