use anyhow::anyhow;
use auth::Algorithm;
use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use chrono::Duration;
use serde::Serialize;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::SharedClock;

/// Bearer token handed to a client after successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Issues and verifies HS512-signed session tokens bound to a user id.
pub struct CredentialIssuer {
    jwt_handler: JwtHandler,
    issuer: String,
    lifetime: Duration,
    clock: SharedClock,
}

impl CredentialIssuer {
    /// # Arguments
    /// * `secret` - HMAC signing secret
    /// * `issuer` - Value of the `iss` claim, usually the public application URL
    /// * `lifetime` - Validity window of issued tokens
    /// * `clock` - Source of the issuance instant
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        lifetime: Duration,
        clock: SharedClock,
    ) -> Self {
        let issuer = issuer.into();
        Self {
            jwt_handler: JwtHandler::new(secret)
                .with_algorithm(Algorithm::HS512)
                .with_issuer(&issuer),
            issuer,
            lifetime,
            clock,
        }
    }

    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Sign a token for a persisted user.
    ///
    /// # Errors
    /// * `Internal` - User has no identifier yet, or signing failed
    pub fn issue(&self, user: &User) -> Result<Credential, UserError> {
        if !user.id.is_persisted() {
            return Err(anyhow!(
                "cannot issue a credential for unpersisted user {}",
                user.username
            )
            .into());
        }

        let claims = Claims::issued(user.id, &self.issuer, self.clock.utc(), self.lifetime);
        let access_token = self
            .jwt_handler
            .encode(&claims)
            .map_err(|e| anyhow!("failed to sign credential: {}", e))?;

        Ok(Credential {
            access_token,
            expires_in: self.lifetime_seconds(),
        })
    }

    /// Check a presented token and return the user it was issued for.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is malformed, expired, forged or not bound to a user id
    pub fn verify(&self, token: &str) -> Result<UserId, UserError> {
        let claims: Claims = self.jwt_handler.decode(token).map_err(|e| {
            match &e {
                JwtError::Expired => tracing::debug!("Rejected expired token"),
                _ => tracing::debug!(error = %e, "Rejected token"),
            }
            UserError::Unauthenticated
        })?;

        claims
            .sub
            .as_deref()
            .and_then(|sub| sub.parse::<i64>().ok())
            .map(UserId)
            .filter(UserId::is_persisted)
            .ok_or(UserError::Unauthenticated)
    }
}
