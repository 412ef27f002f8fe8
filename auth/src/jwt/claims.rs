use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered JWT claims (RFC 7519) used for bearer credentials.
///
/// All fields are optional so tokens from other issuers still deserialize;
/// [`JwtHandler::decode`](super::JwtHandler::decode) enforces which ones must
/// be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject issued at a given instant.
    ///
    /// # Arguments
    /// * `subject` - Identifier the token is bound to
    /// * `issuer` - Issuing service
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Validity window; `exp` is `issued_at + lifetime`
    pub fn issued(
        subject: impl ToString,
        issuer: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self::new()
            .with_subject(subject)
            .with_issuer(issuer)
            .with_issued_at(issued_at.timestamp())
            .with_expiration((issued_at + lifetime).timestamp())
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}
