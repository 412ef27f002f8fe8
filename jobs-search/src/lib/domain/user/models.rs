use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Surrogate key assigned by the identity store.
///
/// Positive values are persisted users; zero or negative marks a user that has
/// not been inserted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Placeholder for users awaiting their first insert.
    pub const UNASSIGNED: UserId = UserId(0);

    pub fn is_persisted(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User aggregate entity.
///
/// `password` only ever holds a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user that has not been stored yet.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `password_hash` - Output of the password hasher
    /// * `now` - Creation instant, used for both timestamps
    pub fn unpersisted(username: String, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::UNASSIGNED,
            username,
            password: password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Credentials supplied to log in.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    pub username: String,
    pub password: String,
}

impl AuthenticationRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Plaintext passwords must never reach a log line.
impl fmt::Debug for AuthenticationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials supplied to sign up, with the repeated password.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub credentials: AuthenticationRequest,
    pub password_confirmation: String,
}

impl RegistrationRequest {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            credentials: AuthenticationRequest::new(username, password),
            password_confirmation: password_confirmation.into(),
        }
    }

    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    pub fn password(&self) -> &str {
        self.credentials.password()
    }

    pub fn password_confirmation(&self) -> &str {
        &self.password_confirmation
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.credentials.username)
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .finish()
    }
}
