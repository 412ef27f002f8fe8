use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticationRequest;
use crate::domain::user::models::RegistrationRequest;
use crate::domain::user::models::User;

/// Port for the identity core's two use cases.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `request` - Username, password and its confirmation
    ///
    /// # Returns
    /// The stored user, with an assigned identifier and hashed password
    ///
    /// # Errors
    /// * `Validation` - First registration rule the request breaks
    /// * `Internal` - Hashing, storage or deadline failure
    async fn register_user(&self, request: RegistrationRequest) -> Result<User, UserError>;

    /// Check a username/password pair.
    ///
    /// # Arguments
    /// * `request` - Username and plaintext password
    ///
    /// # Returns
    /// The stored user
    ///
    /// # Errors
    /// * `Validation` - Username or password is empty
    /// * `Unauthenticated` - Unknown username or wrong password
    /// * `Internal` - Storage, hashing or deadline failure
    async fn authenticate_user(&self, request: AuthenticationRequest) -> Result<User, UserError>;
}

/// Lookup capability of the identity store.
#[async_trait]
pub trait UserFinder: Send + Sync + 'static {
    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `Internal` - Storage operation failed
    async fn get_by_username(&self, username: &str) -> Result<User, UserError>;
}

/// Write capability of the identity store.
#[async_trait]
pub trait UserStorer: Send + Sync + 'static {
    /// Insert or update a user.
    ///
    /// Inserts when `user.id` is not persisted and returns the user with its
    /// new identifier; otherwise updates the row with that identifier.
    ///
    /// # Errors
    /// * `Validation` - Username taken (`username`/`unique`), caught by the store itself
    /// * `NotFound` - Update targeted an identifier that does not exist
    /// * `Internal` - Storage operation failed
    async fn store(&self, user: User) -> Result<User, UserError>;
}

/// One-way password hashing.
#[async_trait]
pub trait Hasher: Send + Sync + 'static {
    /// # Errors
    /// * `Internal` - Hashing engine failed
    async fn hash(&self, plain: &str) -> Result<String, UserError>;
}

/// Comparison of a plaintext password against a stored hash.
#[async_trait]
pub trait Comparator: Send + Sync + 'static {
    /// # Errors
    /// * `HashMismatch` - Password does not match
    /// * `Internal` - Hash is malformed or the engine failed
    async fn compare(&self, hashed: &str, plain: &str) -> Result<(), UserError>;
}

/// Injected time source.
pub type SharedClock = std::sync::Arc<dyn mockable::Clock + Send + Sync>;
