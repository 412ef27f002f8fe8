use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AuthenticationRequest;
use crate::domain::user::models::RegistrationRequest;
use crate::domain::user::models::User;
use crate::domain::user::ports::Comparator;
use crate::domain::user::ports::Hasher;
use crate::domain::user::ports::SharedClock;
use crate::domain::user::ports::UserFinder;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::ports::UserStorer;
use crate::domain::user::validation::authentication_validator;
use crate::domain::user::validation::registration_validator;
use crate::domain::user::validation::ValidationAggregator;
use crate::domain::user::validation::Validator;

/// Deadline applied to each I/O-bound step unless overridden.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Registration and authentication orchestrator.
///
/// Holds no mutable state; every call is an independent unit of work.
pub struct UserService<R, H>
where
    R: UserFinder + UserStorer,
    H: Hasher + Comparator,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: SharedClock,
    registration_validator: ValidationAggregator<RegistrationRequest>,
    authentication_validator: ValidationAggregator<AuthenticationRequest>,
    operation_timeout: Duration,
}

impl<R, H> UserService<R, H>
where
    R: UserFinder + UserStorer,
    H: Hasher + Comparator,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity store (lookup and upsert)
    /// * `hasher` - Password hashing and comparison
    /// * `clock` - Source of creation/update timestamps
    pub fn new(repository: Arc<R>, hasher: Arc<H>, clock: SharedClock) -> Self {
        Self {
            registration_validator: registration_validator(Arc::clone(&repository)),
            authentication_validator: authentication_validator(),
            repository,
            hasher,
            clock,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Bound every store, hashing and validation step by `timeout`.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    async fn within_deadline<T, F>(&self, step: &'static str, operation: F) -> Result<T, UserError>
    where
        F: Future<Output = Result<T, UserError>> + Send,
    {
        match tokio::time::timeout(self.operation_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(UserError::Internal(anyhow!(
                "{} exceeded deadline of {:?}",
                step,
                self.operation_timeout
            ))),
        }
    }
}

#[async_trait]
impl<R, H> UserServicePort for UserService<R, H>
where
    R: UserFinder + UserStorer,
    H: Hasher + Comparator,
{
    #[tracing::instrument(
        name = "Register user",
        skip_all,
        fields(username = %request.username())
    )]
    async fn register_user(&self, request: RegistrationRequest) -> Result<User, UserError> {
        if let Err(e) = self
            .within_deadline(
                "validating registration request",
                self.registration_validator.validate(&request),
            )
            .await
        {
            tracing::debug!(error = %e, "Registration request rejected");
            return Err(e);
        }

        let password_hash = self
            .within_deadline("hashing password", self.hasher.hash(request.password()))
            .await?;

        let user = User::unpersisted(
            request.credentials.username,
            password_hash,
            self.clock.utc(),
        );

        let user = self
            .within_deadline("storing user", self.repository.store(user))
            .await?;

        if !user.id.is_persisted() {
            return Err(anyhow!(
                "store returned user {} without an identifier",
                user.username
            )
            .into());
        }

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    #[tracing::instrument(
        name = "Authenticate user",
        skip_all,
        fields(username = %request.username())
    )]
    async fn authenticate_user(&self, request: AuthenticationRequest) -> Result<User, UserError> {
        self.within_deadline(
            "validating authentication request",
            self.authentication_validator.validate(&request),
        )
        .await?;

        let user = match self
            .within_deadline(
                "looking up user",
                self.repository.get_by_username(request.username()),
            )
            .await
        {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => {
                tracing::debug!("Authentication failed: unknown username");
                return Err(UserError::Unauthenticated);
            }
            Err(e) => return Err(e),
        };

        match self
            .within_deadline(
                "comparing password",
                self.hasher.compare(&user.password, request.password()),
            )
            .await
        {
            Ok(()) => {}
            Err(UserError::HashMismatch) => {
                tracing::debug!(user_id = %user.id, "Authentication failed: wrong password");
                return Err(UserError::Unauthenticated);
            }
            Err(e) => return Err(e),
        }

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(user)
    }
}
