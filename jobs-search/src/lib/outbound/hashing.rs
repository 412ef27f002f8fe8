use anyhow::Context;
use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::user::errors::UserError;
use crate::domain::user::ports::Comparator;
use crate::domain::user::ports::Hasher;

/// Argon2id hasher running on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    hasher: PasswordHasher,
}

impl Argon2Hasher {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }

    /// # Errors
    /// * `InvalidParams` - Argon2 rejected the cost parameters
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        Ok(Self::new(PasswordHasher::with_cost(
            memory_kib,
            iterations,
            parallelism,
        )?))
    }
}

#[async_trait]
impl Hasher for Argon2Hasher {
    async fn hash(&self, plain: &str) -> Result<String, UserError> {
        let hasher = self.hasher.clone();
        let plain = plain.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .context("password hashing task failed")?
            .map_err(|e| UserError::Internal(e.into()))
    }
}

#[async_trait]
impl Comparator for Argon2Hasher {
    async fn compare(&self, hashed: &str, plain: &str) -> Result<(), UserError> {
        let hasher = self.hasher.clone();
        let hashed = hashed.to_owned();
        let plain = plain.to_owned();

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&plain, &hashed))
            .await
            .context("password comparison task failed")?
            .map_err(|e| UserError::Internal(e.into()))?;

        if matches {
            Ok(())
        } else {
            Err(UserError::HashMismatch)
        }
    }
}
