use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::ValidationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserFinder;
use crate::domain::user::ports::UserStorer;

#[derive(Default)]
struct State {
    users: HashMap<i64, User>,
    last_id: i64,
}

/// Identity store kept in process memory.
///
/// Enforces the same username uniqueness as the database schema.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserFinder for InMemoryUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<User, UserError> {
        let state = self.state.read().await;

        state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned()
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

#[async_trait]
impl UserStorer for InMemoryUserRepository {
    async fn store(&self, mut user: User) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        let taken = state
            .users
            .values()
            .any(|existing| existing.username == user.username && existing.id != user.id);
        if taken {
            return Err(ValidationError::new("username", "unique").into());
        }

        if user.id.is_persisted() {
            if !state.users.contains_key(&user.id.0) {
                return Err(UserError::NotFound(user.username));
            }
        } else {
            state.last_id += 1;
            user.id = UserId(state.last_id);
        }

        state.users.insert(user.id.0, user.clone());

        Ok(user)
    }
}
