use anyhow::Context;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::ValidationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserFinder;
use crate::domain::user::ports::UserStorer;

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            username: row.username,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return ValidationError::new("username", "unique").into();
        }
    }
    UserError::Internal(anyhow::Error::new(e).context("writing user row"))
}

#[async_trait]
impl UserFinder for PostgresUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("fetching user by username")?;

        row.map(User::from)
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}

#[async_trait]
impl UserStorer for PostgresUserRepository {
    /// Insert when the id is unassigned, otherwise update by id.
    ///
    /// Returns the row as stored, so timestamps carry the database precision.
    async fn store(&self, user: User) -> Result<User, UserError> {
        let mut tx = self.pool.begin().await.context("beginning transaction")?;

        let row = if user.id.is_persisted() {
            sqlx::query_as::<_, UserRow>(
                r#"
                UPDATE users
                SET username = $2, password = $3, updated_at = $4
                WHERE id = $1
                RETURNING id, username, password, created_at, updated_at
                "#,
            )
            .bind(user.id.0)
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.updated_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| UserError::NotFound(user.username.clone()))?
        } else {
            sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (username, password, created_at, updated_at)
                VALUES ($1, $2, $3, $4)
                RETURNING id, username, password, created_at, updated_at
                "#,
            )
            .bind(&user.username)
            .bind(&user.password)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_write_error)?
        };

        tx.commit().await.context("committing transaction")?;

        Ok(row.into())
    }
}
