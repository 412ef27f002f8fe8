mod common;

use std::sync::Arc;

use chrono::Utc;
use common::TestDb;
use jobs_search::domain::user::errors::ErrorKind;
use jobs_search::domain::user::errors::ValidationError;
use jobs_search::domain::user::models::AuthenticationRequest;
use jobs_search::domain::user::models::RegistrationRequest;
use jobs_search::domain::user::models::User;
use jobs_search::domain::user::models::UserId;
use jobs_search::domain::user::ports::UserFinder;
use jobs_search::domain::user::ports::UserServicePort;
use jobs_search::domain::user::ports::UserStorer;
use jobs_search::domain::user::service::UserService;
use jobs_search::outbound::hashing::Argon2Hasher;
use jobs_search::outbound::repositories::PostgresUserRepository;
use mockable::DefaultClock;

fn new_user(username: &str) -> User {
    User::unpersisted(username.to_string(), "$argon2id$hash".to_string(), Utc::now())
}

#[tokio::test]
async fn test_insert_assigns_id_and_reads_back_same_row() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let stored = repository
        .store(new_user("alice1"))
        .await
        .expect("Failed to store user");
    let second = repository
        .store(new_user("bob1"))
        .await
        .expect("Failed to store user");

    assert!(stored.id.is_persisted());
    assert!(second.id.0 > stored.id.0);
    assert_eq!(
        repository
            .get_by_username("alice1")
            .await
            .expect("Failed to fetch user"),
        stored
    );
}

#[tokio::test]
async fn test_duplicate_insert_is_unique_violation() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    repository
        .store(new_user("alice1"))
        .await
        .expect("Failed to store user");

    let err = repository.store(new_user("alice1")).await.unwrap_err();

    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::new("username", "unique"))
    );
}

#[tokio::test]
async fn test_update_existing_user() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    let mut user = repository
        .store(new_user("alice1"))
        .await
        .expect("Failed to store user");

    user.password = "$argon2id$rehashed".to_string();
    let updated = repository
        .store(user.clone())
        .await
        .expect("Failed to update user");

    assert_eq!(updated.id, user.id);
    assert_eq!(
        repository
            .get_by_username("alice1")
            .await
            .expect("Failed to fetch user")
            .password,
        "$argon2id$rehashed"
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());
    let ghost = User {
        id: UserId(9_999),
        ..new_user("ghost1")
    };

    let err = repository.store(ghost).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unknown_username_is_not_found() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let err = repository.get_by_username("ghost1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_authentication_returns_registered_identity() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let service = UserService::new(
        Arc::new(PostgresUserRepository::new(db.pool.clone())),
        Arc::new(Argon2Hasher::with_cost(8, 1, 1).expect("Failed to build hasher")),
        Arc::new(DefaultClock),
    );

    let registered = service
        .register_user(RegistrationRequest::new("alice1", "secret1", "secret1"))
        .await
        .expect("Registration failed");
    let authenticated = service
        .authenticate_user(AuthenticationRequest::new("alice1", "secret1"))
        .await
        .expect("Authentication failed");

    assert_eq!(authenticated, registered);
}
