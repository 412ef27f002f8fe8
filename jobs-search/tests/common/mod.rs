#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use jobs_search::domain::credential::CredentialIssuer;
use jobs_search::domain::user::service::UserService;
use jobs_search::inbound::http::router::create_router;
use jobs_search::outbound::catalog::HttpJobCatalog;
use jobs_search::outbound::hashing::Argon2Hasher;
use jobs_search::outbound::repositories::InMemoryUserRepository;
use mockable::DefaultClock;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use serde_json::Value;
use wiremock::MockServer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ISSUER: &str = "http://localhost:8080";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub catalog: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let catalog = MockServer::start().await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(DefaultClock);
        let hasher = Arc::new(Argon2Hasher::with_cost(8, 1, 1).expect("Failed to build hasher"));
        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            hasher,
            clock.clone(),
        ));
        let credential_issuer = Arc::new(CredentialIssuer::new(
            JWT_SECRET,
            ISSUER,
            chrono::Duration::hours(1),
            clock,
        ));
        let job_catalog = Arc::new(
            HttpJobCatalog::new(catalog.uri(), Duration::from_secs(5))
                .expect("Failed to build job catalog"),
        );

        let router = create_router(user_service, credential_issuer, job_catalog);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            catalog,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/user/registration")
            .json(&json!({
                "username": username,
                "password": password,
                "password_confirmation": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/user/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a fresh account and return its access token
    pub async fn access_token(&self) -> String {
        let body: Value = self
            .register("alice1", "secret1")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset, so database tests are
    /// skipped on machines without Postgres.
    pub async fn new() -> Option<Self> {
        let admin_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping Postgres test");
                return None;
            }
        };

        let db_name = format!(
            "test_jobs_search_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity \
                             WHERE datname = '{}';",
                            db_name
                        )
                        .as_str(),
                    )
                    .await;
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
