use std::sync::Arc;

use jobs_search::config::Config;
use jobs_search::domain::credential::CredentialIssuer;
use jobs_search::domain::user::service::UserService;
use jobs_search::inbound::http::router::create_router;
use jobs_search::outbound::catalog::HttpJobCatalog;
use jobs_search::outbound::hashing::Argon2Hasher;
use jobs_search::outbound::repositories::PostgresUserRepository;
use mockable::DefaultClock;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobs_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "jobs-search",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        application_url = %config.application.url,
        catalog_url = %config.catalog.base_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    if config.database.auto_migrate {
        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");
    }

    let clock = Arc::new(DefaultClock);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let hasher = Arc::new(Argon2Hasher::with_cost(
        config.hashing.memory_kib,
        config.hashing.iterations,
        config.hashing.parallelism,
    )?);

    let user_service = Arc::new(
        UserService::new(user_repository, hasher, clock.clone())
            .with_operation_timeout(config.core.operation_timeout()),
    );
    let credential_issuer = Arc::new(CredentialIssuer::new(
        config.jwt.secret.as_bytes(),
        config.application.url.clone(),
        chrono::Duration::seconds(config.jwt.lifetime_seconds),
        clock,
    ));
    let job_catalog = Arc::new(HttpJobCatalog::new(
        config.catalog.base_url.clone(),
        config.catalog.timeout(),
    )?);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, credential_issuer, job_catalog);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
