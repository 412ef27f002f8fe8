use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub application: ApplicationConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub hashing: HashingConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub core: CoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApplicationConfig {
    /// Public URL, used as the token issuer.
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub lifetime_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    #[serde(default = "default_catalog_timeout")]
    pub timeout_seconds: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoreConfig {
    pub operation_timeout_ms: u64,
}

impl CoreConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            operation_timeout_ms: 10_000,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_auto_migrate() -> bool {
    true
}

fn default_catalog_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let settings = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_settings(settings)
    }

    fn from_settings(settings: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.lifetime_seconds < 1 {
            return Err(ConfigError::Message(format!(
                "jwt.lifetime_seconds must be at least 1, got {}",
                self.jwt.lifetime_seconds
            )));
        }
        Ok(())
    }
}
