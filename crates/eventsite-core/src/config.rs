//! Configuration module
//!
//! This module provides configuration structures for the API: server, database,
//! upload storage and logging settings. Configuration is read once at startup and
//! then passed explicitly to whatever needs it; nothing downstream reads the
//! environment again.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEV_PORT: u16 = 5000;
const PROD_PORT: u16 = 80;
const DB_PORT: u16 = 5432;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
/// Files accepted by the largest layout (gallery: four images plus one video).
const MAX_FILES_PER_REQUEST: usize = 5;
/// Headroom for scalar form fields and multipart boundaries.
const FORM_FIELDS_ALLOWANCE_BYTES: usize = 1024 * 1024;

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Base configuration shared by every binary
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub http_concurrency_limit: usize,
    pub log_format: LogFormat,
}

/// Database connection settings.
///
/// Either a full `url` or the discrete host/user/password/name parts; the url wins when both
/// are present.
#[derive(Clone, Debug, Default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Site (API) configuration
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub base: BaseConfig,
    pub database: DatabaseSettings,
    /// Public base URL used to build asset links, e.g. `https://api.example.com`
    pub base_url: String,
    /// Root directory holding the `images/` and `videos/` upload folders
    pub uploads_dir: PathBuf,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<SiteConfig>);

impl Config {
    fn as_site(&self) -> &SiteConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_site().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment, map in tests, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = SiteConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_site().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_site().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_site().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_site().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_site().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_site().base.db_timeout_seconds
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_site().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_site().base.log_format
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.as_site().database
    }

    pub fn base_url(&self) -> &str {
        &self.as_site().base_url
    }

    pub fn uploads_dir(&self) -> &PathBuf {
        &self.as_site().uploads_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_site().max_upload_size_bytes
    }

    /// Upper bound for a whole request body: every file slot filled at the size limit plus form fields.
    pub fn max_request_body_bytes(&self) -> usize {
        self.max_upload_size_bytes()
            .saturating_mul(MAX_FILES_PER_REQUEST)
            .saturating_add(FORM_FIELDS_ALLOWANCE_BYTES)
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl SiteConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .or_else(|| lookup("NODE_ENV"))
            .unwrap_or_else(|| "development".to_string());
        let is_production = is_production_env(&environment);

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let default_port = if is_production { PROD_PORT } else { DEV_PORT };
        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => default_port,
        };

        let log_format = match lookup("LOG_FORMAT").map(|s| s.to_lowercase()) {
            Some(ref f) if f == "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let base = BaseConfig {
            server_port,
            cors_origins,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            environment,
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                HTTP_CONCURRENCY_LIMIT,
            )
            .max(1),
            log_format,
        };

        let database = DatabaseSettings {
            url: lookup("DATABASE_URL"),
            host: lookup("DB_HOST"),
            port: parse_or(&lookup, "DB_PORT", DB_PORT),
            user: lookup("DB_USER"),
            password: lookup("DB_PASSWORD"),
            name: lookup("DB_NAME"),
        };
        if database.url.is_none() && (database.host.is_none() || database.name.is_none()) {
            return Err(anyhow::anyhow!(
                "DATABASE_URL or DB_HOST and DB_NAME must be set"
            ));
        }

        let base_url = lookup("BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .ok_or_else(|| anyhow::anyhow!("BASE_URL must be set to build asset links"))?;

        let max_upload_size_mb = parse_or(&lookup, "MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB);

        Ok(SiteConfig {
            base,
            database,
            base_url,
            uploads_dir: PathBuf::from(lookup("UPLOADS_DIR").unwrap_or_else(|| "uploads".to_string())),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        })
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "BASE_URL must start with http:// or https:// (got '{}')",
                self.base_url
            ));
        }
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }
        if self.uploads_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOADS_DIR must not be empty"));
        }
        Ok(())
    }
}
