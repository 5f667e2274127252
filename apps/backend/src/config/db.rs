use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Database engine selected by the connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    /// Infer the engine from a connection string.
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if lower.starts_with("sqlite::memory:") || lower.contains("mode=memory") {
            Ok(DbKind::SqliteMemory)
        } else if lower.starts_with("sqlite:") {
            Ok(DbKind::SqliteFile)
        } else {
            Err(AppError::config(
                "DATABASE_URL must start with postgres://, postgresql:// or sqlite:",
            ))
        }
    }

    pub fn engine(self) -> &'static str {
        match self {
            DbKind::Postgres => "postgresql",
            DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
        }
    }
}

/// Connection settings for the application pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub url: String,
    pub kind: DbKind,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 8;

impl DbSettings {
    /// Settings for an explicit URL with default pool sizing.
    pub fn for_url(url: impl Into<String>) -> Result<Self, AppError> {
        let url = url.into();
        let kind = DbKind::from_url(&url)?;
        Ok(Self {
            url,
            kind,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        })
    }

    /// Read `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_ACQUIRE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        let url = must_var("DATABASE_URL")?;
        let mut settings = Self::for_url(url)?;
        settings.max_connections = parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if settings.max_connections == 0 {
            return Err(AppError::config("DB_MAX_CONNECTIONS must be at least 1"));
        }
        settings.acquire_timeout = Duration::from_secs(parse_var(
            "DB_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?);
        Ok(settings)
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} must be a positive integer, got '{raw}'"))),
        _ => Ok(default),
    }
}
