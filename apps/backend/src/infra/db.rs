use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{DbKind, DbSettings};
use crate::error::AppError;
use crate::logging::pii::Redacted;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all attempts are used.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                    attempt, max_attempts, interval_ms
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(settings: &DbSettings) -> ConnectOptions {
    let mut opt = ConnectOptions::new(settings.url.clone());
    opt.acquire_timeout(settings.acquire_timeout)
        .sqlx_logging(false);

    match settings.kind {
        // every connection to sqlite::memory: is its own database
        DbKind::SqliteMemory => {
            opt.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            opt.max_connections(settings.max_connections);
        }
    }
    opt
}

/// Open the application pool without touching the schema.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let opt = connect_options(settings);

    // Postgres may still be starting in containerized setups; local SQLite is not retried
    if settings.kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        warn!(error = %Redacted(&e.to_string()), "db=connect failed");
                        AppError::db_unavailable()
                    })
                }
            },
            CONNECT_ATTEMPTS,
            CONNECT_INTERVAL_MS,
        )
        .await
    } else {
        Database::connect(opt).await.map_err(|e| {
            AppError::config(format!(
                "failed to open SQLite database: {}",
                Redacted(&e.to_string())
            ))
        })
    }
}

/// Build the app DB *and* guarantee the schema is current.
pub async fn bootstrap_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    info!(
        "bootstrap=start engine={} url={} max_connections={}",
        settings.kind.engine(),
        Redacted(&settings.url),
        settings.max_connections
    );

    let conn = connect_db(settings).await?;

    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;

    info!("bootstrap=ready");
    Ok(conn)
}
