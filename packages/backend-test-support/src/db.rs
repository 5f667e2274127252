//! In-memory SQLite databases migrated with the production `Migrator`.

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A fresh, fully migrated `sqlite::memory:` database.
///
/// The pool is pinned to one connection: every SQLite in-memory connection
/// is its own database, so a second connection would see an empty schema.
pub async fn migrated_sqlite_memory() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("connect sqlite::memory:");
    migrate(&db, MigrationCommand::Up)
        .await
        .expect("migrate sqlite::memory:");
    db
}
