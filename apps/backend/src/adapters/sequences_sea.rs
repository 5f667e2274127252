//! Identity reset after bulk deletes.

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};

/// Restart the auto-increment counter of `table` so the next insert gets id 1.
///
/// Only call this on a table that was just emptied.
pub async fn reset_identity<C: ConnectionTrait>(conn: &C, table: &str) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    match backend {
        DatabaseBackend::Postgres => {
            conn.execute(Statement::from_sql_and_values(
                backend,
                "SELECT setval(pg_get_serial_sequence($1, 'id'), 1, false)",
                [table.into()],
            ))
            .await?;
        }
        DatabaseBackend::Sqlite => {
            // sqlite_sequence only exists once an AUTOINCREMENT table has been created
            let has_sequence = conn
                .query_one(Statement::from_string(
                    backend,
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
                ))
                .await?
                .is_some();
            if has_sequence {
                conn.execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM sqlite_sequence WHERE name = ?",
                    [table.into()],
                ))
                .await?;
            }
        }
        DatabaseBackend::MySql => {
            return Err(DbErr::Custom(format!(
                "identity reset is not supported on {backend:?}"
            )));
        }
    }
    Ok(())
}
