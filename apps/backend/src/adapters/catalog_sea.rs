//! SeaORM adapter for the read-only vehicle_catalog table.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbBackend, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::vehicle_catalog;

const LIKE_ESCAPE: char = '\\';

/// Normalized catalog filters; `make`/`model` are partial, case-insensitive matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub year: Option<i32>,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// Build a `%needle%` pattern where `%`, `_` and the escape char match literally.
///
/// The needle is folded the way the backend's `lower()` folds the column:
/// SQLite only lowercases ASCII, Postgres lowercases all of Unicode.
pub fn contains_pattern(needle: &str, backend: DbBackend) -> String {
    let folded = match backend {
        DbBackend::Sqlite => needle.to_ascii_lowercase(),
        _ => needle.to_lowercase(),
    };
    let mut pattern = String::with_capacity(folded.len() + 2);
    pattern.push('%');
    for c in folded.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn contains_ci(
    column: vehicle_catalog::Column,
    needle: &str,
    backend: DbBackend,
) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(contains_pattern(needle, backend)).escape(LIKE_ESCAPE))
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &CatalogFilter,
    limit: u64,
) -> Result<Vec<vehicle_catalog::Model>, sea_orm::DbErr> {
    let backend = conn.get_database_backend();
    let mut condition = Condition::all();
    if let Some(year) = filter.year {
        condition = condition.add(vehicle_catalog::Column::Year.eq(year));
    }
    if let Some(make) = filter.make.as_deref() {
        condition = condition.add(contains_ci(vehicle_catalog::Column::Make, make, backend));
    }
    if let Some(model) = filter.model.as_deref() {
        condition = condition.add(contains_ci(vehicle_catalog::Column::Model, model, backend));
    }

    vehicle_catalog::Entity::find()
        .filter(condition)
        .order_by_desc(vehicle_catalog::Column::Year)
        .order_by_asc(vehicle_catalog::Column::Make)
        .order_by_asc(vehicle_catalog::Column::Model)
        .limit(limit)
        .all(conn)
        .await
}
