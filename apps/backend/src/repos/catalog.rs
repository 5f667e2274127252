//! Repository layer for the vehicle catalog.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::catalog_sea as adapter;
pub use crate::adapters::catalog_sea::CatalogFilter;
use crate::entities::vehicle_catalog;
use crate::errors::domain::DomainError;

/// Upper bound on rows returned by one catalog query.
pub const CATALOG_ROW_LIMIT: u64 = 50_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
}

impl From<vehicle_catalog::Model> for CatalogEntry {
    fn from(model: vehicle_catalog::Model) -> Self {
        Self {
            id: model.id,
            year: model.year,
            make: model.make,
            model: model.model,
            trim: model.trim,
            engine: model.engine,
            transmission: model.transmission,
        }
    }
}

pub async fn search_catalog<C: ConnectionTrait>(
    conn: &C,
    filter: &CatalogFilter,
) -> Result<Vec<CatalogEntry>, DomainError> {
    let models = adapter::search(conn, filter, CATALOG_ROW_LIMIT).await?;
    Ok(models.into_iter().map(CatalogEntry::from).collect())
}
