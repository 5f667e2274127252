use sea_orm::ConnectionTrait;
use serde::Deserialize;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::catalog::{self, CatalogEntry, CatalogFilter};
use crate::services::input::optional_text;

/// Query string of `GET /api/catalog`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

pub fn build_filter(query: CatalogQuery) -> Result<CatalogFilter, DomainError> {
    let year = match optional_text(query.year.as_deref()) {
        None => None,
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
            DomainError::validation(ValidationKind::Year, "year must be an integer")
        })?),
    };

    Ok(CatalogFilter {
        year,
        make: optional_text(query.make.as_deref()),
        model: optional_text(query.model.as_deref()),
    })
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &CatalogFilter,
) -> Result<Vec<CatalogEntry>, DomainError> {
    catalog::search_catalog(conn, filter).await
}
