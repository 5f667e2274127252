use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::services::catalog::{self, CatalogQuery};
use crate::state::app_state::AppState;

async fn search_catalog(
    app_state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = catalog::build_filter(query.into_inner())?;
    let db = require_db(&app_state)?;
    let entries = catalog::search(db, &filter).await?;
    Ok(HttpResponse::Ok().json(entries))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(search_catalog));
}
