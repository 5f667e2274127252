use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::service_types::{self, NewServiceType};
use crate::state::app_state::AppState;

async fn list_service_types(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let types = service_types::list_service_types(db).await?;
    Ok(HttpResponse::Ok().json(types))
}

async fn create_service_type(
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewServiceType>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let created = service_types::create_service_type(db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_service_types))
        .route("", web::post().to(create_service_type));
}
