use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{RecordId, ValidatedJson};
use crate::routes::vehicles::{DeletedCountResponse, DeletedResponse};
use crate::services::service_history::{self, parse_vehicle_filter, NewServiceRecord};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ListQuery {
    vehicle_id: Option<String>,
}

async fn create_record(
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewServiceRecord>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let record = service_history::create_record(db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

async fn list_records(
    app_state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let vehicle_id = parse_vehicle_filter(query.vehicle_id.as_deref())?;
    let db = require_db(&app_state)?;
    let records = service_history::list_records(db, vehicle_id).await?;
    Ok(HttpResponse::Ok().json(records))
}

async fn delete_record(
    app_state: web::Data<AppState>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    service_history::delete_record(db, id.get()).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        deleted_id: id.get(),
    }))
}

async fn delete_all_records(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let deleted_count = service_history::delete_all_records(db).await?;
    Ok(HttpResponse::Ok().json(DeletedCountResponse {
        success: true,
        deleted_count,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/all", web::delete().to(delete_all_records))
        .route("", web::post().to(create_record))
        .route("", web::get().to(list_records))
        .route("/{id}", web::delete().to(delete_record));
}
