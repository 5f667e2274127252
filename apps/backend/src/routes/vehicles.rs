use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{RecordId, ValidatedJson};
use crate::repos::vehicles as vehicles_repo;
use crate::services::vehicles::{self, MileageUpdate, NewVehicle};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCountResponse {
    pub success: bool,
    pub deleted_count: u64,
}

async fn create_vehicle(
    app_state: web::Data<AppState>,
    body: ValidatedJson<NewVehicle>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let vehicle = vehicles::create_vehicle(db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(vehicle))
}

async fn list_vehicles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let vehicles = vehicles_repo::list_vehicles(db).await?;
    Ok(HttpResponse::Ok().json(vehicles))
}

async fn get_vehicle(
    app_state: web::Data<AppState>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let vehicle = vehicles_repo::require_vehicle(db, id.get()).await?;
    Ok(HttpResponse::Ok().json(vehicle))
}

async fn update_mileage(
    app_state: web::Data<AppState>,
    id: RecordId,
    body: ValidatedJson<MileageUpdate>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let vehicle = vehicles::update_mileage(db, id.get(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vehicle))
}

async fn delete_vehicle(
    app_state: web::Data<AppState>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    vehicles::delete_vehicle(db, id.get()).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        deleted_id: id.get(),
    }))
}

async fn delete_all_vehicles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let deleted_count = vehicles::delete_all_vehicles(db).await?;
    Ok(HttpResponse::Ok().json(DeletedCountResponse {
        success: true,
        deleted_count,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // `/all` must be registered before `/{id}`
    cfg.route("/all", web::delete().to(delete_all_vehicles))
        .route("", web::post().to(create_vehicle))
        .route("", web::get().to(list_vehicles))
        .route("/{id}", web::get().to(get_vehicle))
        .route("/{id}", web::patch().to(update_mileage))
        .route("/{id}", web::delete().to(delete_vehicle));
}
