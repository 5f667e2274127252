use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod catalog;
pub mod health;
pub mod service_history;
pub mod service_types;
pub mod vehicles;

fn query_error(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

/// Register every endpoint. Used by `main.rs` and by the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error));

    // Root + health: / and /health
    cfg.configure(health::configure_routes);

    // Vehicles: /api/vehicles/**
    cfg.service(web::scope("/api/vehicles").configure(vehicles::configure_routes));

    // Service history: /api/services/**
    cfg.service(web::scope("/api/services").configure(service_history::configure_routes));

    // Service types: /api/service-types
    cfg.service(web::scope("/api/service-types").configure(service_types::configure_routes));

    // Catalog: /api/catalog
    cfg.service(web::scope("/api/catalog").configure(catalog::configure_routes));
}
