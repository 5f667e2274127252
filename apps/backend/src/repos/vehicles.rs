//! Repository layer for vehicles.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::vehicles_sea as adapter;
pub use crate::adapters::vehicles_sea::VehicleCreate;
use crate::entities::vehicles;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub vin: Option<String>,
    pub mileage: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<vehicles::Model> for Vehicle {
    fn from(model: vehicles::Model) -> Self {
        Self {
            id: model.id,
            year: model.year,
            make: model.make,
            model: model.model,
            vin: model.vin,
            mileage: model.mileage,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn vehicle_not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Vehicle, format!("Vehicle {id} not found"))
}

pub async fn create_vehicle<C: ConnectionTrait>(
    conn: &C,
    dto: VehicleCreate,
) -> Result<Vehicle, DomainError> {
    let model = adapter::create_vehicle(conn, dto).await?;
    Ok(model.into())
}

pub async fn list_vehicles<C: ConnectionTrait>(conn: &C) -> Result<Vec<Vehicle>, DomainError> {
    let models = adapter::list_vehicles(conn).await?;
    Ok(models.into_iter().map(Vehicle::from).collect())
}

pub async fn find_vehicle<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<Vehicle>, DomainError> {
    Ok(adapter::find_by_id(conn, id).await?.map(Vehicle::from))
}

/// Like [`find_vehicle`] but a missing row is `NotFound`.
pub async fn require_vehicle<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Vehicle, DomainError> {
    find_vehicle(conn, id)
        .await?
        .ok_or_else(|| vehicle_not_found(id))
}

pub async fn update_mileage<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    mileage: i64,
) -> Result<Vehicle, DomainError> {
    adapter::update_mileage(conn, id, mileage)
        .await?
        .map(Vehicle::from)
        .ok_or_else(|| vehicle_not_found(id))
}

/// Fails with `Conflict(StillReferenced)` while service history points at the vehicle.
pub async fn delete_vehicle<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    match adapter::delete_by_id(conn, id).await.map_err(history_conflict)? {
        0 => Err(vehicle_not_found(id)),
        _ => Ok(()),
    }
}

pub async fn delete_all_vehicles<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    adapter::delete_all(conn).await.map_err(history_conflict)
}

/// On the delete path the only referencing table is `service_history`.
fn history_conflict(err: sea_orm::DbErr) -> DomainError {
    match DomainError::from(err) {
        DomainError::Conflict(ConflictKind::StillReferenced, _) => DomainError::conflict(
            ConflictKind::StillReferenced,
            "Vehicle still has service history records",
        ),
        other => other,
    }
}
