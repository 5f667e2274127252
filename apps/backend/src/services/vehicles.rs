use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::vehicles::{self, Vehicle, VehicleCreate};
use crate::services::input::{
    normalize_vin, parse_mileage_strict, parse_year, required_text, sanitize_mileage,
};

/// Body of `POST /api/vehicles`. Numeric fields may arrive as strings.
#[derive(Debug, Default, Deserialize)]
pub struct NewVehicle {
    pub year: Option<Value>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<Value>,
    pub vin: Option<String>,
}

/// Body of `PATCH /api/vehicles/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct MileageUpdate {
    pub mileage: Option<Value>,
}

/// Validate the raw input into an insertable vehicle.
pub fn validate_new_vehicle(input: NewVehicle) -> Result<VehicleCreate, DomainError> {
    let year = parse_year(input.year.as_ref())?;
    let make = required_text("make", input.make.as_deref())?;
    let model = required_text("model", input.model.as_deref())?;
    let mileage = sanitize_mileage("mileage", input.mileage.as_ref())?.unwrap_or(0);

    let mut dto = VehicleCreate::new(year, make, model).with_mileage(mileage);
    if let Some(vin) = normalize_vin(input.vin.as_deref())? {
        dto = dto.with_vin(vin);
    }
    Ok(dto)
}

pub async fn create_vehicle<C: ConnectionTrait>(
    conn: &C,
    input: NewVehicle,
) -> Result<Vehicle, DomainError> {
    let dto = validate_new_vehicle(input)?;
    let vehicle = vehicles::create_vehicle(conn, dto).await?;

    info!(
        vehicle_id = vehicle.id,
        year = vehicle.year,
        vin = %Redacted(vehicle.vin.as_deref().unwrap_or("")),
        "vehicle created"
    );
    Ok(vehicle)
}

pub async fn update_mileage<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    input: MileageUpdate,
) -> Result<Vehicle, DomainError> {
    let mileage = parse_mileage_strict(input.mileage.as_ref())?;
    let vehicle = vehicles::update_mileage(conn, id, mileage).await?;
    info!(vehicle_id = id, mileage, "vehicle mileage updated");
    Ok(vehicle)
}

pub async fn delete_vehicle<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    vehicles::delete_vehicle(conn, id).await?;
    info!(vehicle_id = id, "vehicle deleted");
    Ok(())
}

pub async fn delete_all_vehicles<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    let deleted = vehicles::delete_all_vehicles(conn).await?;
    info!(deleted, "all vehicles deleted");
    Ok(deleted)
}
