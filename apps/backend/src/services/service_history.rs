use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::info;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::service_history::{self, ServiceRecord, ServiceRecordCreate};
use crate::repos::vehicles;
use crate::services::input::{
    optional_text, parse_cost, parse_id, parse_service_date, required_text, sanitize_mileage,
};
use crate::services::service_types;

/// Body of `POST /api/services`.
#[derive(Debug, Default, Deserialize)]
pub struct NewServiceRecord {
    pub vehicle_id: Option<Value>,
    pub service_name: Option<String>,
    pub mileage: Option<Value>,
    pub interval: Option<Value>,
    pub service_date: Option<String>,
    pub cost: Option<Value>,
    pub notes: Option<String>,
}

/// Validated form of [`NewServiceRecord`], before any lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecordInput {
    pub vehicle_id: i64,
    pub service_name: String,
    pub mileage: Option<i64>,
    pub interval_miles: Option<i64>,
    pub service_date: OffsetDateTime,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

pub fn validate_new_record(input: NewServiceRecord) -> Result<ServiceRecordInput, DomainError> {
    Ok(ServiceRecordInput {
        vehicle_id: parse_id("vehicle_id", input.vehicle_id.as_ref())?,
        service_name: required_text("service_name", input.service_name.as_deref())?,
        mileage: sanitize_mileage("mileage", input.mileage.as_ref())?,
        interval_miles: sanitize_mileage("interval", input.interval.as_ref())?,
        service_date: parse_service_date(input.service_date.as_deref())?
            .unwrap_or_else(OffsetDateTime::now_utc),
        cost: parse_cost(input.cost.as_ref())?,
        notes: optional_text(input.notes.as_deref()),
    })
}

/// Parse the optional `vehicle_id` list filter; blank means no filter.
pub fn parse_vehicle_filter(raw: Option<&str>) -> Result<Option<i64>, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::Id,
                    "vehicle_id must be a positive integer",
                )
            }),
    }
}

/// A foreign-key failure on insert means the vehicle went away after the lookup.
fn vehicle_gone_on_insert(err: DomainError, vehicle_id: i64) -> DomainError {
    match err {
        DomainError::Conflict(ConflictKind::StillReferenced | ConflictKind::MissingReference, _) => {
            DomainError::not_found(
                NotFoundKind::Vehicle,
                format!("Vehicle {vehicle_id} not found"),
            )
        }
        other => other,
    }
}

pub async fn create_record<C: ConnectionTrait>(
    conn: &C,
    input: NewServiceRecord,
) -> Result<ServiceRecord, DomainError> {
    let input = validate_new_record(input)?;

    vehicles::require_vehicle(conn, input.vehicle_id).await?;
    let service =
        service_types::find_or_create(conn, &input.service_name, input.interval_miles).await?;

    let record = service_history::create_record(
        conn,
        ServiceRecordCreate {
            vehicle_id: input.vehicle_id,
            service_id: service.id,
            service_date: input.service_date,
            mileage: input.mileage,
            interval_miles: input.interval_miles,
            cost: input.cost,
            notes: input.notes,
        },
        service.name,
    )
    .await
    .map_err(|err| vehicle_gone_on_insert(err, input.vehicle_id))?;

    info!(
        record_id = record.id,
        vehicle_id = record.vehicle_id,
        service_id = record.service_id,
        "service record created"
    );
    Ok(record)
}

pub async fn list_records<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: Option<i64>,
) -> Result<Vec<ServiceRecord>, DomainError> {
    service_history::list_records(conn, vehicle_id).await
}

pub async fn delete_record<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    service_history::delete_record(conn, id).await?;
    info!(record_id = id, "service record deleted");
    Ok(())
}

pub async fn delete_all_records<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    let deleted = service_history::delete_all_records(conn).await?;
    info!(deleted, "all service records deleted");
    Ok(deleted)
}
