//! Repository layer for service history records.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::service_history_sea as adapter;
pub use crate::adapters::service_history_sea::ServiceRecordCreate;
use crate::entities::{service_history, services};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// A service record joined with the name of its service type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub vehicle_id: i64,
    pub service_id: i64,
    pub service_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub service_date: OffsetDateTime,
    pub mileage: Option<i64>,
    #[serde(rename = "interval")]
    pub interval_miles: Option<i64>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ServiceRecord {
    pub fn from_parts(record: service_history::Model, service_name: String) -> Self {
        Self {
            id: record.id,
            vehicle_id: record.vehicle_id,
            service_id: record.service_id,
            service_name,
            service_date: record.service_date,
            mileage: record.mileage,
            interval_miles: record.interval_miles,
            cost: record.cost,
            notes: record.notes,
            created_at: record.created_at,
        }
    }

    fn from_join(
        (record, service): (service_history::Model, Option<services::Model>),
    ) -> Result<Self, DomainError> {
        match service {
            Some(service) => Ok(Self::from_parts(record, service.name)),
            None => Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "service_history id={} references missing service id={}",
                    record.id, record.service_id
                ),
            )),
        }
    }
}

pub async fn create_record<C: ConnectionTrait>(
    conn: &C,
    dto: ServiceRecordCreate,
    service_name: String,
) -> Result<ServiceRecord, DomainError> {
    let model = adapter::create_record(conn, dto).await?;
    Ok(ServiceRecord::from_parts(model, service_name))
}

pub async fn list_records<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: Option<i64>,
) -> Result<Vec<ServiceRecord>, DomainError> {
    adapter::list_records(conn, vehicle_id)
        .await?
        .into_iter()
        .map(ServiceRecord::from_join)
        .collect()
}

pub async fn delete_record<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    match adapter::delete_by_id(conn, id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::ServiceRecord,
            format!("Service record {id} not found"),
        )),
        _ => Ok(()),
    }
}

pub async fn delete_all_records<C: ConnectionTrait>(conn: &C) -> Result<u64, DomainError> {
    Ok(adapter::delete_all(conn).await?)
}
