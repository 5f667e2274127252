//! SeaORM adapter for the service_history table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::adapters::sequences_sea::reset_identity;
use crate::entities::{service_history, services};

/// DTO for a new service record. The referenced vehicle and service type must exist.
#[derive(Debug, Clone)]
pub struct ServiceRecordCreate {
    pub vehicle_id: i64,
    pub service_id: i64,
    pub service_date: OffsetDateTime,
    pub mileage: Option<i64>,
    pub interval_miles: Option<i64>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

pub type RecordWithService = (service_history::Model, Option<services::Model>);

pub async fn create_record<C: ConnectionTrait>(
    conn: &C,
    dto: ServiceRecordCreate,
) -> Result<service_history::Model, sea_orm::DbErr> {
    let active = service_history::ActiveModel {
        id: NotSet,
        vehicle_id: Set(dto.vehicle_id),
        service_id: Set(dto.service_id),
        service_date: Set(dto.service_date),
        mileage: Set(dto.mileage),
        interval_miles: Set(dto.interval_miles),
        cost: Set(dto.cost),
        notes: Set(dto.notes),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

/// Records joined with their service type, newest service date first.
pub async fn list_records<C: ConnectionTrait>(
    conn: &C,
    vehicle_id: Option<i64>,
) -> Result<Vec<RecordWithService>, sea_orm::DbErr> {
    let mut query = service_history::Entity::find().find_also_related(services::Entity);
    if let Some(vehicle_id) = vehicle_id {
        query = query.filter(service_history::Column::VehicleId.eq(vehicle_id));
    }
    query
        .order_by_desc(service_history::Column::ServiceDate)
        .order_by_desc(service_history::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = service_history::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = service_history::Entity::delete_many().exec(conn).await?;
    reset_identity(conn, "service_history").await?;
    Ok(result.rows_affected)
}
