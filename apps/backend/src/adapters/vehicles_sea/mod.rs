//! SeaORM adapter for the vehicles table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};
use time::OffsetDateTime;

use crate::adapters::sequences_sea::reset_identity;
use crate::entities::vehicles;

pub mod dto;

pub use dto::VehicleCreate;

pub async fn create_vehicle<C: ConnectionTrait>(
    conn: &C,
    dto: VehicleCreate,
) -> Result<vehicles::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = vehicles::ActiveModel {
        id: NotSet,
        year: Set(dto.year),
        make: Set(dto.make),
        model: Set(dto.model),
        vin: Set(dto.vin),
        mileage: Set(dto.mileage),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Most recently created first.
pub async fn list_vehicles<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<vehicles::Model>, sea_orm::DbErr> {
    vehicles::Entity::find()
        .order_by_desc(vehicles::Column::CreatedAt)
        .order_by_desc(vehicles::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<vehicles::Model>, sea_orm::DbErr> {
    vehicles::Entity::find_by_id(id).one(conn).await
}

/// Returns `None` when no vehicle has this id.
pub async fn update_mileage<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    mileage: i64,
) -> Result<Option<vehicles::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let mut active: vehicles::ActiveModel = existing.into();
    active.mileage = Set(mileage);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

/// Returns the number of rows removed (0 or 1).
pub async fn delete_by_id<C: ConnectionTrait>(conn: &C, id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = vehicles::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Delete every vehicle and restart ids at 1.
pub async fn delete_all<C: ConnectionTrait>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    let result = vehicles::Entity::delete_many().exec(conn).await?;
    reset_identity(conn, "vehicles").await?;
    Ok(result.rows_affected)
}
