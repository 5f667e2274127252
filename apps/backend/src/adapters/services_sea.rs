//! SeaORM adapter for the services (service type) table.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::services;

/// DTO for creating a service type.
#[derive(Debug, Clone, Default)]
pub struct ServiceCreate {
    pub name: String,
    pub description: Option<String>,
    pub mileage_interval: Option<i32>,
    pub month_interval: Option<i32>,
}

pub async fn create_service<C: ConnectionTrait>(
    conn: &C,
    dto: ServiceCreate,
) -> Result<services::Model, sea_orm::DbErr> {
    let active = services::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        mileage_interval: Set(dto.mileage_interval),
        month_interval: Set(dto.month_interval),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    active.insert(conn).await
}

/// Case-insensitive lookup on `name`.
pub async fn find_by_name_ci<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<services::Model>, sea_orm::DbErr> {
    services::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(services::Column::Name))).eq(name.to_lowercase()),
        )
        .one(conn)
        .await
}

pub async fn list_services<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<services::Model>, sea_orm::DbErr> {
    services::Entity::find()
        .order_by_asc(services::Column::Name)
        .all(conn)
        .await
}
