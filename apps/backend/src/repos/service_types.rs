//! Repository layer for service types.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::services_sea as adapter;
pub use crate::adapters::services_sea::ServiceCreate;
use crate::entities::services;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub mileage_interval: Option<i32>,
    pub month_interval: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<services::Model> for ServiceType {
    fn from(model: services::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            mileage_interval: model.mileage_interval,
            month_interval: model.month_interval,
            created_at: model.created_at,
        }
    }
}

pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<ServiceType>, DomainError> {
    Ok(adapter::find_by_name_ci(conn, name).await?.map(ServiceType::from))
}

pub async fn create_service_type<C: ConnectionTrait>(
    conn: &C,
    dto: ServiceCreate,
) -> Result<ServiceType, DomainError> {
    Ok(adapter::create_service(conn, dto).await?.into())
}

pub async fn list_service_types<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<ServiceType>, DomainError> {
    let models = adapter::list_services(conn).await?;
    Ok(models.into_iter().map(ServiceType::from).collect())
}
