use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::service_types::{self, ServiceCreate, ServiceType};
use crate::services::input::{optional_text, parse_interval, required_text};

/// Body of `POST /api/service-types`.
#[derive(Debug, Default, Deserialize)]
pub struct NewServiceType {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mileage_interval: Option<Value>,
    pub month_interval: Option<Value>,
}

pub async fn create_service_type<C: ConnectionTrait>(
    conn: &C,
    input: NewServiceType,
) -> Result<ServiceType, DomainError> {
    let name = required_text("name", input.name.as_deref())?;
    let dto = ServiceCreate {
        description: optional_text(input.description.as_deref()),
        mileage_interval: parse_interval("mileage_interval", input.mileage_interval.as_ref())?,
        month_interval: parse_interval("month_interval", input.month_interval.as_ref())?,
        name,
    };

    // The unique index is case-sensitive; names are unique ignoring case
    if service_types::find_by_name(conn, &dto.name).await?.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::UniqueServiceName,
            format!("A service type named '{}' already exists", dto.name),
        ));
    }

    let created = service_types::create_service_type(conn, dto).await?;
    info!(service_id = created.id, name = %created.name, "service type created");
    Ok(created)
}

/// Find a service type by name ignoring case, creating it when missing.
pub async fn find_or_create<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    mileage_interval: Option<i64>,
) -> Result<ServiceType, DomainError> {
    if let Some(existing) = service_types::find_by_name(conn, name).await? {
        return Ok(existing);
    }

    let dto = ServiceCreate {
        name: name.to_string(),
        mileage_interval: mileage_interval.and_then(|m| i32::try_from(m).ok()),
        ..Default::default()
    };

    match service_types::create_service_type(conn, dto).await {
        Ok(created) => {
            info!(service_id = created.id, name = %created.name, "service type created on demand");
            Ok(created)
        }
        // Lost a race with a concurrent insert of the same name
        Err(err) => match service_types::find_by_name(conn, name).await? {
            Some(existing) => Ok(existing),
            None => Err(err),
        },
    }
}

pub async fn list_service_types<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<ServiceType>, DomainError> {
    service_types::list_service_types(conn).await
}
