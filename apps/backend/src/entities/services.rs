use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A kind of maintenance work ("Oil Change", "Tire Rotation").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_name = "mileage_interval")]
    pub mileage_interval: Option<i32>,
    #[sea_orm(column_name = "month_interval")]
    pub month_interval: Option<i32>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::service_history::Entity")]
    ServiceHistory,
}

impl Related<super::service_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
