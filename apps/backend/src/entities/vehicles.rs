use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub year: i32,
    pub make: String,
    pub model: String,
    #[sea_orm(unique)]
    pub vin: Option<String>,
    pub mileage: i64,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
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
