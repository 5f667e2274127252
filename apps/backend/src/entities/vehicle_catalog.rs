use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference row filled by the catalog ingestion tool.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub trim: Option<String>,
    pub engine: Option<String>,
    pub transmission: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
