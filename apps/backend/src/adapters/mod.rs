//! SeaORM adapters. Functions here return `sea_orm::DbErr`; repos map it.

pub mod catalog_sea;
pub mod sequences_sea;
pub mod service_history_sea;
pub mod services_sea;
pub mod vehicles_sea;
