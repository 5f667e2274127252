//! Repository layer: domain structs over the sea-orm adapters.

pub mod catalog;
pub mod service_history;
pub mod service_types;
pub mod vehicles;
