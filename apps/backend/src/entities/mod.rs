pub mod service_history;
pub mod services;
pub mod vehicle_catalog;
pub mod vehicles;

pub use service_history::Entity as ServiceHistory;
pub use service_history::Model as ServiceRecord;
pub use services::Entity as Services;
pub use services::Model as Service;
pub use vehicle_catalog::Entity as VehicleCatalog;
pub use vehicle_catalog::Model as CatalogEntry;
pub use vehicles::Entity as Vehicles;
pub use vehicles::Model as Vehicle;
