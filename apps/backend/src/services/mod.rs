//! Domain services: input validation and multi-step flows over the repos.

pub mod catalog;
pub mod input;
pub mod service_history;
pub mod service_types;
pub mod vehicles;
