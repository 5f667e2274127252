//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests and by the ingestion
//! tool's tests: logging setup, migrated in-memory databases, and
//! problem-details assertions.

pub mod db;
pub mod logging;
pub mod problem_details;
