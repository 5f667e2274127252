//! Offline population of the `vehicle_catalog` table.
//!
//! Two entry points: `csv_to_sql` converts a catalog CSV into batched INSERT
//! statements, and `harvest` walks the NHTSA vPIC API and appends new rows to
//! a CSV file and/or the database.

pub mod csv_to_sql;
pub mod error;
pub mod harvest;
pub mod retry;
pub mod rows;
pub mod sinks;
pub mod vpic;

pub use error::{IngestError, Result};
