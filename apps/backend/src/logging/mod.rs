//! Logging helpers shared by middleware, adapters and error mapping.

pub mod pii;
