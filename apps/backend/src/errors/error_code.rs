//! Error codes for the maintenance tracker API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the HTTP API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// General validation error
    ValidationError,
    /// Malformed or unreadable request body
    BadRequest,
    /// Year missing, non-numeric or out of range
    InvalidYear,
    /// Mileage is not a non-negative integer
    InvalidMileage,
    /// VIN is not a 17 character VIN
    InvalidVin,
    /// Malformed identifier in path or query string
    InvalidId,
    /// Service date is not RFC 3339 or YYYY-MM-DD
    InvalidDate,
    /// Cost is negative or not a number
    InvalidCost,

    // Resource Not Found
    /// Vehicle not found
    VehicleNotFound,
    /// Service history record not found
    ServiceRecordNotFound,
    /// Service type not found
    ServiceNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// VIN already registered to another vehicle
    VinConflict,
    /// Service type name already exists
    ServiceNameConflict,
    /// Row is still referenced by service history
    FkViolation,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Stored data failed to decode
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidYear => "INVALID_YEAR",
            Self::InvalidMileage => "INVALID_MILEAGE",
            Self::InvalidVin => "INVALID_VIN",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidCost => "INVALID_COST",

            Self::VehicleNotFound => "VEHICLE_NOT_FOUND",
            Self::ServiceRecordNotFound => "SERVICE_RECORD_NOT_FOUND",
            Self::ServiceNotFound => "SERVICE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::VinConflict => "VIN_CONFLICT",
            Self::ServiceNameConflict => "SERVICE_NAME_CONFLICT",
            Self::FkViolation => "FK_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
