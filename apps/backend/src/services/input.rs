//! Sanitizers for loosely typed request fields.
//!
//! Clients send numbers either as JSON numbers or as strings ("12,345 mi"),
//! so numeric fields arrive as `serde_json::Value` and are normalized here.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_MODEL_YEAR: i32 = 1886;
pub const MAX_MODEL_YEAR: i32 = 2100;

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn non_negative_integer(n: &serde_json::Number) -> Option<i64> {
    n.as_i64()
        .filter(|v| *v >= 0)
        .or_else(|| n.as_u64().and_then(|v| i64::try_from(v).ok()))
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn invalid_mileage(field: &str) -> DomainError {
    DomainError::validation(
        ValidationKind::Mileage,
        format!("{field} must be a non-negative whole number"),
    )
}

/// Parse an identifier given as a positive integer or a digit string.
pub fn parse_id(field: &str, value: Option<&Value>) -> Result<i64, DomainError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                s.parse::<i64>().ok()
            } else {
                None
            }
        }
        _ if is_missing(value) => {
            return Err(DomainError::validation(
                ValidationKind::Id,
                format!("{field} is required"),
            ))
        }
        _ => None,
    };

    parsed.filter(|id| *id > 0).ok_or_else(|| {
        DomainError::validation(ValidationKind::Id, format!("{field} must be a positive integer"))
    })
}

/// Parse a model year, accepting an integer or a digit string.
pub fn parse_year(value: Option<&Value>) -> Result<i32, DomainError> {
    let year = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ if is_missing(value) => {
            return Err(DomainError::validation(ValidationKind::Year, "year is required"))
        }
        _ => None,
    };

    match year {
        Some(y) if (i64::from(MIN_MODEL_YEAR)..=i64::from(MAX_MODEL_YEAR)).contains(&y) => {
            Ok(y as i32)
        }
        _ => Err(DomainError::validation(
            ValidationKind::Year,
            format!("year must be a whole number between {MIN_MODEL_YEAR} and {MAX_MODEL_YEAR}"),
        )),
    }
}

/// Lenient mileage: strings keep only their digits, and nothing left means absent.
pub fn sanitize_mileage(field: &str, value: Option<&Value>) -> Result<Option<i64>, DomainError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => non_negative_integer(n)
            .map(Some)
            .ok_or_else(|| invalid_mileage(field)),
        Some(Value::String(s)) => {
            let digits = digits_only(s);
            if digits.is_empty() {
                Ok(None)
            } else {
                digits
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| invalid_mileage(field))
            }
        }
        Some(_) => Err(invalid_mileage(field)),
    }
}

/// Strict mileage for updates: a non-negative integer, or digits with `,` `_`
/// or whitespace separators. Anything else is rejected.
pub fn parse_mileage_strict(value: Option<&Value>) -> Result<i64, DomainError> {
    match value {
        None | Some(Value::Null) => Err(DomainError::validation(
            ValidationKind::Mileage,
            "mileage is required",
        )),
        Some(Value::Number(n)) => non_negative_integer(n).ok_or_else(|| invalid_mileage("mileage")),
        Some(Value::String(s)) => {
            let compact: String = s
                .chars()
                .filter(|c| !(c.is_whitespace() || *c == ',' || *c == '_'))
                .collect();
            if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid_mileage("mileage"));
            }
            compact.parse::<i64>().map_err(|_| invalid_mileage("mileage"))
        }
        Some(_) => Err(invalid_mileage("mileage")),
    }
}

/// Trim, upper-case and check a VIN. Blank means "no VIN".
pub fn normalize_vin(raw: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(vin) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let vin = vin.to_ascii_uppercase();
    if lazy_regex::regex_is_match!(r"^[A-HJ-NPR-Z0-9]{17}$", vin.as_str()) {
        Ok(Some(vin))
    } else {
        Err(DomainError::validation(
            ValidationKind::Vin,
            "vin must be 17 characters (letters except I, O, Q and digits)",
        ))
    }
}

/// Required free text: trimmed and non-empty.
pub fn required_text(field: &str, raw: Option<&str>) -> Result<String, DomainError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| DomainError::validation_other(format!("{field} is required")))
}

/// Optional free text: trimmed, blank becomes `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accept an RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_service_date(raw: Option<&str>) -> Result<Option<OffsetDateTime>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(Some(ts));
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(|d| Some(d.midnight().assume_utc()))
        .map_err(|_| {
            DomainError::validation(
                ValidationKind::Date,
                "service_date must be an RFC 3339 timestamp or YYYY-MM-DD",
            )
        })
}

/// Cost as a finite, non-negative number (JSON number or numeric string).
pub fn parse_cost(value: Option<&Value>) -> Result<Option<f64>, DomainError> {
    let cost = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_start_matches('$').parse::<f64>().ok(),
        Some(_) => None,
    };

    match cost {
        Some(c) if c.is_finite() && c >= 0.0 => Ok(Some(c)),
        _ => Err(DomainError::validation(
            ValidationKind::Cost,
            "cost must be a non-negative number",
        )),
    }
}

/// Optional non-negative interval for service types.
pub fn parse_interval(field: &str, value: Option<&Value>) -> Result<Option<i32>, DomainError> {
    match sanitize_mileage(field, value)? {
        None => Ok(None),
        Some(v) => i32::try_from(v).map(Some).map_err(|_| {
            DomainError::validation_other(format!("{field} is too large"))
        }),
    }
}
