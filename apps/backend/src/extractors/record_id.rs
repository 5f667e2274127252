use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive integer taken from the `{id}` route segment.
///
/// Existence is not checked here; the operation using the id reports 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn get(self) -> i64 {
        self.0
    }
}

fn parse_record_id(req: &HttpRequest) -> Result<RecordId, AppError> {
    let raw = req
        .match_info()
        .get("id")
        .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidId, "Missing id parameter"))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::invalid(ErrorCode::InvalidId, format!("Invalid id: {raw}")))?;

    if id <= 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidId,
            format!("Id must be positive, got: {id}"),
        ));
    }
    Ok(RecordId(id))
}

impl FromRequest for RecordId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_record_id(req))
    }
}
