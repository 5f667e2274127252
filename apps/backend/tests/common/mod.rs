#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert the status and decode the JSON body of a successful response.
pub async fn read_json(resp: ServiceResponse<BoxBody>, expected_status: StatusCode) -> Value {
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected_status,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("response body should be JSON")
}

/// Length of a JSON array body.
pub fn array_len(json: &Value) -> usize {
    json.as_array().expect("expected a JSON array").len()
}
