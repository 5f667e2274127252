use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend::state::app_state::AppState;
use backend::{AppError, ErrorCode};
use backend_test_support::problem_details::assert_problem_details;

use crate::support::create_test_app;

async fn not_found_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(ErrorCode::NotFound, "Resource not found"))
}

async fn internal_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("pool exhausted at 10.0.0.5"))
}

// handler-only: validates error shape; no DB
#[actix_web::test]
async fn errors_render_as_problem_details() {
    let app = create_test_app(AppState::without_db())
        .with_routes(|cfg| {
            cfg.route("/nf", web::get().to(not_found_handler))
                .route("/boom", web::get().to(internal_handler));
        })
        .build()
        .await;

    let req = test::TestRequest::get().uri("/nf").to_request();
    let problem =
        assert_problem_details(test::call_service(&app, req).await, "NOT_FOUND", StatusCode::NOT_FOUND)
            .await;
    assert_eq!(problem.detail, "Resource not found");
    assert_eq!(problem.title, "Not Found");
    assert!(problem.type_.ends_with("/NOT_FOUND"));

    let req = test::TestRequest::get().uri("/boom").to_request();
    let problem = assert_problem_details(
        test::call_service(&app, req).await,
        "INTERNAL",
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert!(!problem.detail.contains("10.0.0.5"));
}

#[actix_web::test]
async fn missing_db_is_503() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/vehicles").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().get("Retry-After").is_some());
    assert_problem_details(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE).await;
}

#[actix_web::test]
async fn malformed_json_is_400_problem() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"year\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get("x-trace-id").is_some());
}

#[actix_web::test]
async fn every_response_carries_trace_id() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header");
    assert!(!trace_id.is_empty());
}
