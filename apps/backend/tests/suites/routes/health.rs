use actix_web::http::StatusCode;
use actix_web::test;
use backend::routes::health::SERVICE_NAME;
use backend::state::app_state::AppState;

use crate::common::read_json;
use crate::support::create_test_app;
use crate::support::factory::fresh_state;

#[actix_web::test]
async fn root_reports_service() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], SERVICE_NAME);
    assert!(body["version"].is_string());
}

#[actix_web::test]
async fn health_reports_db_and_migrations() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert!(body["migrations"]
        .as_str()
        .is_some_and(|m| m.starts_with("m2025")));
}

#[actix_web::test]
async fn health_without_db_still_answers() {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
}
