use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use serde_json::json;

use crate::common::{array_len, read_json};
use crate::support::create_test_app;
use crate::support::factory::{fresh_state, seed_service};

#[actix_web::test]
async fn create_and_list_sorted_by_name() {
    let (state, db) = fresh_state().await;
    seed_service(&db, "Tire Rotation").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/service-types")
        .set_json(json!({
            "name": "Brake Pads",
            "description": "Front and rear",
            "mileage_interval": "30,000",
            "month_interval": 24
        }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["name"], "Brake Pads");
    assert_eq!(body["mileage_interval"], 30_000);
    assert_eq!(body["month_interval"], 24);

    let req = test::TestRequest::get().uri("/api/service-types").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 2);
    assert_eq!(body[0]["name"], "Brake Pads");
    assert_eq!(body[1]["name"], "Tire Rotation");
}

#[actix_web::test]
async fn duplicate_name_ignoring_case_is_conflict() {
    let (state, db) = fresh_state().await;
    seed_service(&db, "Oil Change").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/service-types")
        .set_json(json!({"name": "OIL change"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "SERVICE_NAME_CONFLICT",
        StatusCode::CONFLICT,
    )
    .await;
}

#[actix_web::test]
async fn name_is_required() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/service-types")
        .set_json(json!({"description": "nameless"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
}
