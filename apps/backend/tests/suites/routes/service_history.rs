use actix_web::http::StatusCode;
use actix_web::test;
use backend::entities::{ServiceHistory, Services};
use backend_test_support::problem_details::assert_problem_details;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use crate::common::{array_len, read_json};
use crate::support::create_test_app;
use crate::support::factory::{fresh_state, seed_record, seed_service, seed_vehicle};

#[actix_web::test]
async fn create_record_joins_service_name() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Toyota", "Tacoma").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/services")
        .set_json(json!({
            "vehicle_id": vehicle.id,
            "service_name": "Oil Change",
            "mileage": "52,000",
            "interval": 5000,
            "service_date": "2024-03-15",
            "cost": "$49.99",
            "notes": "synthetic"
        }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(body["vehicle_id"], vehicle.id);
    assert_eq!(body["service_name"], "Oil Change");
    assert_eq!(body["mileage"], 52_000);
    assert_eq!(body["interval"], 5000);
    assert_eq!(body["cost"], 49.99);
    assert_eq!(body["notes"], "synthetic");
    assert!(body["service_date"]
        .as_str()
        .is_some_and(|d| d.starts_with("2024-03-15T00:00:00")));
}

#[actix_web::test]
async fn create_for_unknown_vehicle_is_404() {
    let (state, db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/services")
        .set_json(json!({"vehicle_id": 999, "service_name": "Brakes"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VEHICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;

    // No service type is created on the failure path
    assert_eq!(Services::find().count(&db).await.unwrap(), 0);
    assert_eq!(ServiceHistory::find().count(&db).await.unwrap(), 0);
}

#[actix_web::test]
async fn create_requires_service_name() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Toyota", "Tacoma").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/services")
        .set_json(json!({"vehicle_id": vehicle.id, "service_name": "   "}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn create_rejects_bad_date() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Toyota", "Tacoma").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/services")
        .set_json(json!({
            "vehicle_id": vehicle.id,
            "service_name": "Tires",
            "service_date": "15/03/2024"
        }))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_DATE",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn service_names_are_shared_ignoring_case() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Honda", "Accord").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    for name in ["Oil Change", "oil change", "OIL CHANGE"] {
        let req = test::TestRequest::post()
            .uri("/api/services")
            .set_json(json!({"vehicle_id": vehicle.id, "service_name": name}))
            .to_request();
        read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    }

    assert_eq!(Services::find().count(&db).await.unwrap(), 1);

    let req = test::TestRequest::get().uri("/api/services").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 3);
    let service_ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["service_id"].clone())
        .collect();
    assert!(service_ids.windows(2).all(|w| w[0] == w[1]));
    // The first spelling wins
    assert_eq!(body[0]["service_name"], "Oil Change");
}

#[actix_web::test]
async fn list_filters_by_vehicle() {
    let (state, db) = fresh_state().await;
    let a = seed_vehicle(&db, "Ford", "F-150").await;
    let b = seed_vehicle(&db, "Ford", "Ranger").await;
    let service = seed_service(&db, "Rotation").await;
    seed_record(&db, a.id, service.id).await;
    seed_record(&db, a.id, service.id).await;
    seed_record(&db, b.id, service.id).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/services?vehicle_id={}", a.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 2);
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["vehicle_id"] == a.id));

    let req = test::TestRequest::get().uri("/api/services").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 3);
}

#[actix_web::test]
async fn list_rejects_bad_vehicle_filter() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/services?vehicle_id=abc")
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_ID",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn delete_record_then_vehicle() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Mini", "Cooper").await;
    let service = seed_service(&db, "Coolant").await;
    let record = seed_record(&db, vehicle.id, service.id).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/services/{}", record.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "deletedId": record.id}));

    // With the history gone the vehicle can be removed
    let req = test::TestRequest::delete()
        .uri(&format!("/api/vehicles/{}", vehicle.id))
        .to_request();
    read_json(test::call_service(&app, req).await, StatusCode::OK).await;
}

#[actix_web::test]
async fn delete_unknown_record_is_404() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/api/services/31337")
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "SERVICE_RECORD_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[actix_web::test]
async fn delete_all_records_reports_count() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Lexus", "IS").await;
    let service = seed_service(&db, "Spark Plugs").await;
    seed_record(&db, vehicle.id, service.id).await;
    seed_record(&db, vehicle.id, service.id).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/api/services/all")
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "deletedCount": 2}));
    assert_eq!(ServiceHistory::find().count(&db).await.unwrap(), 0);
    // Service types survive
    assert_eq!(Services::find().count(&db).await.unwrap(), 1);
}
