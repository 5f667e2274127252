use actix_web::http::StatusCode;
use actix_web::test;
use backend::entities::Vehicles;
use backend_test_support::problem_details::assert_problem_details;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use crate::common::{array_len, read_json};
use crate::support::create_test_app;
use crate::support::factory::{fresh_state, seed_record, seed_service, seed_vehicle};

#[actix_web::test]
async fn create_defaults_mileage_to_zero() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({"year": 2020, "make": "Honda", "model": "Civic"}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(body["mileage"], 0);
    assert_eq!(body["make"], "Honda");
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));
    assert!(body["vin"].is_null());
}

#[actix_web::test]
async fn create_accepts_string_numbers_and_normalizes_vin() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({
            "year": "2012",
            "make": " Ford ",
            "model": "Focus",
            "mileage": "45,210 mi",
            "vin": "1fahp3f28cl123456"
        }))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(body["year"], 2012);
    assert_eq!(body["make"], "Ford");
    assert_eq!(body["mileage"], 45_210);
    assert_eq!(body["vin"], "1FAHP3F28CL123456");
}

#[actix_web::test]
async fn create_missing_model_persists_nothing() {
    let (state, db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({"year": 2018, "make": "Honda"}))
        .to_request();
    let problem = assert_problem_details(
        test::call_service(&app, req).await,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
    )
    .await;
    assert!(problem.detail.contains("model"));

    let count = Vehicles::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn create_rejects_out_of_range_year() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({"year": 1700, "make": "Benz", "model": "Wagon"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_YEAR",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn create_rejects_malformed_vin() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({"year": 2020, "make": "Kia", "model": "Soul", "vin": "IOQ123"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_VIN",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn duplicate_vin_is_conflict() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;
    let payload = json!({
        "year": 2010,
        "make": "Toyota",
        "model": "Corolla",
        "vin": "2T1BU4EE5AC123456"
    });

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(&payload)
        .to_request();
    read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(&payload)
        .to_request();
    let problem = assert_problem_details(
        test::call_service(&app, req).await,
        "VIN_CONFLICT",
        StatusCode::CONFLICT,
    )
    .await;
    assert!(!problem.detail.contains("2T1BU4EE5AC123456"));
}

#[actix_web::test]
async fn list_is_newest_first() {
    let (state, db) = fresh_state().await;
    let first = seed_vehicle(&db, "Mazda", "3").await;
    let second = seed_vehicle(&db, "Subaru", "Outback").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/vehicles").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(array_len(&body), 2);
    assert_eq!(body[0]["id"], second.id);
    assert_eq!(body[1]["id"], first.id);
}

#[actix_web::test]
async fn get_returns_vehicle_or_404() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Volvo", "240").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/vehicles/{}", vehicle.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["model"], "240");

    let req = test::TestRequest::get().uri("/api/vehicles/9999").to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VEHICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[actix_web::test]
async fn patch_updates_mileage() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Honda", "Fit").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/vehicles/{}", vehicle.id))
        .set_json(json!({"mileage": "120,500"}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["mileage"], 120_500);
    assert_eq!(body["id"], vehicle.id);
}

#[actix_web::test]
async fn patch_unknown_id_is_404() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/api/vehicles/424242")
        .set_json(json!({"mileage": 10}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VEHICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[actix_web::test]
async fn patch_non_numeric_id_is_400() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri("/api/vehicles/abc")
        .set_json(json!({"mileage": 10}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_ID",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn patch_rejects_non_numeric_mileage() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Honda", "Fit").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/vehicles/{}", vehicle.id))
        .set_json(json!({"mileage": "lots"}))
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "INVALID_MILEAGE",
        StatusCode::BAD_REQUEST,
    )
    .await;
}

#[actix_web::test]
async fn deleted_vehicle_is_absent_from_list() {
    let (state, db) = fresh_state().await;
    let keep = seed_vehicle(&db, "Nissan", "Leaf").await;
    let gone = seed_vehicle(&db, "Nissan", "Versa").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/vehicles/{}", gone.id))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "deletedId": gone.id}));

    let req = test::TestRequest::get().uri("/api/vehicles").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 1);
    assert_eq!(body[0]["id"], keep.id);
}

#[actix_web::test]
async fn delete_unknown_vehicle_is_404() {
    let (state, _db) = fresh_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/api/vehicles/77")
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "VEHICLE_NOT_FOUND",
        StatusCode::NOT_FOUND,
    )
    .await;
}

#[actix_web::test]
async fn delete_with_history_is_conflict_and_keeps_row() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Jeep", "Wrangler").await;
    let service = seed_service(&db, "Oil Change").await;
    seed_record(&db, vehicle.id, service.id).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/vehicles/{}", vehicle.id))
        .to_request();
    let problem = assert_problem_details(
        test::call_service(&app, req).await,
        "FK_VIOLATION",
        StatusCode::CONFLICT,
    )
    .await;
    assert_eq!(problem.title, "Foreign Key Violation");
    assert!(problem.detail.contains("service history"));

    let still_there = Vehicles::find_by_id(vehicle.id).one(&db).await.unwrap();
    assert!(still_there.is_some());
}

#[actix_web::test]
async fn delete_all_empties_list() {
    let (state, db) = fresh_state().await;
    seed_vehicle(&db, "Audi", "A4").await;
    seed_vehicle(&db, "BMW", "325i").await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/api/vehicles/all")
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "deletedCount": 2}));

    let req = test::TestRequest::get().uri("/api/vehicles").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 0);

    // Identity restarts after a full wipe
    let req = test::TestRequest::post()
        .uri("/api/vehicles")
        .set_json(json!({"year": 2001, "make": "Saab", "model": "9-3"}))
        .to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(body["id"], 1);
}

#[actix_web::test]
async fn delete_all_with_history_is_conflict_and_keeps_rows() {
    let (state, db) = fresh_state().await;
    let vehicle = seed_vehicle(&db, "Mini", "Cooper").await;
    let service = seed_service(&db, "Brake Pads").await;
    seed_record(&db, vehicle.id, service.id).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/api/vehicles/all")
        .to_request();
    assert_problem_details(
        test::call_service(&app, req).await,
        "FK_VIOLATION",
        StatusCode::CONFLICT,
    )
    .await;

    let req = test::TestRequest::get().uri("/api/vehicles").to_request();
    let body = read_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(array_len(&body), 1);
    assert_eq!(body[0]["id"], vehicle.id);
}
