use backend::adapters::vehicles_sea::{self, VehicleCreate};
use backend::errors::domain::{ConflictKind, DomainError};
use backend::infra::db_errors::map_db_err;

use crate::support::factory::{fresh_state, seed_record, seed_service};

#[tokio::test]
async fn create_then_find_round_trip() {
    let (_state, db) = fresh_state().await;

    let created = vehicles_sea::create_vehicle(
        &db,
        VehicleCreate::new(2016, "Subaru", "Forester").with_mileage(88_000),
    )
    .await
    .unwrap();

    let found = vehicles_sea::find_by_id(&db, created.id)
        .await
        .unwrap()
        .expect("vehicle should exist");
    assert_eq!(found.id, created.id);
    assert_eq!(found.make, "Subaru");
    assert_eq!(found.mileage, 88_000);
    assert!(found.vin.is_none());
}

#[tokio::test]
async fn duplicate_vin_maps_to_unique_vin() {
    let (_state, db) = fresh_state().await;
    let dto = VehicleCreate::new(2011, "Chevy", "Volt").with_vin("1G1RD6E45BU100001");

    vehicles_sea::create_vehicle(&db, dto.clone()).await.unwrap();
    let err = vehicles_sea::create_vehicle(&db, dto).await.unwrap_err();

    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::UniqueVin, _)
    ));
}

#[tokio::test]
async fn vehicles_without_vin_do_not_collide() {
    let (_state, db) = fresh_state().await;

    for _ in 0..2 {
        vehicles_sea::create_vehicle(&db, VehicleCreate::new(2000, "VW", "Golf"))
            .await
            .unwrap();
    }
    assert_eq!(vehicles_sea::list_vehicles(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_mileage_missing_is_none() {
    let (_state, db) = fresh_state().await;

    let updated = vehicles_sea::update_mileage(&db, 5, 100).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn update_mileage_touches_updated_at() {
    let (_state, db) = fresh_state().await;
    let created = vehicles_sea::create_vehicle(&db, VehicleCreate::new(2005, "Saab", "9-5"))
        .await
        .unwrap();

    let updated = vehicles_sea::update_mileage(&db, created.id, 1_234)
        .await
        .unwrap()
        .expect("vehicle should exist");
    assert_eq!(updated.mileage, 1_234);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn delete_referenced_vehicle_is_foreign_key_conflict() {
    let (_state, db) = fresh_state().await;
    let vehicle = vehicles_sea::create_vehicle(&db, VehicleCreate::new(2009, "Dodge", "Ram"))
        .await
        .unwrap();
    let service = seed_service(&db, "Transmission Fluid").await;
    seed_record(&db, vehicle.id, service.id).await;

    let err = vehicles_sea::delete_by_id(&db, vehicle.id).await.unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::StillReferenced, _)
    ));
}

#[tokio::test]
async fn delete_all_restarts_ids() {
    let (_state, db) = fresh_state().await;
    for model in ["A", "B", "C"] {
        vehicles_sea::create_vehicle(&db, VehicleCreate::new(2020, "Tesla", model))
            .await
            .unwrap();
    }

    assert_eq!(vehicles_sea::delete_all(&db).await.unwrap(), 3);
    assert_eq!(vehicles_sea::delete_by_id(&db, 1).await.unwrap(), 0);

    let next = vehicles_sea::create_vehicle(&db, VehicleCreate::new(2021, "Tesla", "Y"))
        .await
        .unwrap();
    assert_eq!(next.id, 1);
}

#[tokio::test]
async fn delete_all_with_history_removes_nothing() {
    let (_state, db) = fresh_state().await;
    let referenced = vehicles_sea::create_vehicle(&db, VehicleCreate::new(2012, "Mini", "Cooper"))
        .await
        .unwrap();
    vehicles_sea::create_vehicle(&db, VehicleCreate::new(2013, "Mini", "Clubman"))
        .await
        .unwrap();
    let service = seed_service(&db, "Brake Pads").await;
    seed_record(&db, referenced.id, service.id).await;

    let err = vehicles_sea::delete_all(&db).await.unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::StillReferenced, _)
    ));

    let remaining = vehicles_sea::list_vehicles(&db).await.unwrap();
    assert_eq!(remaining.len(), 2);
}
