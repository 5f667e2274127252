use backend::adapters::services_sea::{self, ServiceCreate};
use backend::errors::domain::{ConflictKind, DomainError};
use backend::infra::db_errors::map_db_err;

use crate::support::factory::fresh_state;

fn named(name: &str) -> ServiceCreate {
    ServiceCreate {
        name: name.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn find_by_name_ignores_case() {
    let (_state, db) = fresh_state().await;
    let created = services_sea::create_service(&db, named("Air Filter")).await.unwrap();

    let found = services_sea::find_by_name_ci(&db, "AIR filter")
        .await
        .unwrap()
        .expect("service should be found");
    assert_eq!(found.id, created.id);

    assert!(services_sea::find_by_name_ci(&db, "Cabin Filter")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn exact_duplicate_maps_to_unique_service_name() {
    let (_state, db) = fresh_state().await;
    services_sea::create_service(&db, named("Alignment")).await.unwrap();

    let err = services_sea::create_service(&db, named("Alignment"))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::UniqueServiceName, _)
    ));
}

#[tokio::test]
async fn list_is_sorted_by_name() {
    let (_state, db) = fresh_state().await;
    for name in ["Wipers", "Alignment", "Coolant"] {
        services_sea::create_service(&db, named(name)).await.unwrap();
    }

    let names: Vec<String> = services_sea::list_services(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Alignment", "Coolant", "Wipers"]);
}
