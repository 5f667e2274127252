use backend::adapters::catalog_sea::{self, CatalogFilter};

use crate::support::factory::{fresh_state, seed_catalog};

#[tokio::test]
async fn make_and_model_are_partial_case_insensitive() {
    let (_state, db) = fresh_state().await;
    seed_catalog(&db, 2019, "Toyota", "Camry").await;
    seed_catalog(&db, 2019, "Toyota", "Corolla").await;
    seed_catalog(&db, 2019, "Honda", "Accord").await;

    let filter = CatalogFilter {
        make: Some("toy".into()),
        model: Some("ROLL".into()),
        ..Default::default()
    };
    let rows = catalog_sea::search(&db, &filter, 100).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].model, "Corolla");
}

#[tokio::test]
async fn limit_caps_results() {
    let (_state, db) = fresh_state().await;
    for year in 2000..2010 {
        seed_catalog(&db, year, "Ford", "Taurus").await;
    }

    let rows = catalog_sea::search(&db, &CatalogFilter::default(), 3)
        .await
        .unwrap();
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2009, 2008, 2007]);
}

#[tokio::test]
async fn underscore_is_literal() {
    let (_state, db) = fresh_state().await;
    seed_catalog(&db, 2015, "BMW", "M3").await;
    seed_catalog(&db, 2015, "BMW", "M_3").await;

    let filter = CatalogFilter {
        model: Some("m_".into()),
        ..Default::default()
    };
    let rows = catalog_sea::search(&db, &filter, 100).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].model, "M_3");
}

#[tokio::test]
async fn non_ascii_make_matches_on_sqlite() {
    let (_state, db) = fresh_state().await;
    seed_catalog(&db, 2018, "ŠKODA", "Octavia").await;

    let filter = CatalogFilter {
        make: Some("ŠkO".into()),
        ..Default::default()
    };
    let rows = catalog_sea::search(&db, &filter, 100).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].model, "Octavia");
}
