// ABOUTME: Integration tests for the read-only SQLite data source and database-backed requests
// ABOUTME: Uses temporary databases with the backend schema for settings, progress, and catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};

use common::{TestDatabase, THREE_POINT_FOODS};
use macrofit::config::{DatabaseConfig, RecommenderConfig};
use macrofit::database::CatalogDatabase;
use macrofit::errors::{AppError, ErrorCode};
use macrofit::recommendations::RecommendationService;
use macrofit_core::models::{GoalKind, NumericField};

async fn seeded_database() -> TestDatabase {
    let db = TestDatabase::create().await.unwrap();
    db.insert_settings(1, Some(2400), Some(120), Some("weight-loss"))
        .await
        .unwrap();
    db.insert_settings(2, Some(2800), Some(160), Some("muscle-gain"))
        .await
        .unwrap();
    db.insert_progress(2, 1250.5, 64.0).await.unwrap();
    db.insert_foods(&THREE_POINT_FOODS).await.unwrap();
    db
}

fn names(response: &macrofit::RecommendationResponse) -> Vec<&str> {
    response
        .recommendations
        .iter()
        .map(|r| r.name.as_str())
        .collect()
}

#[tokio::test]
async fn test_latest_settings_row_is_used_by_default() {
    let db = seeded_database().await;
    let database = CatalogDatabase::connect(&db.config()).await.unwrap();

    let settings = database.get_settings(None).await.unwrap();
    assert_eq!(settings.user_id, 2);
    assert_eq!(settings.plan.as_deref(), Some("muscle-gain"));
    assert_eq!(settings.daily_calories_goal, Some(2800.0));

    let first = database.get_settings(Some(1)).await.unwrap();
    assert_eq!(first.plan.as_deref(), Some("weight-loss"));

    database.close().await;
}

#[tokio::test]
async fn test_missing_settings_is_not_found() {
    let db = TestDatabase::create().await.unwrap();
    let database = CatalogDatabase::connect(&db.config()).await.unwrap();

    let err = database.get_settings(None).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);

    let err = database.get_settings(Some(42)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { ref details, .. } if details == "user 42"));

    database.close().await;
}

#[tokio::test]
async fn test_user_context_combines_goals_and_progress() {
    let db = seeded_database().await;
    let database = CatalogDatabase::connect(&db.config()).await.unwrap();

    let settings = database.get_settings(Some(2)).await.unwrap();
    let context = database.get_user_context(&settings).await.unwrap();
    assert_eq!(context.daily_protein_goal, Some(160.0));
    assert!((context.current_calories - 1250.5).abs() < f64::EPSILON);
    assert!((context.current_protein - 64.0).abs() < f64::EPSILON);

    // User 1 has no progress row yet
    let settings = database.get_settings(Some(1)).await.unwrap();
    let context = database.get_user_context(&settings).await.unwrap();
    assert!(context.current_calories.abs() < f64::EPSILON);
    assert!(context.current_protein.abs() < f64::EPSILON);

    database.close().await;
}

#[tokio::test]
async fn test_catalog_rows_decoded_by_storage_class_in_table_order() {
    let db = seeded_database().await;
    db.insert_foods(&[("Mystery mix", "abc", "12")]).await.unwrap();
    let database = CatalogDatabase::connect(&db.config()).await.unwrap();

    let records = database.get_catalog().await.unwrap();
    assert_eq!(records.len(), THREE_POINT_FOODS.len() + 1);
    assert_eq!(records[0].name, "Chicken thigh");
    assert_eq!(records[0].calories, Some(NumericField::Number(320.0)));
    assert_eq!(records[5].protein, Some(NumericField::Number(2.7)));

    let mystery = records.last().unwrap();
    assert_eq!(mystery.calories, Some(NumericField::Text("abc".to_owned())));
    assert_eq!(mystery.protein, Some(NumericField::Number(12.0)));

    database.close().await;
}

#[tokio::test]
async fn test_catalog_reals_keep_full_precision() {
    let db = TestDatabase::create().await.unwrap();
    let calories = 0.1 + 0.2;
    let protein = 12.345_678_901_234_567;
    db.insert_food_values("Precise oats", calories, protein)
        .await
        .unwrap();
    let database = CatalogDatabase::connect(&db.config()).await.unwrap();

    let records = database.get_catalog().await.unwrap();
    assert_eq!(records[0].calories, Some(NumericField::Number(calories)));
    assert_eq!(records[0].protein, Some(NumericField::Number(protein)));

    database.close().await;
}

#[tokio::test]
async fn test_with_connection_closes_pool_on_success_and_failure() {
    let db = seeded_database().await;
    let config = db.config();

    let (handle, rows) = CatalogDatabase::with_connection(&config, |database| async move {
        let rows = database.get_catalog().await?.len();
        Ok((database, rows))
    })
    .await
    .unwrap();
    assert_eq!(rows, THREE_POINT_FOODS.len());
    assert!(handle.is_closed());

    let captured: Arc<Mutex<Option<CatalogDatabase>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&captured);
    let result: Result<(), AppError> =
        CatalogDatabase::with_connection(&config, |database| async move {
            *slot.lock().unwrap() = Some(database.clone());
            database.get_settings(Some(99)).await.map(|_| ())
        })
        .await;
    assert_eq!(result.unwrap_err().code(), ErrorCode::ResourceNotFound);

    let failed = captured.lock().unwrap().take().unwrap();
    assert!(failed.is_closed());
}

#[tokio::test]
async fn test_missing_database_file_is_database_error() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("absent.db").display());
    let config = DatabaseConfig::from_url(&url).unwrap();

    let err = CatalogDatabase::connect(&config).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DatabaseError);
}

#[tokio::test]
async fn test_database_request_uses_stored_plan() {
    let db = seeded_database().await;
    let service = RecommendationService::default();

    let response = service
        .recommend_from_database(&db.config(), None, None)
        .await
        .unwrap();

    assert_eq!(response.goal, GoalKind::MuscleGain);
    assert_eq!(response.effective_clusters, 3);
    assert_eq!(names(&response), vec!["Chicken thigh", "Duck breast"]);
    assert_eq!(response.user_context.daily_calories_goal, Some(2800.0));
    assert!((response.user_context.current_protein - 64.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_goal_override_and_single_cluster() {
    let db = seeded_database().await;
    let mut config = RecommenderConfig::default();
    config.clustering.n_clusters = 1;
    let service = RecommendationService::default().with_config(config);

    let response = service
        .recommend_from_database(&db.config(), Some(1), Some("muscle-gain"))
        .await
        .unwrap();

    assert_eq!(
        names(&response),
        vec![
            "Greek yogurt",
            "Skyr",
            "Salmon",
            "Chicken thigh",
            "Duck breast"
        ]
    );
    assert_eq!(
        response.render(false).unwrap(),
        "[
    {
        \"name\": \"Greek yogurt\",
        \"calories\": 59.0,
        \"protein\": 10.0
    },
    {
        \"name\": \"Skyr\",
        \"calories\": 59.0,
        \"protein\": 10.0
    },
    {
        \"name\": \"Salmon\",
        \"calories\": 200.0,
        \"protein\": 25.0
    },
    {
        \"name\": \"Chicken thigh\",
        \"calories\": 320.0,
        \"protein\": 40.0
    },
    {
        \"name\": \"Duck breast\",
        \"calories\": 320.0,
        \"protein\": 40.0
    }
]"
    );
}

#[tokio::test]
async fn test_unset_plan_without_override_is_unknown_goal() {
    let db = TestDatabase::create().await.unwrap();
    db.insert_settings(5, None, None, None).await.unwrap();
    db.insert_foods(&THREE_POINT_FOODS).await.unwrap();

    let err = RecommendationService::default()
        .recommend_from_database(&db.config(), Some(5), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownGoal);
}

#[tokio::test]
async fn test_bad_catalog_value_is_data_format_error() {
    let db = seeded_database().await;
    db.insert_foods(&[("Mystery mix", "abc", "12")]).await.unwrap();

    let err = RecommendationService::default()
        .recommend_from_database(&db.config(), None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataFormat);
    assert!(err.to_string().contains("Mystery mix"));
}
