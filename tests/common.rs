// ABOUTME: Shared test utilities and fixtures for macrofit integration tests
// ABOUTME: Provides quiet logging, fixture catalogs, and temporary SQLite databases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `macrofit`

use std::env;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use macrofit::config::DatabaseConfig;
use macrofit_core::models::RawFoodRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// The three-food catalog whose muscle-gain ranking is C, A, B
pub fn abc_catalog() -> Vec<RawFoodRecord> {
    vec![
        RawFoodRecord::new("A", 100.0, 10.0),
        RawFoodRecord::new("B", 450.0, 6.0),
        RawFoodRecord::new("C", 50.0, 20.0),
    ]
}

/// A realistic catalog mixing numbers and text, with rows the preparer drops
pub fn pantry_catalog() -> Vec<RawFoodRecord> {
    vec![
        RawFoodRecord::new("Chicken breast", "165", "31"),
        RawFoodRecord::new("Greek yogurt", 59.0, 10.0),
        RawFoodRecord::new("Peanut butter", "588", "25"),
        RawFoodRecord::new("Tuna", 132.0, "28"),
        RawFoodRecord::new("Cottage cheese", "98", 11.0),
        RawFoodRecord::new("White rice", 130.0, 2.7),
        RawFoodRecord::new("Lentils", "116", "9"),
        RawFoodRecord::new("Eggs", 155.0, 13.0),
        RawFoodRecord::new("Tofu", 76.0, 8.0),
        RawFoodRecord::new("Protein bar", "380", "20"),
        RawFoodRecord::new("Beef jerky", 410.0, 33.0),
        RawFoodRecord::new("Salmon", 208.0, 20.0),
        RawFoodRecord::new("Tuna", 184.0, 30.0),
        RawFoodRecord::new("Tempeh", "192", "20"),
        RawFoodRecord::new("Olive oil", 884.0, 0.0),
        RawFoodRecord::new("Edamame", 121.0, 11.9),
        RawFoodRecord::new("Seitan", "370", "75"),
        RawFoodRecord::new("Turkey breast", 135.0, 30.0),
    ]
}

/// A larger generated catalog spread over the accepted range
///
/// Every tenth row is outside the filter thresholds and every seventh row
/// repeats an earlier name.
pub fn generated_catalog(size: usize) -> Vec<RawFoodRecord> {
    (0..size)
        .map(|i| {
            let x = i as f64;
            let calories = if i % 10 == 9 {
                650.0 + x
            } else {
                (x * 37.0) % 480.0 + 10.0
            };
            let protein = (x * 13.0) % 45.0 + 5.0;
            let name = if i % 7 == 6 {
                format!("food-{}", i - 6)
            } else {
                format!("food-{i}")
            };
            RawFoodRecord::new(name, calories, protein.to_string())
        })
        .collect()
}

/// A catalog row as stored in SQLite: name plus raw calorie/protein text
pub type FoodRow<'a> = (&'a str, &'a str, &'a str);

/// A temporary SQLite database with the backend's schema
pub struct TestDatabase {
    pool: SqlitePool,
    path: PathBuf,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create an empty database with the settings, progress and catalog tables
    pub async fn create() -> Result<Self> {
        init_test_logging();
        let dir = TempDir::new()?;
        let path = dir.path().join("database.db");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE settings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                height INTEGER,
                weight INTEGER,
                age INTEGER,
                gender TEXT,
                dailyCaloriesGoal INTEGER,
                dailyProteinGoal INTEGER,
                plan TEXT
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE current_progress (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                totalCalories REAL DEFAULT 0,
                totalProtein REAL DEFAULT 0,
                sleepDuration REAL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE food_recommendations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                calories REAL,
                protein REAL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self {
            pool,
            path,
            _dir: dir,
        })
    }

    /// Connection URL of the database file
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }

    /// Database configuration pointing at this file
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::from_url(&self.url()).expect("temporary path is a valid SQLite URL")
    }

    /// Insert a settings row
    pub async fn insert_settings(
        &self,
        user_id: i64,
        daily_calories_goal: Option<i64>,
        daily_protein_goal: Option<i64>,
        plan: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings (user_id, dailyCaloriesGoal, dailyProteinGoal, plan)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(daily_calories_goal)
        .bind(daily_protein_goal)
        .bind(plan)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert a progress row
    pub async fn insert_progress(&self, user_id: i64, calories: f64, protein: f64) -> Result<()> {
        sqlx::query(
            "INSERT INTO current_progress (user_id, totalCalories, totalProtein) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(calories)
        .bind(protein)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert one catalog row with numbers bound as REAL values
    pub async fn insert_food_values(&self, name: &str, calories: f64, protein: f64) -> Result<()> {
        sqlx::query("INSERT INTO food_recommendations (name, calories, protein) VALUES (?, ?, ?)")
            .bind(name)
            .bind(calories)
            .bind(protein)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert catalog rows in order
    pub async fn insert_foods(&self, foods: &[FoodRow<'_>]) -> Result<()> {
        for (name, calories, protein) in foods {
            sqlx::query("INSERT INTO food_recommendations (name, calories, protein) VALUES (?, ?, ?)")
                .bind(*name)
                .bind(*calories)
                .bind(*protein)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }
}

/// Catalog with exactly three distinct (calories, protein) points
///
/// With three clusters every point is its own cluster. The highest-calorie
/// point (320, 40) is shared by two foods; duplicates and out-of-range rows
/// are dropped by the preparer.
pub const THREE_POINT_FOODS: [FoodRow<'static>; 8] = [
    ("Chicken thigh", "320", "40"),
    ("Greek yogurt", "59", "10"),
    ("Peanut butter", "588", "25"),
    ("Duck breast", "320", "40"),
    ("Salmon", "200", "25"),
    ("White rice", "130", "2.7"),
    ("Skyr", "59", "10"),
    ("Skyr", "63", "11"),
];
