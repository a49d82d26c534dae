// ABOUTME: Read-only SQLite access to user settings, daily progress, and the food catalog
// ABOUTME: Scoped connection handling that closes the pool on every exit path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog Database
//!
//! The recommender reads three tables and never writes:
//!
//! - `settings`: daily goals and the user's plan (goal identifier)
//! - `current_progress`: calories and protein consumed today
//! - `food_recommendations`: the raw food catalog
//!
//! Catalog numbers are decoded by the storage class of each value: REAL and
//! INTEGER values arrive as exact numbers, anything else as text that the
//! catalog preparer coerces.

use std::future::Future;
use std::str::FromStr;

use macrofit_core::models::{NumericField, RawFoodRecord, UserContext};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, TypeInfo, ValueRef};
use tracing::{debug, warn};

use crate::config::{DatabaseConfig, DatabaseUrl};
use crate::errors::{AppError, AppResult};

const SETTINGS_COLUMNS: &str = "user_id, \
     CAST(dailyCaloriesGoal AS REAL) AS daily_calories_goal, \
     CAST(dailyProteinGoal AS REAL) AS daily_protein_goal, \
     plan";

/// One user's stored settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Owning user
    pub user_id: i64,
    /// Daily calorie target
    pub daily_calories_goal: Option<f64>,
    /// Daily protein target (g)
    pub daily_protein_goal: Option<f64>,
    /// Stored goal identifier, e.g. `muscle-gain`
    pub plan: Option<String>,
}

/// Everything one recommendation request needs from the data source
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    /// Settings of the requesting user
    pub settings: UserSettings,
    /// Goals and today's progress
    pub context: UserContext,
    /// Raw catalog rows in table order
    pub records: Vec<RawFoodRecord>,
}

/// Read-only handle on the recommender's `SQLite` database
#[derive(Debug, Clone)]
pub struct CatalogDatabase {
    pool: SqlitePool,
}

impl CatalogDatabase {
    /// Open a read-only pool
    ///
    /// The database file must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())?;
        let options = match config.url {
            DatabaseUrl::SQLite { .. } => options.read_only(true),
            DatabaseUrl::Memory => options,
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        debug!(url = %config.url, "Opened catalog database");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database, run `f`, and close the pool whether `f` succeeded or not
    ///
    /// # Errors
    ///
    /// Returns the connection error or whatever `f` returns
    pub async fn with_connection<T, F, Fut>(config: &DatabaseConfig, f: F) -> AppResult<T>
    where
        F: FnOnce(Self) -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
        T: Send,
    {
        let database = Self::connect(config).await?;
        let result = f(database.clone()).await;
        database.close().await;
        result
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Closed catalog database");
    }

    /// Whether the pool has been closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Settings row of `user_id`, or the most recently created row when `None`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no matching row exists, or a database error
    pub async fn get_settings(&self, user_id: Option<i64>) -> AppResult<UserSettings> {
        let row = match user_id {
            Some(id) => {
                let sql = format!(
                    "SELECT {SETTINGS_COLUMNS} FROM settings WHERE user_id = ? ORDER BY id DESC LIMIT 1"
                );
                sqlx::query(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                let sql =
                    format!("SELECT {SETTINGS_COLUMNS} FROM settings ORDER BY id DESC LIMIT 1");
                sqlx::query(&sql).fetch_optional(&self.pool).await?
            }
        };

        let row = row.ok_or_else(|| {
            AppError::not_found(
                "Settings",
                user_id.map_or_else(
                    || "no settings rows".to_owned(),
                    |id| format!("user {id}"),
                ),
            )
        })?;

        Ok(UserSettings {
            user_id: row.try_get("user_id")?,
            daily_calories_goal: row.try_get("daily_calories_goal")?,
            daily_protein_goal: row.try_get("daily_protein_goal")?,
            plan: row.try_get("plan")?,
        })
    }

    /// Goals from `settings` plus today's progress for the same user
    ///
    /// A user without a progress row has consumed nothing yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the progress query fails
    pub async fn get_user_context(&self, settings: &UserSettings) -> AppResult<UserContext> {
        let row = sqlx::query(
            "SELECT CAST(totalCalories AS REAL) AS total_calories, \
             CAST(totalProtein AS REAL) AS total_protein \
             FROM current_progress WHERE user_id = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(settings.user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (current_calories, current_protein) = match row {
            Some(row) => (
                row.try_get::<Option<f64>, _>("total_calories")?
                    .unwrap_or_default(),
                row.try_get::<Option<f64>, _>("total_protein")?
                    .unwrap_or_default(),
            ),
            None => {
                warn!(
                    user_id = settings.user_id,
                    "No progress row for user, assuming nothing consumed"
                );
                (0.0, 0.0)
            }
        };

        Ok(UserContext {
            daily_calories_goal: settings.daily_calories_goal,
            daily_protein_goal: settings.daily_protein_goal,
            current_calories,
            current_protein,
        })
    }

    /// Every catalog row in table order
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails
    pub async fn get_catalog(&self) -> AppResult<Vec<RawFoodRecord>> {
        let rows = sqlx::query(
            "SELECT name, calories, protein FROM food_recommendations ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<AppResult<Vec<_>>>()?;

        debug!(rows = records.len(), "Loaded food catalog");
        Ok(records)
    }

    /// Settings, user context and catalog for one request
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user has no settings, or a database error
    pub async fn load_snapshot(&self, user_id: Option<i64>) -> AppResult<CatalogSnapshot> {
        let settings = self.get_settings(user_id).await?;
        let context = self.get_user_context(&settings).await?;
        let records = self.get_catalog().await?;
        Ok(CatalogSnapshot {
            settings,
            context,
            records,
        })
    }
}

fn row_to_record(row: &SqliteRow) -> AppResult<RawFoodRecord> {
    let name: Option<String> = row.try_get("name")?;

    Ok(RawFoodRecord {
        name: name.unwrap_or_default(),
        calories: numeric_column(row, "calories")?,
        protein: numeric_column(row, "protein")?,
    })
}

/// Decode a loosely typed numeric column by the value's storage class
fn numeric_column(row: &SqliteRow, column: &str) -> AppResult<Option<NumericField>> {
    let raw = row.try_get_raw(column)?;
    if raw.is_null() {
        return Ok(None);
    }

    let storage_class = raw.type_info().name().to_owned();
    let field = match storage_class.as_str() {
        "REAL" => NumericField::Number(row.try_get::<f64, _>(column)?),
        "INTEGER" => NumericField::Number(row.try_get::<i64, _>(column)? as f64),
        "BLOB" => NumericField::Text(
            String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(column)?).into_owned(),
        ),
        _ => NumericField::Text(row.try_get::<String, _>(column)?),
    };
    Ok(Some(field))
}
