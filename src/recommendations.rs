// ABOUTME: Recommendation service tying the data source to the cluster-and-rank engine
// ABOUTME: Runs one request end to end and renders the JSON consumed by the frontend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Service
//!
//! A request is resolved in a fixed order: goal, catalog preparation, engine.
//! An unknown goal therefore fails before any catalog work is done.

use macrofit_core::errors::RecommendationError;
use macrofit_core::models::{
    ClusterSummary, GoalKind, GoalWeightsTable, RawFoodRecord, Recommendation, UserContext,
};
use macrofit_intelligence::{
    CatalogPreparer, ClusterRankEngine, FoodRecommender, RecommenderConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::database::CatalogDatabase;
use crate::errors::AppResult;

/// Input of one recommendation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Goal identifier, e.g. `muscle-gain`
    pub goal: String,
    /// Raw catalog rows
    pub records: Vec<RawFoodRecord>,
    /// Goals and progress of the requesting user
    #[serde(default)]
    pub context: UserContext,
}

impl RecommendationRequest {
    /// Request with an empty user context
    #[must_use]
    pub fn new(goal: impl Into<String>, records: Vec<RawFoodRecord>) -> Self {
        Self {
            goal: goal.into(),
            records,
            context: UserContext::default(),
        }
    }

    /// Attach the user's goals and progress
    #[must_use]
    pub fn with_context(mut self, context: UserContext) -> Self {
        self.context = context;
        self
    }
}

/// Result of one recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    /// Resolved goal
    pub goal: GoalKind,
    /// Goals and progress of the requesting user
    pub user_context: UserContext,
    /// Cluster the recommendations were drawn from
    pub selected_cluster: ClusterSummary,
    /// Number of clusters actually formed
    pub effective_clusters: usize,
    /// Ranked recommendations
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResponse {
    /// Render for stdout
    ///
    /// The bare recommendation list by default, the whole response with
    /// `with_context`. Both use 4-space indentation and keep non-ASCII text.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if rendering fails
    pub fn render(&self, with_context: bool) -> AppResult<String> {
        if with_context {
            to_json_pretty(self)
        } else {
            to_json_pretty(&self.recommendations)
        }
    }
}

/// Serialize with 4-space indentation
///
/// # Errors
///
/// Returns a serialization error if `value` cannot be serialized
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Runs recommendation requests with a fixed configuration and weights table
#[derive(Debug, Clone, Default)]
pub struct RecommendationService {
    config: RecommenderConfig,
    table: GoalWeightsTable,
}

impl RecommendationService {
    /// Create a service
    #[must_use]
    pub const fn new(config: RecommenderConfig, table: GoalWeightsTable) -> Self {
        Self { config, table }
    }

    /// Service with environment-derived configuration and default weights
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a `MACROFIT_*` variable is invalid
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(
            RecommenderConfig::load()?,
            GoalWeightsTable::default(),
        ))
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: RecommenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one request
    ///
    /// # Errors
    ///
    /// Returns `UnknownGoal`, `DataFormat`, `InsufficientData` or
    /// `AlgorithmInvariant` from the pipeline
    pub fn recommend(&self, request: &RecommendationRequest) -> AppResult<RecommendationResponse> {
        let (goal, _) = self.table.resolve(&request.goal)?;

        let catalog = CatalogPreparer::new(self.config.catalog).prepare(&request.records)?;
        debug!(
            goal = %goal,
            raw = request.records.len(),
            prepared = catalog.len(),
            "Catalog ready for clustering"
        );

        let outcome = ClusterRankEngine::from_config(&self.config).recommend(
            &catalog,
            goal.as_str(),
            &self.table,
        )?;

        Ok(RecommendationResponse {
            goal: outcome.goal,
            user_context: request.context.clone(),
            selected_cluster: outcome.selected_cluster,
            effective_clusters: outcome.effective_clusters,
            recommendations: outcome.recommendations,
        })
    }

    /// Read the user's settings, progress and the catalog, then run the request
    ///
    /// `goal_override` replaces the plan stored in the user's settings. The
    /// database is closed before the computation starts.
    ///
    /// # Errors
    ///
    /// Returns database and not-found errors from the read, `UnknownGoal` if
    /// neither an override nor a stored plan is available, and any pipeline
    /// error
    pub async fn recommend_from_database(
        &self,
        database: &DatabaseConfig,
        user_id: Option<i64>,
        goal_override: Option<&str>,
    ) -> AppResult<RecommendationResponse> {
        let snapshot = CatalogDatabase::with_connection(database, |db| async move {
            db.load_snapshot(user_id).await
        })
        .await?;

        let goal = match goal_override {
            Some(goal) => goal.to_owned(),
            None => snapshot
                .settings
                .plan
                .clone()
                .ok_or_else(|| RecommendationError::unknown_goal("<unset>"))?,
        };

        info!(
            user_id = snapshot.settings.user_id,
            goal = %goal,
            catalog_rows = snapshot.records.len(),
            "Recommending from database"
        );

        let request =
            RecommendationRequest::new(goal, snapshot.records).with_context(snapshot.context);
        self.recommend(&request)
    }
}
