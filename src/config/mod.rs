// ABOUTME: Configuration module for the recommender's outer surfaces
// ABOUTME: Re-exports data source configuration; engine tuning lives in macrofit-intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Data source location and pool settings
pub mod database;

pub use database::{DatabaseConfig, DatabaseUrl, DEFAULT_DATABASE_URL};
pub use macrofit_intelligence::config::{
    CatalogFilterConfig, ClusteringConfig, RankingConfig, RecommenderConfig,
};
