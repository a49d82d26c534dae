// ABOUTME: Food recommendation intelligence: catalog cleaning, clustering, and ranking
// ABOUTME: Synchronous, stateless algorithms recomputed from scratch on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit Intelligence
//!
//! The recommendation pipeline runs in two stages:
//!
//! 1. [`catalog::CatalogPreparer`] coerces, filters and deduplicates the raw
//!    catalog.
//! 2. [`recommendation_engine::ClusterRankEngine`] partitions the prepared
//!    catalog with seeded k-means, selects the cluster whose mean best matches
//!    the goal weights, and ranks that cluster's members.
//!
//! Nothing is cached between calls: identical inputs and seed always yield
//! identical clusters and recommendations.

/// Recommender configuration (filter thresholds, k-means, ranking)
pub mod config;

/// Raw catalog coercion, filtering and deduplication
pub mod catalog;

/// Deterministic k-means over (calories, protein) points
pub mod clustering;

/// Cluster selection and within-cluster ranking
pub mod recommendation_engine;

pub use catalog::CatalogPreparer;
pub use clustering::{ClusteringResult, KMeans};
pub use config::{ConfigError, RecommenderConfig};
pub use recommendation_engine::{ClusterRankEngine, FoodRecommender, RecommendationOutcome};
