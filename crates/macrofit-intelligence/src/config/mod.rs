// ABOUTME: Recommender configuration with defaults, environment overrides, and validation
// ABOUTME: Groups catalog filter thresholds, k-means parameters, and ranking limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommender Configuration
//!
//! Defaults mirror `macrofit_core::constants`. [`RecommenderConfig::load`]
//! applies `MACROFIT_*` environment overrides on top of the defaults and
//! validates the result.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MACROFIT_MAX_CALORIES` | `catalog.max_calories` |
//! | `MACROFIT_MIN_PROTEIN` | `catalog.min_protein` |
//! | `MACROFIT_CLUSTER_COUNT` | `clustering.n_clusters` |
//! | `MACROFIT_MAX_ITERATIONS` | `clustering.max_iterations` |
//! | `MACROFIT_TOLERANCE` | `clustering.tolerance` |
//! | `MACROFIT_SEED` | `clustering.seed` |
//! | `MACROFIT_MAX_RESULTS` | `ranking.max_results` |

mod error;

pub use error::ConfigError;

use std::env;
use std::str::FromStr;

use macrofit_core::constants::{catalog, clustering, ranking};
use serde::{Deserialize, Serialize};

/// Thresholds a catalog entry must meet to be recommendable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilterConfig {
    /// Inclusive upper bound on calories
    pub max_calories: f64,
    /// Inclusive lower bound on protein (g)
    pub min_protein: f64,
}

impl Default for CatalogFilterConfig {
    fn default() -> Self {
        Self {
            max_calories: catalog::MAX_CALORIES,
            min_protein: catalog::MIN_PROTEIN,
        }
    }
}

/// K-means parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Requested number of clusters
    pub n_clusters: usize,
    /// Iteration cap for Lloyd's algorithm
    pub max_iterations: usize,
    /// Maximum centroid movement treated as converged
    pub tolerance: f64,
    /// Seed for k-means++ initialization
    pub seed: u64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            n_clusters: clustering::DEFAULT_CLUSTER_COUNT,
            max_iterations: clustering::DEFAULT_MAX_ITERATIONS,
            tolerance: clustering::DEFAULT_TOLERANCE,
            seed: clustering::DEFAULT_SEED,
        }
    }
}

impl ClusteringConfig {
    /// Default parameters with a different cluster count
    #[must_use]
    pub fn with_clusters(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Self::default()
        }
    }
}

/// Ranking limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Maximum number of recommendations returned
    pub max_results: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: ranking::MAX_RECOMMENDATIONS,
        }
    }
}

/// Complete recommender configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Catalog filter thresholds
    pub catalog: CatalogFilterConfig,
    /// K-means parameters
    pub clustering: ClusteringConfig,
    /// Ranking limits
    pub ranking: RankingConfig,
}

impl RecommenderConfig {
    /// Load configuration from defaults and environment
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value
    /// or the resulting configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for any parameter outside its domain.
    /// Filter thresholds and the result limit may only be tightened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog.max_calories.is_finite()
            || self.catalog.max_calories <= 0.0
            || self.catalog.max_calories > catalog::MAX_CALORIES
        {
            return Err(ConfigError::ValueOutOfRange(
                "max_calories must be positive and at most 500",
            ));
        }
        if !self.catalog.min_protein.is_finite()
            || self.catalog.min_protein < catalog::MIN_PROTEIN
        {
            return Err(ConfigError::ValueOutOfRange("min_protein must be at least 5"));
        }
        if self.clustering.n_clusters == 0 {
            return Err(ConfigError::ValueOutOfRange("n_clusters must be at least 1"));
        }
        if self.clustering.max_iterations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_iterations must be at least 1",
            ));
        }
        if !self.clustering.tolerance.is_finite() || self.clustering.tolerance < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "tolerance must be a finite non-negative number",
            ));
        }
        if self.ranking.max_results == 0
            || self.ranking.max_results > ranking::MAX_RECOMMENDATIONS
        {
            return Err(ConfigError::ValueOutOfRange("max_results must be between 1 and 5"));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: {val:?}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("MACROFIT_MAX_CALORIES", &mut self.catalog.max_calories)?;
        Self::apply_env_var("MACROFIT_MIN_PROTEIN", &mut self.catalog.min_protein)?;
        Self::apply_env_var("MACROFIT_CLUSTER_COUNT", &mut self.clustering.n_clusters)?;
        Self::apply_env_var(
            "MACROFIT_MAX_ITERATIONS",
            &mut self.clustering.max_iterations,
        )?;
        Self::apply_env_var("MACROFIT_TOLERANCE", &mut self.clustering.tolerance)?;
        Self::apply_env_var("MACROFIT_SEED", &mut self.clustering.seed)?;
        Self::apply_env_var("MACROFIT_MAX_RESULTS", &mut self.ranking.max_results)?;
        Ok(self)
    }
}
