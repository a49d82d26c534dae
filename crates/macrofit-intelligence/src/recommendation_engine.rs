// ABOUTME: Cluster-and-rank engine producing goal-aligned food recommendations
// ABOUTME: Clusters the prepared catalog, selects the best cluster, and ranks its members
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Cluster-and-Rank Engine
//!
//! Scoring uses the goal's weight pair in two places with opposite ordering:
//!
//! - **Cluster selection** picks the cluster whose mean has the *highest*
//!   weighted score (ties to the lowest cluster index).
//! - **Item ranking** lists that cluster's members by *ascending* weighted
//!   score, keeping catalog order among equal scores.
//!
//! Consumers depend on this ordering, so both directions are fixed.

use macrofit_core::errors::{RecommendationError, RecommendationResult};
use macrofit_core::models::{
    ClusterSummary, FoodItem, GoalKind, GoalWeights, GoalWeightsTable, Recommendation,
};
use serde::Serialize;
use tracing::info;

use crate::clustering::{ClusteringResult, KMeans, Point};
use crate::config::{ClusteringConfig, RankingConfig, RecommenderConfig};

/// Anything that turns a prepared catalog and a goal into recommendations
pub trait FoodRecommender {
    /// Recommend foods from `catalog` for `goal`
    ///
    /// # Errors
    ///
    /// Returns `UnknownGoal` if `goal` is not in `table`, `InsufficientData`
    /// if `catalog` is empty, and `AlgorithmInvariant` on internal
    /// consistency failures
    fn recommend(
        &self,
        catalog: &[FoodItem],
        goal: &str,
        table: &GoalWeightsTable,
    ) -> RecommendationResult<RecommendationOutcome>;
}

/// Result of one engine run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    /// Resolved goal
    pub goal: GoalKind,
    /// Weights used for both selection and ranking
    pub weights: GoalWeights,
    /// Number of clusters actually formed
    pub effective_clusters: usize,
    /// K-means iterations performed
    pub iterations: usize,
    /// Whether k-means converged before its iteration cap
    pub converged: bool,
    /// Summary of the selected cluster
    pub selected_cluster: ClusterSummary,
    /// Summaries of every cluster
    pub clusters: Vec<ClusterSummary>,
    /// Ranked recommendations from the selected cluster
    pub recommendations: Vec<Recommendation>,
}

/// Seeded k-means clustering followed by goal-weighted selection and ranking
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterRankEngine {
    kmeans: KMeans,
    ranking: RankingConfig,
}

impl ClusterRankEngine {
    /// Create an engine from clustering and ranking parameters
    #[must_use]
    pub const fn new(clustering: ClusteringConfig, ranking: RankingConfig) -> Self {
        Self {
            kmeans: KMeans::new(clustering),
            ranking,
        }
    }

    /// Create an engine from a full recommender configuration
    #[must_use]
    pub const fn from_config(config: &RecommenderConfig) -> Self {
        Self::new(config.clustering, config.ranking)
    }

    /// Cluster the catalog and return labelled copies of its items
    ///
    /// # Errors
    ///
    /// Propagates k-means errors (`InsufficientData` for an empty catalog)
    pub fn cluster(
        &self,
        catalog: &[FoodItem],
    ) -> RecommendationResult<(Vec<FoodItem>, ClusteringResult)> {
        let points: Vec<Point> = catalog.iter().map(FoodItem::point).collect();
        let result = self.kmeans.fit(&points)?;

        let labelled = catalog
            .iter()
            .zip(&result.labels)
            .map(|(item, &label)| FoodItem {
                cluster: Some(label),
                ..item.clone()
            })
            .collect();

        Ok((labelled, result))
    }
}

impl FoodRecommender for ClusterRankEngine {
    fn recommend(
        &self,
        catalog: &[FoodItem],
        goal: &str,
        table: &GoalWeightsTable,
    ) -> RecommendationResult<RecommendationOutcome> {
        // Goal first: an unknown goal never reaches clustering
        let (goal, weights) = table.resolve(goal)?;

        let (labelled, clustering) = self.cluster(catalog)?;
        let clusters = summarize_clusters(&labelled, clustering.cluster_count());
        let selected_cluster = select_cluster(&clusters, &weights)?.clone();
        let recommendations = rank_cluster(
            &labelled,
            selected_cluster.cluster,
            &weights,
            self.ranking.max_results,
        )?;

        info!(
            goal = %goal,
            catalog_size = catalog.len(),
            clusters = clustering.cluster_count(),
            selected = selected_cluster.cluster,
            selected_size = selected_cluster.size,
            returned = recommendations.len(),
            "Generated food recommendations"
        );

        Ok(RecommendationOutcome {
            goal,
            weights,
            effective_clusters: clustering.cluster_count(),
            iterations: clustering.iterations,
            converged: clustering.converged,
            selected_cluster,
            clusters,
            recommendations,
        })
    }
}

/// Member count and mean calories/protein of each cluster label
///
/// Items without a label are ignored.
#[must_use]
pub fn summarize_clusters(items: &[FoodItem], cluster_count: usize) -> Vec<ClusterSummary> {
    let mut sums = vec![(0_usize, 0.0_f64, 0.0_f64); cluster_count];
    for item in items {
        if let Some(entry) = item.cluster.and_then(|label| sums.get_mut(label)) {
            entry.0 += 1;
            entry.1 += item.calories;
            entry.2 += item.protein;
        }
    }

    sums.into_iter()
        .enumerate()
        .map(|(cluster, (size, calories, protein))| {
            let (mean_calories, mean_protein) = if size == 0 {
                (0.0, 0.0)
            } else {
                (calories / size as f64, protein / size as f64)
            };
            ClusterSummary {
                cluster,
                size,
                mean_calories,
                mean_protein,
            }
        })
        .collect()
}

/// Non-empty cluster with the highest preference score, ties to the lowest index
///
/// # Errors
///
/// Returns `AlgorithmInvariant` if every cluster is empty
pub fn select_cluster<'a>(
    summaries: &'a [ClusterSummary],
    weights: &GoalWeights,
) -> RecommendationResult<&'a ClusterSummary> {
    let mut best: Option<(&ClusterSummary, f64)> = None;
    for summary in summaries.iter().filter(|summary| !summary.is_empty()) {
        let score = summary.preference_score(weights);
        let higher = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if higher {
            best = Some((summary, score));
        }
    }

    best.map(|(summary, _)| summary)
        .ok_or_else(|| RecommendationError::invariant("no non-empty cluster to select"))
}

/// Members of `cluster` by ascending item score, first `limit` as recommendations
///
/// Equal scores keep their catalog order.
///
/// # Errors
///
/// Returns `AlgorithmInvariant` if the cluster has no members
pub fn rank_cluster(
    items: &[FoodItem],
    cluster: usize,
    weights: &GoalWeights,
    limit: usize,
) -> RecommendationResult<Vec<Recommendation>> {
    let mut members: Vec<(&FoodItem, f64)> = items
        .iter()
        .filter(|item| item.cluster == Some(cluster))
        .map(|item| (item, item.score(weights)))
        .collect();

    if members.is_empty() {
        return Err(RecommendationError::invariant(format!(
            "selected cluster {cluster} has no members"
        )));
    }

    // Stable sort
    members.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(members
        .into_iter()
        .take(limit)
        .map(|(item, _)| Recommendation::from(item))
        .collect())
}
