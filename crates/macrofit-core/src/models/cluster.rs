// ABOUTME: Per-cluster summary statistics used to pick the preferred cluster
// ABOUTME: Member count and mean calories/protein with goal-weighted preference score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::GoalWeights;

/// Mean position of one cluster's members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster label
    pub cluster: usize,
    /// Number of members
    pub size: usize,
    /// Mean calories of members
    pub mean_calories: f64,
    /// Mean protein of members
    pub mean_protein: f64,
}

impl ClusterSummary {
    /// Goal-weighted preference score of this cluster
    #[must_use]
    pub fn preference_score(&self, weights: &GoalWeights) -> f64 {
        weights.score(self.mean_calories, self.mean_protein)
    }

    /// Whether the cluster has no members
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}
