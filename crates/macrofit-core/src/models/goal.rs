// ABOUTME: Dietary goal kinds and the weight table that turns a goal into a scoring pair
// ABOUTME: GoalKind parsing, GoalWeights linear scoring, and the default GoalWeightsTable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RecommendationError, RecommendationResult};

/// Dietary objective selected in the user's settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalKind {
    /// Caloric surplus, favours calories
    MuscleGain,
    /// Caloric deficit
    WeightLoss,
    /// Caloric balance, equal weighting
    WeightMaintenance,
    /// Body recomposition, favours protein
    Recomposition,
}

impl GoalKind {
    /// Every goal kind, in table order
    pub const ALL: [Self; 4] = [
        Self::MuscleGain,
        Self::WeightLoss,
        Self::WeightMaintenance,
        Self::Recomposition,
    ];

    /// Identifier as stored in settings (`muscle-gain`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MuscleGain => "muscle-gain",
            Self::WeightLoss => "weight-loss",
            Self::WeightMaintenance => "weight-maintenance",
            Self::Recomposition => "recomposition",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = RecommendationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RecommendationError::unknown_goal(s))
    }
}

/// Linear-combination coefficients for calories and protein
///
/// The pair need not sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalWeights {
    /// Coefficient applied to calories
    pub calories: f64,
    /// Coefficient applied to protein
    pub protein: f64,
}

impl GoalWeights {
    /// Create a weight pair
    #[must_use]
    pub const fn new(calories: f64, protein: f64) -> Self {
        Self { calories, protein }
    }

    /// Weighted sum `calories * w.calories + protein * w.protein`
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // Unfused: ranking ties depend on exact scores
    pub fn score(&self, calories: f64, protein: f64) -> f64 {
        calories * self.calories + protein * self.protein
    }
}

/// Static lookup table from goal kind to weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalWeightsTable {
    entries: BTreeMap<GoalKind, GoalWeights>,
}

impl Default for GoalWeightsTable {
    fn default() -> Self {
        Self::empty()
            .with_weights(GoalKind::MuscleGain, GoalWeights::new(0.7, 0.3))
            .with_weights(GoalKind::WeightLoss, GoalWeights::new(0.6, 0.4))
            .with_weights(GoalKind::WeightMaintenance, GoalWeights::new(0.5, 0.5))
            .with_weights(GoalKind::Recomposition, GoalWeights::new(0.4, 0.6))
    }
}

impl GoalWeightsTable {
    /// Table without any goal
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace the weights of one goal
    #[must_use]
    pub fn with_weights(mut self, goal: GoalKind, weights: GoalWeights) -> Self {
        self.entries.insert(goal, weights);
        self
    }

    /// Weights of a known goal kind, if present
    #[must_use]
    pub fn get(&self, goal: GoalKind) -> Option<GoalWeights> {
        self.entries.get(&goal).copied()
    }

    /// Resolve a goal identifier to its kind and weights
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError::UnknownGoal` if the identifier is not a
    /// goal kind or the table has no entry for it
    pub fn resolve(&self, goal: &str) -> RecommendationResult<(GoalKind, GoalWeights)> {
        let kind: GoalKind = goal.parse()?;
        self.get(kind)
            .map(|weights| (kind, weights))
            .ok_or_else(|| RecommendationError::unknown_goal(goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_default_table_values() {
        let table = GoalWeightsTable::default();
        let expected = [
            ("muscle-gain", 0.7, 0.3),
            ("weight-loss", 0.6, 0.4),
            ("weight-maintenance", 0.5, 0.5),
            ("recomposition", 0.4, 0.6),
        ];
        for (goal, calories, protein) in expected {
            let (kind, weights) = table.resolve(goal).unwrap();
            assert_eq!(kind.as_str(), goal);
            assert_eq!(weights, GoalWeights::new(calories, protein));
        }
    }

    #[test]
    fn test_unknown_identifier() {
        let err = GoalWeightsTable::default()
            .resolve("unknown-goal")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownGoalError);
    }

    #[test]
    fn test_known_kind_missing_from_table() {
        let table = GoalWeightsTable::empty()
            .with_weights(GoalKind::WeightLoss, GoalWeights::new(0.6, 0.4));
        assert!(matches!(
            table.resolve("recomposition"),
            Err(RecommendationError::UnknownGoal { goal }) if goal == "recomposition"
        ));
    }

    #[test]
    fn test_goal_kind_serde_uses_identifier() {
        let json = serde_json::to_string(&GoalKind::WeightMaintenance).unwrap();
        assert_eq!(json, "\"weight-maintenance\"");
    }
}
