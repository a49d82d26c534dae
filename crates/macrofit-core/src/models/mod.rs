// ABOUTME: Core data models for food recommendations
// ABOUTME: Re-exports food, goal, user context, and cluster summary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `RawFoodRecord`: a catalog row as read from the data source
//! - `FoodItem`: a cleaned catalog entry, optionally labelled with its cluster
//! - `Recommendation`: the externally visible `{name, calories, protein}` record
//! - `GoalKind` / `GoalWeights` / `GoalWeightsTable`: goal-driven scoring weights
//! - `UserContext`: daily goals and current progress of the requesting user
//! - `ClusterSummary`: per-cluster means used for cluster selection

mod cluster;
mod food;
mod goal;
mod user;

pub use cluster::ClusterSummary;
pub use food::{FoodItem, NumericField, RawFoodRecord, Recommendation};
pub use goal::{GoalKind, GoalWeights, GoalWeightsTable};
pub use user::UserContext;
