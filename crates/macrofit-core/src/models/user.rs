// ABOUTME: Per-request user context with daily nutrition goals and current progress
// ABOUTME: Carried alongside recommendations but not consumed by scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Daily goals and today's progress for the requesting user
///
/// Scoring does not read these values; they are reported back with the
/// response so callers can show them next to the recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Daily calorie target (kcal), if configured
    pub daily_calories_goal: Option<f64>,
    /// Daily protein target (g), if configured
    pub daily_protein_goal: Option<f64>,
    /// Calories consumed so far today
    pub current_calories: f64,
    /// Protein consumed so far today (g)
    pub current_protein: f64,
}
