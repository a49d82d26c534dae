// ABOUTME: Food catalog models from raw source rows to ranked recommendations
// ABOUTME: NumericField, RawFoodRecord, FoodItem, and Recommendation definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GoalWeights;

/// A numeric catalog column as stored in the source: a number or its text form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// Already numeric
    Number(f64),
    /// Text that still has to be coerced
    Text(String),
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for NumericField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A food catalog row before cleaning
///
/// Calories and protein are optional because the source columns are nullable;
/// a missing value is reported as a data format error during preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFoodRecord {
    /// Food name
    pub name: String,
    /// Calories per serving, unparsed
    #[serde(default)]
    pub calories: Option<NumericField>,
    /// Protein per serving in grams, unparsed
    #[serde(default)]
    pub protein: Option<NumericField>,
}

impl RawFoodRecord {
    /// Create a record with both numeric fields present
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        calories: impl Into<NumericField>,
        protein: impl Into<NumericField>,
    ) -> Self {
        Self {
            name: name.into(),
            calories: Some(calories.into()),
            protein: Some(protein.into()),
        }
    }
}

/// A cleaned food catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name, unique within a prepared catalog
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein per serving in grams
    pub protein: f64,
    /// Cluster label, assigned by the engine
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cluster: Option<usize>,
}

impl FoodItem {
    /// Create an unclustered food item
    #[must_use]
    pub fn new(name: impl Into<String>, calories: f64, protein: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein,
            cluster: None,
        }
    }

    /// Position of this item in (calories, protein) space
    #[must_use]
    pub const fn point(&self) -> [f64; 2] {
        [self.calories, self.protein]
    }

    /// Weighted item score used for within-cluster ranking
    #[must_use]
    pub fn score(&self, weights: &GoalWeights) -> f64 {
        weights.score(self.calories, self.protein)
    }
}

/// A single recommended food, as returned to consumers
///
/// Field order is part of the output contract: `name`, `calories`, `protein`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Food name
    pub name: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein per serving in grams
    pub protein: f64,
}

impl From<&FoodItem> for Recommendation {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            calories: item.calories,
            protein: item.protein,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_accepts_numbers_and_strings() {
        let records: Vec<RawFoodRecord> = serde_json::from_str(
            r#"[{"name":"Tofu","calories":"144","protein":15.7},{"name":"Skyr","protein":"11"}]"#,
        )
        .unwrap();

        assert_eq!(records[0].calories, Some(NumericField::Text("144".to_owned())));
        assert_eq!(records[0].protein, Some(NumericField::Number(15.7)));
        assert_eq!(records[1].calories, None);
    }

    #[test]
    fn test_recommendation_key_order() {
        let item = FoodItem::new("Lentils", 116.0, 9.0);
        let json = serde_json::to_string(&Recommendation::from(&item)).unwrap();
        assert_eq!(json, r#"{"name":"Lentils","calories":116.0,"protein":9.0}"#);
    }

    #[test]
    fn test_item_score_uses_weights() {
        let item = FoodItem::new("A", 100.0, 10.0);
        let weights = GoalWeights::new(0.7, 0.3);
        assert!((item.score(&weights) - 73.0).abs() < 1e-9);
    }
}
