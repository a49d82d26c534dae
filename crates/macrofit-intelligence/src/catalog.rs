// ABOUTME: Catalog preparation turning raw food rows into a clean clustering input
// ABOUTME: Numeric coercion, calorie/protein filtering, and first-wins name deduplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog Preparer
//!
//! Three passes, in order:
//!
//! 1. Coerce every record's calories and protein to finite numbers. The first
//!    record that fails aborts the batch with `DataFormat`.
//! 2. Keep records inside the filter thresholds.
//! 3. Drop later records whose name was already seen.

use std::collections::HashSet;

use macrofit_core::errors::{RecommendationError, RecommendationResult};
use macrofit_core::models::{FoodItem, NumericField, RawFoodRecord};
use tracing::debug;

use crate::config::CatalogFilterConfig;

/// Cleans a raw catalog for the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogPreparer {
    filter: CatalogFilterConfig,
}

impl CatalogPreparer {
    /// Create a preparer with the given thresholds
    #[must_use]
    pub const fn new(filter: CatalogFilterConfig) -> Self {
        Self { filter }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn filter(&self) -> &CatalogFilterConfig {
        &self.filter
    }

    /// Coerce, filter and deduplicate a raw catalog
    ///
    /// The output keeps catalog order. An empty output is not an error here.
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError::DataFormat` for the first record whose
    /// calories or protein cannot be coerced to a finite number
    pub fn prepare(&self, records: &[RawFoodRecord]) -> RecommendationResult<Vec<FoodItem>> {
        let coerced = records
            .iter()
            .enumerate()
            .map(|(index, record)| coerce_record(index, record))
            .collect::<RecommendationResult<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(coerced.len());
        let prepared: Vec<FoodItem> = coerced
            .into_iter()
            .filter(|item| self.accepts(item))
            .filter(|item| seen.insert(item.name.clone()))
            .collect();

        debug!(
            raw = records.len(),
            prepared = prepared.len(),
            max_calories = self.filter.max_calories,
            min_protein = self.filter.min_protein,
            "Prepared food catalog"
        );

        Ok(prepared)
    }

    /// Whether an item passes the calorie and protein thresholds
    #[must_use]
    pub fn accepts(&self, item: &FoodItem) -> bool {
        (0.0..=self.filter.max_calories).contains(&item.calories)
            && item.protein >= self.filter.min_protein
    }
}

/// Coerce one raw record into an unclustered food item
fn coerce_record(index: usize, record: &RawFoodRecord) -> RecommendationResult<FoodItem> {
    let calories = coerce_numeric(index, &record.name, "calories", record.calories.as_ref())?;
    let protein = coerce_numeric(index, &record.name, "protein", record.protein.as_ref())?;
    Ok(FoodItem::new(record.name.clone(), calories, protein))
}

/// Coerce a raw numeric field to a finite `f64`
///
/// Text is trimmed before parsing. Missing, empty, unparseable, NaN and
/// infinite values are all rejected.
///
/// # Errors
///
/// Returns `RecommendationError::DataFormat` naming the record and field
pub fn coerce_numeric(
    index: usize,
    name: &str,
    field: &'static str,
    value: Option<&NumericField>,
) -> RecommendationResult<f64> {
    let parsed = match value {
        Some(NumericField::Number(number)) => Some(*number),
        Some(NumericField::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(RecommendationError::data_format(
            index,
            name,
            field,
            value.map_or_else(|| "<missing>".to_owned(), ToString::to_string),
        )),
    }
}
