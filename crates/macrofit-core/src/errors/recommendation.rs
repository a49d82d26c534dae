// ABOUTME: Recommendation error taxonomy with structured context per failure kind
// ABOUTME: DataFormat, InsufficientData, AlgorithmInvariant, and UnknownGoal variants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result alias for recommendation operations
pub type RecommendationResult<T> = Result<T, RecommendationError>;

/// Stable name of each failure kind, as surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A catalog field could not be coerced to a number
    DataFormatError,
    /// Not enough usable items to cluster
    InsufficientDataError,
    /// Internal consistency check failed
    AlgorithmInvariantError,
    /// Goal identifier missing from the weights table
    UnknownGoalError,
}

impl ErrorKind {
    /// Kind name as a static string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataFormatError => "DataFormatError",
            Self::InsufficientDataError => "InsufficientDataError",
            Self::AlgorithmInvariantError => "AlgorithmInvariantError",
            Self::UnknownGoalError => "UnknownGoalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of a single recommendation request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationError {
    /// A calories or protein value could not be coerced to a finite number
    #[error("Catalog record {index} ('{name}') has a non-numeric {field} value: {value:?}")]
    DataFormat {
        /// Zero-based position of the record in the raw catalog
        index: usize,
        /// Name of the offending record
        name: String,
        /// Field that failed to parse (`calories` or `protein`)
        field: &'static str,
        /// Raw value as read from the source
        value: String,
    },

    /// The prepared catalog cannot support the requested clustering
    #[error("Insufficient data: {available} usable food items, {requested} clusters requested")]
    InsufficientData {
        /// Number of usable items after preparation
        available: usize,
        /// Number of clusters requested
        requested: usize,
    },

    /// An internal consistency check failed
    #[error("Algorithm invariant violated: {0}")]
    AlgorithmInvariant(String),

    /// The goal identifier is not present in the weights table
    #[error("Unknown goal '{goal}'")]
    UnknownGoal {
        /// Goal identifier as supplied
        goal: String,
    },
}

impl RecommendationError {
    /// Create a data format error for a catalog record field
    #[must_use]
    pub fn data_format(
        index: usize,
        name: impl Into<String>,
        field: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::DataFormat {
            index,
            name: name.into(),
            field,
            value: value.into(),
        }
    }

    /// Create an unknown goal error
    #[must_use]
    pub fn unknown_goal(goal: impl Into<String>) -> Self {
        Self::UnknownGoal { goal: goal.into() }
    }

    /// Create an algorithm invariant error
    #[must_use]
    pub fn invariant(details: impl Into<String>) -> Self {
        Self::AlgorithmInvariant(details.into())
    }

    /// Failure kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DataFormat { .. } => ErrorKind::DataFormatError,
            Self::InsufficientData { .. } => ErrorKind::InsufficientDataError,
            Self::AlgorithmInvariant(_) => ErrorKind::AlgorithmInvariantError,
            Self::UnknownGoal { .. } => ErrorKind::UnknownGoalError,
        }
    }
}
