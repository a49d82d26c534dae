// ABOUTME: Application error type wrapping recommendation, database, and config failures
// ABOUTME: Maps every failure to a stable ErrorCode and a JSON error body for the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError` is what a recommendation request can fail with once the data
//! source and configuration are involved. Each variant maps to an
//! [`ErrorCode`] whose serialized name is stable for consumers of the CLI's
//! error output.

use macrofit_core::errors::{ErrorKind, RecommendationError};
use macrofit_intelligence::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Standard error codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A catalog value could not be coerced to a number
    #[serde(rename = "DATA_FORMAT")]
    DataFormat,
    /// Not enough usable foods to cluster
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData,
    /// Internal consistency check failed
    #[serde(rename = "ALGORITHM_INVARIANT")]
    AlgorithmInvariant,
    /// Goal identifier not in the weights table
    #[serde(rename = "UNKNOWN_GOAL")]
    UnknownGoal,
    /// Reading the data source failed
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError,
    /// Configuration could not be loaded or is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// A required record (e.g. user settings) is missing
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Output serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
}

impl ErrorCode {
    /// Serialized name of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataFormat => "DATA_FORMAT",
            Self::InsufficientData => "INSUFFICIENT_DATA",
            Self::AlgorithmInvariant => "ALGORITHM_INVARIANT",
            Self::UnknownGoal => "UNKNOWN_GOAL",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Process exit status used by the CLI for this code
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::DataFormat | Self::InsufficientData | Self::UnknownGoal => 2,
            Self::ConfigInvalid => 3,
            Self::DatabaseError | Self::ResourceNotFound => 4,
            Self::AlgorithmInvariant | Self::SerializationError => 70,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DataFormatError => Self::DataFormat,
            ErrorKind::InsufficientDataError => Self::InsufficientData,
            ErrorKind::AlgorithmInvariantError => Self::AlgorithmInvariant,
            ErrorKind::UnknownGoalError => Self::UnknownGoal,
        }
    }
}

/// Failures of a recommendation request, including the data source
#[derive(Debug, Error)]
pub enum AppError {
    /// The recommendation pipeline rejected its input
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),

    /// The data source could not be read
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A required record is absent from the data source
    #[error("{resource} not found: {details}")]
    NotFound {
        /// Kind of record looked up
        resource: &'static str,
        /// Lookup key or explanation
        details: String,
    },

    /// Serializing the response failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a not-found error
    #[must_use]
    pub fn not_found(resource: &'static str, details: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            details: details.into(),
        }
    }

    /// Error code of this failure
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Recommendation(err) => err.kind().into(),
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Recommendation error kind, if this is a pipeline failure
    #[must_use]
    pub const fn recommendation_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Recommendation(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// JSON error body: `{"error": {"code", "kind", "message"}}`
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code().as_str(),
                "kind": self.recommendation_kind(),
                "message": self.to_string(),
            }
        })
    }
}
