// ABOUTME: Main library entry point for the macrofit food recommender
// ABOUTME: Wires the SQLite data source, configuration, and logging to the recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit
//!
//! Goal-driven food recommendations. The catalog is cleaned, partitioned
//! with seeded k-means on (calories, protein), and the cluster that best
//! matches the user's goal supplies the ranked recommendations.
//!
//! ## Crates
//!
//! - `macrofit-core`: models, goal weights, error taxonomy, constants
//! - `macrofit-intelligence`: catalog preparation, k-means, cluster ranking
//! - `macrofit` (this crate): data source, configuration, logging, CLI
//!
//! ## Example
//!
//! ```rust
//! use macrofit::recommendations::{RecommendationRequest, RecommendationService};
//! use macrofit_core::models::RawFoodRecord;
//!
//! let request = RecommendationRequest::new(
//!     "muscle-gain",
//!     vec![
//!         RawFoodRecord::new("A", 100.0, 10.0),
//!         RawFoodRecord::new("B", "450", "6"),
//!         RawFoodRecord::new("C", 50.0, 20.0),
//!     ],
//! );
//! let response = RecommendationService::default().recommend(&request)?;
//! assert!(response.recommendations.len() <= 3);
//! # Ok::<(), macrofit::errors::AppError>(())
//! ```

/// Data source and engine configuration
pub mod config;

/// Read-only `SQLite` access to settings, progress and the food catalog
pub mod database;

/// Application error type and error codes
pub mod errors;

/// Tracing subscriber setup
pub mod logging;

/// End-to-end recommendation requests and JSON rendering
pub mod recommendations;

pub use errors::{AppError, AppResult, ErrorCode};
pub use recommendations::{RecommendationRequest, RecommendationResponse, RecommendationService};
