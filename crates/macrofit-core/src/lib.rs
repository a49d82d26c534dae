// ABOUTME: Core types and constants for the macrofit food recommender
// ABOUTME: Foundation crate with food models, goal weights, and error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit Core
//!
//! Foundation crate providing the shared types for the macrofit food
//! recommender. It carries no algorithms: the catalog preparer and the
//! cluster-and-rank engine live in `macrofit-intelligence`, and the data
//! source and CLI live in the root crate.
//!
//! ## Modules
//!
//! - **errors**: The `RecommendationError` taxonomy shared by every layer
//! - **constants**: Catalog thresholds, clustering and ranking defaults
//! - **models**: Food items, goal weights, user context, cluster summaries

/// Recommendation error taxonomy
pub mod errors;

/// Default thresholds and algorithm parameters
pub mod constants;

/// Core data models (`FoodItem`, `GoalKind`, `Recommendation`, etc.)
pub mod models;
