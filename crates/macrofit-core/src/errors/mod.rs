// ABOUTME: Error types shared by the catalog preparer and the cluster-and-rank engine
// ABOUTME: Re-exports RecommendationError, ErrorKind, and the RecommendationResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recommendation Error Types
//!
//! Every failure of a recommendation request is one of four kinds. None of
//! them is recoverable inside the request: the computation is pure, so the
//! only fix is a different input.

mod recommendation;

pub use recommendation::{ErrorKind, RecommendationError, RecommendationResult};
