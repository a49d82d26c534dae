// ABOUTME: Default thresholds and algorithm parameters for food recommendations
// ABOUTME: Catalog filter limits, k-means defaults, and result bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Catalog filtering thresholds
pub mod catalog {
    /// Foods above this many calories per serving are never recommended
    pub const MAX_CALORIES: f64 = 500.0;

    /// Foods below this many grams of protein per serving are never recommended
    pub const MIN_PROTEIN: f64 = 5.0;
}

/// K-means clustering defaults
pub mod clustering {
    /// Number of clusters the catalog is partitioned into
    pub const DEFAULT_CLUSTER_COUNT: usize = 3;

    /// Iteration cap for Lloyd's algorithm
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;

    /// Centroid movement below which iteration stops
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;

    /// Seed for the k-means++ initialization RNG
    pub const DEFAULT_SEED: u64 = 42;
}

/// Ranking defaults
pub mod ranking {
    /// Maximum number of recommendations returned per request
    pub const MAX_RECOMMENDATIONS: usize = 5;
}
