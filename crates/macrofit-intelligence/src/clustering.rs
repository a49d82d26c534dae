// ABOUTME: Deterministic k-means clustering of foods in (calories, protein) space
// ABOUTME: Seeded k-means++ initialization, Lloyd iterations, and empty-cluster re-seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # K-means
//!
//! Lloyd's algorithm over 2-D points with two fixed rules that make every run
//! reproducible:
//!
//! - **Initialization**: k-means++ over the distinct points, sampling from a
//!   `ChaCha8Rng` seeded with `ClusteringConfig::seed`.
//! - **Ties**: a point equidistant from several centroids goes to the lowest
//!   cluster index.
//!
//! When the input has fewer distinct points than requested clusters, the
//! effective cluster count drops to the number of distinct points. A cluster
//! left empty after an assignment step is re-seeded with the point farthest
//! from its own centroid, moving every point at that location together so that
//! identical foods always share a cluster.

use macrofit_core::errors::{RecommendationError, RecommendationResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::config::ClusteringConfig;

/// A point in (calories, protein) space
pub type Point = [f64; 2];

/// Outcome of one k-means run
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringResult {
    /// Cluster label of each input point, in input order
    pub labels: Vec<usize>,
    /// Final centroid of each cluster
    pub centroids: Vec<Point>,
    /// Number of Lloyd iterations performed
    pub iterations: usize,
    /// Whether iteration stopped before the cap
    pub converged: bool,
    /// Within-cluster sum of squared distances
    pub inertia: f64,
}

impl ClusteringResult {
    /// Effective number of clusters
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }

    /// Number of points in each cluster
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        cluster_sizes(&self.labels, self.cluster_count())
    }
}

/// Seeded k-means clusterer
#[derive(Debug, Clone, Copy, Default)]
pub struct KMeans {
    config: ClusteringConfig,
}

impl KMeans {
    /// Create a clusterer with the given parameters
    #[must_use]
    pub const fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    #[must_use]
    pub const fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Partition `points` into at most `n_clusters` clusters
    ///
    /// # Errors
    ///
    /// Returns `RecommendationError::InsufficientData` when `points` is empty,
    /// and `RecommendationError::AlgorithmInvariant` if an empty cluster cannot
    /// be re-seeded
    pub fn fit(&self, points: &[Point]) -> RecommendationResult<ClusteringResult> {
        let requested = self.config.n_clusters;
        let distinct = distinct_points(points);
        if distinct.is_empty() || requested == 0 {
            return Err(RecommendationError::InsufficientData {
                available: points.len(),
                requested,
            });
        }

        let k = requested.min(distinct.len());
        if k < requested {
            warn!(
                requested,
                effective = k,
                distinct_points = distinct.len(),
                "Fewer distinct foods than clusters, reducing cluster count"
            );
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let mut centroids = kmeans_plus_plus_init(&distinct, k, &mut rng);
        let k = centroids.len();
        let mut labels: Vec<usize> = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        loop {
            iterations += 1;

            let mut new_labels = assign(points, &centroids);
            reseed_empty_clusters(points, &mut new_labels, &mut centroids)?;
            let new_centroids = compute_centroids(points, &new_labels, k);

            let max_movement = centroids
                .iter()
                .zip(&new_centroids)
                .map(|(old, new)| squared_distance(old, new).sqrt())
                .fold(0.0_f64, f64::max);
            let stable = new_labels == labels;

            labels = new_labels;
            centroids = new_centroids;

            if stable || max_movement <= self.config.tolerance {
                converged = true;
                break;
            }
            if iterations >= self.config.max_iterations {
                break;
            }
        }

        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(point, &label)| squared_distance(point, &centroids[label]))
            .sum();

        debug!(
            points = points.len(),
            clusters = k,
            iterations,
            converged,
            inertia,
            seed = self.config.seed,
            "K-means finished"
        );

        Ok(ClusteringResult {
            labels,
            centroids,
            iterations,
            converged,
            inertia,
        })
    }
}

/// Squared Euclidean distance
#[must_use]
pub fn squared_distance(a: &Point, b: &Point) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx.mul_add(dx, dy * dy)
}

/// Distinct points in order of first appearance
fn distinct_points(points: &[Point]) -> Vec<Point> {
    let mut distinct: Vec<Point> = Vec::new();
    for point in points {
        if !distinct.contains(point) {
            distinct.push(*point);
        }
    }
    distinct
}

/// Choose `k` initial centroids among distinct points with k-means++
///
/// The first centroid is drawn uniformly; each following one with
/// probability proportional to its squared distance to the nearest chosen
/// centroid.
fn kmeans_plus_plus_init(distinct: &[Point], k: usize, rng: &mut ChaCha8Rng) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    let first = rng.gen_range(0..distinct.len());
    centroids.push(distinct[first]);

    let mut min_distances: Vec<f64> = distinct
        .iter()
        .map(|point| squared_distance(point, &distinct[first]))
        .collect();

    while centroids.len() < k {
        let total: f64 = min_distances.iter().sum();
        let sampled = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            weighted_pick(&min_distances, target)
        } else {
            None
        };
        // Distances can underflow to zero for nearly identical points
        let next = sampled.or_else(|| {
            distinct
                .iter()
                .position(|point| !centroids.contains(point))
        });

        let Some(next) = next else { break };
        let chosen = distinct[next];
        centroids.push(chosen);
        for (distance, point) in min_distances.iter_mut().zip(distinct) {
            *distance = distance.min(squared_distance(point, &chosen));
        }
    }

    centroids
}

/// Index whose cumulative weight first exceeds `target`, skipping zero weights
fn weighted_pick(weights: &[f64], target: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if cumulative > target {
            return Some(index);
        }
    }
    last_positive
}

/// Nearest centroid of each point, ties to the lowest index
fn assign(points: &[Point], centroids: &[Point]) -> Vec<usize> {
    points
        .iter()
        .map(|point| {
            let mut best = 0;
            let mut best_distance = f64::INFINITY;
            for (index, centroid) in centroids.iter().enumerate() {
                let distance = squared_distance(point, centroid);
                if distance < best_distance {
                    best = index;
                    best_distance = distance;
                }
            }
            best
        })
        .collect()
}

/// Member count per cluster
fn cluster_sizes(labels: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &label in labels {
        sizes[label] += 1;
    }
    sizes
}

/// Give every empty cluster a point group taken from a cluster that keeps members
///
/// The donor is the point farthest from its current centroid among points
/// whose cluster also holds a point at another location. All points sharing
/// the donor's location move with it, and the empty cluster's centroid is set
/// to that location.
fn reseed_empty_clusters(
    points: &[Point],
    labels: &mut [usize],
    centroids: &mut [Point],
) -> RecommendationResult<()> {
    let k = centroids.len();
    let mut sizes = cluster_sizes(labels, k);

    for empty in 0..k {
        if sizes[empty] > 0 {
            continue;
        }

        let mut donor: Option<(usize, f64)> = None;
        for (index, point) in points.iter().enumerate() {
            let label = labels[index];
            let shares_cluster = points
                .iter()
                .zip(labels.iter())
                .any(|(other, &other_label)| other_label == label && other != point);
            if !shares_cluster {
                continue;
            }
            let distance = squared_distance(point, &centroids[label]);
            let farther = match donor {
                Some((_, best)) => distance > best,
                None => true,
            };
            if farther {
                donor = Some((index, distance));
            }
        }

        let Some((donor_index, _)) = donor else {
            return Err(RecommendationError::invariant(format!(
                "cluster {empty} is empty and no point can be moved into it"
            )));
        };

        let location = points[donor_index];
        let from = labels[donor_index];
        for (point, label) in points.iter().zip(labels.iter_mut()) {
            if *point == location {
                sizes[*label] -= 1;
                sizes[empty] += 1;
                *label = empty;
            }
        }
        centroids[empty] = location;

        warn!(
            cluster = empty,
            donor_cluster = from,
            calories = location[0],
            protein = location[1],
            "Re-seeded empty cluster"
        );
    }

    Ok(())
}

/// Mean of the points assigned to each cluster
fn compute_centroids(points: &[Point], labels: &[usize], k: usize) -> Vec<Point> {
    let mut sums = vec![[0.0_f64; 2]; k];
    let mut counts = vec![0_usize; k];

    for (point, &label) in points.iter().zip(labels) {
        sums[label][0] += point[0];
        sums[label][1] += point[1];
        counts[label] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(sum, count)| {
            if count == 0 {
                sum
            } else {
                let n = count as f64;
                [sum[0] / n, sum[1] / n]
            }
        })
        .collect()
}
