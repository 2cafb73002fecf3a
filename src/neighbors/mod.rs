//! This module implements nearest-neighbor voting classifiers, and the
//! pieces they are built from: neighbor search, label encoding,
//! weighting and vote aggregation.
pub mod brute;
pub mod kneighbors;
pub mod prediction;
pub mod radius;
pub mod training;
pub mod vote;
pub mod weights;

pub use self::brute::BruteForce;
pub use self::kneighbors::KNeighborsVoter;
pub use self::prediction::{Predictions, Probabilities};
pub use self::radius::RadiusVoter;
pub use self::training::TrainingSet;
pub use self::weights::{Kernel, Weights};

use ndarray::prelude::*;

use crate::VoteError;

/// Neighbors of a single query point: parallel vectors of distances and
/// indices into the training data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neighborhood {
    pub distances: Vec<f64>,
    pub indices: Vec<usize>,
}

impl Neighborhood {
    pub fn new(distances: Vec<f64>, indices: Vec<usize>) -> Neighborhood {
        assert_eq!(distances.len(), indices.len());
        Neighborhood {
            distances,
            indices,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Removes the farthest neighbor and returns its distance.
    ///
    /// Assumes neighbors are sorted by increasing distance.
    fn pop_farthest(&mut self) -> Option<f64> {
        self.indices.pop();
        self.distances.pop()
    }
}

/// Spatial query over a fixed set of training points.
pub trait NeighborSearch {
    /// Number of training points.
    fn n_samples(&self) -> usize;

    /// Returns exactly `k` neighbors for each row of `x`, sorted by
    /// increasing distance. Equidistant neighbors are returned in the order
    /// the training points are stored.
    fn k_nearest(&self, x: &ArrayView2<f64>, k: usize)
        -> Result<Vec<Neighborhood>, VoteError>;

    /// Returns all neighbors within distance `radius` (inclusive) of each
    /// row of `x`, in no particular order.
    fn within_radius(&self, x: &ArrayView2<f64>, radius: f64)
        -> Result<Vec<Neighborhood>, VoteError>;
}

/// Returns the Euclidean distance between two vectors of f64 values.
pub fn euclidean_distance(v1: &ArrayView1<f64>, v2: &ArrayView1<f64>) -> f64 {
    v1.iter()
      .zip(v2.iter())
      .map(|(x,y)| (x - y).powi(2))
      .sum::<f64>()
      .sqrt()
}

/// Checks what a search returned: one neighborhood per query point, each
/// with exactly `k` neighbors if `k` is given, pointing to training
/// points only.
fn check_neighborhoods(neighborhoods: &[Neighborhood], n_queries: usize,
                       k: Option<usize>, n_samples: usize) -> Result<(), VoteError> {
    if neighborhoods.len() != n_queries {
        return Err(VoteError::ShapeMismatch(
            format!("search returned {} neighborhoods for {} query points",
                    neighborhoods.len(), n_queries)));
    }

    for (i, neigh) in neighborhoods.iter().enumerate() {
        if neigh.distances.len() != neigh.indices.len() {
            return Err(VoteError::ShapeMismatch(
                format!("query point {}: {} distances but {} indices", i,
                        neigh.distances.len(), neigh.indices.len())));
        }
        match k {
            Some(k) if neigh.len() != k =>
                return Err(VoteError::ShapeMismatch(
                    format!("query point {}: expected {} neighbors, found {}",
                            i, k, neigh.len()))),
            _ => {},
        }
        if let Some(j) = neigh.indices.iter().find(|&&j| j >= n_samples) {
            return Err(VoteError::ShapeMismatch(
                format!("query point {}: neighbor {} is not one of {} training points",
                        i, j, n_samples)));
        }
    }
    Ok(())
}

/// Looks up the encoded label of every neighbor, for one output.
fn neighbor_labels(neighborhoods: &[Neighborhood], labels: &ArrayView1<crate::Label>)
        -> Vec<Vec<crate::Label>> {
    neighborhoods.iter()
                 .map(|n| n.indices.iter().map(|&i| labels[i]).collect())
                 .collect()
}
