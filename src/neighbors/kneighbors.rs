//! k-NN voting classifier.
//!
//! Every query point is labeled by a vote among its `k` nearest training
//! points.
//!
//! # Examples
//!
//! ```
//! #[macro_use(array)]
//! extern crate ndarray;
//! extern crate nnvote;
//!
//! # fn main() {
//! use nnvote::neighbors::*;
//!
//! let train_x = array![[0.], [1.], [2.], [3.]];
//! let train_y = array![0, 0, 1, 1];
//! let training = TrainingSet::from_labels(train_y.view()).unwrap();
//!
//! let knn = KNeighborsVoter::new(BruteForce::new(train_x), training, 3,
//!                                Weights::Uniform).unwrap();
//!
//! match knn.predict_proba(&array![[0.9]].view()).unwrap() {
//!     Probabilities::Single(p) => {
//!         assert!((p[[0, 0]] - 2. / 3.).abs() < 1e-12);
//!         assert!((p[[0, 1]] - 1. / 3.).abs() < 1e-12);
//!     },
//!     Probabilities::Multi(_) => unreachable!(),
//! }
//! # }
//! ```
//!
//! If two neighbors, the `k`-th and the `k+1`-th, are at the same
//! distance but have different labels, the result depends on the order
//! of the training data.
use ndarray::*;

use crate::VoteError;
use crate::neighbors::{NeighborSearch, Neighborhood, Predictions, Probabilities,
                       TrainingSet, Weights, check_neighborhoods, neighbor_labels};
use crate::neighbors::vote;
use crate::neighbors::weights::weigh_neighborhoods;

/// Classifier voting among the `k` nearest neighbors.
pub struct KNeighborsVoter<S, T> {
    search: S,
    training: TrainingSet<T>,
    n_neighbors: usize,
    weights: Weights,
}

impl<S, T> KNeighborsVoter<S, T>
where S: NeighborSearch, T: Ord + Clone {
    /// Creates a k-NN classifier.
    ///
    /// # Arguments
    /// * `search` - Neighbor search over the training points.
    /// * `training` - Labels of the training points, in the same order.
    /// * `n_neighbors` - Number of neighbors voting (k).
    /// * `weights` - How neighbors' votes are weighted.
    pub fn new(search: S, training: TrainingSet<T>, n_neighbors: usize,
               weights: Weights) -> Result<KNeighborsVoter<S, T>, VoteError> {
        if n_neighbors == 0 {
            return Err(VoteError::InvalidParameter(
                "n_neighbors must be at least 1".to_string()));
        }
        if search.n_samples() != training.n_samples() {
            return Err(VoteError::ShapeMismatch(
                format!("{} training points but {} training labels",
                        search.n_samples(), training.n_samples())));
        }

        Ok(KNeighborsVoter {
            search,
            training,
            n_neighbors,
            weights,
        })
    }

    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn training(&self) -> &TrainingSet<T> {
        &self.training
    }

    /// Finds the neighbors of each row of `x`, and weighs them.
    ///
    /// Kernels need a bandwidth: one more neighbor is fetched, its
    /// distance is used as the bandwidth, and it is then discarded.
    fn neighbors(&self, x: &ArrayView2<f64>)
            -> Result<(Vec<Neighborhood>, Option<Vec<Vec<f64>>>), VoteError> {
        let k = self.n_neighbors;
        debug!("k-NN: looking for {} neighbors of {} points ({:?} weights)",
               k, x.nrows(), self.weights);

        if self.weights.is_kernel() {
            let mut neighborhoods = self.search.k_nearest(x, k + 1)?;
            check_neighborhoods(&neighborhoods, x.nrows(), Some(k + 1),
                                self.training.n_samples())?;
            let bandwidths = neighborhoods.iter_mut()
                                          .map(|n| n.pop_farthest().unwrap_or(0.))
                                          .collect::<Vec<_>>();
            let weights = weigh_neighborhoods(&self.weights, &neighborhoods,
                                              &bandwidths)?;
            Ok((neighborhoods, weights))
        } else {
            let neighborhoods = self.search.k_nearest(x, k)?;
            check_neighborhoods(&neighborhoods, x.nrows(), Some(k),
                                self.training.n_samples())?;
            let weights = weigh_neighborhoods(&self.weights, &neighborhoods,
                                              &vec![0.; neighborhoods.len()])?;
            Ok((neighborhoods, weights))
        }
    }

    /// Predicts the class of each row of `x`.
    pub fn predict(&self, x: &ArrayView2<f64>) -> Result<Predictions<T>, VoteError> {
        let (neighborhoods, weights) = self.neighbors(x)?;
        let n_samples = x.nrows();

        let mut columns = Vec::with_capacity(self.training.n_outputs());
        for k in 0..self.training.n_outputs() {
            let labels = neighbor_labels(&neighborhoods,
                                         &self.training.labels_for_output(k));
            let mode = vote::predict_labels(&labels, weights.as_deref())?;
            columns.push(mode);
        }

        let y_pred = Array2::from_shape_fn((n_samples, columns.len()),
                                           |(i, k)| self.training
                                                        .class(k, columns[k][i])
                                                        .clone());

        Ok(Predictions::from_columns(y_pred, self.training.outputs_2d()))
    }

    /// Estimates class probabilities for each row of `x`.
    ///
    /// Columns follow the sorted classes of each output.
    pub fn predict_proba(&self, x: &ArrayView2<f64>) -> Result<Probabilities, VoteError> {
        let (neighborhoods, weights) = self.neighbors(x)?;

        let probabilities = (0..self.training.n_outputs())
            .map(|k| {
                let labels = neighbor_labels(&neighborhoods,
                                             &self.training.labels_for_output(k));
                vote::predict_proba(&labels, weights.as_deref(),
                                    self.training.classes_for_output(k).len())
            })
            .collect();

        Ok(Probabilities::from_outputs(probabilities, self.training.outputs_2d()))
    }
}
