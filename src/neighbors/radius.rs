//! Radius voting classifier.
//!
//! Every query point is labeled by a vote among the training points
//! within a fixed radius. Query points with no training point within
//! the radius are outliers: they either get a designated outlier
//! label, or make the prediction fail.
use ndarray::*;

use crate::VoteError;
use crate::neighbors::{NeighborSearch, Neighborhood, Predictions, Probabilities,
                       TrainingSet, Weights, check_neighborhoods, neighbor_labels};
use crate::neighbors::vote;
use crate::neighbors::weights::weigh_neighborhoods;

/// Neighbors of the query points that have at least one.
struct Inliers {
    // For each query point, its position in `neighborhoods`, if any.
    position: Vec<Option<usize>>,
    neighborhoods: Vec<Neighborhood>,
    weights: Option<Vec<Vec<f64>>>,
}

/// Classifier voting among neighbors within a radius.
pub struct RadiusVoter<S, T> {
    search: S,
    training: TrainingSet<T>,
    radius: f64,
    weights: Weights,
    outlier_label: Option<T>,
}

impl<S, T> RadiusVoter<S, T>
where S: NeighborSearch, T: Ord + Clone {
    /// Creates a radius classifier.
    ///
    /// # Arguments
    /// * `search` - Neighbor search over the training points.
    /// * `training` - Labels of the training points, in the same order.
    /// * `radius` - Neighbors are the training points within this
    ///   distance. It is also the bandwidth of kernel weights.
    /// * `weights` - How neighbors' votes are weighted.
    /// * `outlier_label` - Label given to query points without neighbors.
    ///   If `None`, such points make prediction fail.
    pub fn new(search: S, training: TrainingSet<T>, radius: f64, weights: Weights,
               outlier_label: Option<T>) -> Result<RadiusVoter<S, T>, VoteError> {
        if !(radius.is_finite() && radius > 0.) {
            return Err(VoteError::InvalidParameter(
                format!("radius must be positive and finite, got {}", radius)));
        }
        if search.n_samples() != training.n_samples() {
            return Err(VoteError::ShapeMismatch(
                format!("{} training points but {} training labels",
                        search.n_samples(), training.n_samples())));
        }

        Ok(RadiusVoter {
            search,
            training,
            radius,
            weights,
            outlier_label,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn outlier_label(&self) -> Option<&T> {
        self.outlier_label.as_ref()
    }

    pub fn training(&self) -> &TrainingSet<T> {
        &self.training
    }

    /// Finds the neighbors of each row of `x`, separates outliers, and
    /// weighs the neighbors of inliers.
    ///
    /// Fails if there are outliers and no outlier label.
    fn inliers(&self, x: &ArrayView2<f64>) -> Result<Inliers, VoteError> {
        debug!("radius: looking for neighbors within {} of {} points ({:?} weights)",
               self.radius, x.nrows(), self.weights);

        let mut position = Vec::with_capacity(x.nrows());
        let mut neighborhoods = Vec::with_capacity(x.nrows());
        let mut outliers = vec![];

        let found = self.search.within_radius(x, self.radius)?;
        check_neighborhoods(&found, x.nrows(), None, self.training.n_samples())?;

        for (i, neigh) in found.into_iter().enumerate() {
            if neigh.is_empty() {
                position.push(None);
                outliers.push(i);
            } else {
                position.push(Some(neighborhoods.len()));
                neighborhoods.push(neigh);
            }
        }

        if !outliers.is_empty() {
            if self.outlier_label.is_none() {
                return Err(VoteError::NoNeighbors(outliers));
            }
            warn!("{} points have no neighbors within radius {}, and are \
                   given the outlier label", outliers.len(), self.radius);
        }

        // Outliers are never weighed.
        let bandwidths = vec![self.radius; neighborhoods.len()];
        let weights = weigh_neighborhoods(&self.weights, &neighborhoods, &bandwidths)?;

        Ok(Inliers {
            position,
            neighborhoods,
            weights,
        })
    }

    /// Predicts the class of each row of `x`.
    ///
    /// Returns `VoteError::NoNeighbors` if some rows have no neighbors
    /// and no outlier label was given.
    pub fn predict(&self, x: &ArrayView2<f64>) -> Result<Predictions<T>, VoteError> {
        let inliers = self.inliers(x)?;
        let n_outputs = self.training.n_outputs();

        let columns = (0..n_outputs)
            .map(|k| {
                let labels = neighbor_labels(&inliers.neighborhoods,
                                             &self.training.labels_for_output(k));
                vote::predict_labels(&labels, inliers.weights.as_deref())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut y_pred = Vec::with_capacity(x.nrows() * n_outputs);
        for (i, pos) in inliers.position.iter().enumerate() {
            for (k, column) in columns.iter().enumerate() {
                let y = match (pos, &self.outlier_label) {
                    (Some(p), _) => self.training.class(k, column[*p]).clone(),
                    (None, Some(label)) => label.clone(),
                    (None, None) => return Err(VoteError::NoNeighbors(vec![i])),
                };
                y_pred.push(y);
            }
        }

        let y_pred = Array2::from_shape_vec((x.nrows(), n_outputs), y_pred)
                            .map_err(|e| VoteError::ShapeMismatch(e.to_string()))?;

        Ok(Predictions::from_columns(y_pred, self.training.outputs_2d()))
    }

    /// Estimates class probabilities for each row of `x`.
    ///
    /// An outlier's row puts all the probability on the outlier label;
    /// if the outlier label is not one of the output's classes, the row
    /// is all zeros.
    pub fn predict_proba(&self, x: &ArrayView2<f64>) -> Result<Probabilities, VoteError> {
        let inliers = self.inliers(x)?;
        let mut probabilities = Vec::with_capacity(self.training.n_outputs());

        for k in 0..self.training.n_outputs() {
            let classes = self.training.classes_for_output(k);
            let labels = neighbor_labels(&inliers.neighborhoods,
                                         &self.training.labels_for_output(k));
            let inlier_proba = vote::predict_proba(&labels, inliers.weights.as_deref(),
                                                   classes.len());

            let outlier_class = match &self.outlier_label {
                Some(label) => classes.binary_search(label).ok(),
                None => None,
            };
            if outlier_class.is_none() && inliers.position.contains(&None) {
                warn!("outlier label is not a class of output {}; outliers \
                       get zero probability for all classes", k);
            }

            let mut proba = Array2::zeros((x.nrows(), classes.len()));
            for (i, pos) in inliers.position.iter().enumerate() {
                match (pos, outlier_class) {
                    (Some(p), _) => proba.row_mut(i).assign(&inlier_proba.row(*p)),
                    (None, Some(c)) => proba[[i, c]] = 1.,
                    (None, None) => {},
                }
            }
            probabilities.push(proba);
        }

        Ok(Probabilities::from_outputs(probabilities, self.training.outputs_2d()))
    }
}
