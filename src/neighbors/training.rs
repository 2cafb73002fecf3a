//! Training labels, encoded once at fit time.
//!
//! Each output dimension gets its sorted list of distinct classes, and
//! training labels are re-encoded as indices into that list. Votes are
//! counted on the encoded labels, and mapped back with the class list.
use ndarray::*;
use itertools::Itertools;

use crate::{Label, VoteError};

/// Labels of the training points, for one or more output dimensions.
#[derive(Debug, Clone)]
pub struct TrainingSet<T> {
    // Encoded labels, shape (n_samples, n_outputs).
    labels: Array2<Label>,
    // Sorted distinct classes, for each output.
    classes: Vec<Vec<T>>,
    // Whether labels were given as a 2-D array.
    outputs_2d: bool,
}

impl<T> TrainingSet<T>
where T: Ord + Clone {
    /// Builds a single-output training set from a vector of labels.
    pub fn from_labels(y: ArrayView1<T>) -> Result<TrainingSet<T>, VoteError> {
        let n = y.len();
        let y = y.into_shape((n, 1))
                 .map_err(|e| VoteError::ShapeMismatch(e.to_string()))?;
        let mut training = TrainingSet::from_multi_labels(y)?;
        training.outputs_2d = false;
        Ok(training)
    }

    /// Builds a multi-output training set; column `k` holds the labels
    /// of output `k`.
    pub fn from_multi_labels(y: ArrayView2<T>) -> Result<TrainingSet<T>, VoteError> {
        if y.nrows() == 0 {
            return Err(VoteError::InvalidParameter(
                "training labels are empty".to_string()));
        }
        if y.ncols() == 0 {
            return Err(VoteError::InvalidParameter(
                "training labels have no outputs".to_string()));
        }

        let mut labels = Array2::zeros(y.dim());
        let mut classes = Vec::with_capacity(y.ncols());

        for (column, mut encoded) in y.axis_iter(Axis(1))
                                      .zip(labels.axis_iter_mut(Axis(1))) {
            let (ids, classes_k) = labels_to_ids(column);
            encoded.assign(&ids);
            classes.push(classes_k);
        }

        Ok(TrainingSet {
            labels,
            classes,
            outputs_2d: true,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.labels.nrows()
    }

    pub fn n_outputs(&self) -> usize {
        self.classes.len()
    }

    pub fn outputs_2d(&self) -> bool {
        self.outputs_2d
    }

    /// Encoded label of each training point, for output `k`.
    pub fn labels_for_output(&self, k: usize) -> ArrayView1<Label> {
        self.labels.column(k)
    }

    /// Sorted distinct classes of output `k`.
    pub fn classes_for_output(&self, k: usize) -> &[T] {
        &self.classes[k]
    }

    /// Maps an encoded label of output `k` back to its class.
    pub fn class(&self, k: usize, label: Label) -> &T {
        &self.classes[k][label]
    }
}

/// Re-encodes labels into zero-based ids, ordered as the sorted distinct
/// labels. Returns the ids and the distinct labels.
fn labels_to_ids<T>(labels: ArrayView1<T>) -> (Array1<Label>, Vec<T>)
where T: Ord + Clone {
    let classes = labels.iter()
                        .cloned()
                        .sorted()
                        .dedup()
                        .collect::<Vec<_>>();

    let ids = labels.iter()
                    .map(|y| classes.binary_search(y)
                                    .unwrap_or_else(|_| unreachable!()))
                    .collect::<Array1<_>>();

    (ids, classes)
}
