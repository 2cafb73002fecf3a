//! Aggregation of neighbors' labels into predictions and class
//! probabilities.
//!
//! All functions work on encoded labels (see `TrainingSet`), one output
//! dimension at a time.
use ndarray::*;
use std::collections::BTreeMap;

use crate::{Label, VoteError};

/// Largest weight a single neighbor may contribute to a probability
/// estimate. Infinite weights are clamped to it, so that sums over
/// several neighbors remain finite.
const MAX_WEIGHT: f64 = std::f32::MAX as f64;

/// Returns the label with the largest total weight among `labels`.
///
/// With `weights = None` every label counts 1 (plain mode).
/// Ties are won by the smallest label. Returns `None` if `labels` is
/// empty.
pub fn weighted_mode(labels: &[Label], weights: Option<&[f64]>) -> Option<Label> {
    let mut scores = BTreeMap::new();

    for (i, &y) in labels.iter().enumerate() {
        let w = weights.map_or(1., |w| w[i]);
        *scores.entry(y).or_insert(0.) += w;
    }

    let mut y_pred = None;
    let mut y_score = 0.;
    // Labels are visited in increasing order, and only a strictly larger
    // score replaces the current prediction.
    for (y, score) in scores {
        if y_pred.is_none() || score > y_score {
            y_pred = Some(y);
            y_score = score;
        }
    }
    y_pred
}

/// Predicts one label for each query point from its neighbors' labels.
///
/// `weights`, if given, has one vector per query point, parallel to
/// its labels. Fails if some query point has no neighbors.
pub fn predict_labels(labels: &[Vec<Label>], weights: Option<&[Vec<f64>]>)
        -> Result<Vec<Label>, VoteError> {
    labels.iter()
          .enumerate()
          .map(|(i, y)| weighted_mode(y, weights.map(|w| &w[i][..]))
                            .ok_or_else(|| VoteError::ShapeMismatch(
                                format!("query point {} has no neighbors", i))))
          .collect()
}

/// Clamps infinite weights to `MAX_WEIGHT`, keeping their sign.
fn clamp_weight(w: f64) -> f64 {
    if w.is_infinite() {
        w.signum() * MAX_WEIGHT
    } else {
        w
    }
}

/// Estimates class probabilities for each query point, as the
/// normalized (weighted) votes of its neighbors.
///
/// Returns a matrix of shape (query points, `n_classes`). A row whose
/// votes sum to zero is left as all zeros.
pub fn predict_proba(labels: &[Vec<Label>], weights: Option<&[Vec<f64>]>,
                     n_classes: usize) -> Array2<f64> {
    let mut proba = Array2::zeros((labels.len(), n_classes));

    for (i, (y, mut row)) in labels.iter().zip(proba.outer_iter_mut()).enumerate() {
        for (j, &yj) in y.iter().enumerate() {
            let w = weights.map_or(1., |w| w[i][j]);
            row[yj] += clamp_weight(w);
        }

        let mut normalizer = row.sum();
        if normalizer == 0. {
            normalizer = 1.;
        }
        row /= normalizer;
    }

    proba
}
