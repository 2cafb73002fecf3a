//! Errors returned by the voting classifiers.
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum VoteError {
    /// The weight specifier is not one of the known strategies.
    UnknownWeights(String),
    /// Query points (by index) with no training point within the radius,
    /// and no outlier label to fall back to.
    NoNeighbors(Vec<usize>),
    /// A custom weight function returned the wrong number of weights.
    WeightShape { expected: usize, found: usize },
    /// A custom weight function returned a negative or NaN weight.
    InvalidWeight { index: usize, weight: f64 },
    InvalidParameter(String),
    ShapeMismatch(String),
}

impl fmt::Display for VoteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VoteError::UnknownWeights(w) =>
                write!(f, "unrecognized weights '{}': expected 'uniform', \
                           'distance', or one of 'tophat', 'gaussian', \
                           'epanechnikov', 'exponential', 'linear', 'cosine'", w),
            VoteError::NoNeighbors(indices) =>
                write!(f, "no neighbors found for test samples {:?}, you can \
                           try using a larger radius, give a label for \
                           outliers, or consider removing them from your \
                           dataset", indices),
            VoteError::WeightShape { expected, found } =>
                write!(f, "weight function returned {} weights for {} \
                           distances", found, expected),
            VoteError::InvalidWeight { index, weight } =>
                write!(f, "weight function returned weight {} for neighbor {}; \
                           weights must be non-negative", weight, index),
            VoteError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            VoteError::ShapeMismatch(msg) => write!(f, "shape mismatch: {}", msg),
        }
    }
}

impl Error for VoteError {}
