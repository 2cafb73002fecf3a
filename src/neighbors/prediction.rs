//! Shapes of classifier outputs.
//!
//! Single-output training labels give single-output results; 2-D
//! training labels (even with one column) give one result per output.
use ndarray::*;

/// Predicted labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Predictions<T> {
    /// One label per query point.
    Single(Array1<T>),
    /// One row per query point, one column per output.
    Multi(Array2<T>),
}

impl<T: Clone> Predictions<T> {
    /// Builds predictions from an (n_samples, n_outputs) matrix.
    pub(crate) fn from_columns(y_pred: Array2<T>, outputs_2d: bool) -> Predictions<T> {
        if outputs_2d {
            Predictions::Multi(y_pred)
        } else {
            Predictions::Single(y_pred.column(0).to_owned())
        }
    }

    pub fn n_samples(&self) -> usize {
        match self {
            Predictions::Single(y) => y.len(),
            Predictions::Multi(y) => y.nrows(),
        }
    }

    /// Returns predictions as an (n_samples, n_outputs) matrix.
    pub fn into_columns(self) -> Array2<T> {
        match self {
            Predictions::Single(y) => {
                let n = y.len();
                y.into_shape((n, 1))
                 .unwrap_or_else(|_| unreachable!("a vector is contiguous"))
            },
            Predictions::Multi(y) => y,
        }
    }
}

/// Class probabilities; columns of each matrix follow the output's
/// sorted classes.
#[derive(Debug, Clone, PartialEq)]
pub enum Probabilities {
    Single(Array2<f64>),
    Multi(Vec<Array2<f64>>),
}

impl Probabilities {
    pub(crate) fn from_outputs(mut proba: Vec<Array2<f64>>, outputs_2d: bool)
            -> Probabilities {
        if outputs_2d {
            Probabilities::Multi(proba)
        } else {
            Probabilities::Single(proba.remove(0))
        }
    }

    /// Probability matrices, one per output.
    pub fn outputs(&self) -> &[Array2<f64>] {
        match self {
            Probabilities::Single(p) => std::slice::from_ref(p),
            Probabilities::Multi(p) => p,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_multi() {
        let y = array![[1, 2], [3, 4], [5, 6]];

        let single = Predictions::from_columns(y.slice(s![.., ..1]).to_owned(), false);
        assert_eq!(single, Predictions::Single(array![1, 3, 5]));
        assert_eq!(single.n_samples(), 3);
        assert_eq!(single.into_columns(), array![[1], [3], [5]]);

        let multi = Predictions::from_columns(y.clone(), true);
        assert_eq!(multi.n_samples(), 3);
        assert_eq!(multi.into_columns(), y);
    }

    #[test]
    fn probability_outputs() {
        let p = Probabilities::from_outputs(vec![array![[1., 0.]]], false);
        assert_eq!(p.outputs().len(), 1);
        assert!(matches!(p, Probabilities::Single(_)));

        let p = Probabilities::from_outputs(vec![array![[1., 0.]], array![[0.5, 0.5]]], true);
        assert_eq!(p.outputs()[1], array![[0.5, 0.5]]);
    }
}
