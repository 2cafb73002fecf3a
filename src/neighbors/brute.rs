//! Brute-force neighbor search.
//!
//! Compares each query point against every training point. This is
//! the reference `NeighborSearch`: no index is built, so it is only
//! suitable for small training sets.
use ndarray::*;
use ordered_float::OrderedFloat;

use crate::VoteError;
use crate::neighbors::{NeighborSearch, Neighborhood, euclidean_distance};

/// Nearest neighbor search by exhaustive comparison, with the
/// Euclidean distance.
#[derive(Debug, Clone)]
pub struct BruteForce {
    train_x: Array2<f64>,
}

impl BruteForce {
    pub fn new(train_x: Array2<f64>) -> BruteForce {
        BruteForce { train_x }
    }

    /// Distances from `x` to all the training points, in storage order.
    fn distances(&self, x: &ArrayView1<f64>) -> Vec<f64> {
        self.train_x.outer_iter()
                    .map(|xi| euclidean_distance(x, &xi))
                    .collect()
    }

    fn check_features(&self, x: &ArrayView2<f64>) -> Result<(), VoteError> {
        if x.ncols() != self.train_x.ncols() {
            return Err(VoteError::ShapeMismatch(
                format!("query has {} features, training data has {}",
                        x.ncols(), self.train_x.ncols())));
        }
        Ok(())
    }
}

impl NeighborSearch for BruteForce {
    fn n_samples(&self) -> usize {
        self.train_x.nrows()
    }

    fn k_nearest(&self, x: &ArrayView2<f64>, k: usize)
            -> Result<Vec<Neighborhood>, VoteError> {
        self.check_features(x)?;
        if k == 0 || k > self.n_samples() {
            return Err(VoteError::InvalidParameter(
                format!("expected 0 < n_neighbors <= n_samples, but \
                         n_samples = {}, n_neighbors = {}",
                        self.n_samples(), k)));
        }

        let neighborhoods = x.outer_iter()
            .map(|xq| {
                let distances = self.distances(&xq);
                let mut order = (0..distances.len()).collect::<Vec<_>>();
                // Stable: equidistant points keep their storage order.
                order.sort_by_key(|&i| OrderedFloat::from(distances[i]));
                order.truncate(k);

                let dist = order.iter().map(|&i| distances[i]).collect();
                Neighborhood::new(dist, order)
            })
            .collect();

        Ok(neighborhoods)
    }

    fn within_radius(&self, x: &ArrayView2<f64>, radius: f64)
            -> Result<Vec<Neighborhood>, VoteError> {
        self.check_features(x)?;

        let neighborhoods = x.outer_iter()
            .map(|xq| {
                let (dist, ind): (Vec<f64>, Vec<usize>) = self.distances(&xq)
                                      .into_iter()
                                      .enumerate()
                                      .filter(|&(_, d)| d <= radius)
                                      .map(|(i, d)| (d, i))
                                      .unzip();
                Neighborhood::new(dist, ind)
            })
            .collect();

        Ok(neighborhoods)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_nearest_sorted() {
        let search = BruteForce::new(array![[8.], [3.], [1.], [4.], [5.]]);
        let neigh = search.k_nearest(&array![[0.]].view(), 3).unwrap();

        assert_eq!(neigh.len(), 1);
        assert_eq!(neigh[0].distances, vec![1., 3., 4.]);
        assert_eq!(neigh[0].indices, vec![2, 1, 3]);
    }

    #[test]
    fn k_nearest_ties_keep_storage_order() {
        let search = BruteForce::new(array![[2.], [1.], [-1.], [0.]]);
        let neigh = search.k_nearest(&array![[0.]].view(), 3).unwrap();

        assert_eq!(neigh[0].indices, vec![3, 1, 2]);
    }

    #[test]
    fn k_nearest_invalid_k() {
        let search = BruteForce::new(array![[0.], [1.]]);
        let x = array![[0.]];

        assert!(search.k_nearest(&x.view(), 0).is_err());
        assert!(search.k_nearest(&x.view(), 3).is_err());
        assert!(search.k_nearest(&x.view(), 2).is_ok());
    }

    #[test]
    fn within_radius_inclusive() {
        let search = BruteForce::new(array![[0.], [1.], [2.], [3.]]);
        let neigh = search.within_radius(&array![[1.5], [10.], [1.]].view(), 1.)
                          .unwrap();

        assert_eq!(neigh[0].indices, vec![1, 2]);
        assert!(neigh[1].is_empty());
        assert_eq!(neigh[2].indices, vec![0, 1, 2]);
        assert_eq!(neigh[2].distances, vec![1., 0., 1.]);
    }

    #[test]
    fn feature_mismatch() {
        let search = BruteForce::new(array![[0., 1.], [1., 1.]]);
        let res = search.within_radius(&array![[0.]].view(), 1.);

        assert!(matches!(res, Err(VoteError::ShapeMismatch(_))));
    }
}
