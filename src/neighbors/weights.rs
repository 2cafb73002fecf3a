//! Weighting of neighbors' votes.
//!
//! Neighbors can vote with equal weight, with weight inversely
//! proportional to their distance, with a kernel function of their
//! distance, or with a user-defined function.
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::VoteError;
use crate::neighbors::Neighborhood;

/// Kernel functions, evaluated on `distance / bandwidth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    Tophat,
    Gaussian,
    Epanechnikov,
    Exponential,
    Linear,
    Cosine,
}

impl Kernel {
    /// Weight of a neighbor at distance `d`, for bandwidth `h`.
    ///
    /// A zero bandwidth is only possible if all distances are zero, in
    /// which case every neighbor gets the kernel's peak value.
    pub fn weight(self, d: f64, h: f64) -> f64 {
        let u = if h > 0. { d / h } else { 0. };

        match self {
            Kernel::Tophat => if u <= 1. { 1. } else { 0. },
            Kernel::Gaussian => (-0.5 * u * u).exp(),
            Kernel::Epanechnikov => (1. - u * u).max(0.),
            Kernel::Exponential => (-u).exp(),
            Kernel::Linear => (1. - u).max(0.),
            Kernel::Cosine => if u <= 1. { (0.5 * PI * u).cos() } else { 0. },
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kernel::Tophat => "tophat",
            Kernel::Gaussian => "gaussian",
            Kernel::Epanechnikov => "epanechnikov",
            Kernel::Exponential => "exponential",
            Kernel::Linear => "linear",
            Kernel::Cosine => "cosine",
        }
    }
}

/// User-defined weight function; it must return one non-negative weight
/// per distance. Infinite weights are allowed.
pub type WeightFn = Box<dyn Fn(&[f64]) -> Vec<f64> + Send + Sync>;

/// Weight function used in prediction.
pub enum Weights {
    /// All neighbors weigh the same.
    Uniform,
    /// Neighbors are weighted by the inverse of their distance.
    Distance,
    /// Neighbors are weighted by a kernel. The bandwidth is the radius
    /// for radius queries, and the distance of the (k+1)-th neighbor for
    /// k-NN queries.
    Kernel(Kernel),
    Custom(WeightFn),
}

impl Weights {
    /// Wraps a user-defined weight function.
    pub fn custom<F>(f: F) -> Weights
    where F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static {
        Weights::Custom(Box::new(f))
    }

    /// Whether weighting needs a bandwidth.
    pub fn is_kernel(&self) -> bool {
        matches!(self, Weights::Kernel(_))
    }

    /// Computes the weights of one query point's neighbors, given their
    /// distances.
    ///
    /// Returns `None` for uniform weights. `bandwidth` is only used by
    /// kernels.
    pub fn compute(&self, distances: &[f64], bandwidth: f64)
            -> Result<Option<Vec<f64>>, VoteError> {
        let weights = match self {
            Weights::Uniform => return Ok(None),
            Weights::Distance => inverse_distance(distances),
            Weights::Kernel(kernel) => distances.iter()
                                                .map(|&d| kernel.weight(d, bandwidth))
                                                .collect(),
            Weights::Custom(f) => {
                let w = f(distances);
                if w.len() != distances.len() {
                    return Err(VoteError::WeightShape {
                        expected: distances.len(),
                        found: w.len(),
                    });
                }
                // NaN fails the comparison too.
                if let Some((index, &weight)) = w.iter()
                                                 .enumerate()
                                                 .find(|&(_, &x)| !(x >= 0.)) {
                    return Err(VoteError::InvalidWeight { index, weight });
                }
                w
            },
        };
        Ok(Some(weights))
    }
}

/// Weighs every neighborhood, with `bandwidths[i]` for neighborhood `i`.
///
/// Returns `None` for uniform weights.
pub(crate) fn weigh_neighborhoods(weights: &Weights, neighborhoods: &[Neighborhood],
                                  bandwidths: &[f64])
        -> Result<Option<Vec<Vec<f64>>>, VoteError> {
    if let Weights::Uniform = weights {
        return Ok(None);
    }

    let all = neighborhoods.iter()
                           .zip(bandwidths)
                           .map(|(neigh, &h)| weights.compute(&neigh.distances, h))
                           .collect::<Result<Vec<_>, _>>()?;
    Ok(all.into_iter().collect())
}

/// Inverse distance weights. If some neighbors are at distance zero
/// (exact matches), they get weight 1 and all others weight 0.
fn inverse_distance(distances: &[f64]) -> Vec<f64> {
    if distances.iter().any(|&d| d == 0.) {
        distances.iter()
                 .map(|&d| if d == 0. { 1. } else { 0. })
                 .collect()
    } else {
        distances.iter().map(|d| 1. / d).collect()
    }
}

impl FromStr for Weights {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Weights, VoteError> {
        let weights = match s {
            "uniform" => Weights::Uniform,
            "distance" => Weights::Distance,
            "tophat" => Weights::Kernel(Kernel::Tophat),
            "gaussian" => Weights::Kernel(Kernel::Gaussian),
            "epanechnikov" => Weights::Kernel(Kernel::Epanechnikov),
            "exponential" => Weights::Kernel(Kernel::Exponential),
            "linear" => Weights::Kernel(Kernel::Linear),
            "cosine" => Weights::Kernel(Kernel::Cosine),
            _ => return Err(VoteError::UnknownWeights(s.to_string())),
        };
        Ok(weights)
    }
}

impl Default for Weights {
    fn default() -> Weights {
        Weights::Uniform
    }
}

impl fmt::Debug for Weights {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Weights::Uniform => write!(f, "uniform"),
            Weights::Distance => write!(f, "distance"),
            Weights::Kernel(kernel) => write!(f, "{}", kernel.name()),
            Weights::Custom(_) => write!(f, "<custom>"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn parse_weights() {
        assert!(matches!("uniform".parse::<Weights>(), Ok(Weights::Uniform)));
        assert!(matches!("distance".parse::<Weights>(), Ok(Weights::Distance)));
        assert!(matches!("epanechnikov".parse::<Weights>(),
                         Ok(Weights::Kernel(Kernel::Epanechnikov))));

        match "triangular".parse::<Weights>() {
            Err(VoteError::UnknownWeights(w)) => assert_eq!(w, "triangular"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn uniform_is_none() {
        assert_eq!(Weights::Uniform.compute(&[1., 2.], 0.), Ok(None));
    }

    #[test]
    fn inverse_distance_weights() {
        let w = Weights::Distance.compute(&[0.5, 2., 4.], 0.).unwrap();
        assert_eq!(w, Some(vec![2., 0.5, 0.25]));
    }

    #[test]
    fn exact_match_dominates() {
        let w = Weights::Distance.compute(&[0.1, 0., 3., 0.], 0.).unwrap();
        assert_eq!(w, Some(vec![0., 1., 0., 1.]));
    }

    #[test]
    fn kernels() {
        let h = 2.;
        // d = h.
        assert_eq!(Kernel::Tophat.weight(2., h), 1.);
        assert_eq!(Kernel::Linear.weight(2., h), 0.);
        assert_eq!(Kernel::Epanechnikov.weight(2., h), 0.);
        assert!(approx_eq!(f64, Kernel::Cosine.weight(2., h), 0., epsilon = 1e-12));
        assert!(approx_eq!(f64, Kernel::Gaussian.weight(2., h), (-0.5f64).exp()));
        assert!(approx_eq!(f64, Kernel::Exponential.weight(2., h), (-1f64).exp()));

        // d = h/2.
        assert_eq!(Kernel::Linear.weight(1., h), 0.5);
        assert_eq!(Kernel::Epanechnikov.weight(1., h), 0.75);
        assert!(approx_eq!(f64, Kernel::Cosine.weight(1., h),
                           (PI / 4.).cos(), ulps = 2));

        // Outside the bandwidth.
        assert_eq!(Kernel::Tophat.weight(3., h), 0.);
        assert_eq!(Kernel::Cosine.weight(3., h), 0.);
        assert_eq!(Kernel::Linear.weight(3., h), 0.);
        assert!(Kernel::Gaussian.weight(3., h) > 0.);
    }

    #[test]
    fn zero_bandwidth() {
        assert_eq!(Kernel::Linear.weight(0., 0.), 1.);
        assert_eq!(Kernel::Gaussian.weight(0., 0.), 1.);
    }

    #[test]
    fn kernel_weights_in_unit_interval() {
        let distances = [0., 0.3, 0.9, 1.5, 4.];
        for name in &["tophat", "gaussian", "epanechnikov", "exponential",
                      "linear", "cosine"] {
            let weights: Weights = name.parse().unwrap();
            let w = weights.compute(&distances, 1.5).unwrap().unwrap();
            assert_eq!(w.len(), distances.len());
            assert!(w.iter().all(|&x| (0. ..=1.).contains(&x)), "{}: {:?}", name, w);
        }
    }

    #[test]
    fn weigh_each_neighborhood() {
        let neighborhoods = vec![Neighborhood::new(vec![0., 1.], vec![0, 1]),
                                 Neighborhood::new(vec![1., 2.], vec![1, 0])];

        assert_eq!(weigh_neighborhoods(&Weights::Uniform, &neighborhoods, &[1., 1.]),
                   Ok(None));

        let w = weigh_neighborhoods(&Weights::Kernel(Kernel::Linear),
                                    &neighborhoods, &[2., 4.]).unwrap();
        assert_eq!(w, Some(vec![vec![1., 0.5], vec![0.75, 0.5]]));
    }

    #[test]
    fn custom_weights() {
        let weights = Weights::custom(|d| d.iter().map(|x| x * x).collect());
        assert_eq!(weights.compute(&[1., 2.], 0.), Ok(Some(vec![1., 4.])));

        let weights = Weights::custom(|_| vec![1.]);
        assert_eq!(weights.compute(&[1., 2.], 0.),
                   Err(VoteError::WeightShape { expected: 2, found: 1 }));
    }

    #[test]
    fn custom_weights_must_be_non_negative() {
        let weights = Weights::custom(|d| d.iter().map(|x| 1. - x).collect());
        assert_eq!(weights.compute(&[0.5, 2.], 0.),
                   Err(VoteError::InvalidWeight { index: 1, weight: -1. }));

        let weights = Weights::custom(|d| vec![std::f64::NAN; d.len()]);
        assert!(matches!(weights.compute(&[0.5, 2.], 0.),
                         Err(VoteError::InvalidWeight { index: 0, .. })));

        let weights = Weights::custom(|d| vec![std::f64::INFINITY; d.len()]);
        assert_eq!(weights.compute(&[0.5], 0.), Ok(Some(vec![std::f64::INFINITY])));
    }
}
