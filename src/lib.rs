//! nnvote implements supervised classification by nearest-neighbor voting.
//!
//! Given labeled training points, labels for new query points are predicted
//! by looking at their nearest neighbors, either a fixed number of them
//! (`KNeighborsVoter`) or all those within a radius (`RadiusVoter`), and
//! by aggregating the neighbors' labels into a vote. Votes can be uniform,
//! weighted by inverse distance, or weighted by a kernel function.
//!
//! Finding the neighbors is delegated to a `NeighborSearch` implementation;
//! the crate ships a brute-force one (`BruteForce`) using the Euclidean
//! distance.
//!
//! # Getting started
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
//!
//! let voter = KNeighborsVoter::new(BruteForce::new(train_x),
//!                                  TrainingSet::from_labels(train_y.view()).unwrap(),
//!                                  3, Weights::Uniform).unwrap();
//!
//! let pred = voter.predict(&array![[1.1]].view()).unwrap();
//! assert_eq!(pred, Predictions::Single(array![0]));
//! # }
//! ```
//!
//! The binary `nnvote` runs either classifier on CSV data; see `nnvote -h`.
extern crate ndarray;
extern crate itertools;
extern crate ordered_float;
extern crate float_cmp;
#[macro_use]
extern crate log;

pub mod error;
pub mod neighbors;

pub use error::VoteError;

/// Dense, zero-based encoding of a class within one output dimension.
pub type Label = usize;
