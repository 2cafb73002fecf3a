//! nnvote classifies points by nearest-neighbor voting.
//!
//! # Getting started
//!
//! `nnvote` takes as input CSV data containing labeled examples.
//! It requires two CSV files as input: a _training_ file and a _test_
//! file, such as:
//!
//!     0, 0.1, 2.43, 1.1
//!     1, 0.0, 1.22, 1.1
//!     1, 1.0, 1.02, 0.1
//!     ...
//!
//! where the first column specifies the (integer) label, and the
//! remaining ones the feature vector.
//!
//! It predicts a label for each test example by a vote among its
//! neighbors in the training data, prints the predictions, and reports
//! the accuracy with respect to the test labels.
//!
//! The general syntax is:
//!
//!     nnvote <classifier> [options] <train> <test>
//!
//! ## Classifiers
//!
//! **knn** vote among the `--k` nearest neighbors.
//!
//! **radius** vote among the neighbors within distance `--radius`.
//! Test examples without neighbors are labeled `--outlier-label`; if it
//! is not given, classification fails.
//!
//! ## Further options
//!
//! `--weights` sets how neighbors' votes are weighted: `uniform`,
//! `distance` (inverse distance), or one of the kernels `tophat`,
//! `gaussian`, `epanechnikov`, `exponential`, `linear`, `cosine`.
//!
//! `--proba` prints class probabilities instead of labels.
//!
//! When feature vectors have more than one dimension, features are scaled
//! in [0,1] with respect to the training data; `--no-scale` prevents this.
//!
//! Set `RUST_LOG=debug` for more logging.
extern crate ndarray;
extern crate docopt;
extern crate serde;
extern crate env_logger;
#[macro_use]
extern crate log;

extern crate nnvote;

mod utils;

use docopt::Docopt;
use serde::Deserialize;
use std::error::Error;
use std::process;

use nnvote::neighbors::*;
use utils::{load_data, accuracy, MinMaxScaler};


const USAGE: &str = "
Classify test data by nearest-neighbor voting on training data.

Usage: nnvote knn [options] <train> <test>
       nnvote radius [options] <train> <test>
       nnvote (--help | --version)

Options:
    --k=<k>                     Number of neighbors for knn [default: 5].
    --radius=<r>                Radius for radius [default: 1.0].
    --weights=<w>               Weight function: uniform, distance, tophat,
                                gaussian, epanechnikov, exponential,
                                linear, cosine [default: uniform].
    --outlier-label=<l>         Label for test examples without neighbors
                                within the radius.
    --proba                     Print class probabilities.
    --no-scale                  Don't scale features (only makes sense for
                                objects of 2 or more dimensions).
    -h, --help                  Show help.
    --version                   Show the version.
";

#[derive(Deserialize)]
struct Args {
    cmd_knn: bool,
    cmd_radius: bool,
    flag_k: usize,
    flag_radius: f64,
    flag_weights: String,
    flag_outlier_label: Option<usize>,
    flag_proba: bool,
    flag_no_scale: bool,
    arg_train: String,
    arg_test: String,
}

/// Prints probabilities, one test example per line.
fn print_probabilities(proba: &Probabilities, classes: &[usize]) {
    println!("{}", classes.iter()
                          .map(|c| format!("p({})", c))
                          .collect::<Vec<_>>()
                          .join(", "));

    for p in proba.outputs() {
        for row in p.outer_iter() {
            println!("{}", row.iter()
                              .map(|x| x.to_string())
                              .collect::<Vec<_>>()
                              .join(", "));
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    // Parsed first, so that a wrong value fails before loading data.
    let weights: Weights = args.flag_weights.parse()?;

    let (mut train_x, train_y) = load_data::<usize>(&args.arg_train)?;
    let (mut test_x, test_y) = load_data::<usize>(&args.arg_test)?;
    info!("loaded {} training and {} test examples", train_x.nrows(), test_x.nrows());

    if train_x.ncols() > 1 && !args.flag_no_scale {
        info!("scaling features");
        let scaler = MinMaxScaler::fit(&train_x.view());
        scaler.transform(&mut train_x);
        scaler.transform(&mut test_x);
    }

    let training = TrainingSet::from_labels(train_y.view())?;
    let classes = training.classes_for_output(0).to_vec();
    let search = BruteForce::new(train_x);

    let (predictions, probabilities) = if args.cmd_knn {
        let knn = KNeighborsVoter::new(search, training, args.flag_k, weights)?;
        if args.flag_proba {
            (None, Some(knn.predict_proba(&test_x.view())?))
        } else {
            (Some(knn.predict(&test_x.view())?), None)
        }
    } else if args.cmd_radius {
        let rnn = RadiusVoter::new(search, training, args.flag_radius, weights,
                                   args.flag_outlier_label)?;
        if args.flag_proba {
            (None, Some(rnn.predict_proba(&test_x.view())?))
        } else {
            (Some(rnn.predict(&test_x.view())?), None)
        }
    } else {
        return Err("no classifier specified".into());
    };

    if let Some(proba) = probabilities {
        print_probabilities(&proba, &classes);
    }

    if let Some(predictions) = predictions {
        let predictions = predictions.into_columns();
        let predictions = predictions.column(0);
        for y in predictions.iter() {
            println!("{}", y);
        }
        println!();
        println!("Accuracy: {}", accuracy(&predictions, &test_y.view()));
    }

    Ok(())
}

fn main() {
    env_logger::init();

    // Parse args from command line.
    let args: Args = Docopt::new(USAGE)
                            .and_then(|d| d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                                           .deserialize())
                            .unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("[!] {}", e);
        process::exit(1);
    }
}
