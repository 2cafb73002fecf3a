//! Utility routines for loading data from files, and preparing it.
use csv::{ReaderBuilder, Trim};
use ndarray::prelude::*;
use std::error::Error;
use std::str::FromStr;
use std::f64;

/// Loads a CSV data file.
///
/// The file format should be, for each row:
///     label, x1, x2, ...
/// where x1, x2, ... are features forming a feature vector.
pub fn load_data<T>(fname: &str) -> Result<(Array2<f64>, Array1<T>), Box<dyn Error>>
        where T: FromStr, T::Err: Error + 'static {
    let mut reader = ReaderBuilder::new()
                                   .has_headers(false)
                                   .trim(Trim::All)
                                   .from_path(fname)?;

    let mut inputs: Vec<f64> = Vec::new();
    let mut targets: Vec<T> = Vec::new();
    let mut ncols: Option<usize> = None;

    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            return Err(format!("{}: empty record at {:?}", fname, record.position()).into());
        }

        for x in record.iter().skip(1) {  // First one is the label.
            inputs.push(x.parse::<f64>()?);
        }
        targets.push(record[0].parse::<T>()?);

        match ncols {
            Some(d) if d != record.len() - 1 =>
                return Err(format!("{}: rows have different lengths ({} and {})",
                                   fname, d, record.len() - 1).into()),
            Some(_) => {},
            None => ncols = Some(record.len() - 1),
        }
    }

    let d = ncols.ok_or_else(|| format!("{}: no data", fname))?;
    let n = targets.len();
    let inputs = Array::from_shape_vec((n, d), inputs)?;

    Ok((inputs, Array::from_vec(targets)))
}

/// Min-max scaling fitted on some data, and applied to any data with
/// the same number of columns.
pub struct MinMaxScaler {
    min: Array1<f64>,
    max: Array1<f64>,
}

impl MinMaxScaler {
    /// Records the minimum and maximum of each column of `matrix`.
    pub fn fit(matrix: &ArrayView2<f64>) -> MinMaxScaler {
        let mut max = Array::ones(matrix.ncols()) * -f64::INFINITY;
        let mut min = Array::ones(matrix.ncols()) * f64::INFINITY;

        for row in matrix.outer_iter() {
            for i in 0..row.len() {
                if min[i] > row[i] {
                   min[i] = row[i];
                }
                if max[i] < row[i] {
                    max[i] = row[i];
                }
            }
        }

        MinMaxScaler { min, max }
    }

    /// Scales columns so that the fitted data lies in [0,1].
    /// Constant columns are only shifted.
    pub fn transform(&self, matrix: &mut Array2<f64>) {
        for mut row in matrix.outer_iter_mut() {
            for i in 0..row.len() {
                let range = self.max[i] - self.min[i];
                row[i] -= self.min[i];
                if range > 0. {
                    row[i] /= range;
                }
            }
        }
    }
}

/// Fraction of predictions equal to the true labels.
pub fn accuracy<T: PartialEq>(predictions: &ArrayView1<T>, labels: &ArrayView1<T>) -> f64 {
    let correct = predictions.iter()
                             .zip(labels)
                             .filter(|(p, y)| p == y)
                             .count();

    correct as f64 / labels.len() as f64
}


#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::*;
    use std::io::Write;

    #[test]
    fn test_scale() {
        let mut a = array![[2., 3., 5.],
                           [1., 2., 10.],
                           [0., 1., 2.]];

        let scaler = MinMaxScaler::fit(&a.view());
        scaler.transform(&mut a);

        assert_eq!(a, array![[1. ,1. ,0.375],
                             [0.5, 0.5, 1.],
                             [0., 0., 0.]]);

        // Unseen data may fall outside [0,1].
        let mut b = array![[4., 1., 2.]];
        scaler.transform(&mut b);
        assert_eq!(b, array![[2., 0., 0.]]);
    }

    #[test]
    fn test_scale_constant_column() {
        let mut a = array![[3., 1.], [3., 2.]];
        let scaler = MinMaxScaler::fit(&a.view());
        scaler.transform(&mut a);

        assert_eq!(a, array![[0., 0.], [0., 1.]]);
    }

    #[test]
    fn test_accuracy() {
        let pred = array![0, 1, 1, 2];
        let true_y = array![0, 1, 2, 2];

        assert_eq!(accuracy(&pred.view(), &true_y.view()), 0.75);
    }

    #[test]
    fn test_load_data() {
        let path = std::env::temp_dir().join("nnvote_load_data_test.csv");
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "1, 0.5, 2").unwrap();
            writeln!(file, "0, 1.5, -1").unwrap();
        }

        let (x, y) = load_data::<usize>(path.to_str().unwrap()).unwrap();
        assert_eq!(x, array![[0.5, 2.], [1.5, -1.]]);
        assert_eq!(y, array![1, 0]);

        std::fs::remove_file(&path).unwrap();
    }
}
