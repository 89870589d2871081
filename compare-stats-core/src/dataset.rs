//! A mutable sequence of samples with cached summary statistics.

use std::cell::Cell;

/// Summary scalars derived from the non-negative samples of a [`DataSet`].
#[derive(Debug, Clone, Copy)]
struct Summary {
    mean: f64,
    variance: f64,
    stddev: f64,
}

impl Summary {
    /// Corrected two-pass algorithm (the same Numerical Recipes-derived
    /// scheme used by the harness's stats.awk) to reduce rounding error in
    /// the variance computation.
    ///
    /// Negative samples are sentinels for failed iterations and are excluded.
    /// With fewer than two usable samples every scalar is zero.
    fn compute(samples: &[f64]) -> Summary {
        let mut summary = Summary {
            mean: 0.0,
            variance: 0.0,
            stddev: 0.0,
        };

        let usable: Vec<f64> = samples.iter().copied().filter(|&x| x >= 0.0).collect();
        let n = usable.len();
        if n <= 1 {
            return summary;
        }

        summary.mean = usable.iter().sum::<f64>() / n as f64;

        let mut err = 0.0;
        let mut sum_sq = 0.0;
        for x in &usable {
            let dev = x - summary.mean;
            err += dev;
            sum_sq += dev * dev;
        }
        summary.variance = (sum_sq - (err * err) / n as f64) / (n - 1) as f64;
        summary.stddev = summary.variance.sqrt();
        summary
    }
}

/// An ordered sequence of real-valued samples with lazily computed mean,
/// variance and standard deviation.
///
/// Mutation invalidates the cached scalars; they are recomputed on the next
/// read. The cache lives in a `Cell` so the accessors keep `&self`.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    samples: Vec<f64>,
    cache: Cell<Option<Summary>>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample.
    pub fn add(&mut self, sample: f64) {
        self.cache.set(None);
        self.samples.push(sample);
    }

    /// Remove the first sample equal to `sample`, returning whether one was
    /// removed.
    pub fn remove(&mut self, sample: f64) -> bool {
        self.cache.set(None);
        match self.samples.iter().position(|&x| x == sample) {
            Some(index) => {
                self.samples.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn mean(&self) -> f64 {
        self.summary().mean
    }

    pub fn variance(&self) -> f64 {
        self.summary().variance
    }

    pub fn stddev(&self) -> f64 {
        self.summary().stddev
    }

    /// Number of samples held, counting negative sentinels.
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// All samples in insertion order, including negative sentinels. This is
    /// the view handed to the t-test.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    fn summary(&self) -> Summary {
        if let Some(summary) = self.cache.get() {
            return summary;
        }
        let summary = Summary::compute(&self.samples);
        self.cache.set(Some(summary));
        summary
    }
}

impl FromIterator<f64> for DataSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        DataSet {
            samples: iter.into_iter().collect(),
            cache: Cell::new(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_set(samples: &[f64]) -> DataSet {
        samples.iter().copied().collect()
    }

    #[test]
    fn test_basic_statistics() {
        let data = data_set(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(data.mean(), 3.0);
        assert_eq!(data.variance(), 2.5);
        assert!((data.stddev() - 1.5811).abs() < 1e-4);
        assert_eq!(data.num_samples(), 5);
    }

    #[test]
    fn test_negative_samples_excluded_from_statistics() {
        let data = data_set(&[5.0, -1.0, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(data.mean(), 5.0);
        assert_eq!(data.stddev(), 0.0);
        // The raw view keeps the sentinel.
        assert_eq!(data.num_samples(), 6);
        assert_eq!(data.samples().len(), 6);
    }

    #[test]
    fn test_fewer_than_two_samples_is_all_zeros() {
        let empty = DataSet::new();
        assert_eq!(empty.mean(), 0.0);
        assert_eq!(empty.variance(), 0.0);
        assert_eq!(empty.stddev(), 0.0);

        let single = data_set(&[42.0]);
        assert_eq!(single.mean(), 0.0);
        assert_eq!(single.variance(), 0.0);
        assert_eq!(single.stddev(), 0.0);

        // Two samples but only one non-negative.
        let sentinel = data_set(&[42.0, -1.0]);
        assert_eq!(sentinel.mean(), 0.0);
        assert_eq!(sentinel.stddev(), 0.0);
    }

    #[test]
    fn test_mutation_invalidates_cache() {
        let mut data = data_set(&[1.0, 2.0, 3.0]);
        assert_eq!(data.mean(), 2.0);

        data.add(6.0);
        assert_eq!(data.mean(), 3.0);

        assert!(data.remove(6.0));
        assert_eq!(data.mean(), 2.0);

        assert!(!data.remove(99.0));
        assert_eq!(data.mean(), 2.0);
    }

    #[test]
    fn test_remove_takes_first_occurrence_only() {
        let mut data = data_set(&[7.0, 7.0, 1.0]);
        assert!(data.remove(7.0));
        assert_eq!(data.samples(), &[7.0, 1.0]);
    }

    #[test]
    fn test_stddev_is_root_of_variance() {
        let mut data = data_set(&[3.5, 10.25, 0.5, 8.0]);
        for _ in 0..3 {
            assert!(data.variance() >= 0.0);
            assert_eq!(data.stddev(), data.variance().sqrt());
            data.add(2.75);
            data.remove(0.5);
        }
    }
}
