//! Numeric helpers for comparing benchmark runs.

mod ttest;
pub use ttest::{welch_t_test, TTest};

/// Signed percent difference of `specimen` against `baseline`, normalised so
/// that a positive result always means improvement.
///
/// A zero baseline makes any movement infinitely different; the sign of the
/// infinity follows the direction-of-goodness.
pub fn percent_diff(baseline: f64, specimen: f64, is_higher_better: bool) -> f64 {
    if baseline == 0.0 {
        return if specimen > 0.0 && is_higher_better {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }

    let mut diff = ((specimen - baseline) / baseline) * 100.0;
    if !is_higher_better {
        diff = -diff;
    }
    diff
}
