use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::StatsError;

/// Outcome of a Welch two-sample t-test.
#[derive(Debug, Clone, Copy)]
pub struct TTest {
    /// The t statistic, `(m1 - m2) / sqrt(v1/n1 + v2/n2)`.
    pub statistic: f64,
    /// Two-tailed p-value from the Student-t distribution.
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
}

/// Welch's t-test for two independent samples with potentially unequal
/// variances. This is the appropriate variant for benchmark comparisons,
/// which carry no equal-variance guarantee between runs.
///
/// Means and variances are computed over every observation handed in,
/// matching the upstream numerical library the harness scripts relied on;
/// negative-sentinel filtering is a [`DataSet`](crate::DataSet) concern and
/// does not apply here.
pub fn welch_t_test(sample1: &[f64], sample2: &[f64]) -> Result<TTest, StatsError> {
    let n1 = sample1.len();
    let n2 = sample2.len();
    if n1 < 2 || n2 < 2 {
        return Err(StatsError::InsufficientSamples { n1, n2 });
    }

    let mean1 = mean(sample1);
    let mean2 = mean(sample2);
    let var1 = variance(sample1, mean1);
    let var2 = variance(sample2, mean2);

    let standard_error = (var1 / n1 as f64 + var2 / n2 as f64).sqrt();
    if standard_error == 0.0 {
        // Both samples are constant. Identical means are indistinguishable;
        // differing means are unambiguously distinct.
        return Ok(if mean1 == mean2 {
            TTest {
                statistic: 0.0,
                p_value: 1.0,
                degrees_of_freedom: (n1.min(n2) - 1) as f64,
            }
        } else {
            TTest {
                statistic: (mean1 - mean2).signum() * f64::INFINITY,
                p_value: 0.0,
                degrees_of_freedom: (n1.min(n2) - 1) as f64,
            }
        });
    }

    let statistic = (mean1 - mean2) / standard_error;
    let degrees_of_freedom = welch_satterthwaite_df(var1, n1, var2, n2);

    let distribution = StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|_| {
        StatsError::InvalidDegreesOfFreedom {
            df: degrees_of_freedom,
        }
    })?;
    // Two-tailed: p = 2 * P(T > |t|)
    let p_value = 2.0 * (1.0 - distribution.cdf(statistic.abs()));

    Ok(TTest {
        statistic,
        p_value,
        degrees_of_freedom,
    })
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample variance with Bessel's correction.
fn variance(samples: &[f64], mean: f64) -> f64 {
    let sum_sq_diff: f64 = samples
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum();
    sum_sq_diff / (samples.len() - 1) as f64
}

/// df = (v1/n1 + v2/n2)^2 / ((v1/n1)^2/(n1-1) + (v2/n2)^2/(n2-1))
fn welch_satterthwaite_df(var1: f64, n1: usize, var2: f64, n2: usize) -> f64 {
    let s1 = var1 / n1 as f64;
    let s2 = var2 / n2 as f64;
    let numerator = (s1 + s2).powi(2);
    let denominator = (s1.powi(2) / (n1 - 1) as f64) + (s2.powi(2) / (n2 - 1) as f64);
    numerator / denominator
}
