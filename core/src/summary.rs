//! Descriptive statistics over per-patient outcome vectors.
//!
//! Two kinds of interval are reported and must not be confused:
//!   - percentile interval: where the central `1 - alpha` of individual
//!     patient values lie.
//!   - confidence interval: Student-t interval for the mean itself.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided Student-t quantile `t_{1 - alpha/2, dof}`. NaN when the
/// degrees of freedom are not positive.
fn t_critical(alpha: f64, dof: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(t) => t.inverse_cdf(1.0 - alpha / 2.0),
        Err(_) => f64::NAN,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStat {
    pub name:    String,
    pub count:   usize,
    pub mean:    f64,
    pub st_dev:  f64,
    pub min:     f64,
    pub max:     f64,
    #[serde(skip)]
    sorted:      Vec<f64>,
}

impl SummaryStat {
    /// Empty input gives count 0 and NaN statistics.
    pub fn new(name: &str, data: &[f64]) -> Self {
        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let count = sorted.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            sorted.iter().sum::<f64>() / count as f64
        };
        let st_dev = if count < 2 {
            f64::NAN
        } else {
            let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        };

        Self {
            name: name.to_string(),
            count,
            mean,
            st_dev,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            max: sorted.last().copied().unwrap_or(f64::NAN),
            sorted,
        }
    }

    /// Linearly interpolated percentile, `percentile` in [0, 100].
    pub fn percentile(&self, percentile: f64) -> f64 {
        let sorted = &self.sorted;
        if sorted.is_empty() {
            return f64::NAN;
        }
        if percentile <= 0.0 {
            return sorted[0];
        }
        if percentile >= 100.0 {
            return sorted[sorted.len() - 1];
        }

        let rank = (percentile / 100.0) * (sorted.len() as f64 - 1.0);
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        if lo == hi {
            sorted[lo]
        } else {
            let w = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * w
        }
    }

    /// Interval holding the central `1 - alpha` of the observations.
    pub fn percentile_interval(&self, alpha: f64) -> (f64, f64) {
        (
            self.percentile(100.0 * alpha / 2.0),
            self.percentile(100.0 * (1.0 - alpha / 2.0)),
        )
    }

    /// `1 - alpha` confidence interval of the mean. Needs two observations.
    pub fn confidence_interval(&self, alpha: f64) -> (f64, f64) {
        if self.count < 2 {
            return (f64::NAN, f64::NAN);
        }
        let st_err = self.st_dev / (self.count as f64).sqrt();
        let half = t_critical(alpha, (self.count - 1) as f64) * st_err;
        (self.mean - half, self.mean + half)
    }
}

/// Difference of means `mean(x) - mean(y_ref)` of two independent samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferenceStat {
    pub name:   String,
    pub mean:   f64,
    /// Standard error of the difference.
    pub st_err: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub dof:    f64,
}

impl DifferenceStat {
    pub fn new(name: &str, x: &SummaryStat, y_ref: &SummaryStat) -> Self {
        let mean = x.mean - y_ref.mean;
        if x.count < 2 || y_ref.count < 2 {
            return Self { name: name.to_string(), mean, st_err: f64::NAN, dof: f64::NAN };
        }

        let a = x.st_dev.powi(2) / x.count as f64;
        let b = y_ref.st_dev.powi(2) / y_ref.count as f64;
        let dof = (a + b).powi(2)
            / (a.powi(2) / (x.count - 1) as f64 + b.powi(2) / (y_ref.count - 1) as f64);

        Self {
            name: name.to_string(),
            mean,
            st_err: (a + b).sqrt(),
            dof,
        }
    }

    /// `1 - alpha` confidence interval of the difference. Collapses to
    /// the point estimate when both samples are constant.
    pub fn confidence_interval(&self, alpha: f64) -> (f64, f64) {
        if self.st_err == 0.0 {
            return (self.mean, self.mean);
        }
        let half = t_critical(alpha, self.dof) * self.st_err;
        (self.mean - half, self.mean + half)
    }
}
