//! Built-in accumulator: streaming central moments with mergeable state.
//!
//! Running count, sum, min/max and the first four central moments are kept
//! with Welford-style single-sample updates and Pébay's pairwise combination
//! formulas, so merging per-axis or per-block partials is equivalent (within
//! floating tolerance) to one pass over all samples, in any merge order.
//! Raw samples are retained only when a quantile statistic was requested.
//!
//! Conventions: variance is the population variance `M2/n`; skewness is
//! `(M3/n) / variance^(3/2)`; kurtosis is excess kurtosis
//! `(M4/n) / variance^2 - 3`. Quantiles interpolate linearly between order
//! statistics.

use super::StatAccumulator;
use crate::features::Statistic;

/// Mergeable streaming moments over `f32` samples. Internal state is `f64`
/// for stability; extraction narrows to `f32`.
#[derive(Clone, Debug)]
pub struct MomentAccumulator {
    n: u64,
    sum: f64,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
    min: f32,
    max: f32,
    samples: Option<Vec<f32>>,
}

impl MomentAccumulator {
    fn empty(keep_samples: bool) -> Self {
        Self {
            n: 0,
            sum: 0.0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            samples: keep_samples.then(Vec::new),
        }
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    fn variance(&self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else {
            self.m2 / self.n as f64
        }
    }

    fn quantile(&self, q: u8) -> f32 {
        let Some(samples) = &self.samples else {
            return f32::NAN;
        };
        if samples.is_empty() {
            return f32::NAN;
        }
        let mut sorted = samples.clone();
        sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let pos = f64::from(q) / 100.0 * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = (pos - lo as f64) as f32;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

impl StatAccumulator for MomentAccumulator {
    fn for_stats(stats: &[Statistic]) -> Self {
        let keep_samples = stats.iter().any(|s| matches!(s, Statistic::Quantile(_)));
        Self::empty(keep_samples)
    }

    fn ingest(&mut self, value: f32) {
        let x = f64::from(value);
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;

        self.sum += x;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;
        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;

        if let Some(samples) = &mut self.samples {
            samples.push(value);
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = other.clone();
            return;
        }

        let na = self.n as f64;
        let nb = other.n as f64;
        let n = na + nb;
        let delta = other.mean - self.mean;
        let delta2 = delta * delta;

        let m2 = self.m2 + other.m2 + delta2 * na * nb / n;
        let m3 = self.m3
            + other.m3
            + delta * delta2 * na * nb * (na - nb) / (n * n)
            + 3.0 * delta * (na * other.m2 - nb * self.m2) / n;
        let m4 = self.m4
            + other.m4
            + delta2 * delta2 * na * nb * (na * na - na * nb + nb * nb) / (n * n * n)
            + 6.0 * delta2 * (na * na * other.m2 + nb * nb * self.m2) / (n * n)
            + 4.0 * delta * (na * other.m3 - nb * self.m3) / n;

        self.mean += delta * nb / n;
        self.m2 = m2;
        self.m3 = m3;
        self.m4 = m4;
        self.n += other.n;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);

        match (&mut self.samples, &other.samples) {
            (Some(mine), Some(theirs)) => mine.extend_from_slice(theirs),
            (Some(_), None) | (None, Some(_)) | (None, None) => {}
        }
    }

    fn extract(&self, stat: Statistic) -> f32 {
        match stat {
            Statistic::Count => self.n as f32,
            Statistic::Sum => self.sum as f32,
            Statistic::Minimum => {
                if self.n == 0 {
                    f32::NAN
                } else {
                    self.min
                }
            }
            Statistic::Maximum => {
                if self.n == 0 {
                    f32::NAN
                } else {
                    self.max
                }
            }
            Statistic::Mean => {
                if self.n == 0 {
                    f32::NAN
                } else {
                    self.mean as f32
                }
            }
            Statistic::Variance => self.variance() as f32,
            Statistic::Skewness => {
                let var = self.variance();
                ((self.m3 / self.n as f64) / var.powf(1.5)) as f32
            }
            Statistic::Kurtosis => {
                let var = self.variance();
                ((self.m4 / self.n as f64) / (var * var) - 3.0) as f32
            }
            Statistic::Quantile(q) => self.quantile(q),
        }
    }
}
