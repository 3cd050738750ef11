//! Gaussian kernel density estimate
//!
//! Sampling from a Gaussian KDE is exact: pick one observation uniformly and
//! add normal noise with standard deviation equal to the bandwidth.

use super::{Density, DensityEstimator};
use crate::domain::{PinError, Result};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Default half-width of the effective support, in bandwidths
pub const DEFAULT_SUPPORT_BANDWIDTHS: f64 = 6.0;

/// Bandwidth selection rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// Silverman's rule of thumb, robust to heavy tails via the IQR
    Silverman,
    /// Scott's rule
    Scott,
    /// Fixed bandwidth in days
    Fixed(f64),
}

impl Default for Bandwidth {
    fn default() -> Self {
        Self::Silverman
    }
}

impl Bandwidth {
    /// Checks that a fixed bandwidth is positive and finite
    pub fn validate(&self) -> Result<()> {
        if let Self::Fixed(h) = self {
            if !h.is_finite() || *h <= 0.0 {
                return Err(PinError::InvalidParameter(format!(
                    "fixed bandwidth must be positive and finite, got {h}"
                )));
            }
        }
        Ok(())
    }

    /// Bandwidth for the given samples
    fn select(&self, samples: &[f64]) -> f64 {
        let n = samples.len() as f64;
        match self {
            Self::Fixed(h) => *h,
            Self::Scott => 1.06 * std_dev(samples) * n.powf(-0.2),
            Self::Silverman => {
                let sd = std_dev(samples);
                let iqr = interquartile_range(samples);
                let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
                0.9 * spread * n.powf(-0.2)
            }
        }
    }
}

/// Fits [`GaussianKde`] densities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKdeEstimator {
    bandwidth: Bandwidth,
    support_bandwidths: f64,
}

impl GaussianKdeEstimator {
    pub fn new(bandwidth: Bandwidth, support_bandwidths: f64) -> Result<Self> {
        bandwidth.validate()?;
        if !support_bandwidths.is_finite() || support_bandwidths <= 0.0 {
            return Err(PinError::InvalidParameter(format!(
                "support_bandwidths must be positive and finite, got {support_bandwidths}"
            )));
        }
        Ok(Self {
            bandwidth,
            support_bandwidths,
        })
    }
}

impl Default for GaussianKdeEstimator {
    fn default() -> Self {
        Self {
            bandwidth: Bandwidth::default(),
            support_bandwidths: DEFAULT_SUPPORT_BANDWIDTHS,
        }
    }
}

impl DensityEstimator for GaussianKdeEstimator {
    fn fit(&self, samples: &[f64]) -> Result<Box<dyn Density>> {
        if samples.len() < 2 {
            return Err(PinError::Estimation(format!(
                "kernel density needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if samples.iter().any(|x| !x.is_finite()) {
            return Err(PinError::Estimation(
                "samples contain non-finite values".to_string(),
            ));
        }

        let bandwidth = self.bandwidth.select(samples);
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(PinError::Estimation(format!(
                "degenerate bandwidth {bandwidth}; samples have no spread"
            )));
        }

        let kernel = Normal::new(0.0, bandwidth)
            .map_err(|e| PinError::Estimation(format!("invalid kernel: {e}")))?;

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let reach = self.support_bandwidths * bandwidth;

        Ok(Box::new(GaussianKde {
            points: samples.to_vec(),
            bandwidth,
            kernel,
            support: (min - reach, max + reach),
        }))
    }

    fn name(&self) -> &'static str {
        "gaussian_kde"
    }
}

/// Gaussian kernel density over a fixed set of observations
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
    kernel: Normal<f64>,
    support: (f64, f64),
}

impl GaussianKde {
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }
}

impl Density for GaussianKde {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let i = rng.gen_range(0..self.points.len());
        self.points[i] + self.kernel.sample(rng)
    }

    fn support(&self) -> (f64, f64) {
        self.support
    }

    fn pdf(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = (2.0 * std::f64::consts::PI).sqrt() * h * self.points.len() as f64;
        self.points
            .iter()
            .map(|p| {
                let z = (x - p) / h;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            / norm
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator)
fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|x| (x - m).powi(2)).sum();
    (ss / (samples.len() - 1) as f64).sqrt()
}

/// Linear-interpolated quantile of sorted data
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

fn interquartile_range(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile(&sorted, 0.75) - quantile(&sorted, 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_std_dev_and_iqr() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((std_dev(&data) - 2.5f64.sqrt()).abs() < 1e-12);
        assert!((interquartile_range(&data) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_silverman_bandwidth() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let expected = 0.9 * (2.0 / 1.34f64).min(2.5f64.sqrt()) * 5f64.powf(-0.2);
        assert!((Bandwidth::Silverman.select(&data) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_silverman_falls_back_to_sd_when_iqr_is_zero() {
        let data = [0.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 20.0];
        let expected = 0.9 * std_dev(&data) * 8f64.powf(-0.2);
        assert!((Bandwidth::Silverman.select(&data) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_bandwidth_validation() {
        assert!(Bandwidth::Fixed(30.0).validate().is_ok());
        assert!(Bandwidth::Fixed(0.0).validate().is_err());
        assert!(Bandwidth::Fixed(f64::NAN).validate().is_err());
        assert!(GaussianKdeEstimator::new(Bandwidth::Scott, 0.0).is_err());
    }

    #[test]
    fn test_fit_rejects_zero_spread() {
        let estimator = GaussianKdeEstimator::default();
        assert!(matches!(
            estimator.fit(&[5.0, 5.0, 5.0]),
            Err(PinError::Estimation(_))
        ));
        assert!(matches!(estimator.fit(&[5.0]), Err(PinError::Estimation(_))));
    }

    #[test]
    fn test_pdf_integrates_to_one() {
        let estimator = GaussianKdeEstimator::new(Bandwidth::Fixed(2.0), 6.0).unwrap();
        let density = estimator.fit(&[0.0, 10.0, 12.0]).unwrap();
        let (lo, hi) = density.support();
        let step = 0.01;
        let steps = ((hi - lo) / step) as usize;
        let area: f64 = (0..steps)
            .map(|i| density.pdf(lo + (i as f64 + 0.5) * step) * step)
            .sum();
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn test_samples_stay_near_observations() {
        let estimator = GaussianKdeEstimator::new(Bandwidth::Fixed(1.0), 6.0).unwrap();
        let density = estimator.fit(&[100.0, 200.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let draws: Vec<f64> = (0..2_000).map(|_| density.sample(&mut rng)).collect();
        assert!(draws
            .iter()
            .all(|x| (x - 100.0).abs() < 6.0 || (x - 200.0).abs() < 6.0));

        let near_low = draws.iter().filter(|x| **x < 150.0).count() as f64;
        let share = near_low / draws.len() as f64;
        assert!((share - 0.5).abs() < 0.05, "share = {share}");
    }
}
