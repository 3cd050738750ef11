//! Birthdate distribution estimation
//!
//! Fits a smooth density to the birthdates of an anonymization source and
//! estimates its male proportion. The smoothing method is pluggable through
//! [`DensityEstimator`]; truncation, retries and uniqueness live elsewhere and
//! only see the narrow [`Density`] interface.
//!
//! Dates are handled on an ordinal scale: days since 0001-01-01 (CE).

pub mod kde;

use crate::domain::{PinError, PinFields, Result};
use chrono::{Datelike, NaiveDate};
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

pub use kde::{Bandwidth, GaussianKde, GaussianKdeEstimator};

/// Converts a date to its ordinal day number
pub fn to_ordinal(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Converts an ordinal back to a date, rounding to the nearest day
pub fn from_ordinal(ordinal: f64) -> Option<NaiveDate> {
    if !ordinal.is_finite() {
        return None;
    }
    let rounded = ordinal.round();
    if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(rounded as i32)
}

/// A fitted one-dimensional density over the ordinal scale
pub trait Density: Send + Sync + fmt::Debug {
    /// Draws one value from the density
    fn sample(&self, rng: &mut dyn RngCore) -> f64;

    /// Interval outside which the density is numerically zero
    fn support(&self) -> (f64, f64);

    /// Density value at `x`
    fn pdf(&self, x: f64) -> f64;
}

/// Strategy that fits a [`Density`] to ordinal samples
pub trait DensityEstimator: Send + Sync {
    /// Fits a density to the samples
    ///
    /// Callers guarantee at least two samples with non-zero variance.
    fn fit(&self, samples: &[f64]) -> Result<Box<dyn Density>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Fitted birthdate density plus the empirical male proportion
///
/// Computed once per anonymization call and discarded afterwards.
#[derive(Debug)]
pub struct EstimatedDistribution {
    density: Box<dyn Density>,
    male_prob: f64,
    observed_min: NaiveDate,
    observed_max: NaiveDate,
    sample_size: usize,
}

impl EstimatedDistribution {
    pub fn density(&self) -> &dyn Density {
        self.density.as_ref()
    }

    pub fn male_prob(&self) -> f64 {
        self.male_prob
    }

    /// Earliest and latest birthdate in the fitted sample
    pub fn observed_range(&self) -> (NaiveDate, NaiveDate) {
        (self.observed_min, self.observed_max)
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Fits [`EstimatedDistribution`]s using a pluggable density strategy
#[derive(Clone)]
pub struct DistributionEstimator {
    strategy: Arc<dyn DensityEstimator>,
}

impl DistributionEstimator {
    pub fn new(strategy: Arc<dyn DensityEstimator>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Fits the birthdate density and male proportion of decoded PINs
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Estimation`] for fewer than two points or when
    /// every birthdate is identical.
    pub fn fit(&self, fields: &[PinFields]) -> Result<EstimatedDistribution> {
        if fields.len() < 2 {
            return Err(PinError::Estimation(format!(
                "density fitting needs at least 2 birthdates, got {}",
                fields.len()
            )));
        }

        let samples: Vec<f64> = fields.iter().map(|f| to_ordinal(f.birthdate)).collect();
        let first = samples[0];
        if samples.iter().all(|&x| x == first) {
            return Err(PinError::Estimation(
                "all birthdates are identical; density has zero variance".to_string(),
            ));
        }

        let density = self.strategy.fit(&samples)?;
        let male_prob = male_proportion(fields)?;
        let observed_min = fields.iter().map(|f| f.birthdate).min();
        let observed_max = fields.iter().map(|f| f.birthdate).max();
        let (Some(observed_min), Some(observed_max)) = (observed_min, observed_max) else {
            return Err(PinError::Estimation("no birthdates to fit".to_string()));
        };

        let (support_lo, support_hi) = density.support();
        tracing::debug!(
            strategy = self.strategy.name(),
            sample_size = fields.len(),
            male_prob,
            support_lo,
            support_hi,
            "Fitted birthdate distribution"
        );

        Ok(EstimatedDistribution {
            density,
            male_prob,
            observed_min,
            observed_max,
            sample_size: fields.len(),
        })
    }
}

impl Default for DistributionEstimator {
    fn default() -> Self {
        Self::new(Arc::new(GaussianKdeEstimator::default()))
    }
}

impl fmt::Debug for DistributionEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionEstimator")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// Share of male sex digits among decoded PINs
pub fn male_proportion(fields: &[PinFields]) -> Result<f64> {
    if fields.is_empty() {
        return Err(PinError::Estimation(
            "cannot estimate male proportion from an empty sample".to_string(),
        ));
    }
    let males = fields.iter().filter(|f| f.sex().is_male()).count();
    Ok(males as f64 / fields.len() as f64)
}
