//! Birthdate sampling
//!
//! Two modes: uniform over an inclusive date window, or draws from a fitted
//! density truncated to the window by rejection. Every empirical draw has a
//! bounded retry budget; a window the density cannot reach fails fast.

use crate::core::estimation::{from_ordinal, to_ordinal, Density, EstimatedDistribution};
use crate::domain::{PinError, Result};
use chrono::{Duration, NaiveDate};
use rand::{Rng, RngCore};

/// Default number of rejection attempts per empirical draw
pub const DEFAULT_MAX_DATE_RETRIES: usize = 1_000;

/// Checks that `lower <= upper`
pub fn validate_range(lower: NaiveDate, upper: NaiveDate) -> Result<()> {
    if lower > upper {
        return Err(PinError::InvalidRange { lower, upper });
    }
    Ok(())
}

/// Number of days in the inclusive window
pub fn window_days(lower: NaiveDate, upper: NaiveDate) -> u64 {
    ((upper - lower).num_days() + 1).max(0) as u64
}

/// Draws birthdates inside an inclusive window
#[derive(Debug)]
pub enum DateSampler<'a> {
    /// Every day in the window is equally likely
    Uniform { lower: NaiveDate, upper: NaiveDate },
    /// Draws from a fitted density, resampled until inside the window
    Empirical {
        density: &'a dyn Density,
        lower: NaiveDate,
        upper: NaiveDate,
        max_retries: usize,
    },
}

impl<'a> DateSampler<'a> {
    /// Uniform sampler over `[lower, upper]`
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidRange`] if `lower > upper`.
    pub fn uniform(lower: NaiveDate, upper: NaiveDate) -> Result<Self> {
        validate_range(lower, upper)?;
        Ok(Self::Uniform { lower, upper })
    }

    /// Truncated sampler over a fitted distribution
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidRange`] if `lower > upper`,
    /// [`PinError::InvalidParameter`] for a zero retry budget, and
    /// [`PinError::Sampling`] if the window lies entirely outside the
    /// density's effective support.
    pub fn empirical(
        distribution: &'a EstimatedDistribution,
        lower: NaiveDate,
        upper: NaiveDate,
        max_retries: usize,
    ) -> Result<Self> {
        validate_range(lower, upper)?;
        if max_retries == 0 {
            return Err(PinError::InvalidParameter(
                "max_date_retries must be at least 1".to_string(),
            ));
        }

        let density = distribution.density();
        let (support_lo, support_hi) = density.support();
        // A draw rounds into the window from half a day outside it.
        if to_ordinal(upper) + 0.5 < support_lo || to_ordinal(lower) - 0.5 > support_hi {
            return Err(PinError::Sampling(format!(
                "window {lower}..={upper} lies outside the fitted birthdate support"
            )));
        }

        Ok(Self::Empirical {
            density,
            lower,
            upper,
            max_retries,
        })
    }

    /// Inclusive window of the sampler
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Uniform { lower, upper } | Self::Empirical { lower, upper, .. } => {
                (*lower, *upper)
            }
        }
    }

    /// Draws one birthdate
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Sampling`] when an empirical draw exhausts its retry budget.
    pub fn draw<R: RngCore>(&self, rng: &mut R) -> Result<NaiveDate> {
        match self {
            Self::Uniform { lower, upper } => {
                let span = (*upper - *lower).num_days();
                Ok(*lower + Duration::days(rng.gen_range(0..=span)))
            }
            Self::Empirical {
                density,
                lower,
                upper,
                max_retries,
            } => {
                for _ in 0..*max_retries {
                    let value = density.sample(rng);
                    match from_ordinal(value) {
                        Some(date) if date >= *lower && date <= *upper => return Ok(date),
                        _ => continue,
                    }
                }
                Err(PinError::Sampling(format!(
                    "no birthdate inside {lower}..={upper} after {max_retries} draws"
                )))
            }
        }
    }

    /// Draws `n` independent birthdates (with replacement)
    pub fn sample<R: RngCore>(&self, n: usize, rng: &mut R) -> Result<Vec<NaiveDate>> {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}
