//! Uniqueness across a generated batch
//!
//! Sampling without replacement over the bounded non-personal number space:
//! each candidate is checked against everything accepted so far in the call
//! and redrawn on collision. The retry budget per candidate grows with the
//! expected number of draws needed to find a free number, so a nearly full
//! space still fails with [`PinError::Exhaustion`] instead of looping.

use super::sampling::birth_number::SERIAL_BAND_COUNT;
use super::sampling::dates::window_days;
use crate::domain::{Pin, PinError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Non-personal numbers per birthdate when sex is fixed (12 bands x 5 digits)
pub const PER_DAY_SINGLE_SEX: u64 = SERIAL_BAND_COUNT * 5;

/// Non-personal numbers per birthdate when both sexes occur
pub const PER_DAY_MIXED: u64 = SERIAL_BAND_COUNT * 10;

/// Upper bound on the retry multiplier from [`sex_skew`]
pub const MAX_SEX_SKEW: u64 = 1_000;

/// Size of the non-personal number space for a window and male probability
///
/// Any `male_prob` strictly between 0 and 1 counts both halves of the per-day
/// space. Close to 0 or 1 the rarer half is drawn rarely, which the retry
/// budget accounts for through [`sex_skew`].
pub fn capacity(lower: NaiveDate, upper: NaiveDate, male_prob: f64) -> u64 {
    let per_day = if male_prob <= 0.0 || male_prob >= 1.0 {
        PER_DAY_SINGLE_SEX
    } else {
        PER_DAY_MIXED
    };
    window_days(lower, upper).saturating_mul(per_day)
}

/// Retry multiplier for reaching the rarer sex
///
/// The rarer half of a day's numbers is drawn `2 * min(p, 1 - p)` times as
/// often as under an even split. The multiplier is the inverse of that, capped
/// at [`MAX_SEX_SKEW`]. Past the cap a window filled beyond its single-sex
/// capacity can still fail with [`PinError::Exhaustion`].
pub fn sex_skew(male_prob: f64) -> u64 {
    let rarer = male_prob.min(1.0 - male_prob);
    if rarer <= 0.0 || rarer >= 0.5 {
        return 1;
    }
    ((0.5 / rarer).ceil() as u64).clamp(1, MAX_SEX_SKEW)
}

/// Retry budget parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Multiplier on the expected draws to hit a free number
    pub factor: usize,
    /// Lower bound on the per-candidate budget
    pub min_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            factor: 50,
            min_retries: 100,
        }
    }
}

/// Tracks accepted PINs and redraws colliding candidates
#[derive(Debug)]
pub struct UniquenessEnforcer {
    enabled: bool,
    capacity: u64,
    policy: RetryPolicy,
    skew: u64,
    accepted: HashSet<Pin>,
    collisions: usize,
}

impl UniquenessEnforcer {
    /// Enforcer that accepts every candidate as drawn
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            capacity: u64::MAX,
            policy: RetryPolicy::default(),
            skew: 1,
            accepted: HashSet::new(),
            collisions: 0,
        }
    }

    /// Enforcer for `needed` distinct values out of `capacity`
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Exhaustion`] immediately when `needed` exceeds `capacity`.
    pub fn new(needed: usize, capacity: u64, policy: RetryPolicy) -> Result<Self> {
        if needed as u64 > capacity {
            return Err(PinError::Exhaustion(format!(
                "{needed} distinct PINs requested but only {capacity} non-personal numbers exist in the window"
            )));
        }
        Ok(Self {
            enabled: true,
            capacity,
            policy,
            skew: 1,
            accepted: HashSet::with_capacity(needed),
            collisions: 0,
        })
    }

    /// Multiplies every retry budget by `skew` (see [`sex_skew`])
    pub fn with_skew(mut self, skew: u64) -> Self {
        self.skew = skew.max(1);
        self
    }

    /// Draws candidates until one is new, within the retry budget
    ///
    /// Errors from `draw` are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Exhaustion`] if every draw in the budget collided.
    pub fn admit<F>(&mut self, mut draw: F) -> Result<Pin>
    where
        F: FnMut() -> Result<Pin>,
    {
        if !self.enabled {
            return draw();
        }

        let budget = self.retry_budget();
        for _ in 0..budget {
            let candidate = draw()?;
            if self.accepted.insert(candidate.clone()) {
                return Ok(candidate);
            }
            self.collisions += 1;
        }

        Err(PinError::Exhaustion(format!(
            "no unused non-personal PIN found in {budget} draws after accepting {} of capacity {}",
            self.accepted.len(),
            self.capacity
        )))
    }

    /// Per-candidate draw budget for the next admission
    pub fn retry_budget(&self) -> usize {
        let remaining = self
            .capacity
            .saturating_sub(self.accepted.len() as u64)
            .max(1);
        let expected = self.capacity.div_ceil(remaining);
        let budget = expected
            .saturating_mul(self.policy.factor as u64)
            .saturating_mul(self.skew);
        usize::try_from(budget)
            .unwrap_or(usize::MAX)
            .max(self.policy.min_retries)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of candidates rejected as duplicates so far
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}
