//! Non-personal birth number sampling
//!
//! Draws the serial band uniformly from 88-99 and a sex digit whose parity
//! is male with probability `male_prob` (odd digits are male).

use crate::domain::{PinError, Result};
use rand::Rng;

/// Lowest serial band of the non-personal range
pub const SERIAL_BAND_MIN: u8 = 88;

/// Highest serial band of the non-personal range
pub const SERIAL_BAND_MAX: u8 = 99;

/// Number of distinct non-personal serial bands
pub const SERIAL_BAND_COUNT: u64 = (SERIAL_BAND_MAX - SERIAL_BAND_MIN + 1) as u64;

/// Serial band and sex digit of a generated PIN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthNumber {
    pub serial_band: u8,
    pub sex_digit: u8,
}

impl BirthNumber {
    pub fn is_male(&self) -> bool {
        self.sex_digit % 2 == 1
    }
}

/// Checks that a male probability lies in `[0, 1]`
pub fn validate_male_prob(male_prob: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&male_prob) {
        return Err(PinError::InvalidParameter(format!(
            "male_prob must lie in [0, 1], got {male_prob}"
        )));
    }
    Ok(())
}

/// Draws a non-personal serial band and sex digit
///
/// # Errors
///
/// Returns [`PinError::InvalidParameter`] if `male_prob` is outside `[0, 1]`
/// (NaN included).
///
/// # Examples
///
/// ```
/// use pnr_synth::core::sampling::birth_number;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let drawn = birth_number::sample(1.0, &mut rng).unwrap();
/// assert!((88..=99).contains(&drawn.serial_band));
/// assert!(drawn.is_male());
/// ```
pub fn sample<R: Rng + ?Sized>(male_prob: f64, rng: &mut R) -> Result<BirthNumber> {
    validate_male_prob(male_prob)?;
    let serial_band = rng.gen_range(SERIAL_BAND_MIN..=SERIAL_BAND_MAX);
    let male = rng.gen_bool(male_prob);
    let sex_digit = 2 * rng.gen_range(0..5u8) + u8::from(male);
    Ok(BirthNumber {
        serial_band,
        sex_digit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_out_of_range_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let err = sample(p, &mut rng).unwrap_err();
            assert!(matches!(err, PinError::InvalidParameter(_)), "p = {p}");
        }
    }

    #[test]
    fn test_extreme_probabilities_fix_sex() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(sample(1.0, &mut rng).unwrap().is_male());
            assert!(!sample(0.0, &mut rng).unwrap().is_male());
        }
    }

    #[test]
    fn test_covers_whole_band_and_digit_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut bands = std::collections::HashSet::new();
        let mut digits = std::collections::HashSet::new();
        for _ in 0..5_000 {
            let drawn = sample(0.5, &mut rng).unwrap();
            assert!((SERIAL_BAND_MIN..=SERIAL_BAND_MAX).contains(&drawn.serial_band));
            assert!(drawn.sex_digit <= 9);
            bands.insert(drawn.serial_band);
            digits.insert(drawn.sex_digit);
        }
        assert_eq!(bands.len() as u64, SERIAL_BAND_COUNT);
        assert_eq!(digits.len(), 10);
    }

    #[test]
    fn test_male_share_converges() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 100_000;
        let males = (0..n)
            .filter(|_| sample(0.3, &mut rng).unwrap().is_male())
            .count();
        let share = males as f64 / n as f64;
        // four standard errors at n = 100k
        assert!((share - 0.3).abs() < 4.0 * (0.3f64 * 0.7 / n as f64).sqrt());
    }
}
