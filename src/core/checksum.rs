//! Luhn check digit for PINs
//!
//! The check digit covers all eleven leading digits, century included.
//! Doubling falls on odd 1-based positions counted from the left.

use crate::domain::{Pin, PIN_LENGTH};

/// Number of leading digits covered by the check digit
pub const PAYLOAD_LENGTH: usize = PIN_LENGTH - 1;

/// Luhn check digit over an arbitrary digit slice
///
/// Digits at odd 1-based positions (from the left) are doubled, and 9 is
/// subtracted from any doubled value above 9. The check digit is
/// `(10 - sum mod 10) mod 10`.
///
/// # Examples
///
/// ```
/// use pnr_synth::core::checksum::luhn_check_digit;
///
/// assert_eq!(luhn_check_digit(&[6, 4, 0, 8, 2, 3, 3, 2, 3]), 4);
/// ```
pub fn luhn_check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Check digit for the eleven leading PIN digits
///
/// # Examples
///
/// ```
/// use pnr_synth::core::checksum::compute;
///
/// assert_eq!(compute(&[1, 9, 6, 4, 0, 8, 2, 3, 3, 2, 3]), 3);
/// ```
pub fn compute(digits_1_to_11: &[u8; PAYLOAD_LENGTH]) -> u8 {
    luhn_check_digit(digits_1_to_11)
}

/// Recomputes the check digit and compares it against digit 12
pub fn verify(pin: &Pin) -> bool {
    let digits = pin.digits();
    let mut payload = [0u8; PAYLOAD_LENGTH];
    payload.copy_from_slice(&digits[..PAYLOAD_LENGTH]);
    compute(&payload) == digits[PAYLOAD_LENGTH]
}
