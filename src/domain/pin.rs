//! PIN value types
//!
//! [`Pin`] is a newtype over the canonical twelve-digit string form
//! `YYYYMMDDNNNC`. Construction only checks the shape (twelve ASCII digits);
//! calendar and checksum validity are the codec's business, see
//! [`crate::core::codec`].

use super::errors::PinError;
use super::result::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in the canonical PIN form
pub const PIN_LENGTH: usize = 12;

/// Lowest three-digit birth number reserved for non-personal PINs
pub const NON_PERSONAL_MIN: u16 = 880;

/// Highest three-digit birth number reserved for non-personal PINs
pub const NON_PERSONAL_MAX: u16 = 999;

/// Twelve-digit personal identity number
///
/// # Examples
///
/// ```
/// use pnr_synth::domain::Pin;
/// use std::str::FromStr;
///
/// let pin = Pin::from_str("196408233233").unwrap();
/// assert_eq!(pin.as_str(), "196408233233");
/// assert_eq!(pin.birth_number(), 323);
/// assert!(!pin.is_non_personal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

impl Pin {
    /// Creates a new Pin from its canonical string form
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Decoding`] unless the input is exactly twelve ASCII digits.
    pub fn new(pin: impl Into<String>) -> Result<Self> {
        let pin = pin.into();
        if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinError::Decoding(format!(
                "PIN must be exactly {PIN_LENGTH} decimal digits, got: {pin:?}"
            )));
        }
        Ok(Self(pin))
    }

    /// Builds a Pin from its digits, most significant first
    pub(crate) fn from_digits(digits: &[u8; PIN_LENGTH]) -> Self {
        Self(digits.iter().map(|d| char::from(b'0' + d)).collect())
    }

    /// Returns the PIN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the twelve digits as numeric values
    pub fn digits(&self) -> [u8; PIN_LENGTH] {
        let mut digits = [0u8; PIN_LENGTH];
        for (slot, byte) in digits.iter_mut().zip(self.0.bytes()) {
            *slot = byte - b'0';
        }
        digits
    }

    /// Integer representation of the PIN
    pub fn to_u64(&self) -> u64 {
        self.digits()
            .iter()
            .fold(0u64, |acc, &d| acc * 10 + u64::from(d))
    }

    /// Two-digit serial band (digits 9-10)
    pub fn serial_band(&self) -> u8 {
        let d = self.digits();
        d[8] * 10 + d[9]
    }

    /// Sex-encoding digit (digit 11)
    pub fn sex_digit(&self) -> u8 {
        self.digits()[10]
    }

    /// Three-digit birth number (digits 9-11)
    pub fn birth_number(&self) -> u16 {
        u16::from(self.serial_band()) * 10 + u16::from(self.sex_digit())
    }

    /// True when the birth number lies in the range never assigned to a real person
    pub fn is_non_personal(&self) -> bool {
        (NON_PERSONAL_MIN..=NON_PERSONAL_MAX).contains(&self.birth_number())
    }

    /// Sex as encoded by the parity of digit 11
    pub fn sex(&self) -> Sex {
        Sex::from_digit(self.sex_digit())
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.trim())
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<u64> for Pin {
    type Error = PinError;

    fn try_from(value: u64) -> Result<Self> {
        if value >= 1_000_000_000_000 {
            return Err(PinError::Decoding(format!(
                "integer PIN {value} has more than {PIN_LENGTH} digits"
            )));
        }
        Self::new(format!("{value:012}"))
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

impl AsRef<str> for Pin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sex encoded by the parity of the sex digit (odd = male)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Decodes sex from a sex digit
    pub fn from_digit(digit: u8) -> Self {
        if digit % 2 == 1 {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn is_male(self) -> bool {
        self == Self::Male
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
        }
    }
}

/// Decoded fields of a PIN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinFields {
    /// Real birthdate (coordination offsets already removed)
    pub birthdate: NaiveDate,

    /// Two-digit serial band, 0-99
    pub serial_band: u8,

    /// Sex digit, 0-9
    pub sex_digit: u8,

    /// Day of month carried the +60 coordination-number offset
    #[serde(default)]
    pub coordination: bool,
}

impl PinFields {
    /// Creates fields for an ordinary (non-coordination) number
    pub fn new(birthdate: NaiveDate, serial_band: u8, sex_digit: u8) -> Self {
        Self {
            birthdate,
            serial_band,
            sex_digit,
            coordination: false,
        }
    }

    pub fn sex(&self) -> Sex {
        Sex::from_digit(self.sex_digit)
    }

    /// Three-digit birth number
    pub fn birth_number(&self) -> u16 {
        u16::from(self.serial_band) * 10 + u16::from(self.sex_digit)
    }
}

/// Output collection of the generator
///
/// Every batch produced by [`crate::core::generator::Generator`] carries
/// `non_personal = true`, so downstream consumers can filter or audit on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinBatch {
    pins: Vec<Pin>,
    non_personal: bool,
}

impl PinBatch {
    /// Wraps PINs drawn from the non-personal range
    pub(crate) fn non_personal(pins: Vec<Pin>) -> Self {
        Self {
            pins,
            non_personal: true,
        }
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn into_pins(self) -> Vec<Pin> {
        self.pins
    }

    pub fn is_non_personal(&self) -> bool {
        self.non_personal
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pin> {
        self.pins.iter()
    }
}

impl IntoIterator for PinBatch {
    type Item = Pin;
    type IntoIter = std::vec::IntoIter<Pin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.into_iter()
    }
}

impl<'a> IntoIterator for &'a PinBatch {
    type Item = &'a Pin;
    type IntoIter = std::slice::Iter<'a, Pin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_shape_validation() {
        assert!(Pin::new("196408233233").is_ok());
        assert!(Pin::new("6408233234").is_err());
        assert!(Pin::new("19640823-3234").is_err());
        assert!(Pin::new("19640823323X").is_err());
        assert!(Pin::new("").is_err());
    }

    #[test]
    fn test_pin_from_str_trims() {
        let pin = Pin::from_str("  196408233233\n").unwrap();
        assert_eq!(pin.as_str(), "196408233233");
    }

    #[test]
    fn test_pin_integer_form() {
        let pin = Pin::try_from(196_408_233_233u64).unwrap();
        assert_eq!(pin.as_str(), "196408233233");
        assert_eq!(pin.to_u64(), 196_408_233_233);
        assert!(Pin::try_from(1_000_000_000_000u64).is_err());
    }

    #[test]
    fn test_pin_integer_form_keeps_leading_zeros() {
        let pin = Pin::try_from(8_010_100_120u64).unwrap();
        assert_eq!(pin.as_str(), "008010100120");
    }

    #[test]
    fn test_birth_number_parts() {
        let pin = Pin::new("199001018936").unwrap();
        assert_eq!(pin.serial_band(), 89);
        assert_eq!(pin.sex_digit(), 3);
        assert_eq!(pin.birth_number(), 893);
        assert!(pin.is_non_personal());
        assert_eq!(pin.sex(), Sex::Male);
    }

    #[test]
    fn test_non_personal_boundaries() {
        assert!(!Pin::new("199001018790").unwrap().is_non_personal());
        assert!(Pin::new("199001018800").unwrap().is_non_personal());
        assert!(Pin::new("199001019990").unwrap().is_non_personal());
    }

    #[test]
    fn test_sex_from_digit() {
        assert_eq!(Sex::from_digit(0), Sex::Female);
        assert_eq!(Sex::from_digit(7), Sex::Male);
        assert!(Sex::Male.is_male());
        assert_eq!(Sex::Female.to_string(), "female");
    }

    #[test]
    fn test_pin_serde_as_string() {
        let pin = Pin::new("196408233233").unwrap();
        let json = serde_json::to_string(&pin).unwrap();
        assert_eq!(json, "\"196408233233\"");

        let back: Pin = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pin);
        assert!(serde_json::from_str::<Pin>("\"12345\"").is_err());
    }

    #[test]
    fn test_batch_serializes_marker() {
        let batch = PinBatch::non_personal(vec![Pin::new("199001018936").unwrap()]);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["non_personal"], serde_json::Value::Bool(true));
        assert_eq!(json["pins"][0], "199001018936");
        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());
    }
}
