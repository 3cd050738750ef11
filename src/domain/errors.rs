//! Domain error types
//!
//! This module defines the error hierarchy for pnr-synth. Every failure of
//! `generate`/`anonymize` surfaces as a [`PinError`]; the operations are
//! all-or-nothing, so no partially built batch is ever returned alongside one.

use chrono::NaiveDate;
use thiserror::Error;

/// Main pnr-synth error type
///
/// Internal resampling (a date drawn outside the bounds, a colliding PIN) is
/// retried silently and only becomes a [`PinError::Sampling`] or
/// [`PinError::Exhaustion`] once its bounded retry budget is spent.
#[derive(Debug, Error)]
pub enum PinError {
    /// Probability out of range or otherwise unusable argument
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Lower birthdate bound lies after the upper bound
    #[error("Invalid date range: {lower} is after {upper}")]
    InvalidRange { lower: NaiveDate, upper: NaiveDate },

    /// Degenerate or insufficient input for density fitting
    #[error("Estimation error: {0}")]
    Estimation(String),

    /// Malformed or checksum-failing PIN
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Birthdate or field outside the representable range
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Truncated date sampling could not satisfy the bounds
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Uniqueness cannot be satisfied within the non-personal number space
    #[error("Exhaustion error: {0}")]
    Exhaustion(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PinError {
    /// True for errors caused by the caller's arguments rather than the data
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter(_) | Self::InvalidRange { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PinError {
    fn from(err: std::io::Error) -> Self {
        PinError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PinError {
    fn from(err: serde_json::Error) -> Self {
        PinError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PinError {
    fn from(err: toml::de::Error) -> Self {
        PinError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_error_display() {
        let err = PinError::Decoding("expected 12 digits".to_string());
        assert_eq!(err.to_string(), "Decoding error: expected 12 digits");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = PinError::InvalidRange {
            lower: NaiveDate::from_ymd_opt(1990, 2, 1).unwrap(),
            upper: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 1990-02-01 is after 1990-01-01"
        );
    }

    #[test]
    fn test_parameter_error_grouping() {
        assert!(PinError::InvalidParameter("p".to_string()).is_parameter_error());
        assert!(PinError::InvalidRange {
            lower: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
            upper: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
        .is_parameter_error());
        assert!(!PinError::Exhaustion("full".to_string()).is_parameter_error());
        assert!(!PinError::Sampling("bounds".to_string()).is_parameter_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PinError = io_err.into();
        assert!(matches!(err, PinError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PinError = json_err.into();
        assert!(matches!(err, PinError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PinError = toml_err.into();
        assert!(matches!(err, PinError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_pin_error_implements_std_error() {
        let err = PinError::Estimation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
