//! Result type alias for pnr-synth

use super::errors::PinError;

/// Result type alias for pnr-synth operations
///
/// # Examples
///
/// ```
/// use pnr_synth::domain::result::Result;
/// use pnr_synth::domain::errors::PinError;
///
/// fn failing_function() -> Result<()> {
///     Err(PinError::InvalidParameter("male_prob must lie in [0, 1]".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, PinError>;
