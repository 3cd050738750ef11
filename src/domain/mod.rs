//! Domain models and types for pnr-synth.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **PIN value types** ([`Pin`], [`PinFields`], [`Sex`], [`PinBatch`])
//! - **Error types** ([`PinError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! A [`Pin`] is a newtype over the canonical twelve-digit string, so a PIN can
//! never be confused with an arbitrary string or integer:
//!
//! ```rust
//! use pnr_synth::domain::Pin;
//!
//! # fn example() -> pnr_synth::domain::Result<()> {
//! let pin = Pin::new("196408233233")?;
//! let same = Pin::try_from(196_408_233_233u64)?;
//! assert_eq!(pin, same);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PinError>`]:
//!
//! ```rust
//! use pnr_synth::domain::{Pin, Result};
//!
//! fn parse(raw: &str) -> Result<Pin> {
//!     let pin: Pin = raw.parse()?;
//!     Ok(pin)
//! }
//! # assert!(parse("12").is_err());
//! ```

pub mod errors;
pub mod pin;
pub mod result;

pub use errors::PinError;
pub use pin::{Pin, PinBatch, PinFields, Sex, NON_PERSONAL_MAX, NON_PERSONAL_MIN, PIN_LENGTH};
pub use result::Result;
