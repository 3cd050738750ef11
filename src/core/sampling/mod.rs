//! Random draws for generated PINs
//!
//! - [`birth_number`] draws the non-personal serial band and sex digit
//! - [`dates`] draws birthdates uniformly or from a fitted density

pub mod birth_number;
pub mod dates;

pub use birth_number::{BirthNumber, SERIAL_BAND_MAX, SERIAL_BAND_MIN};
pub use dates::DateSampler;
