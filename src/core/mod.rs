//! Core generation and anonymization logic.
//!
//! # Modules
//!
//! - [`checksum`] - Luhn check digit over the PIN payload
//! - [`codec`] - Field encoding and decoding of twelve-digit PINs
//! - [`sampling`] - Birthdate and birth-number draws
//! - [`estimation`] - Birthdate density fitting for anonymization
//! - [`relation`] - Grouping of equal source PINs
//! - [`uniqueness`] - Duplicate-free draws over the non-personal space
//! - [`generator`] - The `generate` and `anonymize` entry points
//!
//! # Pipeline
//!
//! 1. **Decode** (anonymize): source PINs to birthdate and sex
//! 2. **Estimate** (anonymize): birthdate density and male share
//! 3. **Group**: one draw per distinct source value when relations are kept
//! 4. **Sample**: birthdate, serial band 88-99 and sex digit
//! 5. **Encode**: fields plus Luhn check digit
//! 6. **Deduplicate**: redraw collisions within a bounded budget
//! 7. **Broadcast**: group values back to every source position

pub mod checksum;
pub mod codec;
pub mod estimation;
pub mod generator;
pub mod relation;
pub mod sampling;
pub mod uniqueness;
