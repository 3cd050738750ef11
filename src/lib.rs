// pnr-synth - Non-personal PIN generation and anonymization
// Copyright (c) 2025 pnr-synth Contributors
// Licensed under the MIT License

//! # pnr-synth - Non-personal PIN synthesis
//!
//! pnr-synth produces twelve-digit personal identity numbers
//! (`YYYYMMDDNNNC`) that are structurally valid and checksum-correct but
//! drawn from the birth-number range 880-999, which is never assigned to a
//! real person.
//!
//! ## Overview
//!
//! This library provides:
//! - **Generating** fresh PINs for a birthdate window and sex ratio
//! - **Anonymizing** a batch of real PINs while keeping its birthdate
//!   distribution, sex ratio and, optionally, its repetition pattern
//! - **Encoding** and **decoding** PIN fields with Luhn check digits
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Checksum, codec, sampling, estimation and the generator
//! - [`domain`] - PIN types and errors
//! - [`config`] - Configuration management
//! - [`audit`] - Per-call audit trail with hashed sources
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use pnr_synth::core::generator::{AnonymizeRequest, Generator};
//! use pnr_synth::domain::Pin;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! # fn main() -> Result<(), pnr_synth::domain::PinError> {
//! let generator = Generator::default();
//! let mut rng = StdRng::seed_from_u64(2024);
//!
//! let p = Pin::new("196408233233")?;
//! let request = AnonymizeRequest::new(vec![p.clone(), p.clone(), p]);
//! let batch = generator.anonymize(&request, &mut rng)?;
//!
//! assert_eq!(batch.len(), 3);
//! assert!(batch.is_non_personal());
//! assert_eq!(batch.pins()[0], batch.pins()[2]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::PinError`]. Calls are
//! all-or-nothing: no partial batch is ever returned.
//!
//! ## Logging
//!
//! The engine emits `tracing` events; install a subscriber with
//! [`logging::init_logging`] or any other `tracing` subscriber.

pub mod audit;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
