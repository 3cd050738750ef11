//! Audit logging module
//!
//! Records one entry per generation or anonymization call. Source PINs are
//! only ever written as a SHA-256 digest.

pub mod logger;

pub use logger::{digest_source, AuditLogger, AuditRecord, Operation};
