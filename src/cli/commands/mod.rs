//! CLI command implementations
//!
//! Shared input and output handling for the generating commands lives here.

pub mod anonymize;
pub mod generate;
pub mod validate;

use crate::domain::{Pin, PinBatch, PinError, Result};
use clap::ValueEnum;
use std::io::{BufRead, Write};

/// Output format of generated batches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One PIN per line
    #[default]
    Lines,
    /// JSON object with `pins` and `non_personal`
    Json,
}

/// Writes a batch in the requested format
pub fn write_batch<W: Write>(batch: &PinBatch, format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Lines => {
            for pin in batch {
                writeln!(out, "{pin}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, batch)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Reads one PIN per line, skipping blank lines and `#` comments
///
/// # Errors
///
/// Returns [`PinError::Decoding`] naming the first malformed line.
pub fn read_pins<R: BufRead>(reader: R) -> Result<Vec<Pin>> {
    let mut pins = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let pin = trimmed
            .parse::<Pin>()
            .map_err(|e| PinError::Decoding(format!("line {}: {e}", index + 1)))?;
        pins.push(pin);
    }
    Ok(pins)
}
