//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pnr-synth using clap.

pub mod commands;

use crate::config::{load_config, SynthConfig};
use crate::domain::PinError;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "pnr-synth.toml";

/// pnr-synth - non-personal PIN generator
#[derive(Parser, Debug)]
#[command(name = "pnr-synth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PNR_SYNTH_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PNR_SYNTH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path used by `validate-config`
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate fresh non-personal PINs
    Generate(commands::generate::GenerateArgs),

    /// Replace PINs read from a file or stdin with non-personal ones
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

/// Loads the configuration for a run
///
/// An explicit path must exist. Without one, the default file is used when
/// present and built-in defaults otherwise.
///
/// # Errors
///
/// Returns [`PinError::Configuration`] if the chosen file fails to load.
pub fn load_settings(config: Option<&str>) -> crate::domain::Result<SynthConfig> {
    match config {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => Ok(SynthConfig::default()),
    }
}

/// Process exit code for a failed run
///
/// - 2: configuration error
/// - 3: invalid request or input PIN
/// - 4: generation could not satisfy the request
/// - 5: I/O or other fatal error
pub fn exit_code(error: &PinError) -> i32 {
    match error {
        PinError::Configuration(_) => 2,
        PinError::Decoding(_) => 3,
        e if e.is_parameter_error() => 3,
        PinError::Estimation(_)
        | PinError::Encoding(_)
        | PinError::Sampling(_)
        | PinError::Exhaustion(_) => 4,
        _ => 5,
    }
}
