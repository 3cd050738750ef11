//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the pnr-synth configuration file.

use crate::config::load_config;
use crate::core::generator::Generator;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        // Also catches an audit directory that cannot be created.
        if let Err(e) = Generator::new(config.generator.clone()) {
            println!("Configuration is invalid");
            println!("   Error: {e}");
            return Ok(2);
        }

        let generator = &config.generator;
        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match generator.seed {
            Some(seed) => println!("  Seed: {seed}"),
            None => println!("  Seed: (entropy)"),
        }
        println!("  Default Male Probability: {}", generator.default_male_prob);
        println!("  Max Date Retries: {}", generator.max_date_retries);
        println!(
            "  Uniqueness Budget: factor {}, minimum {}",
            generator.unique_retry_factor, generator.min_unique_retries
        );
        println!("  Bandwidth: {:?}", generator.estimation.bandwidth);
        println!("  Support Width: {} bandwidths", generator.estimation.support_bandwidths);
        if generator.audit.enabled {
            println!("  Audit Log: {}", generator.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        println!();
        Ok(0)
    }
}
