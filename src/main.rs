// pnr-synth - Non-personal PIN generation and anonymization
// Copyright (c) 2025 pnr-synth Contributors
// Licensed under the MIT License

use clap::Parser;
use pnr_synth::cli::{exit_code, load_settings, Cli, Commands};
use pnr_synth::config::{LoggingConfig, SynthConfig};
use pnr_synth::logging::init_logging;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // validate-config reports its own load errors
    let config = match &cli.command {
        Commands::ValidateConfig(_) => None,
        _ => match load_settings(cli.config.as_deref()) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(exit_code(&e));
            }
        },
    };

    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "pnr-synth starting");

    let exit_code = match execute_command(&cli, config.unwrap_or_default()) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, config: SynthConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Generate(args) => args.execute(config),
        Commands::Anonymize(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(cli.config_path()),
    }
}
