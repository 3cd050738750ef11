//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SynthConfig;
use crate::domain::errors::PinError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "PNR_SYNTH_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SynthConfig
/// 4. Applies environment variable overrides (PNR_SYNTH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PinError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails, an override does not
/// parse, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use pnr_synth::config::loader::load_config;
///
/// let config = load_config("pnr-synth.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SynthConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PinError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PinError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PinError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Parses TOML text after `${VAR}` substitution, without overrides or validation
pub fn parse_config(contents: &str) -> Result<SynthConfig> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| PinError::Configuration(format!("Failed to parse TOML: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PinError::Configuration(format!("Invalid placeholder pattern: {}", e)))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PinError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies `PNR_SYNTH_<SECTION>_<KEY>` overrides from the process environment
///
/// For example: PNR_SYNTH_GENERATOR_SEED, PNR_SYNTH_AUDIT_ENABLED
fn apply_env_overrides(config: &mut SynthConfig) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Applies overrides from an arbitrary lookup; a value that does not parse
/// is an error rather than being ignored
fn apply_overrides<F>(config: &mut SynthConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

    if let Some(val) = get("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    let generator = &mut config.generator;
    if let Some(val) = get("GENERATOR_SEED") {
        generator.seed = Some(parse_override("GENERATOR_SEED", &val)?);
    }
    if let Some(val) = get("GENERATOR_DEFAULT_MALE_PROB") {
        generator.default_male_prob = parse_override("GENERATOR_DEFAULT_MALE_PROB", &val)?;
    }
    if let Some(val) = get("GENERATOR_MAX_DATE_RETRIES") {
        generator.max_date_retries = parse_override("GENERATOR_MAX_DATE_RETRIES", &val)?;
    }
    if let Some(val) = get("GENERATOR_UNIQUE_RETRY_FACTOR") {
        generator.unique_retry_factor = parse_override("GENERATOR_UNIQUE_RETRY_FACTOR", &val)?;
    }
    if let Some(val) = get("GENERATOR_MIN_UNIQUE_RETRIES") {
        generator.min_unique_retries = parse_override("GENERATOR_MIN_UNIQUE_RETRIES", &val)?;
    }

    // Estimation overrides
    if let Some(val) = get("ESTIMATION_SUPPORT_BANDWIDTHS") {
        generator.estimation.support_bandwidths =
            parse_override("ESTIMATION_SUPPORT_BANDWIDTHS", &val)?;
    }

    // Audit overrides
    if let Some(val) = get("AUDIT_ENABLED") {
        generator.audit.enabled = parse_override("AUDIT_ENABLED", &val)?;
    }
    if let Some(val) = get("AUDIT_LOG_PATH") {
        generator.audit.log_path = PathBuf::from(val);
    }

    // Logging overrides
    if let Some(val) = get("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = get("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override<T>(suffix: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        PinError::Configuration(format!("Invalid value for {ENV_PREFIX}{suffix}: {e}"))
    })
}
