//! Configuration schema definitions
//!
//! Every section has defaults, so an empty TOML document is a valid
//! configuration.

use crate::core::estimation::kde::DEFAULT_SUPPORT_BANDWIDTHS;
use crate::core::estimation::Bandwidth;
use crate::core::sampling::dates::DEFAULT_MAX_DATE_RETRIES;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SynthConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.generator.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Sampling, estimation and audit settings of the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Seed for [`crate::core::generator::Generator::rng`]; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Male probability used when a fresh request does not set one
    #[serde(default = "default_male_prob")]
    pub default_male_prob: f64,

    /// Rejection attempts per truncated birthdate draw
    #[serde(default = "default_max_date_retries")]
    pub max_date_retries: usize,

    /// Multiplier on expected draws per unique candidate
    #[serde(default = "default_unique_retry_factor")]
    pub unique_retry_factor: usize,

    /// Floor of the per-candidate uniqueness budget
    #[serde(default = "default_min_unique_retries")]
    pub min_unique_retries: usize,

    /// Density estimation settings
    #[serde(default)]
    pub estimation: EstimationConfig,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditConfig,
}

impl GeneratorConfig {
    /// Validates the generator section on its own
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.default_male_prob) {
            return Err(format!(
                "default_male_prob must lie in [0, 1], got {}",
                self.default_male_prob
            ));
        }
        if self.max_date_retries == 0 {
            return Err("max_date_retries must be at least 1".to_string());
        }
        if self.unique_retry_factor == 0 {
            return Err("unique_retry_factor must be at least 1".to_string());
        }
        if self.min_unique_retries == 0 {
            return Err("min_unique_retries must be at least 1".to_string());
        }
        self.estimation.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_male_prob: default_male_prob(),
            max_date_retries: default_max_date_retries(),
            unique_retry_factor: default_unique_retry_factor(),
            min_unique_retries: default_min_unique_retries(),
            estimation: EstimationConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// Birthdate density estimation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationConfig {
    /// Bandwidth rule: "silverman", "scott" or `{ fixed = <days> }`
    #[serde(default)]
    pub bandwidth: Bandwidth,

    /// Half-width of the effective support, in bandwidths
    #[serde(default = "default_support_bandwidths")]
    pub support_bandwidths: f64,
}

impl EstimationConfig {
    fn validate(&self) -> Result<(), String> {
        self.bandwidth.validate().map_err(|e| e.to_string())?;
        if !self.support_bandwidths.is_finite() || self.support_bandwidths <= 0.0 {
            return Err(format!(
                "support_bandwidths must be positive, got {}",
                self.support_bandwidths
            ));
        }
        Ok(())
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            bandwidth: Bandwidth::default(),
            support_bandwidths: default_support_bandwidths(),
        }
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_male_prob() -> f64 {
    0.5
}

fn default_max_date_retries() -> usize {
    DEFAULT_MAX_DATE_RETRIES
}

fn default_unique_retry_factor() -> usize {
    50
}

fn default_min_unique_retries() -> usize {
    100
}

fn default_support_bandwidths() -> f64 {
    DEFAULT_SUPPORT_BANDWIDTHS
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/pnr-synth.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}
