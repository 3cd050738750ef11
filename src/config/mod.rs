//! Configuration management for pnr-synth.
//!
//! TOML configuration with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PNR_SYNTH_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pnr_synth::config::load_config;
//! use pnr_synth::core::generator::Generator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pnr-synth.toml")?;
//! let generator = Generator::new(config.generator)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`GeneratorConfig`] - Seed, retry budgets and default male probability
//! - [`EstimationConfig`] - Bandwidth rule and support width
//! - [`AuditConfig`] - Audit trail file
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [generator]
//! seed = ${PNR_SYNTH_SEED}
//! default_male_prob = 0.5
//! max_date_retries = 1000
//!
//! [generator.estimation]
//! bandwidth = "silverman"
//! support_bandwidths = 6.0
//!
//! [generator.audit]
//! enabled = true
//! log_path = "./audit/pnr-synth.log"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, AuditConfig, EstimationConfig, GeneratorConfig, LoggingConfig, SynthConfig,
};
