//! Anonymize command implementation

use super::{read_pins, write_batch, OutputFormat};
use crate::cli::exit_code;
use crate::config::SynthConfig;
use crate::core::generator::{AnonymizeRequest, Generator};
use crate::domain::{Pin, PinBatch, Result};
use chrono::NaiveDate;
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// File with one PIN per line; stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Earliest birthdate; earliest source birthdate when omitted
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest birthdate; latest source birthdate when omitted
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Probability that a PIN is male; estimated from the source when omitted
    #[arg(long)]
    pub male_prob: Option<f64>,

    /// Allow the same output PIN for different source PINs
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Draw every position independently, even for repeated source PINs
    #[arg(long)]
    pub independent: bool,

    /// Seed for reproducible output; overrides the configured seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,
}

impl AnonymizeArgs {
    /// Builds the library request for a source batch
    pub fn request(&self, source: Vec<Pin>) -> AnonymizeRequest {
        let mut request = AnonymizeRequest::new(source)
            .with_unique(!self.allow_duplicates)
            .with_keep_rel(!self.independent);
        request.l_birth = self.from;
        request.u_birth = self.to;
        request.male_prob = self.male_prob;
        request
    }

    /// Execute the anonymize command
    pub fn execute(&self, mut config: SynthConfig) -> anyhow::Result<i32> {
        if self.seed.is_some() {
            config.generator.seed = self.seed;
        }

        let batch = match self.read_source().and_then(|source| self.run(config, source)) {
            Ok(batch) => batch,
            Err(e) => {
                crate::log_error_with_context!(&e, "Anonymization failed");
                eprintln!("Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        write_batch(&batch, self.format, std::io::stdout().lock())?;
        Ok(0)
    }

    fn read_source(&self) -> Result<Vec<Pin>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                tracing::info!(input = %path.display(), "Reading source PINs");
                read_pins(BufReader::new(File::open(path)?))
            }
            _ => read_pins(std::io::stdin().lock()),
        }
    }

    fn run(&self, config: SynthConfig, source: Vec<Pin>) -> Result<PinBatch> {
        let generator = Generator::new(config.generator)?;
        let mut rng = generator.rng();
        generator.anonymize(&self.request(source), &mut rng)
    }
}
