//! Generate command implementation

use super::{write_batch, OutputFormat};
use crate::cli::exit_code;
use crate::config::SynthConfig;
use crate::core::generator::{GenerateRequest, Generator};
use crate::domain::PinBatch;
use chrono::NaiveDate;
use clap::Args;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of PINs to generate
    #[arg(short = 'n', long)]
    pub count: usize,

    /// Earliest birthdate (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Latest birthdate (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,

    /// Probability that a PIN is male; configured default when omitted
    #[arg(long)]
    pub male_prob: Option<f64>,

    /// Allow the same PIN more than once
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Seed for reproducible output; overrides the configured seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,
}

impl GenerateArgs {
    /// Builds the library request
    pub fn request(&self) -> GenerateRequest {
        let mut request =
            GenerateRequest::new(self.count, self.from, self.to).with_unique(!self.allow_duplicates);
        request.male_prob = self.male_prob;
        request
    }

    /// Execute the generate command
    pub fn execute(&self, mut config: SynthConfig) -> anyhow::Result<i32> {
        if self.seed.is_some() {
            config.generator.seed = self.seed;
        }
        tracing::info!(count = self.count, from = %self.from, to = %self.to, "Generating PINs");

        let batch = match self.run(config) {
            Ok(batch) => batch,
            Err(e) => {
                crate::log_error_with_context!(&e, "Generation failed");
                eprintln!("Error: {e}");
                return Ok(exit_code(&e));
            }
        };

        write_batch(&batch, self.format, std::io::stdout().lock())?;
        Ok(0)
    }

    fn run(&self, config: SynthConfig) -> crate::domain::Result<PinBatch> {
        let generator = Generator::new(config.generator)?;
        let mut rng = generator.rng();
        generator.generate(&self.request(), &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GenerateArgs {
        GenerateArgs {
            count: 4,
            from: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(1990, 1, 10).unwrap(),
            male_prob: Some(0.0),
            allow_duplicates: false,
            seed: Some(3),
            format: OutputFormat::Lines,
        }
    }

    #[test]
    fn test_request_mapping() {
        let request = args().request();
        assert_eq!(request.count, 4);
        assert_eq!(request.male_prob, Some(0.0));
        assert!(request.unique);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let args = args();
        let mut config = SynthConfig::default();
        config.generator.seed = args.seed;

        let first = args.run(config.clone()).unwrap();
        let second = args.run(config).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|pin| !pin.sex().is_male()));
    }
}
