//! Generation and anonymization entry points
//!
//! [`Generator`] composes the sampling pipeline:
//!
//! - **Estimation**: fits the source's birthdate density and male share
//!   (anonymization only, skipped when nothing needs estimating)
//! - **Sampling**: birthdate, then serial band and sex digit
//! - **Encoding**: fields to a checksummed PIN
//! - **Uniqueness**: rejection-resampling of colliding candidates
//! - **Relations**: one drawn value per group of equal source PINs
//!
//! Every call is all-or-nothing. Randomness is always passed in, so a seeded
//! RNG reproduces a batch exactly.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use pnr_synth::core::generator::{GenerateRequest, Generator};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let generator = Generator::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let request = GenerateRequest::new(
//!     5,
//!     NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(1990, 1, 10).unwrap(),
//! )
//! .with_male_prob(1.0);
//!
//! let batch = generator.generate(&request, &mut rng).unwrap();
//! assert_eq!(batch.len(), 5);
//! assert!(batch.is_non_personal());
//! assert!(batch.iter().all(|pin| pin.is_non_personal() && pin.sex().is_male()));
//! ```

use super::codec;
use super::estimation::{
    male_proportion, DensityEstimator, DistributionEstimator, EstimatedDistribution,
    GaussianKdeEstimator,
};
use super::relation::RelationMap;
use super::sampling::birth_number::{self, validate_male_prob};
use super::sampling::dates::{validate_range, DateSampler};
use super::uniqueness::{capacity, sex_skew, RetryPolicy, UniquenessEnforcer};
use crate::audit::{digest_source, AuditLogger, AuditRecord, Operation};
use crate::config::GeneratorConfig;
use crate::domain::{Pin, PinBatch, PinError, PinFields, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Request for PINs drawn from scratch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub count: usize,
    pub l_birth: NaiveDate,
    pub u_birth: NaiveDate,
    /// Falls back to the configured default when unset
    #[serde(default)]
    pub male_prob: Option<f64>,
    #[serde(default = "default_true")]
    pub unique: bool,
}

impl GenerateRequest {
    /// `count` unique PINs born in `[l_birth, u_birth]`
    pub fn new(count: usize, l_birth: NaiveDate, u_birth: NaiveDate) -> Self {
        Self {
            count,
            l_birth,
            u_birth,
            male_prob: None,
            unique: true,
        }
    }

    pub fn with_male_prob(mut self, male_prob: f64) -> Self {
        self.male_prob = Some(male_prob);
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}

/// Request to replace a batch of PINs with non-personal look-alikes
///
/// Unset bounds default to the earliest and latest source birthdate; an
/// unset male probability is estimated from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    pub source: Vec<Pin>,
    #[serde(default)]
    pub l_birth: Option<NaiveDate>,
    #[serde(default)]
    pub u_birth: Option<NaiveDate>,
    #[serde(default)]
    pub male_prob: Option<f64>,
    #[serde(default = "default_true")]
    pub unique: bool,
    #[serde(default = "default_true")]
    pub keep_rel: bool,
}

impl AnonymizeRequest {
    pub fn new(source: Vec<Pin>) -> Self {
        Self {
            source,
            l_birth: None,
            u_birth: None,
            male_prob: None,
            unique: true,
            keep_rel: true,
        }
    }

    pub fn with_bounds(mut self, l_birth: NaiveDate, u_birth: NaiveDate) -> Self {
        self.l_birth = Some(l_birth);
        self.u_birth = Some(u_birth);
        self
    }

    pub fn with_lower_bound(mut self, l_birth: NaiveDate) -> Self {
        self.l_birth = Some(l_birth);
        self
    }

    pub fn with_upper_bound(mut self, u_birth: NaiveDate) -> Self {
        self.u_birth = Some(u_birth);
        self
    }

    pub fn with_male_prob(mut self, male_prob: f64) -> Self {
        self.male_prob = Some(male_prob);
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_keep_rel(mut self, keep_rel: bool) -> Self {
        self.keep_rel = keep_rel;
        self
    }

    /// Whether the request leaves nothing to estimate from the source
    fn fully_specified(&self) -> bool {
        self.l_birth.is_some() && self.u_birth.is_some() && self.male_prob.is_some()
    }
}

/// Either kind of request, dispatched by [`Generator::execute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GenerationRequest {
    Fresh(GenerateRequest),
    Anonymize(AnonymizeRequest),
}

impl From<GenerateRequest> for GenerationRequest {
    fn from(request: GenerateRequest) -> Self {
        Self::Fresh(request)
    }
}

impl From<AnonymizeRequest> for GenerationRequest {
    fn from(request: AnonymizeRequest) -> Self {
        Self::Anonymize(request)
    }
}

/// Produces non-personal PIN batches
///
/// Holds only configuration and the density strategy; no state survives a
/// call, so one generator can serve concurrent callers that each bring
/// their own RNG.
#[derive(Debug)]
pub struct Generator {
    config: GeneratorConfig,
    estimator: DistributionEstimator,
    audit_logger: Option<AuditLogger>,
}

impl Generator {
    /// Create a generator from configuration
    ///
    /// # Errors
    ///
    /// Returns [`PinError::Configuration`] if the configuration is invalid,
    /// or [`PinError::Io`] if the audit log directory cannot be created.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate().map_err(PinError::Configuration)?;

        let strategy = GaussianKdeEstimator::new(
            config.estimation.bandwidth,
            config.estimation.support_bandwidths,
        )?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
                true,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            estimator: DistributionEstimator::new(Arc::new(strategy)),
            audit_logger,
        })
    }

    /// Replace the birthdate density strategy
    pub fn with_density_estimator(mut self, strategy: Arc<dyn DensityEstimator>) -> Self {
        self.estimator = DistributionEstimator::new(strategy);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// RNG seeded from the configured seed, or from OS entropy when unset
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Runs either kind of request
    pub fn execute<R: Rng>(&self, request: &GenerationRequest, rng: &mut R) -> Result<PinBatch> {
        match request {
            GenerationRequest::Fresh(request) => self.generate(request, rng),
            GenerationRequest::Anonymize(request) => self.anonymize(request, rng),
        }
    }

    /// Draws `count` PINs with uniform birthdates in the requested window
    ///
    /// # Errors
    ///
    /// - [`PinError::InvalidParameter`] for a male probability outside `[0, 1]`
    /// - [`PinError::InvalidRange`] if `l_birth > u_birth`
    /// - [`PinError::Encoding`] if a birthdate cannot be encoded
    /// - [`PinError::Exhaustion`] if uniqueness cannot be met in the window
    pub fn generate<R: Rng>(&self, request: &GenerateRequest, rng: &mut R) -> Result<PinBatch> {
        let start = Instant::now();
        let male_prob = request.male_prob.unwrap_or(self.config.default_male_prob);
        validate_male_prob(male_prob)?;
        let sampler = DateSampler::uniform(request.l_birth, request.u_birth)?;

        let mut enforcer = self.enforcer(
            request.unique,
            request.count,
            capacity(request.l_birth, request.u_birth, male_prob),
            male_prob,
        )?;
        let pins = Self::draw_pins(&sampler, male_prob, request.count, &mut enforcer, rng)?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            count = pins.len(),
            collisions = enforcer.collisions(),
            elapsed_ms,
            "Generated non-personal PINs"
        );

        let mut record = AuditRecord::new(Operation::Generate, request.count);
        record.emitted = pins.len();
        record.groups = pins.len();
        record.l_birth = Some(request.l_birth);
        record.u_birth = Some(request.u_birth);
        record.male_prob = Some(male_prob);
        record.unique = request.unique;
        record.collisions = enforcer.collisions();
        record.processing_time_ms = elapsed_ms;
        self.audit(&record)?;

        Ok(PinBatch::non_personal(pins))
    }

    /// Replaces every source PIN with a non-personal one
    ///
    /// Output position `i` replaces `source[i]`. With `keep_rel`, equal
    /// source PINs receive equal outputs.
    ///
    /// # Errors
    ///
    /// - [`PinError::InvalidParameter`] / [`PinError::InvalidRange`] for bad overrides
    /// - [`PinError::Decoding`] for a malformed or checksum-failing source PIN
    /// - [`PinError::Estimation`] if the source cannot support a density fit
    /// - [`PinError::Sampling`] if the window is unreachable under the fitted density
    /// - [`PinError::Exhaustion`] if uniqueness cannot be met in the window
    pub fn anonymize<R: Rng>(&self, request: &AnonymizeRequest, rng: &mut R) -> Result<PinBatch> {
        let start = Instant::now();
        if let Some(male_prob) = request.male_prob {
            validate_male_prob(male_prob)?;
        }
        if let (Some(lower), Some(upper)) = (request.l_birth, request.u_birth) {
            validate_range(lower, upper)?;
        }

        let mut record = AuditRecord::new(Operation::Anonymize, request.source.len());
        record.unique = request.unique;
        record.keep_rel = request.keep_rel;
        record.source_digest = Some(digest_source(&request.source));

        if request.source.is_empty() {
            tracing::debug!("Empty source, nothing to anonymize");
            self.audit(&record)?;
            return Ok(PinBatch::non_personal(Vec::new()));
        }

        let fields = request
            .source
            .iter()
            .map(codec::decode)
            .collect::<Result<Vec<PinFields>>>()?;
        let relation = RelationMap::build(&request.source, request.keep_rel);
        let representatives: Vec<PinFields> = relation
            .representatives()
            .iter()
            .map(|&position| fields[position])
            .collect();

        let (lower, upper) = Self::resolve_bounds(request, &fields)?;
        let distribution = if request.fully_specified() || lower == upper {
            tracing::debug!(%lower, %upper, "Skipping density fit, drawing birthdates uniformly");
            None
        } else {
            Some(self.estimator.fit(&representatives)?)
        };
        let male_prob = match (request.male_prob, &distribution) {
            (Some(male_prob), _) => male_prob,
            (None, Some(distribution)) => distribution.male_prob(),
            (None, None) => male_proportion(&representatives)?,
        };

        let sampler = self.date_sampler(distribution.as_ref(), lower, upper)?;
        let groups = relation.group_count();
        let mut enforcer = self.enforcer(
            request.unique,
            groups,
            capacity(lower, upper, male_prob),
            male_prob,
        )?;
        let drawn = Self::draw_pins(&sampler, male_prob, groups, &mut enforcer, rng)?;
        let pins = relation.broadcast(&drawn)?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            count = pins.len(),
            groups,
            fitted = distribution.is_some(),
            male_prob,
            collisions = enforcer.collisions(),
            elapsed_ms,
            "Anonymized PIN batch"
        );

        record.emitted = pins.len();
        record.groups = groups;
        record.l_birth = Some(lower);
        record.u_birth = Some(upper);
        record.male_prob = Some(male_prob);
        record.bounds_estimated = request.l_birth.is_none() || request.u_birth.is_none();
        record.male_prob_estimated = request.male_prob.is_none();
        record.fitted = distribution.is_some();
        record.collisions = enforcer.collisions();
        record.processing_time_ms = elapsed_ms;
        self.audit(&record)?;

        Ok(PinBatch::non_personal(pins))
    }

    /// Overrides where given, observed source extremes otherwise
    fn resolve_bounds(
        request: &AnonymizeRequest,
        fields: &[PinFields],
    ) -> Result<(NaiveDate, NaiveDate)> {
        let observed_min = fields.iter().map(|f| f.birthdate).min();
        let observed_max = fields.iter().map(|f| f.birthdate).max();
        let (Some(observed_min), Some(observed_max)) = (observed_min, observed_max) else {
            return Err(PinError::Estimation("source has no birthdates".to_string()));
        };

        let lower = request.l_birth.unwrap_or(observed_min);
        let upper = request.u_birth.unwrap_or(observed_max);
        validate_range(lower, upper)?;
        Ok((lower, upper))
    }

    fn date_sampler<'a>(
        &self,
        distribution: Option<&'a EstimatedDistribution>,
        lower: NaiveDate,
        upper: NaiveDate,
    ) -> Result<DateSampler<'a>> {
        match distribution {
            Some(distribution) => {
                DateSampler::empirical(distribution, lower, upper, self.config.max_date_retries)
            }
            None => DateSampler::uniform(lower, upper),
        }
    }

    fn enforcer(
        &self,
        unique: bool,
        needed: usize,
        capacity: u64,
        male_prob: f64,
    ) -> Result<UniquenessEnforcer> {
        if !unique {
            return Ok(UniquenessEnforcer::disabled());
        }
        let policy = RetryPolicy {
            factor: self.config.unique_retry_factor,
            min_retries: self.config.min_unique_retries,
        };
        Ok(UniquenessEnforcer::new(needed, capacity, policy)?.with_skew(sex_skew(male_prob)))
    }

    fn draw_pins<R: Rng>(
        sampler: &DateSampler<'_>,
        male_prob: f64,
        count: usize,
        enforcer: &mut UniquenessEnforcer,
        rng: &mut R,
    ) -> Result<Vec<Pin>> {
        let mut pins = Vec::with_capacity(count);
        for _ in 0..count {
            let pin = enforcer.admit(|| Self::draw_candidate(sampler, male_prob, &mut *rng))?;
            pins.push(pin);
        }
        if enforcer.collisions() > 0 {
            tracing::debug!(
                collisions = enforcer.collisions(),
                "Redrew colliding candidates"
            );
        }
        Ok(pins)
    }

    /// One fresh candidate: birthdate, then birth number, then encoding
    fn draw_candidate<R: Rng>(
        sampler: &DateSampler<'_>,
        male_prob: f64,
        rng: &mut R,
    ) -> Result<Pin> {
        let birthdate = sampler.draw(rng)?;
        let drawn = birth_number::sample(male_prob, rng)?;
        codec::encode(birthdate, drawn.serial_band, drawn.sex_digit)
    }

    fn audit(&self, record: &AuditRecord) -> Result<()> {
        match &self.audit_logger {
            Some(logger) => logger.log(record),
            None => Ok(()),
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            estimator: DistributionEstimator::default(),
            audit_logger: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checksum;
    use crate::core::estimation::Density;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn personal(birthdate: NaiveDate, sex_digit: u8) -> Pin {
        codec::encode(birthdate, 32, sex_digit).unwrap()
    }

    fn spread_source(n: usize) -> Vec<Pin> {
        (0..n)
            .map(|i| {
                let birthdate = date(1960, 1, 1) + chrono::Duration::days(i as i64 * 211);
                personal(birthdate, (i % 10) as u8)
            })
            .collect()
    }

    /// Strategy that refuses to fit, to observe when fitting happens
    struct RefusingEstimator;

    impl DensityEstimator for RefusingEstimator {
        fn fit(&self, _samples: &[f64]) -> Result<Box<dyn Density>> {
            Err(PinError::Estimation("fitting disabled".to_string()))
        }

        fn name(&self) -> &'static str {
            "refusing"
        }
    }

    #[test]
    fn test_generate_ten_day_window_all_male() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(1);
        let (lower, upper) = (date(1990, 1, 1), date(1990, 1, 10));
        let request = GenerateRequest::new(5, lower, upper).with_male_prob(1.0);

        let batch = generator.generate(&request, &mut rng).unwrap();
        assert_eq!(batch.len(), 5);
        assert!(batch.is_non_personal());

        let distinct: HashSet<&Pin> = batch.iter().collect();
        assert_eq!(distinct.len(), 5);
        for pin in &batch {
            let fields = codec::decode(pin).unwrap();
            assert!(fields.sex_digit % 2 == 1);
            assert!(fields.birthdate >= lower && fields.birthdate <= upper);
            assert!((88..=99).contains(&fields.serial_band));
        }
    }

    #[test]
    fn test_generated_pins_are_valid_and_non_personal() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(2);
        let request = GenerateRequest::new(2_000, date(1940, 1, 1), date(2020, 12, 31));

        let batch = generator.generate(&request, &mut rng).unwrap();
        assert!(batch.iter().all(checksum::verify));
        assert!(batch.iter().all(Pin::is_non_personal));
    }

    #[test]
    fn test_generate_fills_single_day_to_capacity() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let day = date(2001, 5, 17);
        let request = GenerateRequest::new(60, day, day).with_male_prob(0.0);

        let batch = generator.generate(&request, &mut rng).unwrap();
        let distinct: HashSet<&Pin> = batch.iter().collect();
        assert_eq!(distinct.len(), 60);
    }

    #[test]
    fn test_generate_reaches_rare_sex_on_full_day() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(14);
        let day = date(2001, 5, 17);
        let request = GenerateRequest::new(61, day, day).with_male_prob(0.01);

        let batch = generator.generate(&request, &mut rng).unwrap();
        assert_eq!(batch.iter().collect::<HashSet<_>>().len(), 61);
        assert!(batch.iter().any(|pin| pin.sex().is_male()));
    }

    #[test]
    fn test_generate_beyond_capacity_is_exhaustion() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(4);
        let day = date(2001, 5, 17);
        let request = GenerateRequest::new(61, day, day).with_male_prob(1.0);

        let err = generator.generate(&request, &mut rng).unwrap_err();
        assert!(matches!(err, PinError::Exhaustion(_)));

        let without_uniqueness = request.with_unique(false);
        assert_eq!(
            generator
                .generate(&without_uniqueness, &mut rng)
                .unwrap()
                .len(),
            61
        );
    }

    #[test]
    fn test_generate_zero_still_validates() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(5);
        let (lower, upper) = (date(1990, 1, 1), date(1990, 1, 10));

        let empty = generator
            .generate(&GenerateRequest::new(0, lower, upper), &mut rng)
            .unwrap();
        assert!(empty.is_empty());
        assert!(empty.is_non_personal());

        let bad_prob = GenerateRequest::new(0, lower, upper).with_male_prob(1.5);
        assert!(matches!(
            generator.generate(&bad_prob, &mut rng),
            Err(PinError::InvalidParameter(_))
        ));

        let reversed = GenerateRequest::new(0, upper, lower);
        assert!(matches!(
            generator.generate(&reversed, &mut rng),
            Err(PinError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut config = GeneratorConfig::default();
        config.seed = Some(42);
        let generator = Generator::new(config).unwrap();
        let request = GenerateRequest::new(20, date(1950, 1, 1), date(1999, 12, 31));

        let first = generator.generate(&request, &mut generator.rng()).unwrap();
        let second = generator.generate(&request, &mut generator.rng()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_anonymize_repeated_pin_yields_one_value() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(6);
        let p = Pin::new("196408233233").unwrap();
        let request = AnonymizeRequest::new(vec![p.clone(), p.clone(), p]);

        let batch = generator.anonymize(&request, &mut rng).unwrap();
        assert_eq!(batch.len(), 3);
        let distinct: HashSet<&Pin> = batch.iter().collect();
        assert_eq!(distinct.len(), 1);

        let fields = codec::decode(&batch.pins()[0]).unwrap();
        assert_eq!(fields.birthdate, date(1964, 8, 23));
        assert!(fields.sex().is_male());
    }

    #[test]
    fn test_anonymize_keeps_relations() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let base = spread_source(30);
        let mut source = base.clone();
        source.extend(base.iter().take(10).cloned());
        source.push(base[3].clone());

        let batch = generator
            .anonymize(&AnonymizeRequest::new(source.clone()), &mut rng)
            .unwrap();
        let output = batch.pins();
        assert_eq!(output.len(), source.len());

        for i in 0..source.len() {
            for j in 0..source.len() {
                if source[i] == source[j] {
                    assert_eq!(output[i], output[j]);
                } else {
                    assert_ne!(output[i], output[j]);
                }
            }
        }
    }

    #[test]
    fn test_anonymize_without_relations_keeps_length() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(8);
        let p = Pin::new("196408233233").unwrap();
        let request = AnonymizeRequest::new(vec![p.clone(), p.clone(), p]).with_keep_rel(false);

        let batch = generator.anonymize(&request, &mut rng).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(Pin::is_non_personal));
        let distinct: HashSet<&Pin> = batch.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_anonymize_respects_observed_bounds() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(9);
        let source = spread_source(40);
        let dates: Vec<NaiveDate> = source
            .iter()
            .map(|p| codec::decode(p).unwrap().birthdate)
            .collect();
        let lower = *dates.iter().min().unwrap();
        let upper = *dates.iter().max().unwrap();

        let request = AnonymizeRequest::new(source).with_bounds(lower, upper);
        let batch = generator.anonymize(&request, &mut rng).unwrap();
        for pin in &batch {
            let birthdate = codec::decode(pin).unwrap().birthdate;
            assert!(birthdate >= lower && birthdate <= upper);
        }
    }

    #[test]
    fn test_fit_skipped_only_when_fully_specified() {
        let generator = Generator::default().with_density_estimator(Arc::new(RefusingEstimator));
        let mut rng = StdRng::seed_from_u64(10);
        let source = spread_source(10);

        let fully = AnonymizeRequest::new(source.clone())
            .with_bounds(date(1970, 1, 1), date(1970, 12, 31))
            .with_male_prob(0.5);
        assert_eq!(generator.anonymize(&fully, &mut rng).unwrap().len(), 10);

        let partial = AnonymizeRequest::new(source)
            .with_bounds(date(1970, 1, 1), date(1970, 12, 31));
        assert!(matches!(
            generator.anonymize(&partial, &mut rng),
            Err(PinError::Estimation(_))
        ));
    }

    #[test]
    fn test_anonymize_rejects_bad_source_pin() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(11);
        let source = vec![
            Pin::new("196408233233").unwrap(),
            Pin::new("196408233235").unwrap(),
        ];

        let err = generator
            .anonymize(&AnonymizeRequest::new(source), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PinError::Decoding(_)));
    }

    #[test]
    fn test_anonymize_empty_source() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(12);

        let batch = generator
            .anonymize(&AnonymizeRequest::new(Vec::new()), &mut rng)
            .unwrap();
        assert!(batch.is_empty());

        let bad = AnonymizeRequest::new(Vec::new()).with_male_prob(-0.1);
        assert!(generator.anonymize(&bad, &mut rng).is_err());
    }

    #[test]
    fn test_execute_dispatches_both_modes() {
        let generator = Generator::default();
        let mut rng = StdRng::seed_from_u64(13);

        let fresh: GenerationRequest =
            GenerateRequest::new(3, date(1990, 1, 1), date(1990, 1, 2)).into();
        assert_eq!(generator.execute(&fresh, &mut rng).unwrap().len(), 3);

        let anonymize: GenerationRequest =
            AnonymizeRequest::new(vec![Pin::new("196408233233").unwrap()]).into();
        assert_eq!(generator.execute(&anonymize, &mut rng).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.unique_retry_factor = 0;
        assert!(matches!(
            Generator::new(config),
            Err(PinError::Configuration(_))
        ));
    }
}
