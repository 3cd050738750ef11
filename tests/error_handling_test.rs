//! Error taxonomy and propagation tests

use chrono::NaiveDate;
use pnr_synth::core::codec;
use pnr_synth::core::generator::{AnonymizeRequest, GenerateRequest, Generator};
use pnr_synth::core::sampling::birth_number;
use pnr_synth::domain::{Pin, PinError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_case::test_case;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test_case("19640823323" ; "eleven digits")]
#[test_case("1964082332335" ; "thirteen digits")]
#[test_case("19640823-3234" ; "separator")]
#[test_case("19640823323x" ; "letter")]
#[test_case("" ; "empty")]
fn test_malformed_pin_strings(raw: &str) {
    assert!(matches!(Pin::new(raw), Err(PinError::Decoding(_))));
}

#[test_case("196408233235" ; "wrong check digit")]
#[test_case("196413233236" ; "month thirteen")]
#[test_case("000001010008" ; "year zero")]
fn test_undecodable_pins(raw: &str) {
    assert!(matches!(codec::decode_str(raw), Err(PinError::Decoding(_))));
}

#[test]
fn test_parameter_errors_are_classified() {
    let mut rng = StdRng::seed_from_u64(0);
    let generator = Generator::default();

    let bad_prob = generator
        .generate(
            &GenerateRequest::new(1, date(1990, 1, 1), date(1990, 1, 2)).with_male_prob(-0.5),
            &mut rng,
        )
        .unwrap_err();
    assert!(bad_prob.is_parameter_error());

    let reversed = generator
        .generate(
            &GenerateRequest::new(1, date(1990, 1, 2), date(1990, 1, 1)),
            &mut rng,
        )
        .unwrap_err();
    assert!(matches!(reversed, PinError::InvalidRange { .. }));
    assert!(reversed.is_parameter_error());

    assert!(birth_number::sample(f64::NAN, &mut rng)
        .unwrap_err()
        .is_parameter_error());
    assert!(!PinError::Exhaustion("full".to_string()).is_parameter_error());
}

#[test]
fn test_bad_source_pin_aborts_whole_call() {
    let generator = Generator::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut source: Vec<Pin> = (0..10)
        .map(|i| codec::encode(date(1970, 1, 1 + i), 20, 1).unwrap())
        .collect();
    source.push(Pin::new("196408233235").unwrap());

    let err = generator
        .anonymize(&AnonymizeRequest::new(source), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PinError::Decoding(_)));
}

#[test]
fn test_encoding_rejects_out_of_range_fields() {
    assert!(matches!(
        codec::encode(date(10_000, 1, 1), 90, 1),
        Err(PinError::Encoding(_))
    ));
    assert!(matches!(
        codec::encode(date(1990, 1, 1), 100, 1),
        Err(PinError::Encoding(_))
    ));
    assert!(matches!(
        codec::encode(date(1990, 1, 1), 90, 10),
        Err(PinError::Encoding(_))
    ));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = codec::decode_str("196408233235").unwrap_err();
    assert!(err.to_string().contains("196408233235"));

    let mut rng = StdRng::seed_from_u64(2);
    let day = date(2000, 1, 1);
    let err = Generator::default()
        .generate(
            &GenerateRequest::new(121, day, day).with_male_prob(0.5),
            &mut rng,
        )
        .unwrap_err();
    assert!(matches!(err, PinError::Exhaustion(_)));
    assert!(err.to_string().contains("121"));
}
