//! PIN encoding and decoding
//!
//! Encodes `(birthdate, serial_band, sex_digit)` into the canonical
//! `YYYYMMDDNNNC` form and decodes an existing PIN back into its fields.
//! Coordination numbers (day of month + 60) decode to their real birthdate.

use super::checksum::{self, PAYLOAD_LENGTH};
use crate::domain::{Pin, PinError, PinFields, Result, PIN_LENGTH};
use chrono::{Datelike, NaiveDate};

/// Earliest representable calendar year (four-digit year field)
pub const MIN_YEAR: i32 = 1;

/// Latest representable calendar year
pub const MAX_YEAR: i32 = 9999;

/// Day-of-month offset marking a coordination number
pub const COORDINATION_OFFSET: u32 = 60;

/// Encodes fields into a PIN, appending the check digit
///
/// # Errors
///
/// Returns [`PinError::Encoding`] if the birthdate year lies outside
/// `MIN_YEAR..=MAX_YEAR`, `serial_band` exceeds 99 or `sex_digit` exceeds 9.
///
/// # Examples
///
/// ```
/// use pnr_synth::core::codec;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
/// let pin = codec::encode(date, 89, 3).unwrap();
/// assert_eq!(pin.as_str(), "199001018936");
/// ```
pub fn encode(birthdate: NaiveDate, serial_band: u8, sex_digit: u8) -> Result<Pin> {
    encode_fields(&PinFields::new(birthdate, serial_band, sex_digit))
}

/// Encodes decoded fields, re-applying the coordination offset when set
pub fn encode_fields(fields: &PinFields) -> Result<Pin> {
    let date = fields.birthdate;
    let year = date.year();
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PinError::Encoding(format!(
            "birthdate {date} is outside the representable years {MIN_YEAR}..={MAX_YEAR}"
        )));
    }
    if fields.serial_band > 99 {
        return Err(PinError::Encoding(format!(
            "serial band {} is not a two-digit value",
            fields.serial_band
        )));
    }
    if fields.sex_digit > 9 {
        return Err(PinError::Encoding(format!(
            "sex digit {} is not a single digit",
            fields.sex_digit
        )));
    }

    let day = if fields.coordination {
        date.day() + COORDINATION_OFFSET
    } else {
        date.day()
    };
    let year = year as u32;

    let mut digits = [0u8; PIN_LENGTH];
    let parts = [
        year / 1000,
        year / 100 % 10,
        year / 10 % 10,
        year % 10,
        date.month() / 10,
        date.month() % 10,
        day / 10,
        day % 10,
        u32::from(fields.serial_band / 10),
        u32::from(fields.serial_band % 10),
        u32::from(fields.sex_digit),
    ];
    for (slot, part) in digits.iter_mut().zip(parts) {
        *slot = part as u8;
    }

    let mut payload = [0u8; PAYLOAD_LENGTH];
    payload.copy_from_slice(&digits[..PAYLOAD_LENGTH]);
    digits[PAYLOAD_LENGTH] = checksum::compute(&payload);

    Ok(Pin::from_digits(&digits))
}

/// Decodes a PIN into its fields
///
/// # Errors
///
/// Returns [`PinError::Decoding`] if the check digit does not match or the
/// birthdate part is not a calendar-valid date.
pub fn decode(pin: &Pin) -> Result<PinFields> {
    if !checksum::verify(pin) {
        return Err(PinError::Decoding(format!(
            "PIN {pin} fails checksum verification"
        )));
    }

    let d = pin.digits();
    let number = |range: std::ops::Range<usize>| {
        d[range]
            .iter()
            .fold(0u32, |acc, &digit| acc * 10 + u32::from(digit))
    };

    let year = number(0..4) as i32;
    let month = number(4..6);
    let raw_day = number(6..8);
    let (day, coordination) = if raw_day > COORDINATION_OFFSET {
        (raw_day - COORDINATION_OFFSET, true)
    } else {
        (raw_day, false)
    };

    if year < MIN_YEAR {
        return Err(PinError::Decoding(format!(
            "PIN {pin} has year {year:04}, outside the representable range"
        )));
    }
    let birthdate = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PinError::Decoding(format!(
            "PIN {pin} does not encode a valid date ({year:04}-{month:02}-{day:02})"
        ))
    })?;

    Ok(PinFields {
        birthdate,
        serial_band: d[8] * 10 + d[9],
        sex_digit: d[10],
        coordination,
    })
}

/// Parses and decodes a canonical PIN string
pub fn decode_str(raw: &str) -> Result<PinFields> {
    let pin: Pin = raw.parse()?;
    decode(&pin)
}
