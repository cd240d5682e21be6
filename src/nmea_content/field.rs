//! # Field Codec
//!
//! Fixed-width textual representations of individual NMEA fields.
//!
//! Encoders return text fragments without any checksum. An absent optional
//! input always encodes to empty slots, never to a missing slot, so the comma
//! count of a sentence does not depend on which fields are known.
//!
//! Decoders are lenient: unreadable numbers decode to `0`, unreadable times,
//! dates and coordinates decode to `None`.

use std::fmt::Display;

use nom::{
    Parser, character::complete::u8, error::ErrorKind, number::complete::double,
};

use crate::parsing::{consumed, float_or_zero, with_take};

/// Metres per foot, for altitudes reported in `F` units.
const FEET_TO_METRES: f64 = 0.3048;

/// Encodes a latitude in decimal degrees (positive north) as `DDMM.mmm,H`.
///
/// `precision` is the number of fractional minute digits.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_latitude;
///
/// assert_eq!(encode_latitude(Some(52.537525), 3), "5232.252,N");
/// assert_eq!(encode_latitude(Some(52.537525), 5), "5232.25150,N");
/// assert_eq!(encode_latitude(None, 3), ",");
/// ```
pub fn encode_latitude(latitude: Option<f64>, precision: usize) -> String {
    encode_coordinate(latitude, precision, 2, ('N', 'S'))
}

/// Encodes a longitude in decimal degrees (positive east) as `DDDMM.mmm,H`.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_longitude;
///
/// assert_eq!(encode_longitude(Some(13.365217), 3), "01321.913,E");
/// assert_eq!(encode_longitude(Some(-122.5), 3), "12230.000,W");
/// ```
pub fn encode_longitude(longitude: Option<f64>, precision: usize) -> String {
    encode_coordinate(longitude, precision, 3, ('E', 'W'))
}

fn encode_coordinate(
    value: Option<f64>,
    precision: usize,
    degree_width: usize,
    (positive, negative): (char, char),
) -> String {
    let Some(value) = value else {
        return ",".into();
    };

    let (hemisphere, value) = if value < 0.0 {
        (negative, -value)
    } else {
        (positive, value)
    };

    let width = if precision == 0 { 2 } else { precision + 3 };
    let mut degrees = value.trunc();
    let mut minutes = format!("{:0width$.precision$}", (value - degrees) * 60.0);

    // Rounding may push the minutes up to 60, which belongs to the next degree.
    if minutes.starts_with("60") {
        degrees += 1.0;
        minutes = format!("{:0width$.precision$}", 0.0);
    }

    format!("{:0degree_width$}{minutes},{hemisphere}", degrees as u32)
}

/// Decodes an NMEA latitude (`DDMM.mmm` plus `N`/`S`) into decimal degrees.
///
/// The number of degree digits is inferred from the length of the integer
/// part: 4 digits carry 2 degree digits, 3 digits carry 1, anything else is
/// read as minutes only. The result is rounded to 8 fractional digits.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::decode_latitude;
///
/// assert_eq!(decode_latitude("5232.25150", "N"), Some(52.537525));
/// assert_eq!(decode_latitude("5232.25150", "S"), Some(-52.537525));
/// assert_eq!(decode_latitude("", "N"), None);
/// ```
pub fn decode_latitude(value: &str, hemisphere: &str) -> Option<f64> {
    decode_coordinate(value, hemisphere, "N", |integer_len| match integer_len {
        4 => 2,
        3 => 1,
        _ => 0,
    })
}

/// Decodes an NMEA longitude (`DDDMM.mmm` plus `E`/`W`) into decimal degrees.
///
/// Same as [`decode_latitude`] with up to 3 degree digits.
pub fn decode_longitude(value: &str, hemisphere: &str) -> Option<f64> {
    decode_coordinate(value, hemisphere, "E", |integer_len| match integer_len {
        5 => 3,
        4 => 2,
        3 => 1,
        _ => 0,
    })
}

fn decode_coordinate(
    value: &str,
    hemisphere: &str,
    positive: &str,
    degree_digits: impl Fn(usize) -> usize,
) -> Option<f64> {
    if value.is_empty() || hemisphere.is_empty() || !value.is_ascii() {
        return None;
    }

    let integer_len = value.find('.').unwrap_or(value.len());
    let (degrees, minutes) = value.split_at(degree_digits(integer_len));
    let sign = if hemisphere == positive { 1.0 } else { -1.0 };

    Some(round8(
        sign * (float_or_zero(degrees) + float_or_zero(minutes) / 60.0),
    ))
}

fn round8(value: f64) -> f64 {
    (value * 1e8).round() / 1e8
}

/// Encodes an altitude in metres as `A.A,M`; absent altitudes keep the unit slot.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_altitude;
///
/// assert_eq!(encode_altitude(Some(545.43)), "545.4,M");
/// assert_eq!(encode_altitude(None), ",M");
/// ```
pub fn encode_altitude(altitude: Option<f64>) -> String {
    match altitude {
        Some(altitude) => format!("{altitude:.1},M"),
        None => ",M".into(),
    }
}

/// Decodes an altitude, converting feet (`F`) to metres.
pub fn decode_altitude(value: &str, unit: &str) -> f64 {
    let altitude = float_or_zero(value);

    if unit == "F" {
        altitude * FEET_TO_METRES
    } else {
        altitude
    }
}

/// Encodes a magnetic variation (negative west) as `VVV.V,H`.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_magnetic_variation;
///
/// assert_eq!(encode_magnetic_variation(Some(-4.2)), "004.2,W");
/// assert_eq!(encode_magnetic_variation(None), ",");
/// ```
pub fn encode_magnetic_variation(variation: Option<f64>) -> String {
    match variation {
        Some(variation) => {
            let hemisphere = if variation < 0.0 { 'W' } else { 'E' };
            format!("{:05.1},{hemisphere}", variation.abs())
        }
        None => ",".into(),
    }
}

/// Decodes a magnetic variation; west is negative.
pub fn decode_magnetic_variation(value: &str, hemisphere: &str) -> f64 {
    let variation = float_or_zero(value);

    if hemisphere == "W" { -variation } else { variation }
}

/// Encodes an angle in degrees as `DDD.D`.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_degrees;
///
/// assert_eq!(encode_degrees(Some(83.5)), "083.5");
/// assert_eq!(encode_degrees(None), "");
/// ```
pub fn encode_degrees(degrees: Option<f64>) -> String {
    degrees.map_or_else(String::new, |degrees| format!("{degrees:05.1}"))
}

/// Encodes a speed in knots as `SSS.S`.
pub fn encode_knots(knots: Option<f64>) -> String {
    encode_degrees(knots)
}

/// Encodes a number with a fixed count of decimals.
pub fn encode_fixed(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(String::new, |value| format!("{value:.decimals$}"))
}

/// Encodes an integer zero-padded to `width` digits.
pub fn encode_padded_int(value: Option<i64>, width: usize) -> String {
    value.map_or_else(String::new, |value| format!("{value:0width$}"))
}

/// Encodes any value with its plain textual form.
pub fn encode_value<T: Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |value| value.to_string())
}

/// Encodes a UTC time of day as `HHMMSS.mmm`.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_time;
/// use time::macros::time;
///
/// assert_eq!(encode_time(Some(time!(21:59:09.285))), "215909.285");
/// assert_eq!(encode_time(None), "");
/// ```
pub fn encode_time(time: Option<time::Time>) -> String {
    time.map_or_else(String::new, |time| {
        format!(
            "{:02}{:02}{:02}.{:03}",
            time.hour(),
            time.minute(),
            time.second(),
            time.millisecond()
        )
    })
}

/// Encodes a UTC date as `DDMMYY`.
///
/// ```rust
/// use nmea0183_codec::nmea_content::field::encode_date;
/// use time::macros::date;
///
/// assert_eq!(encode_date(Some(date!(2016 - 12 - 25))), "251216");
/// ```
pub fn encode_date(date: Option<time::Date>) -> String {
    date.map_or_else(String::new, |date| {
        format!(
            "{:02}{:02}{:02}",
            date.day(),
            u8::from(date.month()),
            date.year().rem_euclid(100)
        )
    })
}

/// Decodes `HHMMSS[.sss]` into a time of day, rounded to milliseconds.
pub fn decode_time(token: &str) -> Option<time::Time> {
    let parsed: nom::IResult<&str, (u8, u8, f64)> = (
        with_take(2u8, u8),
        with_take(2u8, u8),
        consumed(double, ErrorKind::Float),
    )
        .parse(token);
    let (_, (hour, minute, second)) = parsed.ok()?;

    if !(0.0..60.0).contains(&second) {
        return None;
    }

    let millisecond = ((second.fract() * 1000.0).round() as u16).min(999);

    time::Time::from_hms_milli(hour, minute, second.trunc() as u8, millisecond).ok()
}

/// Decodes `DDMMYY` into a date, expanding the year against `current_year`.
pub fn decode_date(token: &str, current_year: i32) -> Option<time::Date> {
    let parsed: nom::IResult<&str, (u8, u8, u8)> = consumed(
        (with_take(2u8, u8), with_take(2u8, u8), with_take(2u8, u8)),
        ErrorKind::Eof,
    )
    .parse(token);
    let (_, (day, month, year)) = parsed.ok()?;

    let month = time::Month::try_from(month).ok()?;
    let year = year_to_full_year(year, current_year);

    time::Date::from_calendar_date(year, month, day).ok()
}

/// Expands a two-digit year.
///
/// Years up to the current two-digit year belong to the current century,
/// later ones to the previous century. Dates more than 100 years old cannot be
/// told apart from recent ones.
///
/// ```rust
/// use nmea0183_codec::year_to_full_year;
///
/// assert_eq!(year_to_full_year(16, 2024), 2016);
/// assert_eq!(year_to_full_year(25, 2024), 1925);
/// ```
pub fn year_to_full_year(year: u8, current_year: i32) -> i32 {
    let current_two_digit = current_year.rem_euclid(100);
    let century = current_year - current_two_digit;
    let year = i32::from(year);

    if year <= current_two_digit {
        century + year
    } else {
        century - 100 + year
    }
}

/// The current UTC year.
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("coordinate should decode");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_encode_latitude() {
        assert_eq!(encode_latitude(Some(52.537525), 3), "5232.252,N");
        assert_eq!(encode_latitude(Some(-33.8688), 3), "3352.128,S");
        assert_eq!(encode_latitude(Some(52.1), 3), "5206.000,N");
        assert_eq!(encode_latitude(Some(0.0), 3), "0000.000,N");
        assert_eq!(encode_latitude(Some(5.5), 0), "0530,N");
    }

    #[test]
    fn test_encode_latitude_minute_carry() {
        assert_eq!(encode_latitude(Some(52.99999999), 3), "5300.000,N");
    }

    #[test]
    fn test_encode_longitude() {
        assert_eq!(encode_longitude(Some(13.365217), 3), "01321.913,E");
        assert_eq!(encode_longitude(Some(-0.5), 2), "00030.00,W");
        assert_eq!(encode_longitude(None, 3), ",");
    }

    #[test]
    fn test_decode_coordinates() {
        assert_close(decode_latitude("5232.25150", "N"), 52.537525);
        assert_close(decode_latitude("532.25", "N"), 5.5375);
        assert_close(decode_latitude("32.25", "N"), 0.5375);
        assert_close(decode_longitude("01321.913", "E"), 13.36521667);
        assert_close(decode_longitude("12230.000", "W"), -122.5);
        assert_close(decode_longitude("4404.14036", "E"), 44.0690060);
        assert_eq!(decode_longitude("01321.913", ""), None);
    }

    #[test]
    fn test_decode_latitude_round_trip() {
        for latitude in [52.537525, -33.8688, 0.25, 89.999] {
            let encoded = encode_latitude(Some(latitude), 5);
            let (value, hemisphere) = encoded.split_once(',').unwrap();
            assert_close(decode_latitude(value, hemisphere), latitude);
        }
    }

    #[test]
    fn test_altitude() {
        assert_eq!(encode_altitude(Some(0.0)), "0.0,M");
        assert_eq!(encode_altitude(Some(-21.34)), "-21.3,M");
        assert!((decode_altitude("100", "F") - 30.48).abs() < 1e-9);
        assert_eq!(decode_altitude("100", "M"), 100.0);
        assert_eq!(decode_altitude("", "M"), 0.0);
    }

    #[test]
    fn test_magnetic_variation() {
        assert_eq!(encode_magnetic_variation(Some(12.3)), "012.3,E");
        assert_eq!(decode_magnetic_variation("004.2", "W"), -4.2);
        assert_eq!(decode_magnetic_variation("004.2", "E"), 4.2);
        assert_eq!(decode_magnetic_variation("", ""), 0.0);
    }

    #[test]
    fn test_fixed_width_numbers() {
        assert_eq!(encode_knots(Some(0.2)), "000.2");
        assert_eq!(encode_degrees(Some(359.9)), "359.9");
        assert_eq!(encode_fixed(Some(1.0), 1), "1.0");
        assert_eq!(encode_fixed(None, 1), "");
        assert_eq!(encode_padded_int(Some(8), 2), "08");
        assert_eq!(encode_padded_int(Some(120), 3), "120");
        assert_eq!(encode_value(Some(42)), "42");
        assert_eq!(encode_value::<i64>(None), "");
    }

    #[test]
    fn test_time() {
        assert_eq!(encode_time(Some(time!(01:02:03))), "010203.000");
        assert_eq!(decode_time("215909.285"), Some(time!(21:59:09.285)));
        assert_eq!(decode_time("215909"), Some(time!(21:59:09)));
        assert_eq!(decode_time("092725.00"), Some(time!(09:27:25)));
        assert_eq!(decode_time("2159"), None);
        assert_eq!(decode_time("256000"), None);
        assert_eq!(decode_time(""), None);
    }

    #[test]
    fn test_date() {
        assert_eq!(encode_date(Some(date!(2001 - 02 - 03))), "030201");
        assert_eq!(decode_date("251216", 2024), Some(date!(2016 - 12 - 25)));
        assert_eq!(decode_date("010199", 2024), Some(date!(1999 - 01 - 01)));
        assert_eq!(decode_date("321216", 2024), None);
        assert_eq!(decode_date("251316", 2024), None);
        assert_eq!(decode_date("25121", 2024), None);
    }

    #[test]
    fn test_year_to_full_year() {
        assert_eq!(year_to_full_year(16, 2024), 2016);
        assert_eq!(year_to_full_year(24, 2024), 2024);
        assert_eq!(year_to_full_year(25, 2024), 1925);
        assert_eq!(year_to_full_year(0, 2000), 2000);
        assert_eq!(year_to_full_year(99, 2000), 1999);
    }
}
