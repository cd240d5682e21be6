//! # Parsing Utilities
//!
//! This module provides the small `nom` building blocks shared by the framing
//! and field codec: complete-consumption checks, fixed-width digit groups and
//! the lenient numeric scanners used for sparsely populated fields.

use nom::{
    Err, Input, Mode, OutputMode, PResult, Parser, ToUsize,
    bytes::complete::take,
    error::{ErrorKind, ParseError},
    number::complete::double,
};

/// Ensures that the parser consumes all input.
///
/// This combinator runs the provided parser and then checks that nothing is
/// left of the input.
///
/// # Arguments
///
/// * `f` - The parser to run
/// * `e` - Error kind to return if input is not fully consumed
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::parsing::consumed;
/// use nom::{IResult, Parser, bytes::complete::take, error::ErrorKind};
///
/// // Parse all 3 bytes
/// let mut parser = consumed(take(3u8), ErrorKind::Count);
/// let result: IResult<_, _> = parser.parse("abc");
/// assert!(result.is_ok());
///
/// // This would fail because not all input is consumed
/// let result: IResult<_, _> = parser.parse("abcd");
/// assert!(result.is_err());
/// ```
pub fn consumed<I, E: ParseError<I>, F>(
    f: F,
    e: ErrorKind,
) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = E>
where
    I: Input,
    F: Parser<I, Error = E>,
{
    Consumed { f, e }
}

/// Takes exactly `count` items and runs `f` on them, which must consume all of them.
///
/// Used for the fixed-width digit groups of `hhmmss` and `ddmmyy` fields.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::parsing::with_take;
/// use nom::{IResult, Parser, character::complete::u8};
///
/// let result: IResult<_, _> = (with_take(2u8, u8), with_take(2u8, u8)).parse("2159");
/// assert_eq!(result, Ok(("", (21, 59))));
///
/// let result: IResult<_, _> = with_take(2u8, u8).parse("2x59");
/// assert!(result.is_err());
/// ```
pub fn with_take<I, E, F, C>(count: C, f: F) -> impl Parser<I, Output = F::Output, Error = E>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = E>,
    C: ToUsize,
{
    take(count).and_then(consumed(f, ErrorKind::Digit))
}

/// Reads the leading decimal number of a field, treating anything unreadable as `0`.
///
/// Empty fields are common in real receiver output; they are not errors.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::parsing::float_or_zero;
///
/// assert_eq!(float_or_zero("545.4"), 545.4);
/// assert_eq!(float_or_zero("1.5M"), 1.5);
/// assert_eq!(float_or_zero(""), 0.0);
/// assert_eq!(float_or_zero("n/a"), 0.0);
/// ```
pub fn float_or_zero(token: &str) -> f64 {
    let result: nom::IResult<&str, f64> = double(token);

    match result {
        Ok((_, value)) if value.is_finite() => value,
        _ => {
            if !token.is_empty() {
                tracing::trace!(token, "unreadable numeric field, using 0");
            }
            0.0
        }
    }
}

/// Reads the leading integer of a field, treating anything unreadable as `0`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::parsing::int_or_zero;
///
/// assert_eq!(int_or_zero("08"), 8);
/// assert_eq!(int_or_zero("-3"), -3);
/// assert_eq!(int_or_zero(""), 0);
/// ```
pub fn int_or_zero(token: &str) -> i64 {
    let result: nom::IResult<&str, i64> = nom::character::complete::i64(token);

    match result {
        Ok((_, value)) => value,
        Err(_) => {
            if !token.is_empty() {
                tracing::trace!(token, "unreadable integer field, using 0");
            }
            0
        }
    }
}

struct Consumed<F> {
    f: F,
    e: ErrorKind,
}

impl<I, F> Parser<I> for Consumed<F>
where
    I: Input,
    F: Parser<I>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = <F as Parser<I>>::Error;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| {
                <F as Parser<I>>::Error::from_error_kind(i, self.e)
            })));
        }

        Ok((i, o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_or_zero_prefix() {
        assert_eq!(float_or_zero("1.0"), 1.0);
        assert_eq!(float_or_zero("-21.3"), -21.3);
        assert_eq!(float_or_zero("004.2"), 4.2);
        assert_eq!(float_or_zero("12,"), 12.0);
        assert_eq!(float_or_zero("."), 0.0);
        assert_eq!(float_or_zero("inf"), 0.0);
    }

    #[test]
    fn test_int_or_zero_prefix() {
        assert_eq!(int_or_zero("12"), 12);
        assert_eq!(int_or_zero("1.5"), 1);
        assert_eq!(int_or_zero("A8"), 0);
    }

    #[test]
    fn test_with_take_short_input() {
        let result: nom::IResult<_, _> =
            with_take(2u8, nom::character::complete::u8).parse("2");
        assert!(result.is_err());
    }
}
