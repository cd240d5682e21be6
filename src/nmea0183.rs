//! # NMEA 0183 Framing
//!
//! This module handles the outer structure of an NMEA 0183 sentence,
//! `$IIIII,D1,D2,...,Dn*CC\r\n`: line endings, the `*CC` checksum suffix and
//! the XOR checksum itself.
//!
//! The framing is configurable to handle variations in:
//! - Checksum requirements (required or optional)
//! - Line ending requirements (CRLF required, optional or forbidden)

use nom::{Parser, bytes::complete::take, error::ErrorKind, number::complete::hex_u32};

use crate::{Error, parsing::consumed};

/// Defines how the decoder should handle NMEA message checksums.
///
/// NMEA 0183 messages can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the '$' prefix and '*' delimiter).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Checksum is required and must be present.
    ///
    /// Decoding fails with [`Error::MissingChecksum`] if no `*CC` is found.
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// Receivers and hand-written logs frequently drop the suffix, so this is
    /// the default.
    #[default]
    Optional,
}

/// Defines how the decoder should handle CRLF line endings.
///
/// NMEA 0183 messages typically end with a carriage return and line feed (`\r\n`),
/// but sentences split out of a log file or typed by hand usually do not.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// The sentence must end with `\r\n`.
    Required,

    /// A trailing `\r\n` (or a bare `\n`) is stripped when present.
    #[default]
    Optional,

    /// The sentence must not end with a line terminator.
    Forbidden,
}

/// A sentence split into its body and the checksum found after `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Everything before `*`, including the leading `$`.
    pub body: &'a str,
    /// The checksum carried by the sentence, already verified against `body`.
    pub checksum: Option<u8>,
}

/// Splits a raw sentence into its body and verified checksum.
///
/// The checksum is verified before anything looks at the sentence content, so
/// a corrupted sentence never reaches a sentence-specific parser.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::{ChecksumMode, Error, LineEndingMode, frame};
///
/// let framed = frame("$GPGGA,data*6A\r\n", ChecksumMode::Required, LineEndingMode::Optional).unwrap();
/// assert_eq!(framed.body, "$GPGGA,data");
/// assert_eq!(framed.checksum, Some(0x6A));
///
/// let corrupted = frame("$GPGGA,dat4*6A", ChecksumMode::Optional, LineEndingMode::Optional);
/// assert!(matches!(corrupted, Err(Error::ChecksumMismatch { .. })));
/// ```
pub fn frame(sentence: &str, cc: ChecksumMode, le: LineEndingMode) -> Result<Frame<'_>, Error> {
    if !sentence.is_ascii() {
        return Err(Error::NotText);
    }

    let sentence = line_ending(sentence, le)?;

    match sentence.split_once('*') {
        Some((body, suffix)) => {
            let found =
                parse_checksum(suffix).ok_or_else(|| Error::MalformedChecksum(suffix.into()))?;
            let expected = body_checksum(body);

            if found != expected {
                return Err(Error::ChecksumMismatch { expected, found });
            }

            Ok(Frame {
                body,
                checksum: Some(found),
            })
        }
        None if cc == ChecksumMode::Required => Err(Error::MissingChecksum),
        None => Ok(Frame {
            body: sentence,
            checksum: None,
        }),
    }
}

/// Strips or rejects the line terminator according to `le`.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::{LineEndingMode, line_ending};
///
/// assert_eq!(line_ending("data\r\n", LineEndingMode::Required), Ok("data"));
/// assert_eq!(line_ending("data\n", LineEndingMode::Optional), Ok("data"));
/// assert!(line_ending("data\r\n", LineEndingMode::Forbidden).is_err());
/// ```
pub fn line_ending(sentence: &str, le: LineEndingMode) -> Result<&str, Error> {
    let data = match le {
        LineEndingMode::Required => sentence
            .strip_suffix("\r\n")
            .ok_or(Error::InvalidLineEnding)?,
        LineEndingMode::Optional => sentence
            .strip_suffix("\r\n")
            .or_else(|| sentence.strip_suffix('\n'))
            .unwrap_or(sentence),
        LineEndingMode::Forbidden => sentence,
    };

    // Terminators are only allowed at the very end.
    if data.contains(['\r', '\n']) {
        return Err(Error::InvalidLineEnding);
    }

    Ok(data)
}

/// Calculates the NMEA 0183 checksum for the given message content.
///
/// The checksum is the XOR of every byte between the '$' prefix and the '*'
/// delimiter, excluding both. `content` must already have both removed.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum(content: &str) -> u8 {
    content
        .bytes()
        .fold(0u8, |accumulated_xor, byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Computes the `*HH` suffix for a sentence body.
///
/// `body` is the exact text preceding `*`, starting with the `$` marker. The
/// first character is skipped; every following byte is folded into the XOR.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::compute_checksum;
///
/// assert_eq!(compute_checksum("$GPGGA,123456,data"), "*41");
/// ```
pub fn compute_checksum(body: &str) -> String {
    format!("*{}", format_checksum(body_checksum(body)))
}

/// Checks a sentence body against a two-digit hexadecimal checksum.
///
/// Returns `false` when `expected_hex` is not exactly two hex digits.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::verify_checksum;
///
/// assert!(verify_checksum("$GPGGA,123456,data", "41"));
/// assert!(!verify_checksum("$GPGGA,123457,data", "41"));
/// ```
pub fn verify_checksum(body: &str, expected_hex: &str) -> bool {
    parse_checksum(expected_hex) == Some(body_checksum(body))
}

fn body_checksum(body: &str) -> u8 {
    checksum(body.get(1..).unwrap_or(""))
}

fn parse_checksum(hex: &str) -> Option<u8> {
    let result: nom::IResult<&str, u32> = consumed(take(2u8), ErrorKind::Count)
        .and_then(consumed(hex_u32, ErrorKind::HexDigit))
        .parse(hex);

    result.ok().map(|(_, cc)| cc as u8)
}
