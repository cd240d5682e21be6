//! # Error Types
//!
//! This module defines the error type returned by every decode, encode and
//! registration operation of the codec.

use thiserror::Error;

/// Represents all possible errors that can occur while decoding or encoding
/// NMEA 0183 sentences.
///
/// Structural problems (framing, checksum, identifier, field count) fail the
/// whole sentence. Malformed numeric sub-fields inside an otherwise valid
/// sentence never produce an error; they degrade to `0` or to an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The provided input is not ASCII text.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    #[error("sentence is not ASCII text")]
    NotText,

    /// The sentence identifier is not exactly 5 characters long.
    #[error("malformed sentence identifier {0:?}")]
    MalformedIdentifier(String),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the expected checksum (calculated from the message content)
    /// and the actual checksum found in the message.
    #[error("checksum mismatch: calculated {expected:02X}, found {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },

    /// The text after `*` is not exactly two hexadecimal digits.
    #[error("malformed checksum {0:?}")]
    MalformedChecksum(String),

    /// The checksum is required but the sentence has no `*HH` suffix.
    #[error("sentence has no checksum")]
    MissingChecksum,

    /// The sentence violates the configured line ending mode.
    #[error("invalid line ending")]
    InvalidLineEnding,

    /// No parser or encoder is registered for the sentence identifier.
    #[error("unknown sentence type {0}")]
    UnknownSentenceType(String),

    /// The sentence has fewer comma-separated fields than its type requires.
    #[error("{id} needs at least {expected} fields, found {found}")]
    InsufficientFields {
        /// The sentence identifier
        id: String,
        /// Minimum token count for the sentence type, identifier included
        expected: usize,
        /// Token count actually found
        found: usize,
    },

    /// A record field handed to an encoder has the wrong type.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Description of the accepted value types
        expected: &'static str,
    },
}
