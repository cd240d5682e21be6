//! # NMEA 0183 Codec
//!
//! This library decodes and encodes NMEA 0183 sentences of the form
//! `$IIIII,D1,D2,...,Dn*CC\r\n`:
//!
//! - XOR checksum computation and verification
//! - Configurable checksum and CRLF line ending requirements
//! - Fixed-width field encoding for coordinates, altitudes, times and dates
//! - A registry of sentence parsers and encoders keyed by the 5-character
//!   identifier, with built-in GGA, RMC, GSA and GSV definitions
//!
//! Decoded sentences are returned as a [`Record`], a map from field names to
//! [`Value`]s.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_codec::{Codec, Record};
//! use time::macros::datetime;
//!
//! let codec = Codec::default();
//!
//! let record = Record::new()
//!     .with("timestamp", datetime!(2016-12-25 21:59:09.285 UTC))
//!     .with("latitude", 52.537525)
//!     .with("longitude", 13.365217)
//!     .with("fix_type", "fix")
//!     .with("satellites", 12)
//!     .with("hdop", 1.0)
//!     .with("altitude", 0.0)
//!     .with("geoidal_separation", 0.0);
//!
//! let sentence = codec.encode("GPGGA", &record).unwrap();
//! assert_eq!(
//!     sentence,
//!     "$GPGGA,215909.285,5232.252,N,01321.913,E,1,12,1.0,0.0,M,0.0,M,,*6E"
//! );
//!
//! let decoded = codec.decode(&sentence).unwrap();
//! assert_eq!(decoded.get_str("fix_type"), Ok(Some("fix")));
//! ```

mod codec;
pub mod error;
mod nmea0183;
pub mod nmea_content;
pub mod parsing;
mod registry;

pub use codec::{Codec, CodecConfig};
pub use error::Error;
pub use nmea_content::{Record, Value, field::year_to_full_year};
pub use nmea0183::*;
pub use registry::{Registry, SentenceEncoder, SentenceId, SentenceParser};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
