//! # Sentence Registry
//!
//! Maps 5-character sentence identifiers to parser and encoder
//! implementations. The two maps are independent: a sentence type may be
//! decode-only or encode-only.
//!
//! Registering an identifier that is already present replaces the previous
//! implementation, so callers can override the built-in definitions by simply
//! registering their own after construction.

use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use crate::{CodecConfig, Error, Record, nmea_content::sentences};

/// An opaque 5-character sentence identifier such as `GPGGA`.
///
/// Talker and sentence type are not split apart.
///
/// ```rust
/// use nmea0183_codec::SentenceId;
///
/// let id: SentenceId = "GPGGA".parse().unwrap();
/// assert_eq!(id.as_str(), "GPGGA");
/// assert!("GGA".parse::<SentenceId>().is_err());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SentenceId(heapless::String<5>);

impl SentenceId {
    pub const LEN: usize = 5;

    pub fn new(id: &str) -> Result<Self, Error> {
        if id.len() != Self::LEN || !id.is_ascii() {
            return Err(Error::MalformedIdentifier(id.into()));
        }

        let mut inner = heapless::String::new();
        inner
            .push_str(id)
            .map_err(|_| Error::MalformedIdentifier(id.into()))?;

        Ok(Self(inner))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SentenceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns the tokens of one sentence into a [`Record`].
///
/// `tokens[0]` is the `$` marker followed by the identifier; the remaining
/// tokens are the raw comma-separated fields. Implementations check their own
/// minimum token count.
///
/// Closures with the matching signature implement this trait:
///
/// ```rust
/// use nmea0183_codec::{Codec, CodecConfig, Error, Record};
///
/// let mut codec = Codec::default();
/// codec
///     .register_parser("PXXXX", |tokens: &[&str], _: &CodecConfig| -> Result<Record, Error> {
///         Ok(Record::new().with("fields", tokens.len() as i64 - 1))
///     })
///     .unwrap();
///
/// let record = codec.decode("$PXXXX,a,b,c").unwrap();
/// assert_eq!(record.get_i64("fields"), Ok(Some(3)));
/// ```
pub trait SentenceParser: Send + Sync {
    fn parse(&self, tokens: &[&str], config: &CodecConfig) -> Result<Record, Error>;
}

/// Turns a [`Record`] into the encoded fields of one sentence.
///
/// Returns the fragments following the identifier, in sentence order. The
/// codec prepends `$` and the identifier, joins everything with `,` and
/// appends the checksum. A fragment may itself contain commas when one value
/// spans several slots (a coordinate and its hemisphere, for instance).
pub trait SentenceEncoder: Send + Sync {
    fn encode(&self, record: &Record, config: &CodecConfig) -> Result<Vec<String>, Error>;
}

impl<F> SentenceParser for F
where
    F: Fn(&[&str], &CodecConfig) -> Result<Record, Error> + Send + Sync,
{
    fn parse(&self, tokens: &[&str], config: &CodecConfig) -> Result<Record, Error> {
        self(tokens, config)
    }
}

impl<F> SentenceEncoder for F
where
    F: Fn(&Record, &CodecConfig) -> Result<Vec<String>, Error> + Send + Sync,
{
    fn encode(&self, record: &Record, config: &CodecConfig) -> Result<Vec<String>, Error> {
        self(record, config)
    }
}

/// Identifier → parser and identifier → encoder maps.
///
/// Entries are reference counted, so cloning a registry is cheap and the clone
/// is an independent snapshot.
#[derive(Clone, Default)]
pub struct Registry {
    parsers: BTreeMap<SentenceId, Arc<dyn SentenceParser>>,
    encoders: BTreeMap<SentenceId, Arc<dyn SentenceEncoder>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the GGA, RMC, GSA and GSV definitions for the `GP`
    /// (GPS) and `GN` (multi-constellation) talkers.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        sentences::register_standard(&mut registry);
        registry
    }

    /// Inserts or overrides the parser for `id`.
    pub fn register_parser(&mut self, id: SentenceId, parser: impl SentenceParser + 'static) {
        self.parsers.insert(id, Arc::new(parser));
    }

    /// Inserts or overrides the encoder for `id`.
    pub fn register_encoder(&mut self, id: SentenceId, encoder: impl SentenceEncoder + 'static) {
        self.encoders.insert(id, Arc::new(encoder));
    }

    /// Inserts or overrides the parser and/or encoder for `id`.
    pub fn register(
        &mut self,
        id: SentenceId,
        parser: Option<Arc<dyn SentenceParser>>,
        encoder: Option<Arc<dyn SentenceEncoder>>,
    ) {
        if let Some(parser) = parser {
            self.parsers.insert(id.clone(), parser);
        }
        if let Some(encoder) = encoder {
            self.encoders.insert(id, encoder);
        }
    }

    pub fn parser(&self, id: &SentenceId) -> Option<&dyn SentenceParser> {
        self.parsers.get(id).map(Arc::as_ref)
    }

    pub fn encoder(&self, id: &SentenceId) -> Option<&dyn SentenceEncoder> {
        self.encoders.get(id).map(Arc::as_ref)
    }

    /// Identifiers with a registered parser, in identifier order.
    pub fn parser_ids(&self) -> impl Iterator<Item = &SentenceId> {
        self.parsers.keys()
    }

    /// Identifiers with a registered encoder, in identifier order.
    pub fn encoder_ids(&self) -> impl Iterator<Item = &SentenceId> {
        self.encoders.keys()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("parsers", &self.parsers.keys().collect::<Vec<_>>())
            .field("encoders", &self.encoders.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(id: &str) -> SentenceId {
        id.parse().unwrap()
    }

    fn constant(value: i64) -> impl SentenceParser {
        move |_: &[&str], _: &CodecConfig| -> Result<Record, Error> {
            Ok(Record::new().with("value", value))
        }
    }

    #[test]
    fn test_sentence_id_length() {
        assert!(SentenceId::new("GPGGA").is_ok());
        assert_eq!(
            SentenceId::new("GPGG"),
            Err(Error::MalformedIdentifier("GPGG".into()))
        );
        assert!(SentenceId::new("GPGGAX").is_err());
        assert!(SentenceId::new("").is_err());
        assert!(SentenceId::new("GPGGÄ").is_err());
    }

    #[test]
    fn test_register_overrides() {
        let mut registry = Registry::new();
        registry.register_parser(id("GPXXX"), constant(1));
        registry.register_parser(id("GPXXX"), constant(2));

        let parser = registry.parser(&id("GPXXX")).unwrap();
        let record = parser.parse(&["$GPXXX"], &CodecConfig::default()).unwrap();
        assert_eq!(record.get_i64("value"), Ok(Some(2)));
        assert_eq!(registry.parser_ids().count(), 1);
    }

    #[test]
    fn test_parser_and_encoder_are_independent() {
        let mut registry = Registry::new();
        registry.register_parser(id("GPXXX"), constant(1));

        assert!(registry.parser(&id("GPXXX")).is_some());
        assert!(registry.encoder(&id("GPXXX")).is_none());
        assert!(registry.parser(&id("GPYYY")).is_none());
    }

    #[test]
    fn test_standard_registry() {
        let registry = Registry::standard();

        for name in ["GPGGA", "GPRMC", "GPGSA", "GPGSV", "GNGGA", "GNRMC", "GNGSA", "GNGSV"] {
            assert!(registry.parser(&id(name)).is_some(), "missing parser {name}");
            assert!(registry.encoder(&id(name)).is_some(), "missing encoder {name}");
        }

        let encoders: Vec<&str> = registry.encoder_ids().map(SentenceId::as_str).collect();
        assert_eq!(
            encoders,
            ["GNGGA", "GNGSA", "GNGSV", "GNRMC", "GPGGA", "GPGSA", "GPGSV", "GPRMC"]
        );
        assert!(registry.parser_ids().eq(registry.encoder_ids()));
    }

    #[test]
    fn test_clone_is_snapshot() {
        let mut registry = Registry::new();
        let snapshot = registry.clone();
        registry.register_parser(id("GPXXX"), constant(1));

        assert!(registry.parser(&id("GPXXX")).is_some());
        assert!(snapshot.parser(&id("GPXXX")).is_none());
    }
}
