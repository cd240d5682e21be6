//! # Sentence Codec
//!
//! [`Codec`] ties the framing, the registry and the per-sentence definitions
//! together:
//!
//! - decoding: raw text → framing (line ending, checksum) → tokens → parser →
//!   [`Record`]
//! - encoding: [`Record`] → encoder → fields → `$ID,...*CC`
//!
//! Every failure is logged at `debug` level and handed to the error handler,
//! if one is installed, before it is returned.

use std::{fmt, sync::Arc};

use crate::{
    ChecksumMode, Error, LineEndingMode, Record, Registry, SentenceEncoder, SentenceId,
    SentenceParser, compute_checksum, frame, nmea_content::field::current_year,
};

/// Decoding and encoding options.
///
/// ```rust
/// use nmea0183_codec::{ChecksumMode, CodecConfig};
///
/// let config = CodecConfig::default()
///     .with_latitude_precision(5)
///     .with_checksum(ChecksumMode::Required);
///
/// assert_eq!(config.latitude_precision, 5);
/// assert_eq!(config.longitude_precision, 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Decimal places of the encoded latitude minutes.
    pub latitude_precision: usize,
    /// Decimal places of the encoded longitude minutes.
    pub longitude_precision: usize,
    /// Whether decoded sentences must carry a `*HH` checksum.
    pub checksum: ChecksumMode,
    /// How [`Codec::decode`] treats a trailing CRLF.
    pub line_ending: LineEndingMode,
    /// Year used to expand 2-digit years; the current UTC year when unset.
    pub reference_year: Option<i32>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            latitude_precision: 3,
            longitude_precision: 3,
            checksum: ChecksumMode::default(),
            line_ending: LineEndingMode::default(),
            reference_year: None,
        }
    }
}

impl CodecConfig {
    pub fn with_latitude_precision(mut self, precision: usize) -> Self {
        self.latitude_precision = precision;
        self
    }

    pub fn with_longitude_precision(mut self, precision: usize) -> Self {
        self.longitude_precision = precision;
        self
    }

    pub fn with_checksum(mut self, checksum: ChecksumMode) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEndingMode) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// The year 2-digit years are expanded against.
    pub fn reference_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(current_year)
    }
}

type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// NMEA 0183 sentence decoder and encoder.
///
/// `Codec::default()` knows GGA, RMC, GSA and GSV for the `GP` and `GN`
/// talkers. Further sentence types are added, and built-in ones overridden,
/// with [`Codec::register_sentence_type`].
///
/// Registration and configuration take `&mut self`; a configured codec can be
/// cloned cheaply and shared between threads.
///
/// # Examples
///
/// ```rust
/// use nmea0183_codec::{Codec, Error};
///
/// let codec = Codec::default();
///
/// let record = codec
///     .decode("$GPGGA,215909.285,5232.252,N,01321.913,E,1,12,1.0,0.0,M,0.0,M,,*6E")
///     .unwrap();
/// assert_eq!(record.get_str("sentence"), Ok(Some("GPGGA")));
/// assert_eq!(record.get_i64("satellites"), Ok(Some(12)));
///
/// let encoded = codec.encode("GPGGA", &record).unwrap();
/// assert_eq!(
///     encoded,
///     "$GPGGA,215909.285,5232.252,N,01321.913,E,1,12,1.0,0.0,M,0.0,M,,*6E"
/// );
///
/// assert!(matches!(codec.decode("$GPXXX,1,2"), Err(Error::UnknownSentenceType(_))));
/// ```
#[derive(Clone)]
pub struct Codec {
    registry: Registry,
    config: CodecConfig,
    error_handler: Option<ErrorHandler>,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl Codec {
    /// A codec with the standard sentence definitions.
    pub fn new(config: CodecConfig) -> Self {
        Self::with_registry(Registry::standard(), config)
    }

    pub fn with_registry(registry: Registry, config: CodecConfig) -> Self {
        Self {
            registry,
            config,
            error_handler: None,
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decodes a single sentence into a [`Record`].
    ///
    /// The record carries the 5-character identifier under `sentence`.
    pub fn decode(&self, sentence: &str) -> Result<Record, Error> {
        let result = self.decode_sentence(sentence, self.config.line_ending);
        self.report(result, sentence)
    }

    /// Decodes a sentence given as raw bytes.
    ///
    /// Fails with [`Error::NotText`] unless the bytes are ASCII.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Record, Error> {
        match std::str::from_utf8(bytes) {
            Ok(sentence) => self.decode(sentence),
            Err(_) => self.report(Err(Error::NotText), &String::from_utf8_lossy(bytes)),
        }
    }

    /// Decodes every non-empty line of `text`, one result per line.
    ///
    /// A failed line does not stop the iteration. Line terminators are
    /// consumed by the split, so the configured [`LineEndingMode`] does not
    /// apply here.
    ///
    /// ```rust
    /// use nmea0183_codec::Codec;
    ///
    /// let log = "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n\
    ///            $GPGGA,garbage*00\r\n\
    ///            \r\n\
    ///            $GPGSV,1,1,01,05,45,120,38\r\n";
    ///
    /// let results: Vec<_> = Codec::default().decode_lines(log).collect();
    /// assert_eq!(results.len(), 3);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// assert!(results[2].is_ok());
    /// ```
    pub fn decode_lines<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = Result<Record, Error>> + 'a {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(move |line| {
                let result = self.decode_sentence(line, LineEndingMode::Optional);
                self.report(result, line)
            })
    }

    /// Encodes `record` as sentence `id`, checksum included.
    pub fn encode(&self, id: &str, record: &Record) -> Result<String, Error> {
        let result = self.encode_sentence(id, record);
        self.report(result, id)
    }

    /// Inserts or overrides the parser and/or encoder for `id`.
    ///
    /// ```rust
    /// use std::sync::Arc;
    ///
    /// use nmea0183_codec::{Codec, CodecConfig, Error, Record, SentenceEncoder};
    ///
    /// let encoder: Arc<dyn SentenceEncoder> =
    ///     Arc::new(|record: &Record, _: &CodecConfig| -> Result<Vec<String>, Error> {
    ///         Ok(vec![record.get_str("text")?.unwrap_or_default().to_string()])
    ///     });
    ///
    /// let mut codec = Codec::default();
    /// codec.register_sentence_type("PTEXT", None, Some(encoder)).unwrap();
    ///
    /// let sentence = codec.encode("PTEXT", &Record::new().with("text", "hello")).unwrap();
    /// assert!(sentence.starts_with("$PTEXT,hello*"));
    /// ```
    pub fn register_sentence_type(
        &mut self,
        id: &str,
        parser: Option<Arc<dyn SentenceParser>>,
        encoder: Option<Arc<dyn SentenceEncoder>>,
    ) -> Result<(), Error> {
        let id = SentenceId::new(id)?;

        tracing::info!(
            %id,
            parser = parser.is_some(),
            encoder = encoder.is_some(),
            "registering sentence type"
        );
        self.registry.register(id, parser, encoder);

        Ok(())
    }

    /// Inserts or overrides the parser for `id`.
    pub fn register_parser(
        &mut self,
        id: &str,
        parser: impl SentenceParser + 'static,
    ) -> Result<(), Error> {
        let parser: Arc<dyn SentenceParser> = Arc::new(parser);
        self.register_sentence_type(id, Some(parser), None)
    }

    /// Inserts or overrides the encoder for `id`.
    pub fn register_encoder(
        &mut self,
        id: &str,
        encoder: impl SentenceEncoder + 'static,
    ) -> Result<(), Error> {
        let encoder: Arc<dyn SentenceEncoder> = Arc::new(encoder);
        self.register_sentence_type(id, None, Some(encoder))
    }

    /// Decimal places of the encoded latitude minutes.
    pub fn set_latitude_precision(&mut self, precision: usize) {
        self.config.latitude_precision = precision;
    }

    /// Decimal places of the encoded longitude minutes.
    pub fn set_longitude_precision(&mut self, precision: usize) {
        self.config.longitude_precision = precision;
    }

    /// Installs a callback invoked with every decode or encode failure.
    ///
    /// The error is still returned to the caller.
    pub fn set_error_handler(&mut self, handler: impl Fn(&Error) + Send + Sync + 'static) {
        self.error_handler = Some(Arc::new(handler));
    }

    pub fn clear_error_handler(&mut self) {
        self.error_handler = None;
    }

    fn decode_sentence(&self, sentence: &str, le: LineEndingMode) -> Result<Record, Error> {
        let frame = frame(sentence, self.config.checksum, le)?;
        let tokens: Vec<&str> = frame.body.split(',').collect();

        let head = tokens.first().copied().unwrap_or_default();
        let id = head
            .get(1..1 + SentenceId::LEN)
            .ok_or_else(|| Error::MalformedIdentifier(head.into()))
            .and_then(SentenceId::new)?;

        let parser = self
            .registry
            .parser(&id)
            .ok_or_else(|| Error::UnknownSentenceType(id.to_string()))?;

        let mut record = parser.parse(&tokens, &self.config)?;
        record.insert("sentence", id.as_str());

        Ok(record)
    }

    fn encode_sentence(&self, id: &str, record: &Record) -> Result<String, Error> {
        let id = SentenceId::new(id)?;
        let encoder = self
            .registry
            .encoder(&id)
            .ok_or_else(|| Error::UnknownSentenceType(id.to_string()))?;

        let mut sentence = format!("${id}");
        for field in encoder.encode(record, &self.config)? {
            sentence.push(',');
            sentence.push_str(&field);
        }

        let checksum = compute_checksum(&sentence);
        sentence.push_str(&checksum);

        Ok(sentence)
    }

    fn report<T>(&self, result: Result<T, Error>, input: &str) -> Result<T, Error> {
        if let Err(error) = &result {
            tracing::debug!(input, %error, "nmea0183 codec failure");

            if let Some(handler) = &self.error_handler {
                handler(error);
            }
        }

        result
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
