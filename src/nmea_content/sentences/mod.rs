mod gga;
mod gsa;
mod gsv;
mod rmc;

pub use gga::GGA;
pub use gsa::GSA;
pub use gsv::GSV;
pub use rmc::RMC;

use std::sync::Arc;

use crate::{Error, Record, Registry, SentenceEncoder, SentenceId, SentenceParser, Value};

/// Talkers the built-in definitions are registered for.
const STANDARD_TALKERS: [&str; 2] = ["GP", "GN"];

/// Registers GGA, RMC, GSA and GSV for every standard talker.
pub(crate) fn register_standard(registry: &mut Registry) {
    for talker in STANDARD_TALKERS {
        register(registry, talker, "GGA", Arc::new(GGA));
        register(registry, talker, "RMC", Arc::new(RMC));
        register(registry, talker, "GSA", Arc::new(GSA));
        register(registry, talker, "GSV", Arc::new(GSV));
    }
}

fn register<T>(registry: &mut Registry, talker: &str, sentence_type: &str, definition: Arc<T>)
where
    T: SentenceParser + SentenceEncoder + 'static,
{
    // Built-in identifiers are always 5 ASCII characters.
    if let Ok(id) = SentenceId::new(&format!("{talker}{sentence_type}")) {
        let parser: Arc<dyn SentenceParser> = definition.clone();
        let encoder: Arc<dyn SentenceEncoder> = definition;
        registry.register(id, Some(parser), Some(encoder));
    }
}

/// Checks the minimum token count and trims every token.
///
/// `min` counts `tokens[0]`, the `$` marker plus identifier.
pub(crate) fn fields<'a>(tokens: &[&'a str], min: usize) -> Result<Vec<&'a str>, Error> {
    if tokens.len() < min {
        let id = tokens.first().copied().unwrap_or_default();

        return Err(Error::InsufficientFields {
            id: id.get(1..).unwrap_or(id).into(),
            expected: min,
            found: tokens.len(),
        });
    }

    Ok(tokens.iter().map(|token| token.trim()).collect())
}

/// Time of day of a record: `timestamp` when present, `time` otherwise.
pub(crate) fn record_time(record: &Record) -> Result<Option<time::Time>, Error> {
    match record.get_time("timestamp")? {
        Some(time) => Ok(Some(time)),
        None => record.get_time("time"),
    }
}

/// Date of a record: `timestamp` when present, `date` otherwise.
pub(crate) fn record_date(record: &Record) -> Result<Option<time::Date>, Error> {
    match record.get_date("timestamp")? {
        Some(date) => Ok(Some(date)),
        None => record.get_date("date"),
    }
}

/// A single-field indicator with an NMEA code and a readable name.
pub trait Indicator: Sized + Copy {
    fn from_code(code: &str) -> Option<Self>;
    fn from_name(name: &str) -> Option<Self>;
    fn code(self) -> &'static str;
    fn name(self) -> &'static str;
}

/// Decodes an indicator field to its name, keeping unknown codes as they are.
pub(crate) fn decode_indicator<T: Indicator>(code: &str) -> Option<Value> {
    if code.is_empty() {
        return None;
    }

    Some(match T::from_code(code) {
        Some(indicator) => indicator.name().into(),
        None => code.into(),
    })
}

/// Encodes an indicator field given by name, code text or numeric code.
///
/// Codes the indicator does not know are written as they are, so records
/// decoded from receivers with vendor-specific codes encode back unchanged.
pub(crate) fn encode_indicator<T: Indicator>(record: &Record, field: &str) -> Result<String, Error> {
    let invalid = || Error::InvalidField {
        field: field.into(),
        expected: "an indicator name or a single-field code",
    };

    match record.get(field) {
        None => Ok(String::new()),
        Some(Value::Text(text)) => match T::from_name(text).or_else(|| T::from_code(text)) {
            Some(indicator) => Ok(indicator.code().to_string()),
            None if is_raw_code(text) => Ok(text.clone()),
            None => Err(invalid()),
        },
        Some(Value::Int(code)) => Ok(code.to_string()),
        Some(_) => Err(invalid()),
    }
}

/// Text that fits a single field slot without breaking the sentence framing.
fn is_raw_code(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|byte| byte.is_ascii_graphic() && !matches!(byte, b',' | b'*' | b'$' | b'!'))
}

macro_rules! indicator_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $code:literal, $text:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl Indicator for $name {
            fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

indicator_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        "0", "none" => NoFix,
        /// 1 - GPS fix
        "1", "fix" => GPSFix,
        /// 2 - Differential GPS fix
        "2", "delta" => DGPSFix,
        /// 3 - PPS fix
        "3", "pps" => PPSFix,
        /// 4 - Real Time Kinematic
        "4", "rtk" => RTK,
        /// 5 - Float RTK
        "5", "frtk" => FloatRTK,
        /// 6 - estimated (dead reckoning)
        "6", "estimated" => Estimated,
        /// 7 - Manual input mode
        "7", "manual" => Manual,
        /// 8 - Simulation mode
        "8", "simulation" => Simulation,
    }
}

indicator_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        "A", "valid" => Valid,
        /// V - Navigation receiver warning
        "V", "warning" => Warning,
    }
}

indicator_enum! {
    /// FAA Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum FaaMode {
        /// A - Autonomous mode
        "A", "autonomous" => Autonomous,
        /// D - Differential Mode
        "D", "differential" => Differential,
        /// E - Estimated (dead-reckoning) mode
        "E", "estimated" => Estimated,
        /// F - RTK Float mode
        "F", "float_rtk" => FloatRtk,
        /// M - Manual Input Mode
        "M", "manual" => Manual,
        /// N - Data Not Valid
        "N", "not_valid" => DataNotValid,
        /// P - Precise
        "P", "precise" => Precise,
        /// R - RTK Integer mode
        "R", "fixed_rtk" => FixedRtk,
        /// S - Simulated Mode
        "S", "simulator" => Simulator,
    }
}

indicator_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        "A", "automatic" => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        "M", "manual" => Manual,
    }
}

indicator_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        "1", "none" => NoFix,
        /// 2 - 2D Fix
        "2", "2D" => Fix2D,
        /// 3 - 3D Fix
        "3", "3D" => Fix3D,
    }
}
