use crate::{
    CodecConfig, Error, Record, SentenceEncoder, SentenceParser,
    nmea_content::{
        field::{
            decode_date, decode_latitude, decode_longitude, decode_magnetic_variation,
            decode_time, encode_date, encode_degrees, encode_knots, encode_latitude,
            encode_longitude, encode_magnetic_variation, encode_time,
        },
        sentences::{
            FaaMode, Status, decode_indicator, encode_indicator, fields, record_date, record_time,
        },
    },
    parsing::float_or_zero,
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// NMEA 2.3:
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
/// ```
///
/// Decoded records carry `time`, `date`, `timestamp` (when both are known),
/// `status`, `latitude`, `longitude`, `speed_knots`, `track_true`, `variation`
/// (west negative) and `faa_mode` (NMEA 2.3 and later).
///
/// The encoder emits the FAA mode slot only when the record has `faa_mode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RMC;

/// `$--RMC` plus the 11 fields that predate NMEA 2.3.
const MIN_TOKENS: usize = 12;

impl SentenceParser for RMC {
    fn parse(&self, tokens: &[&str], config: &CodecConfig) -> Result<Record, Error> {
        let fields = fields(tokens, MIN_TOKENS)?;
        let mut record = Record::new();

        let time = decode_time(fields[1]);
        let date = decode_date(fields[9], config.reference_year());

        if let (Some(time), Some(date)) = (time, date) {
            record.insert("timestamp", date.with_time(time).assume_utc());
        }
        record.insert_opt("time", time);
        record.insert_opt("date", date);
        record.insert_opt("status", decode_indicator::<Status>(fields[2]));
        record.insert_opt("latitude", decode_latitude(fields[3], fields[4]));
        record.insert_opt("longitude", decode_longitude(fields[5], fields[6]));
        record.insert("speed_knots", float_or_zero(fields[7]));
        record.insert("track_true", float_or_zero(fields[8]));
        record.insert(
            "variation",
            decode_magnetic_variation(fields[10], fields[11]),
        );

        if let Some(mode) = fields.get(12) {
            record.insert_opt("faa_mode", decode_indicator::<FaaMode>(mode));
        }

        Ok(record)
    }
}

impl SentenceEncoder for RMC {
    fn encode(&self, record: &Record, config: &CodecConfig) -> Result<Vec<String>, Error> {
        let mut fields = vec![
            encode_time(record_time(record)?),
            encode_indicator::<Status>(record, "status")?,
            encode_latitude(record.get_f64("latitude")?, config.latitude_precision),
            encode_longitude(record.get_f64("longitude")?, config.longitude_precision),
            encode_knots(record.get_f64("speed_knots")?),
            encode_degrees(record.get_f64("track_true")?),
            encode_date(record_date(record)?),
            encode_magnetic_variation(record.get_f64("variation")?),
        ];

        if record.contains("faa_mode") {
            fields.push(encode_indicator::<FaaMode>(record, "faa_mode")?);
        }

        Ok(fields)
    }
}
