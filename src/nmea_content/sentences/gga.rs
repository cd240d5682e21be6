use crate::{
    CodecConfig, Error, Record, SentenceEncoder, SentenceParser,
    nmea_content::{
        field::{
            decode_altitude, decode_latitude, decode_longitude, decode_time, encode_altitude,
            encode_fixed, encode_latitude, encode_longitude, encode_padded_int, encode_time,
        },
        sentences::{Quality, decode_indicator, encode_indicator, fields, record_time},
    },
    parsing::{float_or_zero, int_or_zero},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Record fields:
///
/// | Field                | Value                                   |
/// |----------------------|-----------------------------------------|
/// | `time`               | UTC time of the fix                     |
/// | `latitude`           | decimal degrees, north positive         |
/// | `longitude`          | decimal degrees, east positive          |
/// | `fix_type`           | [`Quality`] name, or the raw code       |
/// | `satellites`         | satellites in use                       |
/// | `hdop`               | horizontal dilution of precision        |
/// | `altitude`           | metres above mean sea level             |
/// | `geoidal_separation` | metres                                  |
/// | `dgps_age`           | seconds since the last DGPS update      |
/// | `dgps_station`       | differential reference station ID       |
///
/// `dgps_age` and `dgps_station` are absent when their slots are empty.
///
/// The encoder reads the time of day from `timestamp` or `time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GGA;

/// `$--GGA` plus 14 fields.
const MIN_TOKENS: usize = 15;

impl SentenceParser for GGA {
    fn parse(&self, tokens: &[&str], _: &CodecConfig) -> Result<Record, Error> {
        let fields = fields(tokens, MIN_TOKENS)?;
        let mut record = Record::new();

        record.insert_opt("time", decode_time(fields[1]));
        record.insert_opt("latitude", decode_latitude(fields[2], fields[3]));
        record.insert_opt("longitude", decode_longitude(fields[4], fields[5]));
        record.insert_opt("fix_type", decode_indicator::<Quality>(fields[6]));
        record.insert("satellites", int_or_zero(fields[7]));
        record.insert("hdop", float_or_zero(fields[8]));
        record.insert("altitude", decode_altitude(fields[9], fields[10]));
        record.insert(
            "geoidal_separation",
            decode_altitude(fields[11], fields[12]),
        );

        // Receivers without a differential correction leave both slots empty.
        if !fields[13].is_empty() {
            record.insert("dgps_age", float_or_zero(fields[13]));
        }
        if !fields[14].is_empty() {
            record.insert("dgps_station", int_or_zero(fields[14]));
        }

        Ok(record)
    }
}

impl SentenceEncoder for GGA {
    fn encode(&self, record: &Record, config: &CodecConfig) -> Result<Vec<String>, Error> {
        Ok(vec![
            encode_time(record_time(record)?),
            encode_latitude(record.get_f64("latitude")?, config.latitude_precision),
            encode_longitude(record.get_f64("longitude")?, config.longitude_precision),
            encode_indicator::<Quality>(record, "fix_type")?,
            encode_padded_int(record.get_i64("satellites")?, 2),
            encode_fixed(record.get_f64("hdop")?, 1),
            encode_altitude(record.get_f64("altitude")?),
            encode_altitude(record.get_f64("geoidal_separation")?),
            encode_fixed(record.get_f64("dgps_age")?, 1),
            encode_padded_int(record.get_i64("dgps_station")?, 4),
        ])
    }
}
