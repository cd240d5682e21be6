use crate::{
    CodecConfig, Error, Record, SentenceEncoder, SentenceParser, Value,
    nmea_content::{
        field::{encode_padded_int, encode_value},
        sentences::fields,
    },
    parsing::int_or_zero,
};

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// Fields 4 onwards come in groups of four per satellite: PRN, elevation in
/// degrees, azimuth in degrees and SNR in dB. NMEA 4.11 appends a single hex
/// signal ID after the last group.
///
/// Each entry of `satellites` is a [`Record`] with `prn`, `elevation`,
/// `azimuth` and `snr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GSV;

/// `$--GSV` plus the three counters.
const MIN_TOKENS: usize = 4;

const SATELLITE_FIELDS: [&str; 4] = ["prn", "elevation", "azimuth", "snr"];
const SATELLITE_WIDTHS: [usize; 4] = [2, 2, 3, 2];

/// Signal IDs are a single hex digit.
const MAX_SIGNAL_ID: i64 = 0xF;

impl SentenceParser for GSV {
    fn parse(&self, tokens: &[&str], _: &CodecConfig) -> Result<Record, Error> {
        let fields = fields(tokens, MIN_TOKENS)?;
        let mut record = Record::new();

        record.insert("total_messages", int_or_zero(fields[1]));
        record.insert("message_number", int_or_zero(fields[2]));
        record.insert("satellites_in_view", int_or_zero(fields[3]));

        let groups = fields[MIN_TOKENS..].chunks(SATELLITE_FIELDS.len());
        let count = groups.len();
        let mut satellites = Vec::new();

        for (index, group) in groups.enumerate() {
            if group.len() == 1 && index + 1 == count {
                if let Some(signal_id) = decode_signal_id(group[0]) {
                    record.insert("signal_id", signal_id);
                }
                continue;
            }

            if group[0].is_empty() {
                continue;
            }

            let satellite: Record = SATELLITE_FIELDS
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = group.get(i).copied().unwrap_or_default();
                    (name.to_string(), Value::from(int_or_zero(value)))
                })
                .collect();
            satellites.push(Value::from(satellite));
        }

        record.insert("satellites", satellites);

        Ok(record)
    }
}

fn decode_signal_id(token: &str) -> Option<i64> {
    u8::from_str_radix(token, 16)
        .ok()
        .map(i64::from)
        .filter(|id| *id <= MAX_SIGNAL_ID)
}

impl SentenceEncoder for GSV {
    fn encode(&self, record: &Record, _: &CodecConfig) -> Result<Vec<String>, Error> {
        let mut fields = vec![
            encode_value(record.get_i64("total_messages")?),
            encode_value(record.get_i64("message_number")?),
            encode_padded_int(record.get_i64("satellites_in_view")?, 2),
        ];

        for satellite in record.get_list("satellites")?.unwrap_or_default() {
            let Value::Record(satellite) = satellite else {
                return Err(Error::InvalidField {
                    field: "satellites".into(),
                    expected: "a list of satellite records",
                });
            };

            for (name, width) in SATELLITE_FIELDS.iter().zip(SATELLITE_WIDTHS) {
                fields.push(encode_padded_int(satellite.get_i64(name)?, width));
            }
        }

        if let Some(signal_id) = record.get_i64("signal_id")? {
            if !(0..=MAX_SIGNAL_ID).contains(&signal_id) {
                return Err(Error::InvalidField {
                    field: "signal_id".into(),
                    expected: "a signal ID between 0 and F",
                });
            }
            fields.push(format!("{signal_id:X}"));
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(sentence: &str) -> Vec<&str> {
        sentence.split(',').collect()
    }

    fn satellite(prn: i64, elevation: i64, azimuth: i64, snr: i64) -> Value {
        Record::new()
            .with("prn", prn)
            .with("elevation", elevation)
            .with("azimuth", azimuth)
            .with("snr", snr)
            .into()
    }

    #[test]
    fn test_gsv_parsing() {
        let record = GSV
            .parse(
                &tokens("$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00"),
                &CodecConfig::default(),
            )
            .unwrap();

        assert_eq!(record.get_i64("total_messages"), Ok(Some(3)));
        assert_eq!(record.get_i64("message_number"), Ok(Some(1)));
        assert_eq!(record.get_i64("satellites_in_view"), Ok(Some(11)));
        assert!(!record.contains("signal_id"));

        let satellites = record.get_list("satellites").unwrap().unwrap();
        assert_eq!(satellites.len(), 4);
        assert_eq!(satellites[0], satellite(3, 3, 111, 0));
        assert_eq!(satellites[3], satellite(13, 6, 292, 0));
    }

    #[test]
    fn test_gsv_missing_values_are_zero() {
        let record = GSV
            .parse(
                &tokens("$GPGSV,1,1,03,01,60,150,45,02,30,,30,03,,270,"),
                &CodecConfig::default(),
            )
            .unwrap();

        let satellites = record.get_list("satellites").unwrap().unwrap();
        assert_eq!(
            satellites,
            [
                satellite(1, 60, 150, 45),
                satellite(2, 30, 0, 30),
                satellite(3, 0, 270, 0),
            ]
        );
    }

    #[test]
    fn test_gsv_signal_id() {
        let record = GSV
            .parse(
                &tokens("$GNGSV,1,1,01,05,45,120,38,B"),
                &CodecConfig::default(),
            )
            .unwrap();

        assert_eq!(record.get_i64("signal_id"), Ok(Some(11)));
        assert_eq!(record.get_list("satellites").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_gsv_no_satellites() {
        for sentence in ["$GPGSV,1,1,00", "$GPGSV,1,1,00,", "$GPGSV,1,1,01,,,,"] {
            let record = GSV
                .parse(&tokens(sentence), &CodecConfig::default())
                .unwrap();

            assert_eq!(
                record.get_list("satellites").unwrap().map(<[Value]>::len),
                Some(0),
                "{sentence}"
            );
            assert!(!record.contains("signal_id"), "{sentence}");
        }
    }

    #[test]
    fn test_gsv_insufficient_fields() {
        assert!(matches!(
            GSV.parse(&tokens("$GPGSV,1,1"), &CodecConfig::default()),
            Err(Error::InsufficientFields { expected: 4, found: 3, .. })
        ));
    }

    #[test]
    fn test_gsv_encoding() {
        let record = Record::new()
            .with("total_messages", 3)
            .with("message_number", 1)
            .with("satellites_in_view", 9)
            .with(
                "satellites",
                vec![satellite(3, 3, 111, 0), satellite(24, 45, 7, 41)],
            );

        let fields = GSV.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields.join(","), "3,1,09,03,03,111,00,24,45,007,41");
    }

    #[test]
    fn test_gsv_encoding_signal_id() {
        let record = Record::new()
            .with("total_messages", 1)
            .with("message_number", 1)
            .with("satellites_in_view", 0)
            .with("signal_id", 11);

        let fields = GSV.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields.join(","), "1,1,00,B");
    }

    #[test]
    fn test_gsv_signal_id_range() {
        let record = GSV
            .parse(
                &tokens("$GNGSV,1,1,01,05,45,120,38,1F"),
                &CodecConfig::default(),
            )
            .unwrap();
        assert!(!record.contains("signal_id"));

        for signal_id in [-1, 16] {
            let record = Record::new().with("signal_id", signal_id);
            assert!(
                matches!(
                    GSV.encode(&record, &CodecConfig::default()),
                    Err(Error::InvalidField { .. })
                ),
                "{signal_id}"
            );
        }

        let record = Record::new().with("signal_id", 15);
        let fields = GSV.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields.last().map(String::as_str), Some("F"));
    }

    #[test]
    fn test_gsv_encoding_rejects_non_records() {
        let record = Record::new().with("satellites", vec![Value::from(5)]);

        assert!(matches!(
            GSV.encode(&record, &CodecConfig::default()),
            Err(Error::InvalidField { .. })
        ));
    }
}
