use crate::{
    CodecConfig, Error, Record, SentenceEncoder, SentenceParser, Value,
    nmea_content::{
        field::{encode_fixed, encode_value},
        sentences::{FixMode, SelectionMode, decode_indicator, encode_indicator, fields},
    },
    parsing::{float_or_zero, int_or_zero},
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                    14 15  16  17
///         | | |                     | |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// NMEA 4.11:
/// ```text
///         1 2 3                    14 15  16  17  18
///         | | |                     | |   |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x,h*hh<CR><LF>
/// ```
///
/// Decoded `satellites` is the list of PRNs found in the non-empty slots.
///
/// For encoding, `satellites` may be a count or a list; either way the slots
/// are numbered `01..N` by position and padded with empty slots up to 12.
/// The PRNs of a list are not written.
#[derive(Debug, Clone, Copy, Default)]
pub struct GSA;

/// `$--GSA` plus 17 fields.
const MIN_TOKENS: usize = 18;

/// Satellite slots in every GSA sentence.
const SLOTS: usize = 12;

impl SentenceParser for GSA {
    fn parse(&self, tokens: &[&str], _: &CodecConfig) -> Result<Record, Error> {
        let fields = fields(tokens, MIN_TOKENS)?;
        let mut record = Record::new();

        record.insert_opt(
            "selection_mode",
            decode_indicator::<SelectionMode>(fields[1]),
        );
        record.insert_opt("fix_mode", decode_indicator::<FixMode>(fields[2]));

        let satellites: Vec<Value> = fields[3..3 + SLOTS]
            .iter()
            .filter(|prn| !prn.is_empty())
            .map(|prn| int_or_zero(prn).into())
            .collect();
        record.insert("satellites", satellites);

        record.insert("pdop", float_or_zero(fields[15]));
        record.insert("hdop", float_or_zero(fields[16]));
        record.insert("vdop", float_or_zero(fields[17]));

        if let Some(system_id) = fields.get(18).filter(|id| !id.is_empty()) {
            record.insert("system_id", int_or_zero(system_id));
        }

        Ok(record)
    }
}

impl SentenceEncoder for GSA {
    fn encode(&self, record: &Record, _: &CodecConfig) -> Result<Vec<String>, Error> {
        let used = match record.get("satellites") {
            None => 0,
            Some(Value::Int(count)) => usize::try_from(*count).unwrap_or(0),
            Some(Value::List(satellites)) => satellites.len(),
            Some(_) => {
                return Err(Error::InvalidField {
                    field: "satellites".into(),
                    expected: "a satellite count or list",
                });
            }
        };

        let mut fields = vec![
            encode_indicator::<SelectionMode>(record, "selection_mode")?,
            encode_indicator::<FixMode>(record, "fix_mode")?,
        ];

        fields.extend((1..=SLOTS).map(|slot| {
            if slot <= used {
                format!("{slot:02}")
            } else {
                String::new()
            }
        }));

        fields.push(encode_fixed(record.get_f64("pdop")?, 1));
        fields.push(encode_fixed(record.get_f64("hdop")?, 1));
        fields.push(encode_fixed(record.get_f64("vdop")?, 1));

        if record.contains("system_id") {
            fields.push(encode_value(record.get_i64("system_id")?));
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

    fn prns(record: &Record) -> Vec<i64> {
        record
            .get_list("satellites")
            .unwrap()
            .unwrap()
            .iter()
            .filter_map(Value::as_i64)
            .collect()
    }

    #[test]
    fn test_gsa_parsing() {
        let record = GSA
            .parse(
                &tokens("$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1"),
                &CodecConfig::default(),
            )
            .unwrap();

        assert_eq!(record.get_str("selection_mode"), Ok(Some("automatic")));
        assert_eq!(record.get_str("fix_mode"), Ok(Some("3D")));
        assert_eq!(prns(&record), vec![4, 5, 9, 12, 24]);
        assert_eq!(record.get_f64("pdop"), Ok(Some(2.5)));
        assert_eq!(record.get_f64("hdop"), Ok(Some(1.3)));
        assert_eq!(record.get_f64("vdop"), Ok(Some(2.1)));
        assert!(!record.contains("system_id"));
    }

    #[test]
    fn test_gsa_parsing_with_system_id() {
        let record = GSA
            .parse(
                &tokens("$GNGSA,M,2,65,66,,,,,,,,,,,,,,3"),
                &CodecConfig::default(),
            )
            .unwrap();

        assert_eq!(record.get_str("selection_mode"), Ok(Some("manual")));
        assert_eq!(record.get_str("fix_mode"), Ok(Some("2D")));
        assert_eq!(prns(&record), vec![65, 66]);
        assert_eq!(record.get_f64("pdop"), Ok(Some(0.0)));
        assert_eq!(record.get_i64("system_id"), Ok(Some(3)));
    }

    #[test]
    fn test_gsa_insufficient_fields() {
        let result = GSA.parse(&tokens("$GPGSA,A,3,04,05"), &CodecConfig::default());
        assert!(matches!(
            result,
            Err(Error::InsufficientFields { expected: 18, found: 5, .. })
        ));
    }

    #[test]
    fn test_gsa_encoding_numbers_slots() {
        let record = Record::new()
            .with("selection_mode", "automatic")
            .with("fix_mode", "3D")
            .with("satellites", 3)
            .with("pdop", 2.5)
            .with("hdop", 1.3)
            .with("vdop", 2.1);

        let fields = GSA.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields.len(), 2 + SLOTS + 3);
        assert_eq!(fields.join(","), "A,3,01,02,03,,,,,,,,,,2.5,1.3,2.1");
    }

    #[test]
    fn test_gsa_encoding_from_list() {
        let satellites: Vec<Value> = [4, 5, 9].into_iter().map(Value::from).collect();
        let record = Record::new()
            .with("selection_mode", "M")
            .with("fix_mode", 2)
            .with("satellites", satellites)
            .with("system_id", 1);

        let fields = GSA.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields.join(","), "M,2,01,02,03,,,,,,,,,,,,,1");
    }

    #[test]
    fn test_gsa_encoding_clamps_to_twelve_slots() {
        let record = Record::new().with("satellites", 20);

        let fields = GSA.encode(&record, &CodecConfig::default()).unwrap();
        assert_eq!(fields[2..2 + SLOTS].last().map(String::as_str), Some("12"));
        assert_eq!(fields.len(), 2 + SLOTS + 3);
    }

    #[test]
    fn test_gsa_encoding_invalid_satellites() {
        let record = Record::new().with("satellites", "many");
        assert!(matches!(
            GSA.encode(&record, &CodecConfig::default()),
            Err(Error::InvalidField { .. })
        ));
    }
}
