use nmea0183_codec::{Codec, CodecConfig, Error, Record};

const LOG: &str = "\
$GPGGA,215909.285,5232.252,N,01321.913,E,1,12,1.0,0.0,M,0.0,M,,*6E
$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A
$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39
$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00
$GPGGA,215909.285,5232.252,N,01321.913,E,1,13,1.0,0.0,M,0.0,M,,*6E
$GPZDA,201530.00,04,07,2002,00,00
";

fn print(result: Result<Record, Error>) {
    match result {
        Ok(record) => {
            let fields: Vec<_> = record
                .iter()
                .map(|(field, value)| format!("{field}={value:?}"))
                .collect();
            println!("Decoded: {}", fields.join(" "));
        }
        Err(e) => {
            println!("Decoding error occurred: {e}");
        }
    }
}

fn main() {
    let mut codec = Codec::new(CodecConfig::default().with_reference_year(2024));
    codec.set_error_handler(|error| eprintln!("handler saw: {error:?}"));

    for result in codec.decode_lines(LOG) {
        print(result);
    }

    if let Ok(record) = codec.decode(LOG.lines().next().unwrap_or_default()) {
        match codec.encode("GNGGA", &record) {
            Ok(sentence) => println!("Re-encoded as {sentence}"),
            Err(e) => println!("Encoding error occurred: {e}"),
        }
    }
}
