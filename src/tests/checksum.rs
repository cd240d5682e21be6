use crate::{checksum, compute_checksum, format_checksum, verify_checksum};

const FIXTURE_BODY: &str = "$GPGGA,215909.285,5232.252,N,01321.913,E,1,12,1.0,0.0,M,0.0,M,,";

#[test]
fn test_checksum_fixture() {
    assert_eq!(compute_checksum(FIXTURE_BODY), "*6E");
    assert!(verify_checksum(FIXTURE_BODY, "6E"));
}

#[test]
fn test_checksum_skips_marker() {
    assert_eq!(checksum("GPGGA,data"), 0x6A);
    assert_eq!(compute_checksum("$GPGGA,data"), "*6A");
    assert_eq!(compute_checksum("!GPGGA,data"), "*6A");
}

#[test]
fn test_checksum_empty_body() {
    assert_eq!(compute_checksum(""), "*00");
    assert_eq!(compute_checksum("$"), "*00");
}

#[test]
fn test_computed_checksum_verifies() {
    let bodies = [
        "$GPGGA,123456,data",
        "$GPRMC,123519.000,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W",
        "$GPGSV,1,1,00",
        "$PXXXX",
        FIXTURE_BODY,
    ];

    for body in bodies {
        let suffix = compute_checksum(body);
        let hex = suffix.strip_prefix('*').unwrap();
        assert!(verify_checksum(body, hex), "{body}");
    }
}

#[test]
fn test_checksum_detects_single_character_change() {
    let original = compute_checksum(FIXTURE_BODY);

    for (index, _) in FIXTURE_BODY.char_indices().skip(1) {
        let mut corrupted = FIXTURE_BODY.to_string();
        corrupted.replace_range(index..index + 1, "#");

        if corrupted != FIXTURE_BODY {
            assert_ne!(compute_checksum(&corrupted), original, "{corrupted}");
        }
    }
}

#[test]
fn test_verify_checksum_rejects_malformed_hex() {
    assert!(verify_checksum("$GPGGA,data", "6a"));
    assert!(!verify_checksum("$GPGGA,data", "6"));
    assert!(!verify_checksum("$GPGGA,data", "6A0"));
    assert!(!verify_checksum("$GPGGA,data", "6G"));
    assert!(!verify_checksum("$GPGGA,data", ""));
}

#[test]
fn test_format_checksum() {
    assert_eq!(format_checksum(0x00), "00");
    assert_eq!(format_checksum(0x6E), "6E");
    assert_eq!(format_checksum(0xFF), "FF");
}
