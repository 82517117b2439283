//! WSPR Protocol Tests
//!
//! End-to-end encoder vectors and the protocol building blocks.
//! Run with: cargo test --no-default-features --features std --test wspr_tests

use wspr_beacon::types::{Position, PowerLevel};
use wspr_beacon::wspr::hash::{callsign_hash, extended_callsign, hash, EXTENDED_CALLSIGN_CAPACITY};
use wspr_beacon::wspr::locator::locator;
use wspr_beacon::wspr::sync::SYNC_VECTOR;
use wspr_beacon::wspr::{
    is_start_of_slot, Callsign, Encoder, Error, Locator, PackedMessage, Suffix, SymbolBuffer, TransmissionType,
    SYMBOL_COUNT,
};

const CALGARY: Position = Position::new(51.05, -114.07);

// =============================================================================
// Reference Vectors
// =============================================================================

// N0CALL, suffix /1, 37 dBm, DO21XB
const STANDARD: [u8; 162] = [
    3, 3, 2, 0, 0, 0, 0, 2, 1, 0, 2, 2, 1, 3, 1, 2, 2, 2, 1, 0, 2, 1, 2, 1, 3, 1, 1,
    0, 0, 2, 0, 0, 2, 0, 3, 0, 2, 3, 2, 1, 0, 2, 2, 0, 2, 2, 1, 2, 1, 1, 2, 0, 3, 1,
    0, 1, 2, 0, 2, 3, 1, 0, 1, 2, 0, 2, 0, 1, 1, 0, 1, 2, 3, 0, 3, 0, 3, 0, 0, 1, 0,
    0, 1, 2, 3, 1, 0, 0, 0, 1, 3, 2, 1, 2, 1, 2, 2, 0, 3, 0, 2, 2, 2, 2, 1, 0, 0, 3,
    0, 2, 1, 1, 1, 2, 1, 3, 2, 0, 1, 1, 2, 1, 2, 2, 0, 1, 1, 3, 2, 0, 2, 0, 0, 3, 0,
    1, 0, 2, 1, 1, 2, 0, 0, 2, 2, 0, 2, 3, 1, 0, 1, 2, 3, 1, 2, 0, 0, 3, 1, 2, 0, 0,
];

const EXTENDED_CALLSIGN: [u8; 162] = [
    3, 3, 2, 2, 0, 0, 0, 0, 1, 0, 2, 0, 1, 1, 1, 0, 2, 2, 1, 0, 2, 1, 2, 1, 3, 3, 1,
    2, 0, 2, 0, 2, 2, 2, 3, 0, 2, 3, 0, 1, 0, 0, 2, 0, 2, 2, 3, 0, 1, 1, 2, 0, 3, 1,
    0, 1, 2, 0, 2, 3, 1, 0, 3, 2, 0, 0, 0, 3, 1, 0, 3, 2, 3, 0, 3, 2, 3, 0, 0, 3, 0,
    2, 1, 0, 3, 1, 2, 2, 0, 1, 3, 2, 1, 0, 3, 0, 2, 0, 3, 2, 2, 2, 2, 0, 1, 2, 0, 3,
    0, 0, 1, 3, 1, 2, 1, 1, 2, 0, 1, 1, 2, 3, 2, 2, 0, 1, 3, 3, 2, 0, 2, 2, 0, 3, 2,
    1, 0, 2, 1, 3, 2, 0, 2, 2, 2, 0, 2, 1, 1, 0, 1, 2, 3, 3, 2, 2, 0, 1, 3, 0, 0, 0,
];

const EXTENDED_LOCATOR: [u8; 162] = [
    3, 3, 2, 0, 0, 0, 0, 0, 1, 2, 2, 2, 1, 1, 1, 2, 0, 2, 3, 2, 2, 3, 2, 1, 3, 3, 1,
    2, 0, 2, 2, 2, 2, 0, 3, 2, 2, 3, 0, 1, 0, 2, 0, 0, 0, 2, 3, 0, 3, 1, 0, 0, 1, 1,
    2, 1, 2, 0, 2, 3, 3, 2, 3, 0, 0, 2, 0, 3, 1, 0, 1, 2, 1, 2, 3, 2, 3, 2, 2, 1, 2,
    0, 1, 2, 3, 3, 0, 0, 2, 1, 3, 2, 1, 0, 3, 2, 0, 0, 1, 2, 0, 0, 0, 0, 3, 0, 0, 1,
    2, 0, 3, 3, 1, 2, 3, 1, 2, 0, 3, 1, 0, 1, 2, 0, 0, 3, 1, 1, 2, 2, 0, 2, 0, 3, 0,
    3, 2, 0, 1, 3, 2, 2, 2, 0, 2, 0, 2, 1, 1, 2, 1, 0, 3, 3, 0, 0, 2, 1, 3, 2, 2, 2,
];

fn station() -> Encoder {
    Encoder::new(Callsign::new("N0CALL").unwrap(), Some(Suffix::new(1).unwrap()))
}

// =============================================================================
// Encoder Pipeline Tests
// =============================================================================

#[test]
fn standard_message_vector() {
    let symbols = station().encode(37, TransmissionType::Standard, CALGARY).unwrap();
    assert_eq!(symbols.as_slice(), &STANDARD[..]);
}

#[test]
fn standard_message_ignores_suffix() {
    let plain = Encoder::new(Callsign::new("N0CALL").unwrap(), None);
    let symbols = plain.encode(37, TransmissionType::Standard, CALGARY).unwrap();
    assert_eq!(symbols.as_slice(), &STANDARD[..]);
}

#[test]
fn extended_callsign_vector() {
    let symbols = station()
        .encode(37, TransmissionType::ExtendedCallsign, CALGARY)
        .unwrap();
    assert_eq!(symbols.as_slice(), &EXTENDED_CALLSIGN[..]);
}

#[test]
fn extended_locator_vector() {
    let symbols = station()
        .encode(37, TransmissionType::ExtendedLocator, CALGARY)
        .unwrap();
    assert_eq!(symbols.as_slice(), &EXTENDED_LOCATOR[..]);
}

#[test]
fn encode_into_reuses_buffer() {
    let enc = station();
    let mut buffer = SymbolBuffer::new();
    enc.encode_into(&mut buffer, 37, TransmissionType::ExtendedLocator, CALGARY)
        .unwrap();
    enc.encode_into(&mut buffer, 37, TransmissionType::Standard, CALGARY)
        .unwrap();
    assert_eq!(buffer.as_slice(), &STANDARD[..]);
    assert_eq!(buffer.len(), SYMBOL_COUNT);
}

#[test]
fn sync_bit_is_symbol_lsb() {
    for vector in [&STANDARD, &EXTENDED_CALLSIGN, &EXTENDED_LOCATOR] {
        for (symbol, sync) in vector.iter().zip(SYNC_VECTOR.iter()) {
            assert_eq!(symbol & 1, *sync);
        }
    }
}

#[test]
fn power_above_ladder_saturates() {
    let enc = station();
    let max = enc.encode(60, TransmissionType::Standard, CALGARY).unwrap();
    let over = enc.encode(100, TransmissionType::Standard, CALGARY).unwrap();
    assert_eq!(max, over);
}

#[test]
fn extended_callsign_requires_suffix() {
    let plain = Encoder::new(Callsign::new("W1AW").unwrap(), None);
    assert_eq!(
        plain.encode(37, TransmissionType::ExtendedCallsign, CALGARY),
        Err(Error::SuffixRequired)
    );
}

#[test]
fn extended_locator_without_suffix_hashes_plain_call() {
    let plain = Encoder::new(Callsign::new("W1AW").unwrap(), None);
    let loc = locator(CALGARY, 6).unwrap();
    let msg = plain
        .pack(&loc, PowerLevel::quantize(37), TransmissionType::ExtendedLocator)
        .unwrap();
    assert_eq!(msg.m, 128 * u32::from(hash(b"W1AW")) + 64 - 37 - 1);
}

#[test]
fn invalid_position_rejected() {
    let enc = station();
    assert_eq!(
        enc.encode(37, TransmissionType::Standard, Position::new(f64::NAN, 0.0)),
        Err(Error::InvalidPosition)
    );
    assert_eq!(
        enc.encode(37, TransmissionType::Standard, Position::new(0.0, 180.0)),
        Err(Error::InvalidPosition)
    );
}

// =============================================================================
// Message Packing Tests
// =============================================================================

#[test]
fn packed_bytes_at_origin() {
    let enc = station();
    let loc = locator(Position::new(0.0, 0.0), 6).unwrap();
    assert_eq!(loc.as_str(), "JJ00AA");
    let power = PowerLevel::quantize(23);

    let standard = enc.pack(&loc, power, TransmissionType::Standard).unwrap();
    assert_eq!(
        standard.to_bytes(),
        [0x9B, 0xA6, 0x9E, 0x07, 0xDD, 0xD5, 0xC0, 0, 0, 0, 0]
    );

    let type2 = enc.pack(&loc, power, TransmissionType::ExtendedCallsign).unwrap();
    assert_eq!(
        type2.to_bytes(),
        [0x9B, 0xA6, 0x9E, 0x0D, 0x4C, 0x36, 0x40, 0, 0, 0, 0]
    );

    let type3 = enc.pack(&loc, power, TransmissionType::ExtendedLocator).unwrap();
    assert_eq!(
        type3.to_bytes(),
        [0x80, 0x65, 0x13, 0x10, 0xE5, 0xCA, 0x00, 0, 0, 0, 0]
    );
}

#[test]
fn type2_and_standard_share_callsign_word() {
    let enc = station();
    let loc = locator(CALGARY, 6).unwrap();
    let power = PowerLevel::quantize(37);
    let a: PackedMessage = enc.pack(&loc, power, TransmissionType::Standard).unwrap();
    let b: PackedMessage = enc.pack(&loc, power, TransmissionType::ExtendedCallsign).unwrap();
    assert_eq!(a.n, b.n);
    assert_ne!(a.m, b.m);
}

#[test]
fn words_fit_their_fields() {
    let enc = station();
    let loc = locator(CALGARY, 6).unwrap();
    for kind in [
        TransmissionType::Standard,
        TransmissionType::ExtendedCallsign,
        TransmissionType::ExtendedLocator,
    ] {
        let msg = enc.pack(&loc, PowerLevel::MAX, kind).unwrap();
        assert!(msg.n < 1 << 28, "{kind:?} n overflows");
        // Type 3 hashes are 16 bits wide; only the low 15 survive the 22-bit field
        if kind != TransmissionType::ExtendedLocator {
            assert!(msg.m < 1 << 22, "{kind:?} m overflows");
        }
    }
}

// =============================================================================
// Locator Tests
// =============================================================================

#[test]
fn locator_reference_points() {
    assert_eq!(locator(Position::new(0.0, 0.0), 6).unwrap().as_str(), "JJ00AA");
    assert_eq!(locator(CALGARY, 6).unwrap().as_str(), "DO21XB");
    assert_eq!(locator(CALGARY, 4).unwrap().as_str(), "DO21");
    assert_eq!(locator(Position::new(-90.0, -180.0), 6).unwrap().as_str(), "AA00AA");
}

#[test]
fn locator_length_limits() {
    let loc: Locator = locator(CALGARY, 6).unwrap();
    assert_eq!(loc.len(), Locator::MAX_LEN);
    assert!(loc.has_subsquare());
    assert_eq!(loc.truncated().as_str(), "DO21");
    assert!(!loc.truncated().has_subsquare());
}

#[test]
fn locator_shape_over_the_globe() {
    // Whole-degree grid plus offsets that land on every field, square and subsquare edge
    let offsets = [0.0, 0.5, 0.999_998, 1.999_995];
    for lat_deg in (-90..90).step_by(3) {
        for lon_deg in (-180..180).step_by(7) {
            for &dlat in &offsets {
                for &dlon in &offsets {
                    let pos = Position::new(f64::from(lat_deg) + dlat, f64::from(lon_deg) + dlon);
                    if !pos.is_valid() {
                        continue;
                    }
                    for len in [4, 6] {
                        let loc = locator(pos, len).unwrap();
                        let b = loc.as_bytes();
                        assert_eq!(b.len(), len, "{pos:?}");
                        assert!((b'A'..=b'R').contains(&b[0]) && (b'A'..=b'R').contains(&b[1]), "{loc:?}");
                        assert!(b[2].is_ascii_digit() && b[3].is_ascii_digit(), "{loc:?}");
                        if len == 6 {
                            assert!((b'A'..=b'Y').contains(&b[4]) && (b'A'..=b'Y').contains(&b[5]), "{loc:?}");
                            assert_eq!(&b[..4], locator(pos, 4).unwrap().as_bytes());
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn locator_subsquare_y_at_scale_edge() {
    // 24 steps of the 0.083333 / 0.0416665 scales stop just short of 2 and 1 degrees
    assert_eq!(locator(Position::new(0.999_998, 1.999_995), 6).unwrap().as_str(), "JJ00YY");
    assert_eq!(locator(Position::new(51.999_998, -114.000_005), 6).unwrap().as_str(), "DO21YY");
}

// =============================================================================
// Callsign Hash Tests
// =============================================================================

#[test]
fn hash_reference_values() {
    assert_eq!(hash(b"N0CALL/1"), 34606);
    assert_eq!(hash(b"N0CALL/99"), 27854);
    assert_eq!(hash(b"K1ABC/99"), 4729);
}

#[test]
fn largest_suffix_fits_extended_buffer() {
    // Suffix 125 renders as /99, the longest suffix text
    let call = Callsign::new("N0CALL").unwrap();
    let suffix = Suffix::new(125).unwrap();
    let text = extended_callsign(&call, Some(suffix)).unwrap();
    assert_eq!(text.as_str(), "N0CALL/99");
    assert!(text.len() <= EXTENDED_CALLSIGN_CAPACITY);
    assert_eq!(callsign_hash(&call, Some(suffix)), Ok(27854));
}

#[test]
fn shifted_callsign_hashes_without_padding() {
    let call = Callsign::new("K1ABC").unwrap();
    assert_eq!(call.as_str(), " K1ABC");
    assert_eq!(extended_callsign(&call, Some(Suffix::new(125).unwrap())).unwrap().as_str(), "K1ABC/99");
    assert_eq!(callsign_hash(&call, Some(Suffix::new(125).unwrap())), Ok(4729));
}

// =============================================================================
// Timeslot Tests
// =============================================================================

#[test]
fn timeslot_arming_points() {
    assert!(is_start_of_slot(7, 58));
    assert!(!is_start_of_slot(7, 57));
    assert!(is_start_of_slot(3, 58));
    assert!(!is_start_of_slot(5, 58));
    assert!(is_start_of_slot(53, 59));
}
