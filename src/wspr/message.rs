//! Message packing
//!
//! Every WSPR message is two integers: `n` (28 bits, normally the callsign)
//! and `m` (22 bits, normally locator and power). The three message types
//! reuse the fields differently:
//!
//! | type | `n` | `m` |
//! |------|-----|-----|
//! | Standard | callsign | 4-char locator, power |
//! | Extended callsign | callsign | suffix, power + 2 |
//! | Extended locator | 6-char locator as a pseudo-callsign | callsign hash, power |
//!
//! Both fields are then laid out MSB first in 11 bytes, of which the last
//! 31 bits are zero padding that flushes the convolutional encoder.

use super::callsign::{code, Callsign, Suffix};
use super::hash::callsign_hash;
use super::locator::Locator;
use super::{Error, Result, MESSAGE_BYTES};
use crate::types::PowerLevel;

/// Base value of `m` for extended-callsign (suffix) messages
const SUFFIX_BASE: u32 = 27_232;

/// Message type selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransmissionType {
    /// Type 1: callsign, 4-character locator, power
    #[default]
    Standard,
    /// Type 2: compound callsign (suffix) and power, no locator
    ExtendedCallsign,
    /// Type 3: callsign hash, 6-character locator, power
    ExtendedLocator,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmissionType {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Standard => defmt::write!(f, "Type1"),
            Self::ExtendedCallsign => defmt::write!(f, "Type2"),
            Self::ExtendedLocator => defmt::write!(f, "Type3"),
        }
    }
}

/// Station data that goes into one message
#[derive(Clone, Debug)]
pub struct MessageFields<'a> {
    /// Station callsign
    pub callsign: &'a Callsign,
    /// Compound-callsign suffix, if any
    pub suffix: Option<Suffix>,
    /// Grid locator (6 characters needed for extended-locator messages)
    pub locator: &'a Locator,
    /// Reported power
    pub power: PowerLevel,
}

/// Packed `n` / `m` message words
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackedMessage {
    /// Information word (28 bits)
    pub n: u32,
    /// Locator/power word (22 bits)
    pub m: u32,
}

impl PackedMessage {
    /// Pack the fields for the given message type
    pub fn new(fields: &MessageFields<'_>, kind: TransmissionType) -> Result<Self> {
        let power = u32::from(fields.power.as_dbm());

        let (n, m) = match kind {
            TransmissionType::Standard => {
                let loc = fields.locator.as_bytes();
                let field_lon = u32::from(loc[0] - b'A');
                let field_lat = u32::from(loc[1] - b'A');
                let square_lon = u32::from(loc[2] - b'0');
                let square_lat = u32::from(loc[3] - b'0');
                let grid = (179 - 10 * field_lon - square_lon) * 180 + 10 * field_lat + square_lat;
                (fields.callsign.packed(), grid * 128 + power + 64)
            }
            TransmissionType::ExtendedCallsign => {
                let suffix = fields.suffix.ok_or(Error::SuffixRequired)?;
                let m = (SUFFIX_BASE + u32::from(suffix.code())) * 128 + power + 2 + 64;
                (fields.callsign.packed(), m)
            }
            TransmissionType::ExtendedLocator => {
                if !fields.locator.has_subsquare() {
                    return Err(Error::LocatorTooShort);
                }
                let loc = fields.locator.as_bytes();
                let mut n = code(loc[1]);
                n = n * 36 + code(loc[2]);
                n = n * 10 + code(loc[3]);
                n = n * 27 + (code(loc[4]) - 10);
                n = n * 27 + (code(loc[5]) - 10);
                n = n * 27 + (code(loc[0]) - 10);
                let hash = u32::from(callsign_hash(fields.callsign, fields.suffix)?);
                (n, 128 * hash + 64 - power - 1)
            }
        };

        Ok(Self { n, m })
    }

    /// Lay out `n` and `m` MSB first in the encoder input buffer
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn to_bytes(self) -> [u8; MESSAGE_BYTES] {
        let (n, m) = (self.n, self.m);
        let mut c = [0u8; MESSAGE_BYTES];
        c[0] = (n >> 20) as u8;
        c[1] = (n >> 12) as u8;
        c[2] = (n >> 4) as u8;
        c[3] = ((n & 0x0F) << 4) as u8 | ((m >> 18) & 0x0F) as u8;
        c[4] = (m >> 10) as u8;
        c[5] = (m >> 2) as u8;
        c[6] = ((m & 0x03) << 6) as u8;
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use crate::wspr::locator::locator;

    fn fields_for<'a>(call: &'a Callsign, loc: &'a Locator, suffix: Option<Suffix>) -> MessageFields<'a> {
        MessageFields {
            callsign: call,
            suffix,
            locator: loc,
            power: PowerLevel::quantize(37),
        }
    }

    #[test]
    fn standard_bytes() {
        let call = Callsign::new("N0CALL").unwrap();
        let loc = locator(Position::new(51.05, -114.07), 6).unwrap();
        let msg = PackedMessage::new(&fields_for(&call, &loc, None), TransmissionType::Standard).unwrap();
        assert_eq!(
            msg.to_bytes(),
            [0x9B, 0xA6, 0x9E, 0x0C, 0xFD, 0x39, 0x40, 0, 0, 0, 0]
        );
    }

    #[test]
    fn extended_callsign_bytes() {
        let call = Callsign::new("N0CALL").unwrap();
        let loc = locator(Position::new(51.05, -114.07), 6).unwrap();
        let suffix = Suffix::new(1).ok();
        let msg = PackedMessage::new(&fields_for(&call, &loc, suffix), TransmissionType::ExtendedCallsign).unwrap();
        assert_eq!(msg.m, (27_232 + 1) * 128 + 37 + 2 + 64);
        assert_eq!(
            msg.to_bytes(),
            [0x9B, 0xA6, 0x9E, 0x0D, 0x4C, 0x39, 0xC0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn extended_locator_bytes() {
        let call = Callsign::new("N0CALL").unwrap();
        let loc = locator(Position::new(51.05, -114.07), 6).unwrap();
        let suffix = Suffix::new(1).ok();
        let msg = PackedMessage::new(&fields_for(&call, &loc, suffix), TransmissionType::ExtendedLocator).unwrap();
        assert_eq!(msg.m, 128 * 34_606 + 64 - 37 - 1);
        assert_eq!(
            msg.to_bytes(),
            [0xA2, 0x97, 0xD7, 0xC0, 0xE5, 0xC6, 0x80, 0, 0, 0, 0]
        );
    }

    #[test]
    fn suffix_required_for_type2() {
        let call = Callsign::new("N0CALL").unwrap();
        let loc = locator(Position::new(0.0, 0.0), 6).unwrap();
        let result = PackedMessage::new(&fields_for(&call, &loc, None), TransmissionType::ExtendedCallsign);
        assert_eq!(result, Err(Error::SuffixRequired));
    }

    #[test]
    fn six_char_locator_required_for_type3() {
        let call = Callsign::new("N0CALL").unwrap();
        let loc = locator(Position::new(0.0, 0.0), 4).unwrap();
        let result = PackedMessage::new(&fields_for(&call, &loc, None), TransmissionType::ExtendedLocator);
        assert_eq!(result, Err(Error::LocatorTooShort));
    }

    #[test]
    fn padding_is_zero() {
        let msg = PackedMessage { n: u32::MAX >> 4, m: u32::MAX >> 10 };
        let bytes = msg.to_bytes();
        assert_eq!(bytes[6] & 0x3F, 0);
        assert!(bytes[7..].iter().all(|&b| b == 0));
    }
}
