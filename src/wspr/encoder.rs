//! Symbol encoder pipeline

use core::ops::Index;

use super::callsign::{Callsign, Suffix};
use super::locator::{locator, Locator};
use super::message::{MessageFields, PackedMessage, TransmissionType};
use super::{fec, interleave, sync, Result, SYMBOL_COUNT};
use crate::types::{Position, PowerLevel};

/// One transmission worth of 4-FSK channel symbols (values 0-3)
#[derive(Clone, PartialEq, Eq)]
pub struct SymbolBuffer([u8; SYMBOL_COUNT]);

impl SymbolBuffer {
    /// All-zero buffer
    #[must_use]
    pub const fn new() -> Self {
        Self([0; SYMBOL_COUNT])
    }

    /// Symbols in transmission order
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Iterate symbols in transmission order
    pub fn iter(&self) -> core::slice::Iter<'_, u8> {
        self.0.iter()
    }

    /// Number of symbols (always 162)
    #[must_use]
    pub const fn len(&self) -> usize {
        SYMBOL_COUNT
    }

    /// Always false, kept for API symmetry with slices
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Default for SymbolBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for SymbolBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a SymbolBuffer {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl core::fmt::Debug for SymbolBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SymbolBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]}", &self.0[..]);
    }
}

/// Station identity bound to the WSPR encoding pipeline
///
/// The encoder holds no per-transmission state, every call rebuilds the
/// symbols from scratch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoder {
    callsign: Callsign,
    suffix: Option<Suffix>,
}

impl Encoder {
    /// Create an encoder for a station
    ///
    /// `suffix` is `None` for a plain callsign. Extended-callsign messages
    /// need one.
    #[must_use]
    pub const fn new(callsign: Callsign, suffix: Option<Suffix>) -> Self {
        Self { callsign, suffix }
    }

    /// Station callsign
    #[must_use]
    pub const fn callsign(&self) -> &Callsign {
        &self.callsign
    }

    /// Compound-callsign suffix
    #[must_use]
    pub const fn suffix(&self) -> Option<Suffix> {
        self.suffix
    }

    /// Encode a message into a new symbol buffer
    ///
    /// `power_dbm` is quantized to the WSPR power ladder.
    pub fn encode(&self, power_dbm: u8, kind: TransmissionType, position: Position) -> Result<SymbolBuffer> {
        let mut symbols = SymbolBuffer::new();
        self.encode_into(&mut symbols, power_dbm, kind, position)?;
        Ok(symbols)
    }

    /// Encode a message into a caller-owned buffer
    ///
    /// The buffer is left untouched on error.
    pub fn encode_into(
        &self,
        symbols: &mut SymbolBuffer,
        power_dbm: u8,
        kind: TransmissionType,
        position: Position,
    ) -> Result<()> {
        let locator = locator(position, Locator::MAX_LEN)?;
        let message = self.pack(&locator, PowerLevel::quantize(power_dbm), kind)?;

        let coded = fec::convolve(&message.to_bytes());
        let interleaved = interleave::interleave(&coded);
        sync::merge_sync(&interleaved, &mut symbols.0);

        trace!("encoded {} for {}", kind, locator.as_str());
        Ok(())
    }

    /// Pack the message words without channel coding
    pub fn pack(&self, locator: &Locator, power: PowerLevel, kind: TransmissionType) -> Result<PackedMessage> {
        let fields = MessageFields {
            callsign: &self.callsign,
            suffix: self.suffix,
            locator,
            power,
        };
        PackedMessage::new(&fields, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wspr::Error;

    fn encoder(suffix: Option<u8>) -> Encoder {
        Encoder::new(
            Callsign::new("N0CALL").unwrap(),
            suffix.map(|s| Suffix::new(s).unwrap()),
        )
    }

    const CALGARY: Position = Position::new(51.05, -114.07);

    #[test]
    fn symbols_are_four_level() {
        let enc = encoder(Some(1));
        for kind in [
            TransmissionType::Standard,
            TransmissionType::ExtendedCallsign,
            TransmissionType::ExtendedLocator,
        ] {
            let symbols = enc.encode(37, kind, CALGARY).unwrap();
            assert_eq!(symbols.len(), SYMBOL_COUNT);
            assert!(symbols.iter().all(|&s| s <= 3));
        }
    }

    #[test]
    fn no_state_between_calls() {
        let enc = encoder(Some(1));
        let first = enc.encode(37, TransmissionType::Standard, CALGARY).unwrap();
        let _ = enc.encode(37, TransmissionType::ExtendedLocator, CALGARY).unwrap();
        let again = enc.encode(37, TransmissionType::Standard, CALGARY).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn power_is_quantized() {
        let enc = encoder(None);
        let exact = enc.encode(37, TransmissionType::Standard, CALGARY).unwrap();
        let rounded = enc.encode(39, TransmissionType::Standard, CALGARY).unwrap();
        assert_eq!(exact, rounded);
    }

    #[test]
    fn errors_leave_buffer_untouched() {
        let enc = encoder(None);
        let mut symbols = SymbolBuffer::new();
        let result = enc.encode_into(&mut symbols, 37, TransmissionType::ExtendedCallsign, CALGARY);
        assert_eq!(result, Err(Error::SuffixRequired));
        assert_eq!(symbols, SymbolBuffer::new());

        let bad = Position::new(91.0, 0.0);
        let result = enc.encode_into(&mut symbols, 37, TransmissionType::Standard, bad);
        assert_eq!(result, Err(Error::InvalidPosition));
        assert_eq!(symbols, SymbolBuffer::new());
    }
}
