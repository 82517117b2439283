//! Callsign and compound-callsign suffix
//!
//! A standard WSPR callsign occupies exactly six positions:
//!
//! ```text
//! position   0        1       2      3        4        5
//! allowed   [ 0-9A-Z] [0-9A-Z] [0-9A-Z] [ A-Z]   [ A-Z]   [ A-Z]
//! radix      37       36      10       27       27       27
//! ```
//!
//! Position 2 is meant for the call area digit. Shorter callsigns with a
//! one-character prefix before the digit (`K1ABC`) are shifted right by one
//! position with a leading space. A letter that stays in position 2 (the
//! `N0CALL` placeholder) is packed with its codebook value, exactly as
//! other beacon encoders do.

use core::fmt;

use super::{Error, Result};

/// Space character code in the WSPR codebook
pub const SPACE_CODE: u8 = 36;

/// Map a character to its WSPR codebook value
///
/// Digits map to 0-9, letters to 10-35 and space to 36.
#[must_use]
pub const fn char_code(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b' ' => Some(SPACE_CODE),
        _ => None,
    }
}

/// Codebook value of an already validated character
pub(crate) const fn code(c: u8) -> u32 {
    match char_code(c) {
        Some(v) => v as u32,
        None => 0,
    }
}

/// Six-character, space-padded station callsign
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Callsign([u8; Callsign::LEN]);

impl Callsign {
    /// Packed callsign length
    pub const LEN: usize = 6;

    /// Placeholder callsign of unconfigured builds
    pub const PLACEHOLDER: Self = Self(*b"N0CALL");

    /// Parse and normalize a callsign
    ///
    /// Lowercase letters are accepted and upper-cased. Surrounding spaces
    /// are ignored.
    pub fn new(call: &str) -> Result<Self> {
        let call = call.trim();
        if call.is_empty() || call.len() > Self::LEN || !call.is_ascii() {
            return Err(Error::InvalidCallsign);
        }

        let mut raw = [b' '; Self::LEN];
        for (dst, src) in raw.iter_mut().zip(call.bytes()) {
            *dst = src.to_ascii_uppercase();
        }

        // Move the call area digit into position 2 when there is room
        let len = call.len();
        if len < Self::LEN && !raw[2].is_ascii_digit() && raw[1].is_ascii_digit() {
            raw.copy_within(0..len, 1);
            raw[0] = b' ';
        }

        if Self::is_packable(&raw) {
            Ok(Self(raw))
        } else {
            Err(Error::InvalidCallsign)
        }
    }

    fn is_packable(raw: &[u8; Self::LEN]) -> bool {
        let first = raw[0] == b' ' || raw[0].is_ascii_uppercase() || raw[0].is_ascii_digit();
        let second = raw[1].is_ascii_uppercase() || raw[1].is_ascii_digit();
        let third = raw[2].is_ascii_uppercase() || raw[2].is_ascii_digit();
        let tail = raw[3..]
            .iter()
            .all(|&c| c == b' ' || c.is_ascii_uppercase());
        first && second && third && tail
    }

    /// Raw space-padded characters
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Callsign as a padded string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Callsign without padding
    #[must_use]
    pub fn base(&self) -> &str {
        self.as_str().trim()
    }

    /// Mixed-radix callsign number (28 bits)
    #[must_use]
    pub const fn packed(&self) -> u32 {
        let c = &self.0;
        let mut n = code(c[0]);
        n = n * 36 + code(c[1]);
        n = n * 10 + code(c[2]);
        n = n * 27 + (code(c[3]) - 10);
        n = n * 27 + (code(c[4]) - 10);
        n * 27 + (code(c[5]) - 10)
    }
}

impl fmt::Debug for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callsign({:?})", self.as_str())
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Callsign {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.base());
    }
}

impl TryFrom<&str> for Callsign {
    type Error = Error;

    fn try_from(call: &str) -> Result<Self> {
        Self::new(call)
    }
}

/// Compound-callsign suffix code
///
/// | code   | suffix      |
/// |--------|-------------|
/// | 0-9    | `/0` - `/9` |
/// | 10-35  | `/A` - `/Z` |
/// | 36-125 | `/10` - `/99` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Suffix(u8);

impl Suffix {
    /// Highest suffix code
    pub const MAX: u8 = 125;

    /// Create a suffix from its code
    pub const fn new(code: u8) -> Result<Self> {
        if code <= Self::MAX {
            Ok(Self(code))
        } else {
            Err(Error::InvalidSuffix)
        }
    }

    /// Get the suffix code
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Suffix text without the slash
    #[must_use]
    pub fn text(self) -> &'static str {
        let (table, width, index) = match self.0 {
            0..=9 => (SUFFIX_DIGITS, 1, self.0),
            10..=35 => (SUFFIX_LETTERS, 1, self.0 - 10),
            _ => (SUFFIX_NUMBERS, 2, self.0 - 36),
        };
        let start = usize::from(index) * width;
        table.get(start..start + width).unwrap_or_default()
    }
}

/// Single-digit suffixes, codes 0-9
const SUFFIX_DIGITS: &str = "0123456789";

/// Single-letter suffixes, codes 10-35
const SUFFIX_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Two-digit suffixes 10-99, codes 36-125
const SUFFIX_NUMBERS: &str = "101112131415161718192021222324252627282930313233343536373839404142434445464748495051525354555657585960616263646566676869707172737475767778798081828384858687888990919293949596979899";

impl Default for Suffix {
    fn default() -> Self {
        Self(1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Suffix {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "/{=str}", self.text());
    }
}
