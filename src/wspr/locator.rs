//! Grid locator from latitude/longitude
//!
//! Produces the field / square / subsquare locator used in the message.
//! The subsquare scales are the fixed-precision constants the beacon has
//! always transmitted with, so the output is reproduced exactly rather than
//! computed with exact 1/12 and 1/24 degree steps.

use core::fmt;
use core::ops::Deref;

use heapless::String;

use super::{Error, Result};
use crate::types::Position;

/// Longitude degrees per character, per pair (field, square, subsquare)
const LON_SCALE: [f64; 3] = [20.0, 2.0, 0.083_333];

/// Latitude degrees per character, per pair (field, square, subsquare)
const LAT_SCALE: [f64; 3] = [10.0, 1.0, 0.041_666_5];

/// Maidenhead-style grid locator, 4 or 6 characters
#[derive(Clone, PartialEq, Eq)]
pub struct Locator(String<6>);

impl Locator {
    /// Shortest locator (field + square)
    pub const MIN_LEN: usize = 4;

    /// Longest locator (field + square + subsquare)
    pub const MAX_LEN: usize = 6;

    /// Locator text
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Raw ASCII characters
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether the subsquare is present
    #[must_use]
    pub fn has_subsquare(&self) -> bool {
        self.0.len() == Self::MAX_LEN
    }

    /// Keep only field and square
    #[must_use]
    pub fn truncated(&self) -> Self {
        let mut short = self.0.clone();
        short.truncate(Self::MIN_LEN);
        Self(short)
    }
}

impl Deref for Locator {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locator({:?})", self.as_str())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Locator {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

/// Compute the grid locator for a position
///
/// `length` is rounded down to an even number and clamped to 4..=6.
pub fn locator(position: Position, length: usize) -> Result<Locator> {
    if !position.is_valid() {
        return Err(Error::InvalidPosition);
    }

    let length = (length & !1).clamp(Locator::MIN_LEN, Locator::MAX_LEN);

    let mut lon = position.longitude + 180.0;
    let mut lat = position.latitude + 90.0;
    let mut out = String::new();

    for pair in 0..length / 2 {
        let base = if pair % 2 == 1 { b'0' } else { b'A' };
        // Truncation equals floor, both values are non-negative
        let lon_char = base + (lon / LON_SCALE[pair]) as u8;
        let lat_char = base + (lat / LAT_SCALE[pair]) as u8;
        out.push(char::from(lon_char)).map_err(|()| Error::InvalidPosition)?;
        out.push(char::from(lat_char)).map_err(|()| Error::InvalidPosition)?;

        lon %= LON_SCALE[pair];
        lat %= LAT_SCALE[pair];
    }

    Ok(Locator(out))
}
