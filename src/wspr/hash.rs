//! Callsign hash for extended-locator messages
//!
//! Type 3 messages carry a hash of the full (possibly compound) callsign
//! instead of the callsign itself. Only the bits that fit the 22-bit `m`
//! word reach the air. Receivers match it against callsigns decoded from
//! earlier Type 1/2 messages, so the value must be bit-identical to the
//! one every WSPR decoder computes: Bob Jenkins' lookup3 `final` mix,
//! seeded with 146, over the callsign bytes read as little-endian words.

use heapless::String;

use super::callsign::{Callsign, Suffix};
use super::{Error, Result};

/// Longest extended callsign: 6 characters + `/` + 2 suffix digits, plus headroom
pub const EXTENDED_CALLSIGN_CAPACITY: usize = 10;

/// Extended callsign text, e.g. `N0CALL/1`
pub type ExtendedCallsign = String<EXTENDED_CALLSIGN_CAPACITY>;

/// Hash seed used by WSPR
const SEED: u32 = 146;

/// lookup3 initial value
const GOLDEN: u32 = 0xDEAD_BEEF;

/// Build the callsign text that gets hashed
///
/// Padding is dropped and `/` plus the suffix text is appended when a
/// suffix is present.
pub fn extended_callsign(call: &Callsign, suffix: Option<Suffix>) -> Result<ExtendedCallsign> {
    let mut out = ExtendedCallsign::new();
    out.push_str(call.base()).map_err(|()| Error::InvalidCallsign)?;
    if let Some(suffix) = suffix {
        out.push('/').map_err(|()| Error::InvalidCallsign)?;
        out.push_str(suffix.text()).map_err(|()| Error::InvalidCallsign)?;
    }
    Ok(out)
}

/// Little-endian word `index` of `bytes`, zero-filled past the end
fn word(bytes: &[u8], index: usize) -> u32 {
    let mut w = [0u8; 4];
    for (dst, src) in w.iter_mut().zip(bytes.iter().skip(index * 4)) {
        *dst = *src;
    }
    u32::from_le_bytes(w)
}

/// 16-bit hash of a 3 to 10 byte string
///
/// Inputs outside that length range absorb no data, only the length seed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash(bytes: &[u8]) -> u16 {
    let len = bytes.len();
    let init = GOLDEN.wrapping_add(len as u32).wrapping_add(SEED);
    let (mut a, mut b, mut c) = (init, init, init);

    let (w0, w1, w2) = (word(bytes, 0), word(bytes, 1), word(bytes, 2));
    match len {
        10 => {
            c = c.wrapping_add(w2 & 0xFFFF);
            b = b.wrapping_add(w1);
            a = a.wrapping_add(w0);
        }
        9 => {
            c = c.wrapping_add(w2 & 0xFF);
            b = b.wrapping_add(w1);
            a = a.wrapping_add(w0);
        }
        8 => {
            b = b.wrapping_add(w1);
            a = a.wrapping_add(w0);
        }
        7 => {
            b = b.wrapping_add(w1 & 0x00FF_FFFF);
            a = a.wrapping_add(w0);
        }
        6 => {
            b = b.wrapping_add(w1 & 0xFFFF);
            a = a.wrapping_add(w0);
        }
        5 => {
            b = b.wrapping_add(w1 & 0xFF);
            a = a.wrapping_add(w0);
        }
        4 => {
            a = a.wrapping_add(w0);
        }
        3 => {
            a = a.wrapping_add(w0 & 0x00FF_FFFF);
        }
        _ => {}
    }

    c ^= b;
    c = c.wrapping_sub(b.rotate_left(14));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(11));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(25));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(16));
    a ^= c;
    a = a.wrapping_sub(c.rotate_left(4));
    b ^= a;
    b = b.wrapping_sub(a.rotate_left(14));
    c ^= b;
    c = c.wrapping_sub(b.rotate_left(24));

    (c & 0xFFFF) as u16
}

/// Hash of a station's extended callsign
pub fn callsign_hash(call: &Callsign, suffix: Option<Suffix>) -> Result<u16> {
    Ok(hash(extended_callsign(call, suffix)?.as_bytes()))
}
