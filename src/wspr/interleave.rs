//! Bit-reversal interleaver
//!
//! Coded bit `i` goes to the position given by the `i`-th 8-bit index whose
//! bit reversal is below 162. Adjacent coded bits end up far apart on air,
//! so a fade hits bits the Fano decoder sees as scattered.

use super::SYMBOL_COUNT;

/// Reorder coded bits into transmission order
#[must_use]
pub fn interleave(coded: &[u8; SYMBOL_COUNT]) -> [u8; SYMBOL_COUNT] {
    let mut out = [0u8; SYMBOL_COUNT];
    let mut placed = 0;

    for j in 0..=u8::MAX {
        let dest = usize::from(j.reverse_bits());
        if dest < SYMBOL_COUNT {
            out[dest] = coded[placed];
            placed += 1;
            if placed == SYMBOL_COUNT {
                break;
            }
        }
    }

    out
}
