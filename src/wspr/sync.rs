//! Sync vector merge
//!
//! Each channel symbol carries one sync bit (LSB) and one data bit (MSB),
//! selecting one of four tones.

use super::SYMBOL_COUNT;

/// WSPR pseudo-random synchronization vector
pub const SYNC_VECTOR: [u8; SYMBOL_COUNT] = [
    1, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 0, 0, //
    1, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, //
    0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0, 1, 1, 0, 1, //
    0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, //
    1, 1, 0, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, //
    0, 0, 1, 0, 0, 1, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0, 1, //
    1, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, //
    1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 1, 1, 0, 0, 0,
];

/// Combine interleaved data bits with the sync vector into 4-FSK symbols
pub fn merge_sync(data: &[u8; SYMBOL_COUNT], symbols: &mut [u8; SYMBOL_COUNT]) {
    for ((symbol, &sync), &bit) in symbols.iter_mut().zip(SYNC_VECTOR.iter()).zip(data.iter()) {
        *symbol = sync + 2 * (bit & 1);
    }
}
