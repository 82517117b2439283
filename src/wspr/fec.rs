//! Convolutional encoder
//!
//! WSPR protects the 50 message bits with a constraint length 32, rate 1/2
//! convolutional code. Each input bit is shifted into a 32-bit register and
//! produces two parity bits, one per generator polynomial. 81 input bits
//! (the 50 message bits and 31 flush zeros) yield the 162 coded bits.

use super::{MESSAGE_BYTES, SYMBOL_COUNT};

/// First generator polynomial
pub const POLY_0: u32 = 0xF2D0_5351;

/// Second generator polynomial
pub const POLY_1: u32 = 0xE461_3C47;

/// Even parity of a 32-bit word
const fn parity(word: u32) -> u8 {
    (word.count_ones() & 1) as u8
}

/// Encode the message bytes into 162 coded bits (one bit per byte)
#[must_use]
pub fn convolve(message: &[u8; MESSAGE_BYTES]) -> [u8; SYMBOL_COUNT] {
    let mut out = [0u8; SYMBOL_COUNT];
    let mut reg: u32 = 0;
    let mut count = 0;

    let bits = message
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| u32::from((byte >> shift) & 1)));

    for bit in bits {
        if count >= SYMBOL_COUNT {
            break;
        }
        reg = (reg << 1) | bit;
        out[count] = parity(reg & POLY_0);
        out[count + 1] = parity(reg & POLY_1);
        count += 2;
    }

    out
}
