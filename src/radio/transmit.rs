//! Symbol Transmission
//!
//! Keys the synthesizer through a symbol buffer: one tone per symbol, held
//! for one WSPR symbol period, output off at the end.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::{WSPR_SYMBOL_PERIOD_US, WSPR_TONE_SPACING_DEN, WSPR_TONE_SPACING_NUM};
use crate::drivers::si5351::{Error, Si5351};
use crate::types::Frequency;
use crate::wspr::SymbolBuffer;

/// Offset of a symbol's tone above the base frequency, in centihertz
#[must_use]
pub const fn tone_offset(symbol: u8) -> u64 {
    symbol as u64 * WSPR_TONE_SPACING_NUM / WSPR_TONE_SPACING_DEN
}

/// Tone frequency for a symbol
#[must_use]
pub const fn tone_frequency(base: Frequency, symbol: u8) -> Option<Frequency> {
    base.offset(tone_offset(symbol))
}

/// Transmit a full symbol buffer starting at `base`
///
/// Blocks for the whole transmission (about 110.6 s). On a bus error the
/// output is switched off on a best-effort basis and the error returned.
pub fn transmit_symbols<I2C: I2c, D: DelayNs>(
    synth: &mut Si5351<I2C, D>,
    base: Frequency,
    symbols: &SymbolBuffer,
) -> Result<(), Error<I2C::Error>> {
    info!("TX start on {}", base);

    for &symbol in symbols {
        let result = tone_frequency(base, symbol)
            .ok_or(Error::InvalidFrequency)
            .and_then(|freq| synth.set_frequency(freq));

        if let Err(err) = result {
            error!("TX aborted: {}", err);
            // The first failure is the one reported
            if synth.disable().is_err() {
                warn!("TX abort: output may still be keyed");
            }
            return Err(err);
        }

        synth.delay_us(WSPR_SYMBOL_PERIOD_US);
    }

    synth.disable()?;
    info!("TX done");
    Ok(())
}
