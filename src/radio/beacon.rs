//! Beacon Cycle
//!
//! Ties configuration, encoder and synthesizer together. The caller feeds
//! the current UTC time and GPS fix to [`Beacon::poll`] in a loop; the
//! beacon decides whether this is a transmission slot, which message type
//! to send, and keys the transmitter.
//!
//! Stations with a compound callsign cannot fit callsign, suffix and a
//! locator into one message, so they alternate between the extended
//! callsign (Type 2) and extended locator (Type 3) messages.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::transmit::transmit_symbols;
use crate::config::BeaconConfig;
use crate::drivers::si5351::{self, Si5351};
use crate::types::{Position, UtcTime};
use crate::wspr::{self, is_start_of_slot, Encoder, SymbolBuffer, TransmissionType};

/// Outcome of one poll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poll {
    /// Not a slot start, or the slot was already served
    Idle,
    /// Slot skipped for lack of a GPS fix
    NoFix,
    /// A message of this type went out
    Transmitted(TransmissionType),
}

#[cfg(feature = "embedded")]
impl defmt::Format for Poll {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::NoFix => defmt::write!(f, "NoFix"),
            Self::Transmitted(kind) => defmt::write!(f, "Transmitted({})", kind),
        }
    }
}

/// Beacon errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeaconError<E> {
    /// Message could not be encoded
    Encode(wspr::Error),
    /// Synthesizer failure
    Synth(si5351::Error<E>),
}

impl<E> From<wspr::Error> for BeaconError<E> {
    fn from(err: wspr::Error) -> Self {
        Self::Encode(err)
    }
}

impl<E> From<si5351::Error<E>> for BeaconError<E> {
    fn from(err: si5351::Error<E>) -> Self {
        Self::Synth(err)
    }
}

impl<E: fmt::Debug> fmt::Display for BeaconError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "encode failed: {e}"),
            Self::Synth(e) => write!(f, "synthesizer failed: {e}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl<E> defmt::Format for BeaconError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Encode(e) => defmt::write!(f, "Encode({})", e),
            Self::Synth(e) => defmt::write!(f, "Synth({})", e),
        }
    }
}

/// Autonomous WSPR beacon
pub struct Beacon<I2C, D> {
    config: BeaconConfig,
    encoder: Encoder,
    synth: Si5351<I2C, D>,
    symbols: SymbolBuffer,
    /// Type to send next when alternating compound-callsign messages
    next_extended: TransmissionType,
    /// Minute of day of the last slot handled
    last_slot: Option<u16>,
}

impl<I2C: I2c, D: DelayNs> Beacon<I2C, D> {
    /// Create a beacon driving a synthesizer at the default address
    pub fn new(config: BeaconConfig, i2c: I2C, delay: D) -> Self {
        Self::with_synth(config, Si5351::new(i2c, delay))
    }

    /// Create a beacon around an already configured synthesizer
    pub fn with_synth(config: BeaconConfig, synth: Si5351<I2C, D>) -> Self {
        Self {
            encoder: Encoder::new(config.callsign, config.suffix),
            config,
            synth,
            symbols: SymbolBuffer::new(),
            next_extended: TransmissionType::ExtendedCallsign,
            last_slot: None,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &BeaconConfig {
        &self.config
    }

    /// Symbols of the most recent transmission
    pub const fn symbols(&self) -> &SymbolBuffer {
        &self.symbols
    }

    /// Bring up the synthesizer and play the startup chirp if enabled
    pub fn start(&mut self) -> Result<(), BeaconError<I2C::Error>> {
        self.synth.initialize()?;
        if self.config.startup_tone {
            self.synth.startup_tone()?;
        }
        info!("beacon {} ready on {}", self.config.callsign, self.config.band);
        Ok(())
    }

    /// Run one scheduling step
    ///
    /// Transmits (blocking for the whole message) when `now` is the arming
    /// point of a slot that has not been served yet.
    pub fn poll(&mut self, now: UtcTime, fix: Option<Position>) -> Result<Poll, BeaconError<I2C::Error>> {
        if !is_start_of_slot(now.minute, now.second) {
            return Ok(Poll::Idle);
        }

        let slot = now.minute_of_day();
        if self.last_slot == Some(slot) {
            return Ok(Poll::Idle);
        }

        let position = match fix {
            Some(position) => position,
            None if self.config.tx_without_fix => self.config.fallback_position,
            None => {
                debug!("slot {} skipped, no fix", slot);
                return Ok(Poll::NoFix);
            }
        };
        self.last_slot = Some(slot);

        let kind = self.select_type();
        self.encoder
            .encode_into(&mut self.symbols, self.config.power_dbm, kind, position)?;

        info!("slot {}: {}", slot, kind);
        transmit_symbols(&mut self.synth, self.config.tx_frequency(), &self.symbols)?;
        Ok(Poll::Transmitted(kind))
    }

    /// Block for one poll interval of the configured power mode
    pub fn idle(&mut self) {
        self.synth.delay_ms(self.config.power_mode.poll_interval_ms());
    }

    /// Give back the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        self.synth.release()
    }

    fn select_type(&mut self) -> TransmissionType {
        if self.config.suffix.is_none() {
            return TransmissionType::Standard;
        }
        let kind = self.next_extended;
        self.next_extended = match kind {
            TransmissionType::ExtendedCallsign => TransmissionType::ExtendedLocator,
            _ => TransmissionType::ExtendedCallsign,
        };
        kind
    }
}
