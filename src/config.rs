//! System configuration and hardware constants
//!
//! Compile-time constants for the beacon hardware and WSPR timing, plus the
//! [`BeaconConfig`] value the application builds once at start-up.

use core::fmt;

use crate::power::PowerMode;
use crate::types::{Band, Frequency, Position};
use crate::wspr::{Callsign, Suffix};

/// `Si5351A` reference oscillator (26 MHz TCXO)
pub const REFERENCE_OSC_HZ: u32 = 26_000_000;

/// `Si5351A` I2C address
pub const SI5351_I2C_ADDR: u8 = 0x60;

/// I2C bus frequency for the `Si5351A`
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// WSPR symbol period in microseconds (8192 / 12000 s)
pub const WSPR_SYMBOL_PERIOD_US: u32 = 682_667;

/// WSPR tone spacing numerator in centihertz (12000 Hz × 100)
pub const WSPR_TONE_SPACING_NUM: u64 = 1_200_000;

/// WSPR tone spacing denominator (12000 / 8192 Hz per tone)
pub const WSPR_TONE_SPACING_DEN: u64 = 8192;

/// Startup chirp base frequency (144.025 MHz)
pub const STARTUP_TONE_FREQUENCY: Frequency = match Frequency::from_centihertz(14_402_500_000) {
    Some(freq) => freq,
    None => panic!("startup tone outside the band plan"),
};

/// Startup chirp increment per step (50 Hz)
pub const STARTUP_TONE_STEP_CENTIHERTZ: u64 = 5_000;

/// Startup chirp time per step
pub const STARTUP_TONE_DWELL_MS: u32 = 20;

/// Number of startup chirp steps
pub const STARTUP_TONE_STEPS: u32 = 50;

/// Steps in each chirp of the double-sweep self test
pub const SELF_TEST_SHORT_STEPS: u32 = 100;

/// Steps in the long-sweep self test
pub const SELF_TEST_LONG_STEPS: u32 = 300;

/// Pause between the two chirps of the double-sweep self test
pub const SELF_TEST_PAUSE_MS: u32 = 1000;

/// Default reported power (200 mW)
pub const DEFAULT_POWER_DBM: u8 = 23;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED, on while transmitting
    pub const LED_STATUS: &str = "PA5";

    /// I2C1 SCL (`Si5351A`)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (`Si5351A`)
    pub const I2C1_SDA: &str = "PB9";
}

/// Configuration errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Callsign is empty, too long, or uses characters WSPR cannot carry
    InvalidCallsign,
    /// Suffix code above 125
    InvalidSuffix,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCallsign => write!(f, "invalid callsign"),
            Self::InvalidSuffix => write!(f, "suffix must be 0-125"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidCallsign => defmt::write!(f, "InvalidCallsign"),
            Self::InvalidSuffix => defmt::write!(f, "InvalidSuffix"),
        }
    }
}

/// Station and behaviour settings for one beacon
///
/// Built once at start-up and never changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeaconConfig {
    /// Station callsign
    pub callsign: Callsign,
    /// Compound-callsign suffix, `None` for a plain callsign
    pub suffix: Option<Suffix>,
    /// Reported power in dBm (quantized when encoding)
    pub power_dbm: u8,
    /// Band to transmit on
    pub band: Band,
    /// Chirp on 2 m at power-up
    pub startup_tone: bool,
    /// Transmit with the fallback position while there is no GPS fix
    pub tx_without_fix: bool,
    /// Position reported while there is no GPS fix
    pub fallback_position: Position,
    /// Idle policy between slot checks
    pub power_mode: PowerMode,
}

impl BeaconConfig {
    /// Configuration for `callsign` with stock settings and no suffix
    pub fn new(callsign: &str) -> Result<Self, ConfigError> {
        let callsign = Callsign::new(callsign).map_err(|_| ConfigError::InvalidCallsign)?;
        Ok(Self {
            callsign,
            suffix: None,
            ..Self::default()
        })
    }

    /// Set the compound-callsign suffix code (0-125)
    pub fn with_suffix(mut self, code: u8) -> Result<Self, ConfigError> {
        self.suffix = Some(Suffix::new(code).map_err(|_| ConfigError::InvalidSuffix)?);
        Ok(self)
    }

    /// Drop the suffix
    #[must_use]
    pub const fn without_suffix(mut self) -> Self {
        self.suffix = None;
        self
    }

    /// Set the reported power
    #[must_use]
    pub const fn with_power(mut self, dbm: u8) -> Self {
        self.power_dbm = dbm;
        self
    }

    /// Set the band
    #[must_use]
    pub const fn with_band(mut self, band: Band) -> Self {
        self.band = band;
        self
    }

    /// Enable or disable the startup chirp
    #[must_use]
    pub const fn with_startup_tone(mut self, enabled: bool) -> Self {
        self.startup_tone = enabled;
        self
    }

    /// Allow or forbid transmitting without a GPS fix
    #[must_use]
    pub const fn with_tx_without_fix(mut self, enabled: bool) -> Self {
        self.tx_without_fix = enabled;
        self
    }

    /// Set the position reported without a fix
    #[must_use]
    pub const fn with_fallback_position(mut self, position: Position) -> Self {
        self.fallback_position = position;
        self
    }

    /// Set the idle policy
    #[must_use]
    pub const fn with_power_mode(mut self, mode: PowerMode) -> Self {
        self.power_mode = mode;
        self
    }

    /// Transmit frequency (centre of the band's WSPR window)
    #[must_use]
    pub const fn tx_frequency(&self) -> Frequency {
        self.band.tx_frequency()
    }
}

impl Default for BeaconConfig {
    /// Stock firmware build: `N0CALL/1` on 20 m
    fn default() -> Self {
        Self {
            callsign: Callsign::PLACEHOLDER,
            suffix: Some(Suffix::default()),
            power_dbm: DEFAULT_POWER_DBM,
            band: Band::M20,
            startup_tone: true,
            tx_without_fix: true,
            fallback_position: Position::default(),
            power_mode: PowerMode::Simple,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BeaconConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{} {} {} {}",
            self.callsign,
            self.suffix,
            self.band,
            self.power_dbm
        );
    }
}
