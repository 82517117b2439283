//! Shared types used across the beacon firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction and provide type safety throughout the codebase.

use core::fmt;

/// Frequency with centihertz resolution
///
/// WSPR tones are spaced 1.4648 Hz apart, so the synthesizer is driven in
/// hundredths of a hertz. Only frequencies inside the WSPR band plan
/// (2200 m through 2 m) can be represented.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u64);

impl Frequency {
    /// Minimum supported frequency (130 kHz, below the 2200 m band)
    pub const MIN_HZ: u32 = 130_000;

    /// Maximum supported frequency (148 MHz, top of the 2 m band)
    pub const MAX_HZ: u32 = 148_000_000;

    /// Centihertz per hertz
    pub const CENTIHERTZ_PER_HZ: u64 = 100;

    /// Create a Frequency from centihertz, returns None if out of range
    #[must_use]
    pub const fn from_centihertz(centihertz: u64) -> Option<Self> {
        let min = Self::MIN_HZ as u64 * Self::CENTIHERTZ_PER_HZ;
        let max = Self::MAX_HZ as u64 * Self::CENTIHERTZ_PER_HZ;
        if centihertz >= min && centihertz <= max {
            Some(Self(centihertz))
        } else {
            None
        }
    }

    /// Create a Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        Self::from_centihertz(hz as u64 * Self::CENTIHERTZ_PER_HZ)
    }

    /// Get the frequency in centihertz
    #[must_use]
    pub const fn as_centihertz(self) -> u64 {
        self.0
    }

    /// Get the frequency in Hz (truncated)
    #[must_use]
    pub const fn as_hz(self) -> u64 {
        self.0 / Self::CENTIHERTZ_PER_HZ
    }

    /// Offset by a number of centihertz, returns None if the result leaves the band plan
    #[must_use]
    pub const fn offset(self, centihertz: u64) -> Option<Self> {
        match self.0.checked_add(centihertz) {
            Some(value) => Self::from_centihertz(value),
            None => None,
        }
    }

    /// Absolute distance to another frequency in centihertz
    #[must_use]
    pub const fn distance(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({}.{:02} Hz)", self.0 / 100, self.0 % 100)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} cHz", self.0);
    }
}

/// WSPR band plan
///
/// Each band has a 200 Hz WSPR window; the beacon transmits in its centre.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Band {
    /// 2200 meters (136 kHz)
    M2200,
    /// 630 meters (474 kHz)
    M630,
    /// 160 meters (1.8 MHz)
    M160,
    /// 80 meters (3.5 MHz)
    M80,
    /// 60 meters (5.2 MHz)
    M60,
    /// 40 meters (7 MHz)
    M40,
    /// 30 meters (10.1 MHz)
    M30,
    /// 20 meters (14 MHz)
    #[default]
    M20,
    /// 17 meters (18 MHz)
    M17,
    /// 15 meters (21 MHz)
    M15,
    /// 12 meters (24.9 MHz)
    M12,
    /// 10 meters (28 MHz)
    M10,
    /// 6 meters (50 MHz)
    M6,
    /// 4 meters (70 MHz)
    M4,
    /// 2 meters (144 MHz)
    M2,
}

impl Band {
    /// All bands, lowest first
    pub const ALL: [Self; 15] = [
        Self::M2200,
        Self::M630,
        Self::M160,
        Self::M80,
        Self::M60,
        Self::M40,
        Self::M30,
        Self::M20,
        Self::M17,
        Self::M15,
        Self::M12,
        Self::M10,
        Self::M6,
        Self::M4,
        Self::M2,
    ];

    /// USB dial frequency in Hz used by WSPR stations on this band
    #[must_use]
    pub const fn dial_hz(self) -> u32 {
        match self {
            Self::M2200 => 136_000,
            Self::M630 => 474_200,
            Self::M160 => 1_836_600,
            Self::M80 => 3_568_600,
            Self::M60 => 5_287_200,
            Self::M40 => 7_038_600,
            Self::M30 => 10_138_700,
            Self::M20 => 14_095_600,
            Self::M17 => 18_104_600,
            Self::M15 => 21_094_600,
            Self::M12 => 24_924_600,
            Self::M10 => 28_124_600,
            Self::M6 => 50_293_000,
            Self::M4 => 70_091_000,
            Self::M2 => 144_489_000,
        }
    }

    /// Centre of the WSPR window (dial + 1500 Hz audio offset)
    #[must_use]
    pub const fn tx_frequency(self) -> Frequency {
        // Every dial frequency in the table is inside the supported range
        Frequency((self.dial_hz() as u64 + 1_500) * Frequency::CENTIHERTZ_PER_HZ)
    }

    /// Get the band containing a frequency's WSPR window
    #[must_use]
    pub fn from_frequency(freq: Frequency) -> Option<Self> {
        let hz = freq.as_hz();
        Self::ALL.into_iter().find(|band| {
            let dial = u64::from(band.dial_hz());
            hz >= dial + 1_400 && hz <= dial + 1_600
        })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::M2200 => defmt::write!(f, "2200m"),
            Self::M630 => defmt::write!(f, "630m"),
            Self::M160 => defmt::write!(f, "160m"),
            Self::M80 => defmt::write!(f, "80m"),
            Self::M60 => defmt::write!(f, "60m"),
            Self::M40 => defmt::write!(f, "40m"),
            Self::M30 => defmt::write!(f, "30m"),
            Self::M20 => defmt::write!(f, "20m"),
            Self::M17 => defmt::write!(f, "17m"),
            Self::M15 => defmt::write!(f, "15m"),
            Self::M12 => defmt::write!(f, "12m"),
            Self::M10 => defmt::write!(f, "10m"),
            Self::M6 => defmt::write!(f, "6m"),
            Self::M4 => defmt::write!(f, "4m"),
            Self::M2 => defmt::write!(f, "2m"),
        }
    }
}

/// Reported transmit power in dBm
///
/// WSPR only carries power levels ending in 0, 3 or 7 dBm between
/// 0 dBm (1 mW) and 60 dBm (1 kW).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PowerLevel(u8);

impl PowerLevel {
    /// Legal power levels, ascending
    pub const LADDER: [u8; 19] = [
        0, 3, 7, 10, 13, 17, 20, 23, 27, 30, 33, 37, 40, 43, 47, 50, 53, 57, 60,
    ];

    /// Minimum power (1 mW)
    pub const MIN: Self = Self(0);

    /// Maximum power (1 kW)
    pub const MAX: Self = Self(60);

    /// Map a requested power to the greatest legal level not above it
    #[must_use]
    pub const fn quantize(dbm: u8) -> Self {
        let mut level = Self::LADDER[0];
        let mut i = 0;
        while i < Self::LADDER.len() {
            if dbm >= Self::LADDER[i] {
                level = Self::LADDER[i];
            }
            i += 1;
        }
        Self(level)
    }

    /// Create from an exact ladder value, returns None for any other value
    #[must_use]
    pub fn from_dbm(dbm: u8) -> Option<Self> {
        Self::LADDER.contains(&dbm).then_some(Self(dbm))
    }

    /// Get the power in dBm
    #[must_use]
    pub const fn as_dbm(self) -> u8 {
        self.0
    }
}

impl Default for PowerLevel {
    fn default() -> Self {
        Self(23) // 200 mW
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PowerLevel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} dBm", self.0);
    }
}

/// Geographic position in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    /// Latitude, north positive
    pub latitude: f64,
    /// Longitude, east positive
    pub longitude: f64,
}

impl Position {
    /// Create a position
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that latitude is in [-90, 90) and longitude in [-180, 180)
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..90.0).contains(&self.latitude) && (-180.0..180.0).contains(&self.longitude)
    }
}

/// UTC wall-clock time of day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UtcTime {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
}

impl UtcTime {
    /// Create a time of day, returns None for out-of-range fields
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Time of day from seconds since midnight (wraps at 24 h)
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        let s = seconds % 86_400;
        Self {
            hour: (s / 3_600) as u8,
            minute: ((s / 60) % 60) as u8,
            second: (s % 60) as u8,
        }
    }

    /// Minutes since midnight
    #[must_use]
    pub const fn minute_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UtcTime {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}:{}:{}Z", self.hour, self.minute, self.second);
    }
}
