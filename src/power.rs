//! Power Management
//!
//! How the beacon idles between slot checks. The MCU clock setup itself is
//! fixed at boot in the firmware entry point.

/// Idle policy between slot checks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerMode {
    /// Poll the clock ten times a second
    AlwaysOn,
    /// Sleep a full second between polls
    #[default]
    Simple,
}

impl PowerMode {
    /// Time between slot checks in milliseconds
    #[must_use]
    pub const fn poll_interval_ms(self) -> u32 {
        match self {
            Self::AlwaysOn => 100,
            Self::Simple => 1000,
        }
    }

    /// Number of checks that land on the two-second arming window
    ///
    /// A slot is armed at seconds 58 and 59, so any interval up to two
    /// seconds is guaranteed to see it.
    #[must_use]
    pub const fn checks_per_arming_window(self) -> u32 {
        2000 / self.poll_interval_ms()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PowerMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::AlwaysOn => defmt::write!(f, "AlwaysOn"),
            Self::Simple => defmt::write!(f, "Simple"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals() {
        assert_eq!(PowerMode::AlwaysOn.poll_interval_ms(), 100);
        assert_eq!(PowerMode::Simple.poll_interval_ms(), 1000);
        assert_eq!(PowerMode::default(), PowerMode::Simple);
    }

    #[test]
    fn never_misses_arming_window() {
        assert!(PowerMode::Simple.checks_per_arming_window() >= 1);
        assert!(PowerMode::AlwaysOn.checks_per_arming_window() >= 1);
    }
}
