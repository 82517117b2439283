//! WSPR Protocol
//!
//! Builds the 162-symbol WSPR channel sequence from a station identity:
//!
//! ```text
//! Callsign ─┐
//! Locator  ─┼─► pack (n, m) ─► 11 bytes ─► K=32 r=1/2 FEC ─► interleave ─► + sync ─► symbols
//! Power    ─┘
//! ```
//!
//! Every stage is a pure function; [`Encoder`] chains them and writes the
//! result into a caller-owned [`SymbolBuffer`].

use core::fmt;

pub mod callsign;
pub mod encoder;
pub mod fec;
pub mod hash;
pub mod interleave;
pub mod locator;
pub mod message;
pub mod sync;
pub mod timeslot;

pub use callsign::{Callsign, Suffix};
pub use encoder::{Encoder, SymbolBuffer};
pub use locator::Locator;
pub use message::{PackedMessage, TransmissionType};
pub use timeslot::is_start_of_slot;

/// Number of channel symbols in a WSPR transmission
pub const SYMBOL_COUNT: usize = 162;

/// Number of bytes fed to the convolutional encoder (50 message bits + padding)
pub const MESSAGE_BYTES: usize = 11;

/// Errors raised while building a WSPR message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Callsign is empty, too long, or does not fit the packing rules
    InvalidCallsign,
    /// Suffix code outside 0-125
    InvalidSuffix,
    /// Latitude/longitude outside the valid range or not a number
    InvalidPosition,
    /// Extended-callsign message requested without a configured suffix
    SuffixRequired,
    /// Extended-locator message requested with a 4-character locator
    LocatorTooShort,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCallsign => write!(f, "invalid callsign"),
            Self::InvalidSuffix => write!(f, "suffix must be 0-125"),
            Self::InvalidPosition => write!(f, "position out of range"),
            Self::SuffixRequired => write!(f, "message type requires a suffix"),
            Self::LocatorTooShort => write!(f, "message type requires a 6-character locator"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidCallsign => defmt::write!(f, "InvalidCallsign"),
            Self::InvalidSuffix => defmt::write!(f, "InvalidSuffix"),
            Self::InvalidPosition => defmt::write!(f, "InvalidPosition"),
            Self::SuffixRequired => defmt::write!(f, "SuffixRequired"),
            Self::LocatorTooShort => defmt::write!(f, "LocatorTooShort"),
        }
    }
}

/// Result alias for WSPR encoding operations
pub type Result<T> = core::result::Result<T, Error>;
