//! Radio Control Logic
//!
//! Symbol keying and the beacon transmit cycle.

pub mod beacon;
pub mod transmit;
