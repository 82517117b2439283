//! Transmission slot timing
//!
//! WSPR transmissions start one second into an even UTC minute. The beacon
//! arms two seconds early (second 58 of the previous minute) so the
//! synthesizer is programmed in time. Only minutes 3 and 7 of every decade
//! arm a slot, which keeps the duty cycle at one transmission per
//! five minutes.

/// Second at which a slot is armed
pub const ARM_SECOND: u8 = 58;

/// True when `minute:second` is the arming point of a transmission slot
#[must_use]
pub const fn is_start_of_slot(minute: u8, second: u8) -> bool {
    let m = minute.wrapping_add(1) % 10;
    (m == 8 || m == 4) && second >= ARM_SECOND
}
