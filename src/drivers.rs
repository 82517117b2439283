//! Peripheral Drivers
//!
//! High-level drivers for external ICs. Register arithmetic lives in
//! `*_calc` modules so it can be tested on the host.

pub mod si5351;
pub mod si5351_calc;
