//! Hardware Abstraction Layer
//!
//! Thin wrappers over the embedded-hal traits the drivers are generic over.
//! Concrete peripherals are chosen in the firmware entry point.

pub mod i2c;
