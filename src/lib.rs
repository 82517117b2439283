//! WSPR Beacon Firmware Library
//!
//! This library provides the core of a low-power WSPR (Weak Signal
//! Propagation Reporter) beacon: it turns a station identity into the
//! 162-symbol 4-FSK WSPR message and drives an `Si5351A` clock synthesizer
//! to put it on the air.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Beacon cycle  │  Symbol transmit loop  │  Power mode        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    PROTOCOL LAYER                            │
//! │  Locator │ Hash │ Packing │ FEC │ Interleave │ Sync │ Slots  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  I2C register bus  │  Si5351A controller + frequency plan    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (executor, time driver)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Caller-owned buffers**: the encoder writes into a [`wspr::SymbolBuffer`]
//!   the caller owns; there is no process-wide symbol state
//! - **Type-driven design**: callsigns, suffixes, power levels and
//!   frequencies are validated once at construction
//! - **Injected capabilities**: the bus and the delay are `embedded-hal`
//!   traits, so the driver runs against mocks on the host
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

// Logging macros, must come before the modules that use them
#[macro_use]
mod fmt;

/// Hardware Abstraction Layer
///
/// Register-level access to I2C peripherals.
pub mod hal;

/// Peripheral Drivers
///
/// High-level drivers for external ICs (Si5351A).
pub mod drivers;

/// WSPR Protocol
///
/// Message packing, forward error correction, interleaving and sync.
pub mod wspr;

/// Radio Control Logic
///
/// Symbol transmission and the beacon transmit cycle.
pub mod radio;

/// Power Management
///
/// Idle behaviour between transmissions.
pub mod power;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::drivers::si5351::Si5351;
    pub use crate::radio::beacon::{Beacon, Poll};
    pub use crate::wspr::{Encoder, SymbolBuffer, TransmissionType};

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::i2c::I2c;

    // Error handling
    pub use core::result::Result;
}
