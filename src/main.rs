//! WSPR Beacon Main Application
//!
//! Entry point for the STM32G474-based beacon firmware.
//! Brings up the `Si5351A` on I2C1 and runs the beacon cycle.
//!
//! Without a GPS receiver attached the clock is the uptime counter, so the
//! board has to be reset on an even UTC minute boundary.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_time::{Delay, Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use wspr_beacon::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("WSPR Beacon Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // Status LED (PA5 on Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // I2C1 for the Si5351A: PB8 = SCL, PB9 = SDA
    let i2c = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        Default::default(),
    );
    info!("I2C1 initialized at {} Hz", I2C_FREQUENCY_HZ);

    let config = BeaconConfig::default();
    info!("config: {}", config);

    let mut beacon = Beacon::new(config, i2c, Delay);

    // The synthesizer may still be in its own power-up sequence
    while let Err(err) = beacon.start() {
        warn!("synthesizer start failed: {}", err);
        Timer::after(Duration::from_secs(1)).await;
    }

    if spawner.spawn(heartbeat_task(led)).is_err() {
        warn!("heartbeat task not started");
    }

    loop {
        let now = UtcTime::from_seconds(Instant::now().as_secs());
        match beacon.poll(now, None) {
            Ok(Poll::Transmitted(kind)) => info!("sent {} at {}", kind, now),
            Ok(Poll::NoFix) => info!("waiting for fix"),
            Ok(Poll::Idle) => {}
            Err(err) => error!("beacon error: {}", err),
        }
        // Yield to the heartbeat instead of the beacon's blocking idle
        let interval = beacon.config().power_mode.poll_interval_ms();
        Timer::after(Duration::from_millis(u64::from(interval))).await;
    }
}

/// Heartbeat task, blinks the LED to show the system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
