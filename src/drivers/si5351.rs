//! `Si5351A` Clock Synthesizer Driver
//!
//! Drives CLK0 from PLL A as the beacon's RF source. The `Si5351A` derives
//! its outputs from a single 26 MHz reference using a fractional PLL and an
//! integer multisynth divider (see [`si5351_calc`](super::si5351_calc)).
//!
//! Every operation is blocking. The driver owns the bus and the delay
//! provider, so the firmware and host tests only differ in what they hand
//! to [`Si5351::new`].

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::si5351_calc::FrequencyPlan;
use crate::config;
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::types::{Band, Frequency};

/// `Si5351A` register addresses
pub mod reg {
    /// Device status (bit 7: system initialising)
    pub const DEVICE_STATUS: u8 = 0;
    /// CLK0 control
    pub const CLK0_CONTROL: u8 = 16;
    /// PLL A parameter block (8 registers)
    pub const PLLA_PARAMS: u8 = 26;
    /// Multisynth 0 parameter block (8 registers)
    pub const MS0_PARAMS: u8 = 42;
    /// PLL soft reset
    pub const PLL_RESET: u8 = 177;
}

/// Device status bit set while the chip is still initialising
pub const STATUS_SYS_INIT: u8 = 0x80;

/// CLK0 powered, integer mode, PLL A, multisynth source, 8 mA drive
pub const CLK_ENABLE: u8 = 0x4F;

/// CLK0 powered down
pub const CLK_POWER_DOWN: u8 = 0x80;

/// Reset both PLLs
pub const PLL_RESET_BOTH: u8 = 0xA0;

/// Frequency jump above which the PLLs are reset (100 kHz)
pub const PLL_RESET_THRESHOLD_CENTIHERTZ: u64 = 10_000_000;

/// Synthesizer errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Bus transaction failed
    DeviceUnavailable(E),
    /// Device still reports system initialisation
    DeviceBusy,
    /// No valid PLL/multisynth plan for the frequency
    InvalidFrequency,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::DeviceUnavailable(err)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceUnavailable(e) => write!(f, "Si5351 not responding: {e:?}"),
            Self::DeviceBusy => write!(f, "Si5351 still initialising"),
            Self::InvalidFrequency => write!(f, "frequency cannot be synthesized"),
        }
    }
}

#[cfg(feature = "embedded")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::DeviceUnavailable(_) => defmt::write!(f, "DeviceUnavailable"),
            Self::DeviceBusy => defmt::write!(f, "DeviceBusy"),
            Self::InvalidFrequency => defmt::write!(f, "InvalidFrequency"),
        }
    }
}

/// Stepped tone sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sweep {
    /// First tone
    pub start: Frequency,
    /// Increment per step in centihertz
    pub step_centihertz: u64,
    /// Number of tones
    pub steps: u32,
    /// Time on each tone in milliseconds
    pub dwell_ms: u32,
}

impl Sweep {
    /// Audible 2 m chirp used at power-up and by the self tests
    #[must_use]
    pub const fn chirp(steps: u32) -> Self {
        Self {
            start: config::STARTUP_TONE_FREQUENCY,
            step_centihertz: config::STARTUP_TONE_STEP_CENTIHERTZ,
            steps,
            dwell_ms: config::STARTUP_TONE_DWELL_MS,
        }
    }

    /// Frequency of step `index`, `None` once it leaves the band plan
    #[must_use]
    pub const fn frequency(&self, index: u32) -> Option<Frequency> {
        self.start.offset(self.step_centihertz * index as u64)
    }
}

/// `Si5351A` driver
pub struct Si5351<I2C, D> {
    bus: I2cBus<I2C>,
    delay: D,
    reference_hz: u32,
    current: Option<Frequency>,
}

impl<I2C: I2c, D: DelayNs> Si5351<I2C, D> {
    /// Create a driver for the chip at the default address
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self {
            bus: I2cBus::new(i2c, I2cAddress::SI5351),
            delay,
            reference_hz: config::REFERENCE_OSC_HZ,
            current: None,
        }
    }

    /// Use a different 7-bit bus address
    #[must_use]
    pub fn with_address(self, addr: u8) -> Self {
        let Self {
            bus,
            delay,
            reference_hz,
            current,
        } = self;
        Self {
            bus: I2cBus::new(bus.release(), I2cAddress::new(addr)),
            delay,
            reference_hz,
            current,
        }
    }

    /// Use a measured reference frequency instead of the nominal 26 MHz
    #[must_use]
    pub const fn with_reference(mut self, reference_hz: u32) -> Self {
        self.reference_hz = reference_hz;
        self
    }

    /// Reference oscillator frequency in Hz
    pub const fn reference_hz(&self) -> u32 {
        self.reference_hz
    }

    /// Last programmed output frequency, `None` while the output is off
    pub const fn frequency(&self) -> Option<Frequency> {
        self.current
    }

    /// Check that the chip answers and has finished its own start-up
    pub fn initialize(&mut self) -> Result<(), Error<I2C::Error>> {
        let status = self.bus.read_reg(reg::DEVICE_STATUS)?;
        if status & STATUS_SYS_INIT != 0 {
            warn!("Si5351 busy, status {=u8:x}", status);
            return Err(Error::DeviceBusy);
        }
        info!("Si5351 ready at {}", self.bus.address());
        Ok(())
    }

    /// Program CLK0 to `freq` and enable it
    pub fn set_frequency(&mut self, freq: Frequency) -> Result<(), Error<I2C::Error>> {
        let plan = FrequencyPlan::new(self.reference_hz, freq).ok_or(Error::InvalidFrequency)?;

        self.bus.write_regs(reg::PLLA_PARAMS, &plan.pll_registers())?;
        self.bus.write_regs(reg::MS0_PARAMS, &plan.ms_registers())?;

        let needs_reset = self
            .current
            .map_or(true, |prev| prev.distance(freq) > PLL_RESET_THRESHOLD_CENTIHERTZ);
        if needs_reset {
            debug!("PLL reset for {}", freq);
            self.bus.write_reg(reg::PLL_RESET, PLL_RESET_BOTH)?;
        }

        self.bus.write_reg(reg::CLK0_CONTROL, CLK_ENABLE)?;
        self.current = Some(freq);
        Ok(())
    }

    /// Power down CLK0
    pub fn disable(&mut self) -> Result<(), Error<I2C::Error>> {
        self.current = None;
        self.bus.write_reg(reg::CLK0_CONTROL, CLK_POWER_DOWN)?;
        Ok(())
    }

    /// Block for `ms` milliseconds on the driver's delay provider
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Block for `us` microseconds on the driver's delay provider
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Step through a tone sequence, leaving the last tone on
    pub fn sweep(&mut self, sweep: &Sweep) -> Result<(), Error<I2C::Error>> {
        for index in 0..sweep.steps {
            let freq = sweep.frequency(index).ok_or(Error::InvalidFrequency)?;
            self.set_frequency(freq)?;
            self.delay.delay_ms(sweep.dwell_ms);
        }
        Ok(())
    }

    /// Power-up chirp, then park the PLL on 20 m and switch off
    pub fn startup_tone(&mut self) -> Result<(), Error<I2C::Error>> {
        info!("startup tone");
        self.sweep(&Sweep::chirp(config::STARTUP_TONE_STEPS))?;
        self.set_frequency(Band::M20.tx_frequency())?;
        self.disable()
    }

    /// Two short chirps separated by a pause
    pub fn self_test_double_sweep(&mut self) -> Result<(), Error<I2C::Error>> {
        let chirp = Sweep::chirp(config::SELF_TEST_SHORT_STEPS);
        self.sweep(&chirp)?;
        self.disable()?;
        self.delay.delay_ms(config::SELF_TEST_PAUSE_MS);
        self.sweep(&chirp)?;
        self.disable()
    }

    /// One long chirp
    pub fn self_test_long_sweep(&mut self) -> Result<(), Error<I2C::Error>> {
        self.sweep(&Sweep::chirp(config::SELF_TEST_LONG_STEPS))?;
        self.disable()
    }

    /// Give back the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.bus.release(), self.delay)
    }
}
