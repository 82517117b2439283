//! I2C Register Access
//!
//! Register-oriented helpers over any blocking `embedded_hal::i2c::I2c` bus.
//! The bus is owned by value; the firmware hands in the STM32 peripheral and
//! host tests hand in a recording mock.

use embedded_hal::i2c::I2c;

/// Largest register block written in a single transaction
pub const MAX_BURST: usize = 16;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// `Si5351A` clock synthesizer address
    pub const SI5351: Self = Self(0x60);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl Default for I2cAddress {
    fn default() -> Self {
        Self::SI5351
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{=u8:x}", self.0);
    }
}

/// I2C bus wrapper bound to one device
pub struct I2cBus<I2C> {
    i2c: I2C,
    addr: I2cAddress,
}

impl<I2C: I2c> I2cBus<I2C> {
    /// Wrap a bus for the device at `addr`
    pub const fn new(i2c: I2C, addr: I2cAddress) -> Self {
        Self { i2c, addr }
    }

    /// Device address
    pub const fn address(&self) -> I2cAddress {
        self.addr
    }

    /// Write a single register
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr.addr(), &[reg, value])
    }

    /// Read a single register
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8];
        self.i2c.write_read(self.addr.addr(), &[reg], &mut buf)?;
        Ok(buf[0])
    }

    /// Write consecutive registers starting at `base_reg`
    ///
    /// Each run of up to [`MAX_BURST`] bytes goes out as one
    /// auto-incrementing transaction.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_regs(&mut self, base_reg: u8, values: &[u8]) -> Result<(), I2C::Error> {
        for (i, chunk) in values.chunks(MAX_BURST).enumerate() {
            let mut buf = [0u8; MAX_BURST + 1];
            buf[0] = base_reg.wrapping_add((i * MAX_BURST) as u8);
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.addr.addr(), &buf[..=chunk.len()])?;
        }
        Ok(())
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}
