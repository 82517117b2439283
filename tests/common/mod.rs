//! Host-side stand-ins for the bus and delay the synthesizer driver owns.

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// One register write as seen on the wire: device address, start register, data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegWrite {
    pub addr: u8,
    pub reg: u8,
    pub data: Vec<u8>,
}

/// Recording I2C bus backed by a 256-byte register file
pub struct MockI2c {
    pub regs: [u8; 256],
    pub writes: Vec<RegWrite>,
    pub transactions: usize,
    /// Transaction index (0-based) that fails with a NACK
    pub fail_at: Option<usize>,
    /// Fail every transaction
    pub offline: bool,
    pointer: u8,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            writes: Vec::new(),
            transactions: 0,
            fail_at: None,
            offline: false,
            pointer: 0,
        }
    }

    /// Bus whose device reports `status` in register 0
    pub fn with_status(status: u8) -> Self {
        let mut bus = Self::new();
        bus.regs[0] = status;
        bus
    }

    pub fn failing_at(index: usize) -> Self {
        let mut bus = Self::new();
        bus.fail_at = Some(index);
        bus
    }

    pub fn offline() -> Self {
        let mut bus = Self::new();
        bus.offline = true;
        bus
    }

    /// All writes that started at `reg`
    pub fn writes_to(&self, reg: u8) -> Vec<&RegWrite> {
        self.writes.iter().filter(|w| w.reg == reg).collect()
    }

    /// Values written to a single-register target, in order
    pub fn values_written(&self, reg: u8) -> Vec<u8> {
        self.writes_to(reg)
            .iter()
            .filter_map(|w| w.data.first().copied())
            .collect()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        let index = self.transactions;
        self.transactions += 1;
        if self.offline || self.fail_at == Some(index) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = reg;
                    for (offset, &value) in data.iter().enumerate() {
                        self.regs[usize::from(reg) + offset] = value;
                    }
                    if !data.is_empty() {
                        self.writes.push(RegWrite {
                            addr: address,
                            reg,
                            data: data.to_vec(),
                        });
                    }
                }
                Operation::Read(buf) => {
                    for (offset, byte) in buf.iter_mut().enumerate() {
                        *byte = self.regs[usize::from(self.pointer) + offset];
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay provider that only adds up the requested time
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.total_ns += u64::from(us) * 1_000;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += u64::from(ms) * 1_000_000;
        self.calls += 1;
    }
}
