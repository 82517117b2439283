//! Si5351 Frequency Calculation
//!
//! Fractional-N PLL and integer multisynth plan for one output frequency.
//! This module is pure integer arithmetic and testable on the host.
//!
//! # Theory of Operation
//!
//! The Si5351 uses a two-stage frequency synthesis:
//! 1. PLL stage: FVCO = FXTAL × (a + b/c) where 15 ≤ a ≤ 90
//! 2. Multisynth stage: FOUT = FVCO / d / R where d = 4 or 6 ≤ d ≤ 1800
//!
//! The beacon keeps the multisynth at an integer divider and puts all of
//! the fine tuning into the PLL numerator over the largest denominator, so
//! sub-hertz WSPR tone steps only touch the PLL registers. Frequencies are
//! in centihertz throughout to keep that resolution without floats.

use crate::types::Frequency;

/// PLL parameters for frequency calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllParams {
    /// Integer part (15-90)
    pub a: u32,
    /// Numerator (0 to c-1)
    pub b: u32,
    /// Denominator (1-1048575)
    pub c: u32,
}

impl PllParams {
    /// Minimum PLL multiplier
    pub const MIN_A: u32 = 15;
    /// Maximum PLL multiplier
    pub const MAX_A: u32 = 90;
    /// Maximum denominator (20 bits)
    pub const MAX_C: u32 = 1_048_575;

    /// Create integer PLL params (b=0, c=1)
    #[must_use]
    pub const fn integer(a: u32) -> Self {
        Self { a, b: 0, c: 1 }
    }

    /// Create fractional PLL params
    #[must_use]
    pub const fn fractional(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// VCO frequency in centihertz for a reference in hertz
    #[must_use]
    pub const fn vco_centihertz(&self, reference_hz: u32) -> u64 {
        let reference = reference_hz as u64 * 100;
        let c = self.c as u64;
        reference * (self.a as u64 * c + self.b as u64) / c
    }

    /// Validate parameters are in range
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.a >= Self::MIN_A
            && self.a <= Self::MAX_A
            && self.c >= 1
            && self.c <= Self::MAX_C
            && self.b < self.c
    }

    /// Calculate P1, P2, P3 register values for Si5351
    #[must_use]
    pub const fn to_registers(&self) -> (u32, u32, u32) {
        // From Si5351 datasheet:
        // P1 = 128 × a + floor(128 × b/c) - 512
        // P2 = 128 × b - c × floor(128 × b/c)
        // P3 = c
        let floor_128b_c = (128 * self.b) / self.c;
        let p1 = 128 * self.a + floor_128b_c - 512;
        let p2 = 128 * self.b - self.c * floor_128b_c;
        let p3 = self.c;
        (p1, p2, p3)
    }

    /// Register block for PLL A/B (8 consecutive registers)
    #[must_use]
    pub const fn register_block(&self) -> [u8; 8] {
        let (p1, p2, p3) = self.to_registers();
        pack_block(p1, p2, p3, 0)
    }
}

/// Multisynth divider parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MsParams {
    /// Integer divider (4, 6-1800)
    pub a: u32,
    /// R divider power of 2 (0-7 for 1, 2, 4, 8, 16, 32, 64, 128)
    pub r_div: u8,
}

impl MsParams {
    /// Minimum integer divisor
    pub const MIN_A: u32 = 4;
    /// Maximum integer divisor
    pub const MAX_A: u32 = 1800;
    /// Largest R divider exponent (÷128)
    pub const MAX_R_DIV: u8 = 7;

    /// Create integer multisynth params without R divider
    #[must_use]
    pub const fn integer(a: u32) -> Self {
        Self { a, r_div: 0 }
    }

    /// Create integer multisynth with R divider
    #[must_use]
    pub const fn integer_with_r(a: u32, r_div: u8) -> Self {
        Self { a, r_div }
    }

    /// Total division ratio including the R divider
    #[must_use]
    pub const fn effective_divisor(&self) -> u64 {
        (self.a as u64) << self.r_div
    }

    /// Validate parameters are in range
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        // Note: a=5 is not allowed
        let a_valid = self.a == Self::MIN_A || (self.a >= 6 && self.a <= Self::MAX_A);
        a_valid && self.r_div <= Self::MAX_R_DIV
    }

    /// R divider select bits as they appear in the block's third byte
    #[must_use]
    pub const fn r_select(&self) -> u8 {
        self.r_div << 4
    }

    /// Calculate P1, P2, P3 register values (integer mode: P2 = 0, P3 = 1)
    #[must_use]
    pub const fn to_registers(&self) -> (u32, u32, u32) {
        (128 * self.a - 512, 0, 1)
    }

    /// Register block for a multisynth (8 consecutive registers)
    #[must_use]
    pub const fn register_block(&self) -> [u8; 8] {
        let (p1, p2, p3) = self.to_registers();
        pack_block(p1, p2, p3, self.r_select())
    }
}

/// Lay out P1/P2/P3 in the Si5351 parameter block order
#[allow(clippy::cast_possible_truncation)]
const fn pack_block(p1: u32, p2: u32, p3: u32, r_select: u8) -> [u8; 8] {
    [
        (p3 >> 8) as u8,
        p3 as u8,
        ((p1 >> 16) & 0x03) as u8 | r_select,
        (p1 >> 8) as u8,
        p1 as u8,
        (((p3 >> 12) & 0xF0) | ((p2 >> 16) & 0x0F)) as u8,
        (p2 >> 8) as u8,
        p2 as u8,
    ]
}

/// Minimum VCO frequency (600 MHz)
pub const VCO_MIN_HZ: u64 = 600_000_000;
/// Maximum VCO frequency (900 MHz)
pub const VCO_MAX_HZ: u64 = 900_000_000;

/// Outputs below this (1 MHz, in centihertz) go through the ÷128 R divider
pub const LOW_RANGE_CENTIHERTZ: u64 = 100_000_000;

/// R divider exponent used in the low range
const LOW_RANGE_R_DIV: u8 = MsParams::MAX_R_DIV;

/// Complete synthesis plan for one output frequency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyPlan {
    /// Fractional PLL multiplier
    pub pll: PllParams,
    /// Integer output divider
    pub ms: MsParams,
}

impl FrequencyPlan {
    /// Plan PLL A and multisynth 0 for `freq` from a `reference_hz` crystal
    ///
    /// The multisynth divider is the largest integer that keeps the VCO at
    /// or under 900 MHz. Returns `None` if the plan falls outside the chip
    /// limits.
    #[must_use]
    pub fn new(reference_hz: u32, freq: Frequency) -> Option<Self> {
        if reference_hz == 0 {
            return None;
        }

        let target = freq.as_centihertz();
        let r_div = if target < LOW_RANGE_CENTIHERTZ { LOW_RANGE_R_DIV } else { 0 };
        let out = target << r_div;

        let divider = (VCO_MAX_HZ * 100) / out;
        let vco = divider * out;

        let reference = u64::from(reference_hz) * 100;
        let mult = vco / reference;
        let remainder = vco % reference;
        let num = (remainder * u64::from(PllParams::MAX_C) / u64::from(reference_hz)) / 100;

        let pll = PllParams::fractional(
            u32::try_from(mult).ok()?,
            u32::try_from(num).ok()?,
            PllParams::MAX_C,
        );
        let ms = MsParams::integer_with_r(u32::try_from(divider).ok()?, r_div);

        let plan = Self { pll, ms };
        plan.is_valid(reference_hz).then_some(plan)
    }

    /// True when every stage is within the chip limits
    #[must_use]
    pub const fn is_valid(&self, reference_hz: u32) -> bool {
        let vco = self.pll.vco_centihertz(reference_hz) / 100;
        self.pll.is_valid() && self.ms.is_valid() && vco >= VCO_MIN_HZ && vco <= VCO_MAX_HZ
    }

    /// Frequency actually produced, in centihertz (rounded down)
    #[must_use]
    pub const fn actual_centihertz(&self, reference_hz: u32) -> u64 {
        self.pll.vco_centihertz(reference_hz) / self.ms.effective_divisor()
    }

    /// PLL A register block (registers 26..=33)
    #[must_use]
    pub const fn pll_registers(&self) -> [u8; 8] {
        self.pll.register_block()
    }

    /// Multisynth 0 register block (registers 42..=49)
    #[must_use]
    pub const fn ms_registers(&self) -> [u8; 8] {
        self.ms.register_block()
    }
}
