//! MIPS32 register file.
//!
//! 32 general-purpose 32-bit registers addressed by index, plus the
//! HI/LO pair that holds 64-bit multiply/divide results.

use serde::{Serialize, Deserialize};

/// The number of general-purpose registers.
pub const NUM_REGISTERS: usize = 32;

/// General-purpose registers plus HI and LO.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFile {
    gpr: [u32; NUM_REGISTERS],
    hi: u32,
    lo: u32,
}

impl RegisterFile {
    /// Create a register file with every register zeroed.
    pub const fn new() -> Self {
        Self {
            gpr: [0; NUM_REGISTERS],
            hi: 0,
            lo: 0,
        }
    }

    /// Create a register file from initial general-purpose values.
    /// HI and LO start at zero.
    pub const fn from_values(gpr: [u32; NUM_REGISTERS]) -> Self {
        Self { gpr, hi: 0, lo: 0 }
    }

    /// Read a general-purpose register (0-31).
    ///
    /// # Panics
    /// Panics if index is out of range.
    #[inline]
    pub fn read(&self, index: usize) -> u32 {
        assert!(index < NUM_REGISTERS, "register index {} out of range (0-{})", index, NUM_REGISTERS - 1);
        self.gpr[index]
    }

    /// Write a general-purpose register (0-31).
    ///
    /// # Panics
    /// Panics if index is out of range.
    #[inline]
    pub fn write(&mut self, index: usize, value: u32) {
        assert!(index < NUM_REGISTERS, "register index {} out of range (0-{})", index, NUM_REGISTERS - 1);
        self.gpr[index] = value;
    }

    #[inline]
    pub fn hi(&self) -> u32 {
        self.hi
    }

    #[inline]
    pub fn set_hi(&mut self, value: u32) {
        self.hi = value;
    }

    #[inline]
    pub fn lo(&self) -> u32 {
        self.lo
    }

    #[inline]
    pub fn set_lo(&mut self, value: u32) {
        self.lo = value;
    }

    /// HI and LO joined as one 64-bit value (HI is the high half).
    #[inline]
    pub fn hi_lo(&self) -> u64 {
        ((self.hi as u64) << 32) | self.lo as u64
    }

    /// Split a 64-bit value across HI and LO.
    #[inline]
    pub fn set_hi_lo(&mut self, value: u64) {
        self.hi = (value >> 32) as u32;
        self.lo = value as u32;
    }

    /// All general-purpose registers in index order.
    pub fn as_slice(&self) -> &[u32] {
        &self.gpr
    }

    /// Zero every register, HI and LO included.
    pub fn reset(&mut self) {
        self.gpr = [0; NUM_REGISTERS];
        self.hi = 0;
        self.lo = 0;
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only show non-zero registers
        let non_zero: Vec<_> = self.gpr
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(|(i, value)| format!("${}={:#010x}", i, value))
            .collect();

        f.debug_struct("RegisterFile")
            .field("gpr", &non_zero)
            .field("hi", &format_args!("{:#010x}", self.hi))
            .field("lo", &format_args!("{:#010x}", self.lo))
            .finish()
    }
}
