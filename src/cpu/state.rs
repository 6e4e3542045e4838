//! Simulated processor state.
//!
//! Operations execute and reverse against a [`ProcessorState`]. It owns the
//! register file, the active [`Quirks`] profile and a count of overflow
//! traps that have been signalled but not yet collected by a trap handler.

use crate::config::{ConfigError, Quirks};
use crate::cpu::registers::{RegisterFile, NUM_REGISTERS};
use serde::{Serialize, Deserialize};

/// Register file plus trap bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorState {
    regs: RegisterFile,
    quirks: Quirks,
    overflow_traps: u64,
}

impl ProcessorState {
    /// Create a zeroed state with the legacy quirk profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zeroed state using the given quirk profile.
    pub fn with_quirks(quirks: Quirks) -> Self {
        Self {
            quirks,
            ..Self::default()
        }
    }

    /// Create a state whose general-purpose registers start at `values`.
    pub fn with_registers(values: [u32; NUM_REGISTERS]) -> Self {
        Self {
            regs: RegisterFile::from_values(values),
            ..Self::default()
        }
    }

    /// Read a general-purpose register.
    ///
    /// # Panics
    /// Panics if index is outside 0-31.
    #[inline]
    pub fn read(&self, index: usize) -> u32 {
        self.regs.read(index)
    }

    /// Write a general-purpose register.
    ///
    /// # Panics
    /// Panics if index is outside 0-31.
    #[inline]
    pub fn write(&mut self, index: usize, value: u32) {
        self.regs.write(index, value);
    }

    #[inline]
    pub fn hi(&self) -> u32 {
        self.regs.hi()
    }

    #[inline]
    pub fn set_hi(&mut self, value: u32) {
        self.regs.set_hi(value);
    }

    #[inline]
    pub fn lo(&self) -> u32 {
        self.regs.lo()
    }

    #[inline]
    pub fn set_lo(&mut self, value: u32) {
        self.regs.set_lo(value);
    }

    /// HI:LO as one 64-bit value.
    #[inline]
    pub fn hi_lo(&self) -> u64 {
        self.regs.hi_lo()
    }

    #[inline]
    pub fn set_hi_lo(&mut self, value: u64) {
        self.regs.set_hi_lo(value);
    }

    /// The register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// The active quirk profile.
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Switch quirk profile. Register contents are kept.
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    /// Record a trapping arithmetic overflow.
    ///
    /// Only the signal lives here; what a handler does about it is up to
    /// the driver, which polls [`take_overflow_traps`](Self::take_overflow_traps).
    pub fn signal_overflow_trap(&mut self) {
        self.overflow_traps += 1;
        tracing::warn!(pending = self.overflow_traps, "integer overflow trap");
    }

    /// Overflow traps signalled and not yet taken.
    pub fn overflow_traps(&self) -> u64 {
        self.overflow_traps
    }

    /// Return the pending trap count and clear it.
    pub fn take_overflow_traps(&mut self) -> u64 {
        std::mem::take(&mut self.overflow_traps)
    }

    /// Zero all registers and drop pending traps. The quirk profile is kept.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.overflow_traps = 0;
    }

    /// Snapshot the whole state as JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Restore a state from a JSON snapshot.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trap_counting() {
        let mut state = ProcessorState::new();
        assert_eq!(state.overflow_traps(), 0);

        state.signal_overflow_trap();
        state.signal_overflow_trap();
        assert_eq!(state.overflow_traps(), 2);

        assert_eq!(state.take_overflow_traps(), 2);
        assert_eq!(state.overflow_traps(), 0);
    }

    #[test]
    fn test_with_registers() {
        let mut values = [0u32; NUM_REGISTERS];
        values[5] = 10;
        values[7] = 10;
        let state = ProcessorState::with_registers(values);
        assert_eq!(state.read(5), 10);
        assert_eq!(state.read(7), 10);
        assert_eq!(state.hi_lo(), 0);
    }

    #[test]
    fn test_reset_keeps_quirks() {
        let mut state = ProcessorState::with_quirks(Quirks::architectural());
        state.write(3, 1);
        state.set_hi(2);
        state.signal_overflow_trap();

        state.reset();

        assert_eq!(state.read(3), 0);
        assert_eq!(state.hi(), 0);
        assert_eq!(state.overflow_traps(), 0);
        assert_eq!(state.quirks(), Quirks::architectural());
    }

    #[test]
    fn test_json_snapshot() {
        let mut state = ProcessorState::new();
        state.write(12, 0xFFFF_0000);
        state.set_lo(0x1234);
        state.signal_overflow_trap();

        let text = state.to_json().unwrap();
        let restored = ProcessorState::from_json(&text).unwrap();

        assert_eq!(restored, state);
    }
}
