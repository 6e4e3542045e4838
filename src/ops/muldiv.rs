//! Multiply and divide: DIV, DIVU, MADD, MADDU, MSUB, MSUBU, MUL, MULT, MULTU.
//!
//! Everything except MUL writes the HI/LO pair. The active
//! [`Quirks`](crate::Quirks) profile decides three details:
//! - whether DIV puts the quotient in HI (legacy) or LO (architectural)
//! - whether LO (and the MUL result) is cut down to 16 bits
//! - whether MUL multiplies rs by rd (legacy) or by rt
//!
//! Accumulating forms treat HI:LO as one 64-bit value and wrap modulo 2^64.

use serde::{Serialize, Deserialize};
use crate::config::Quirks;
use crate::cpu::ProcessorState;
use crate::ops::Saved;

/// Split a 64-bit result into `(hi, lo)`, masking LO per the profile.
#[inline]
fn split(value: u64, quirks: Quirks) -> (u32, u32) {
    ((value >> 32) as u32, value as u32 & quirks.product_mask())
}

/// Signed 32x32 -> 64 product. Cannot overflow i64.
#[inline]
fn signed_product(a: u32, b: u32) -> i64 {
    a as i32 as i64 * b as i32 as i64
}

/// Unsigned 32x32 -> 64 product. Cannot overflow u64.
#[inline]
fn unsigned_product(a: u32, b: u32) -> u64 {
    a as u64 * b as u64
}

hi_lo_instruction!(
    /// DIV: signed rs / rt into HI/LO.
    ///
    /// The legacy profile writes quotient -> HI and remainder -> LO; the
    /// architectural profile the other way round. `i32::MIN / -1` wraps to
    /// quotient `i32::MIN`, remainder 0.
    ///
    /// # Panics
    /// Panics if rt holds zero.
    Div
);

impl Div {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let dividend = state.read(self.rs) as i32;
        let divisor = state.read(self.rt) as i32;
        let quotient = dividend.wrapping_div(divisor) as u32;
        let remainder = dividend.wrapping_rem(divisor) as u32;
        if state.quirks().div_swaps_hi_lo {
            (quotient, remainder)
        } else {
            (remainder, quotient)
        }
    }
}

hi_lo_operation!(Div, Div);

hi_lo_instruction!(
    /// DIVU: unsigned rs / rt; remainder -> HI, quotient -> LO.
    ///
    /// # Panics
    /// Panics if rt holds zero.
    Divu
);

impl Divu {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let dividend = state.read(self.rs);
        let divisor = state.read(self.rt);
        (dividend % divisor, dividend / divisor)
    }
}

hi_lo_operation!(Divu, Divu);

hi_lo_instruction!(
    /// MADD: HI:LO += rs * rt (signed).
    Madd
);

impl Madd {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let acc = state.hi_lo() as i64;
        let product = signed_product(state.read(self.rs), state.read(self.rt));
        split(acc.wrapping_add(product) as u64, state.quirks())
    }
}

hi_lo_operation!(Madd, Madd);

hi_lo_instruction!(
    /// MADDU: HI:LO += rs * rt (unsigned).
    Maddu
);

impl Maddu {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let product = unsigned_product(state.read(self.rs), state.read(self.rt));
        split(state.hi_lo().wrapping_add(product), state.quirks())
    }
}

hi_lo_operation!(Maddu, Maddu);

hi_lo_instruction!(
    /// MSUB: HI:LO -= rs * rt (signed).
    Msub
);

impl Msub {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let acc = state.hi_lo() as i64;
        let product = signed_product(state.read(self.rs), state.read(self.rt));
        split(acc.wrapping_sub(product) as u64, state.quirks())
    }
}

hi_lo_operation!(Msub, Msub);

hi_lo_instruction!(
    /// MSUBU: HI:LO -= rs * rt (unsigned).
    Msubu
);

impl Msubu {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let product = unsigned_product(state.read(self.rs), state.read(self.rt));
        split(state.hi_lo().wrapping_sub(product), state.quirks())
    }
}

hi_lo_operation!(Msubu, Msubu);

hi_lo_instruction!(
    /// MULT: HI:LO := rs * rt (signed).
    Mult
);

impl Mult {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let product = signed_product(state.read(self.rs), state.read(self.rt));
        split(product as u64, state.quirks())
    }
}

hi_lo_operation!(Mult, Mult);

hi_lo_instruction!(
    /// MULTU: HI:LO := rs * rt (unsigned).
    Multu
);

impl Multu {
    fn compute(&self, state: &ProcessorState) -> (u32, u32) {
        let product = unsigned_product(state.read(self.rs), state.read(self.rt));
        split(product, state.quirks())
    }
}

hi_lo_operation!(Multu, Multu);

/// MUL: rd := low bits of rs * rt. HI/LO are not touched.
///
/// Under the legacy profile the second factor is read from rd rather than
/// rt, and only the low 16 bits of the product are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mul {
    rs: usize,
    rt: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Mul {
    pub fn new(rs: usize, rt: usize, rd: usize) -> Self {
        Self { rs, rt, rd, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rt(&self) -> usize { self.rt }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        let quirks = state.quirks();
        let factor = if quirks.mul_reads_rd { self.rd } else { self.rt };
        let product = signed_product(state.read(self.rs), state.read(factor));
        product as u32 & quirks.product_mask()
    }
}

gpr_operation!(Mul, Mul, rd);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{Destination, Operation};

    fn legacy() -> ProcessorState {
        ProcessorState::with_quirks(Quirks::legacy())
    }

    fn architectural() -> ProcessorState {
        ProcessorState::with_quirks(Quirks::architectural())
    }

    #[test]
    fn test_div_legacy_placement() {
        let mut state = legacy();
        state.write(1, 17);
        state.write(2, 5);

        Div::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 3);
        assert_eq!(state.lo(), 2);
    }

    #[test]
    fn test_div_architectural_placement() {
        let mut state = architectural();
        state.write(1, (-17i32) as u32);
        state.write(2, 5);

        Div::new(1, 2).execute(&mut state);

        // Truncating division: -17 / 5 = -3 rem -2
        assert_eq!(state.hi(), (-2i32) as u32);
        assert_eq!(state.lo(), (-3i32) as u32);
    }

    #[test]
    fn test_div_min_by_minus_one() {
        let mut state = architectural();
        state.write(1, 0x8000_0000);
        state.write(2, 0xFFFF_FFFF);

        Div::new(1, 2).execute(&mut state);

        assert_eq!(state.lo(), 0x8000_0000);
        assert_eq!(state.hi(), 0);
    }

    #[test]
    #[should_panic]
    fn test_div_by_zero_panics() {
        let mut state = legacy();
        state.write(1, 1);
        Div::new(1, 2).execute(&mut state);
    }

    #[test]
    fn test_divu_unsigned() {
        let mut state = legacy();
        state.write(1, 0xFFFF_FFFF);
        state.write(2, 0x10);

        Divu::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 0xF);
        assert_eq!(state.lo(), 0x0FFF_FFFF);
    }

    #[test]
    #[should_panic]
    fn test_divu_by_zero_panics() {
        let mut state = legacy();
        Divu::new(1, 2).execute(&mut state);
    }

    #[test]
    fn test_mult_signed() {
        let mut state = architectural();
        state.write(1, (-2i32) as u32);
        state.write(2, 3);

        Mult::new(1, 2).execute(&mut state);

        assert_eq!(state.hi_lo(), (-6i64) as u64);
    }

    #[test]
    fn test_mult_narrow_lo() {
        let mut state = legacy();
        state.write(1, (-2i32) as u32);
        state.write(2, 3);

        Mult::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 0xFFFF_FFFF);
        assert_eq!(state.lo(), 0x0000_FFFA);
    }

    #[test]
    fn test_multu() {
        let mut state = architectural();
        state.write(1, 0xFFFF_FFFF);
        state.write(2, 0xFFFF_FFFF);

        Multu::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 0xFFFF_FFFE);
        assert_eq!(state.lo(), 0x0000_0001);
    }

    #[test]
    fn test_madd_accumulates() {
        let mut state = architectural();
        state.set_hi_lo(100);
        state.write(1, (-3i32) as u32);
        state.write(2, 7);

        Madd::new(1, 2).execute(&mut state);

        assert_eq!(state.hi_lo(), 79);
    }

    #[test]
    fn test_maddu_carries_into_hi() {
        let mut state = architectural();
        state.set_hi_lo(0x0000_0000_FFFF_FFFF);
        state.write(1, 1);
        state.write(2, 1);

        Maddu::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 1);
        assert_eq!(state.lo(), 0);
    }

    #[test]
    fn test_madd_legacy_masks_lo() {
        let mut state = legacy();
        state.set_hi_lo(0x0000_0001_0001_0000);
        state.write(1, 2);
        state.write(2, 3);

        Madd::new(1, 2).execute(&mut state);

        assert_eq!(state.hi(), 1);
        assert_eq!(state.lo(), 6);
    }

    #[test]
    fn test_msub() {
        let mut state = architectural();
        state.write(1, 4);
        state.write(2, 5);

        Msub::new(1, 2).execute(&mut state);

        assert_eq!(state.hi_lo(), (-20i64) as u64);
    }

    #[test]
    fn test_msubu_wraps() {
        let mut state = architectural();
        state.set_hi_lo(1);
        state.write(1, 2);
        state.write(2, 1);

        Msubu::new(1, 2).execute(&mut state);

        assert_eq!(state.hi_lo(), u64::MAX);
    }

    #[test]
    fn test_mul_legacy_reads_rd() {
        let mut state = legacy();
        state.write(1, 6);
        state.write(2, 1000);
        state.write(3, 7);

        Mul::new(1, 2, 3).execute(&mut state);

        assert_eq!(state.read(3), 42);
        assert_eq!(state.hi_lo(), 0);
    }

    #[test]
    fn test_mul_legacy_masks_result() {
        let mut state = legacy();
        state.write(1, 0x0001_0000);
        state.write(3, 0x0000_0003);

        Mul::new(1, 2, 3).execute(&mut state);

        assert_eq!(state.read(3), 0);
    }

    #[test]
    fn test_mul_architectural() {
        let mut state = architectural();
        state.write(1, 0x0001_0000);
        state.write(2, (-3i32) as u32);
        state.write(3, 99);

        Mul::new(1, 2, 3).execute(&mut state);

        assert_eq!(state.read(3), (-0x30000i32) as u32);
    }

    #[test]
    fn test_reverse_restores_hi_lo() {
        let mut state = legacy();
        state.set_hi(0x1111_1111);
        state.set_lo(0x2222_2222);
        state.write(1, 0x1234_5678);
        state.write(2, 0x9ABC_DEF0);
        let mut op = Msubu::new(1, 2);

        op.execute(&mut state);
        assert_ne!(state.hi_lo(), 0x1111_1111_2222_2222);

        op.reverse(&mut state);
        assert_eq!(state.hi(), 0x1111_1111);
        assert_eq!(state.lo(), 0x2222_2222);
        assert_eq!(state.read(1), 0x1234_5678);
    }

    #[test]
    fn test_destinations() {
        assert_eq!(Mult::new(1, 2).destination(), Destination::HiLo);
        assert_eq!(Mul::new(1, 2, 3).destination(), Destination::Gpr(3));
    }
}
