//! Bit counting and sign extension: CLO, CLZ, SEB, SEH.

use serde::{Serialize, Deserialize};
use crate::cpu::ProcessorState;
use crate::ops::Saved;

/// CLO: rd := number of leading one bits in rs (32 when rs is all ones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clo {
    rs: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Clo {
    pub fn new(rs: usize, rd: usize) -> Self {
        Self { rs, rd, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rs).leading_ones()
    }
}

gpr_operation!(Clo, Clo, rd);

/// CLZ: rd := number of leading zero bits in rs (32 when rs is zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clz {
    rs: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Clz {
    pub fn new(rs: usize, rd: usize) -> Self {
        Self { rs, rd, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rs).leading_zeros()
    }
}

gpr_operation!(Clz, Clz, rd);

/// SEB: rd := low byte of rt, sign-extended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seb {
    rt: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Seb {
    pub fn new(rt: usize, rd: usize) -> Self {
        Self { rt, rd, saved: Saved::empty() }
    }

    pub fn rt(&self) -> usize { self.rt }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rt) as u8 as i8 as i32 as u32
    }
}

gpr_operation!(Seb, Seb, rd);

/// SEH: rd := low halfword of rt, sign-extended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seh {
    rt: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Seh {
    pub fn new(rt: usize, rd: usize) -> Self {
        Self { rt, rd, saved: Saved::empty() }
    }

    pub fn rt(&self) -> usize { self.rt }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rt) as u16 as i16 as i32 as u32
    }
}

gpr_operation!(Seh, Seh, rd);
