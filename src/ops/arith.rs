//! Add instructions: ADD, ADDI, ADDIU, ADDU.
//!
//! ADD and ADDI trap on signed overflow and leave the destination alone.
//! ADDIU and ADDU wrap modulo 2^32 and never trap.

use serde::{Serialize, Deserialize};
use crate::cpu::ProcessorState;
use crate::ops::{Overflow, Saved};

/// Sign-extend a 16-bit immediate to a 32-bit word.
#[inline]
pub(crate) fn sign_extend_imm(imm: i16) -> u32 {
    imm as i32 as u32
}

/// ADD: rd := rs + rt, trapping on signed overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Add {
    rs: usize,
    rt: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Add {
    pub fn new(rs: usize, rt: usize, rd: usize) -> Self {
        Self { rs, rt, rd, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rt(&self) -> usize { self.rt }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> Result<u32, Overflow> {
        let a = state.read(self.rs) as i32;
        let b = state.read(self.rt) as i32;
        a.checked_add(b).map(|sum| sum as u32).ok_or(Overflow)
    }
}

gpr_operation!(Add, Add, rd, trapping);

/// ADDI: rt := rs + sign_extend(imm), trapping on signed overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addi {
    rs: usize,
    rt: usize,
    imm: i16,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Addi {
    pub fn new(rs: usize, rt: usize, imm: i16) -> Self {
        Self { rs, rt, imm, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rt(&self) -> usize { self.rt }
    pub fn imm(&self) -> i16 { self.imm }

    fn compute(&self, state: &ProcessorState) -> Result<u32, Overflow> {
        let a = state.read(self.rs) as i32;
        a.checked_add(self.imm as i32).map(|sum| sum as u32).ok_or(Overflow)
    }
}

gpr_operation!(Addi, Addi, rt, trapping);

/// ADDIU: rt := rs + sign_extend(imm), wrapping. Despite the name the
/// immediate is sign-extended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addiu {
    rs: usize,
    rt: usize,
    imm: i16,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Addiu {
    pub fn new(rs: usize, rt: usize, imm: i16) -> Self {
        Self { rs, rt, imm, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rt(&self) -> usize { self.rt }
    pub fn imm(&self) -> i16 { self.imm }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rs).wrapping_add(sign_extend_imm(self.imm))
    }
}

gpr_operation!(Addiu, Addiu, rt);

/// ADDU: rd := rs + rt, wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addu {
    rs: usize,
    rt: usize,
    rd: usize,
    #[serde(skip)]
    saved: Saved<u32>,
}

impl Addu {
    pub fn new(rs: usize, rt: usize, rd: usize) -> Self {
        Self { rs, rt, rd, saved: Saved::empty() }
    }

    pub fn rs(&self) -> usize { self.rs }
    pub fn rt(&self) -> usize { self.rt }
    pub fn rd(&self) -> usize { self.rd }

    fn compute(&self, state: &ProcessorState) -> u32 {
        state.read(self.rs).wrapping_add(state.read(self.rt))
    }
}

gpr_operation!(Addu, Addu, rd);
