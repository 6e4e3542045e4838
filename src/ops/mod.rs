//! The reversible operation set.
//!
//! Each instruction is its own type holding operand identities (register
//! indices, immediates) fixed at construction and one slot of undo memory.
//! All of them implement [`Operation`]; [`Op`] wraps them in one closed
//! enum for callers that want a single value type.
//!
//! A `reverse` is only meaningful right after one `execute` of the same
//! instance against the same state, with nothing else writing the
//! destination in between. Only the missing-execute case is detected.

#[macro_use]
mod macros;

pub mod mnemonic;
pub mod undo;
pub mod arith;
pub mod bits;
pub mod muldiv;
pub mod op;

use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::cpu::ProcessorState;

pub use mnemonic::Mnemonic;
pub use undo::Saved;
pub use arith::{Add, Addi, Addiu, Addu};
pub use bits::{Clo, Clz, Seb, Seh};
pub use muldiv::{Div, Divu, Madd, Maddu, Msub, Msubu, Mul, Mult, Multu};
pub use op::{Op, Operands};

/// The register(s) an instruction writes, and so what `reverse` restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// A general-purpose register.
    Gpr(usize),
    /// The HI/LO pair.
    HiLo,
}

/// Signed overflow in a trapping instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// An executable, reversible instruction.
pub trait Operation {
    /// Which instruction this is.
    fn mnemonic(&self) -> Mnemonic;

    /// The register(s) `execute` may write.
    fn destination(&self) -> Destination;

    /// Apply the instruction to `state`, remembering the destination's
    /// prior value.
    ///
    /// Trapping instructions that overflow leave the destination unchanged
    /// and call [`ProcessorState::signal_overflow_trap`]; this is not an
    /// error.
    ///
    /// # Panics
    /// Panics on a register index outside 0-31, and for DIV/DIVU on a zero
    /// divisor.
    fn execute(&mut self, state: &mut ProcessorState);

    /// Put the destination back to what the preceding `execute` saved.
    ///
    /// # Panics
    /// Panics if there is no preceding `execute` to undo.
    fn reverse(&mut self, state: &mut ProcessorState);

    /// Encode the instruction as a 32-bit word. Not implemented yet.
    fn encode(&self) -> Result<u32, OpError> {
        Err(OpError::EncodeNotImplemented(self.mnemonic()))
    }
}

/// Errors surfaced to callers building or encoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("encoding {0} is not implemented")]
    EncodeNotImplemented(Mnemonic),

    #[error("instruction {0} is not supported")]
    Unsupported(Mnemonic),

    #[error("unknown mnemonic: {0}")]
    UnknownMnemonic(String),

    #[error("{mnemonic} requires operand {operand}")]
    MissingOperand { mnemonic: Mnemonic, operand: &'static str },

    #[error("register index {0} out of range (0-31)")]
    RegisterOutOfRange(usize),

    #[error("immediate {0} does not fit in 16 bits")]
    ImmediateOutOfRange(i32),
}
