//! # MIPS32 Simulator Core
//!
//! Reversible execution of the MIPS32 arithmetic and multiply/divide
//! instructions against an in-memory processor state.
//!
//! Every operation captures its operand registers at construction, and
//! can undo its own last execution without a global history:
//!
//! ```
//! use mips32_sim::{Addu, Operation, ProcessorState};
//!
//! let mut state = ProcessorState::new();
//! state.write(5, 10);
//! state.write(7, 10);
//!
//! let mut op = Addu::new(5, 7, 3);
//! op.execute(&mut state);
//! assert_eq!(state.read(3), 20);
//!
//! op.reverse(&mut state);
//! assert_eq!(state.read(3), 0);
//! ```

pub mod config;
pub mod cpu;
pub mod ops;

// Re-export commonly used types
pub use config::{ConfigError, Quirks};
pub use cpu::{ProcessorState, RegisterFile, NUM_REGISTERS};
pub use ops::{
    Destination, Mnemonic, Op, OpError, Operands, Operation,
    Add, Addi, Addiu, Addu, Clo, Clz, Div, Divu, Madd, Maddu, Msub, Msubu,
    Mul, Mult, Multu, Seb, Seh,
};
