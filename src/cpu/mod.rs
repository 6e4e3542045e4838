//! Processor state for the MIPS32 execution core.
//!
//! - 32 general-purpose 32-bit registers addressed by index
//! - HI/LO pair for 64-bit multiply/divide results
//! - overflow trap signal for the external trap handler

pub mod registers;
pub mod state;

pub use registers::{RegisterFile, NUM_REGISTERS};
pub use state::ProcessorState;
