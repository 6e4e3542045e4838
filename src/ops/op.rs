//! The closed instruction enum and the builder external decoders use.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::cpu::{ProcessorState, NUM_REGISTERS};
use crate::ops::*;

/// Already-decoded operand identities, as a decoder hands them over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operands {
    pub rs: Option<usize>,
    pub rt: Option<usize>,
    pub rd: Option<usize>,
    pub imm: Option<i32>,
}

impl Operands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rs(mut self, index: usize) -> Self {
        self.rs = Some(index);
        self
    }

    pub fn rt(mut self, index: usize) -> Self {
        self.rt = Some(index);
        self
    }

    pub fn rd(mut self, index: usize) -> Self {
        self.rd = Some(index);
        self
    }

    pub fn imm(mut self, value: i32) -> Self {
        self.imm = Some(value);
        self
    }

    fn reg(
        slot: Option<usize>,
        mnemonic: Mnemonic,
        operand: &'static str,
    ) -> Result<usize, OpError> {
        let index = slot.ok_or(OpError::MissingOperand { mnemonic, operand })?;
        if index >= NUM_REGISTERS {
            return Err(OpError::RegisterOutOfRange(index));
        }
        Ok(index)
    }

    fn imm16(&self, mnemonic: Mnemonic) -> Result<i16, OpError> {
        let value = self.imm.ok_or(OpError::MissingOperand { mnemonic, operand: "imm" })?;
        i16::try_from(value).map_err(|_| OpError::ImmediateOutOfRange(value))
    }
}

// Generates the enum, delegation to the wrapped instruction, and From impls.
macro_rules! define_op {
    ($($variant:ident),* $(,)?) => {
        /// Any supported instruction.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(tag = "op", rename_all = "lowercase")]
        pub enum Op {
            $($variant($variant),)*
        }

        impl Operation for Op {
            fn mnemonic(&self) -> Mnemonic {
                match self {
                    $(Op::$variant(op) => op.mnemonic(),)*
                }
            }

            fn destination(&self) -> Destination {
                match self {
                    $(Op::$variant(op) => op.destination(),)*
                }
            }

            fn execute(&mut self, state: &mut ProcessorState) {
                match self {
                    $(Op::$variant(op) => op.execute(state),)*
                }
            }

            fn reverse(&mut self, state: &mut ProcessorState) {
                match self {
                    $(Op::$variant(op) => op.reverse(state),)*
                }
            }

            fn encode(&self) -> Result<u32, OpError> {
                match self {
                    $(Op::$variant(op) => op.encode(),)*
                }
            }
        }

        $(
            impl From<$variant> for Op {
                fn from(op: $variant) -> Self {
                    Op::$variant(op)
                }
            }
        )*
    };
}

define_op!(
    Add, Addi, Addiu, Addu,
    Clo, Clz,
    Div, Divu, Madd, Maddu, Msub, Msubu, Mul, Mult, Multu,
    Seb, Seh,
);

impl Op {
    /// Build an operation from a mnemonic and decoded operands.
    ///
    /// Operands the instruction does not use are ignored. Comparison and
    /// subtraction mnemonics yield [`OpError::Unsupported`].
    pub fn build(mnemonic: Mnemonic, operands: &Operands) -> Result<Op, OpError> {
        if !mnemonic.is_supported() {
            return Err(OpError::Unsupported(mnemonic));
        }

        let rs = || Operands::reg(operands.rs, mnemonic, "rs");
        let rt = || Operands::reg(operands.rt, mnemonic, "rt");
        let rd = || Operands::reg(operands.rd, mnemonic, "rd");
        let imm = || operands.imm16(mnemonic);

        let op: Op = match mnemonic {
            Mnemonic::Add => Add::new(rs()?, rt()?, rd()?).into(),
            Mnemonic::Addi => Addi::new(rs()?, rt()?, imm()?).into(),
            Mnemonic::Addiu => Addiu::new(rs()?, rt()?, imm()?).into(),
            Mnemonic::Addu => Addu::new(rs()?, rt()?, rd()?).into(),
            Mnemonic::Clo => Clo::new(rs()?, rd()?).into(),
            Mnemonic::Clz => Clz::new(rs()?, rd()?).into(),
            Mnemonic::Div => Div::new(rs()?, rt()?).into(),
            Mnemonic::Divu => Divu::new(rs()?, rt()?).into(),
            Mnemonic::Madd => Madd::new(rs()?, rt()?).into(),
            Mnemonic::Maddu => Maddu::new(rs()?, rt()?).into(),
            Mnemonic::Msub => Msub::new(rs()?, rt()?).into(),
            Mnemonic::Msubu => Msubu::new(rs()?, rt()?).into(),
            Mnemonic::Mul => Mul::new(rs()?, rt()?, rd()?).into(),
            Mnemonic::Mult => Mult::new(rs()?, rt()?).into(),
            Mnemonic::Multu => Multu::new(rs()?, rt()?).into(),
            Mnemonic::Seb => Seb::new(rt()?, rd()?).into(),
            Mnemonic::Seh => Seh::new(rt()?, rd()?).into(),
            Mnemonic::Slt | Mnemonic::Slti | Mnemonic::Sltiu | Mnemonic::Sltu
            | Mnemonic::Sub | Mnemonic::Subu => return Err(OpError::Unsupported(mnemonic)),
        };

        Ok(op)
    }

    /// Deserialize a list of operations from JSON, e.g.
    /// `[{"op":"addu","rs":5,"rt":7,"rd":3}]`.
    pub fn list_from_json(text: &str) -> Result<Vec<Op>, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.mnemonic();
        match self {
            Op::Add(op) => write!(f, "{} ${}, ${}, ${}", name, op.rd(), op.rs(), op.rt()),
            Op::Addu(op) => write!(f, "{} ${}, ${}, ${}", name, op.rd(), op.rs(), op.rt()),
            Op::Mul(op) => write!(f, "{} ${}, ${}, ${}", name, op.rd(), op.rs(), op.rt()),
            Op::Addi(op) => write!(f, "{} ${}, ${}, {}", name, op.rt(), op.rs(), op.imm()),
            Op::Addiu(op) => write!(f, "{} ${}, ${}, {}", name, op.rt(), op.rs(), op.imm()),
            Op::Clo(op) => write!(f, "{} ${}, ${}", name, op.rd(), op.rs()),
            Op::Clz(op) => write!(f, "{} ${}, ${}", name, op.rd(), op.rs()),
            Op::Seb(op) => write!(f, "{} ${}, ${}", name, op.rd(), op.rt()),
            Op::Seh(op) => write!(f, "{} ${}, ${}", name, op.rd(), op.rt()),
            Op::Div(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Divu(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Madd(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Maddu(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Msub(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Msubu(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Mult(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
            Op::Multu(op) => write!(f, "{} ${}, ${}", name, op.rs(), op.rt()),
        }
    }
}
