//! Instruction mnemonics.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::ops::OpError;

/// Every instruction name this core knows about.
///
/// The comparison (`SLT*`) and subtraction (`SUB*`) names are recognized
/// but have no implementation; building them yields
/// [`OpError::Unsupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mnemonic {
    // ==================== Add ====================
    Add,
    Addi,
    Addiu,
    Addu,

    // ==================== Bit counting ====================
    Clo,
    Clz,

    // ==================== Multiply / divide ====================
    Div,
    Divu,
    Madd,
    Maddu,
    Msub,
    Msubu,
    Mul,
    Mult,
    Multu,

    // ==================== Sign extension ====================
    Seb,
    Seh,

    // ==================== Not implemented ====================
    Slt,
    Slti,
    Sltiu,
    Sltu,
    Sub,
    Subu,
}

impl Mnemonic {
    /// All mnemonics in alphabetical order.
    pub const ALL: [Mnemonic; 23] = [
        Mnemonic::Add, Mnemonic::Addi, Mnemonic::Addiu, Mnemonic::Addu,
        Mnemonic::Clo, Mnemonic::Clz,
        Mnemonic::Div, Mnemonic::Divu,
        Mnemonic::Madd, Mnemonic::Maddu, Mnemonic::Msub, Mnemonic::Msubu,
        Mnemonic::Mul, Mnemonic::Mult, Mnemonic::Multu,
        Mnemonic::Seb, Mnemonic::Seh,
        Mnemonic::Slt, Mnemonic::Slti, Mnemonic::Sltiu, Mnemonic::Sltu,
        Mnemonic::Sub, Mnemonic::Subu,
    ];

    /// Lowercase assembly name.
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::Addi => "addi",
            Mnemonic::Addiu => "addiu",
            Mnemonic::Addu => "addu",
            Mnemonic::Clo => "clo",
            Mnemonic::Clz => "clz",
            Mnemonic::Div => "div",
            Mnemonic::Divu => "divu",
            Mnemonic::Madd => "madd",
            Mnemonic::Maddu => "maddu",
            Mnemonic::Msub => "msub",
            Mnemonic::Msubu => "msubu",
            Mnemonic::Mul => "mul",
            Mnemonic::Mult => "mult",
            Mnemonic::Multu => "multu",
            Mnemonic::Seb => "seb",
            Mnemonic::Seh => "seh",
            Mnemonic::Slt => "slt",
            Mnemonic::Slti => "slti",
            Mnemonic::Sltiu => "sltiu",
            Mnemonic::Sltu => "sltu",
            Mnemonic::Sub => "sub",
            Mnemonic::Subu => "subu",
        }
    }

    /// Whether this core can execute the instruction.
    pub fn is_supported(self) -> bool {
        !matches!(
            self,
            Mnemonic::Slt | Mnemonic::Slti | Mnemonic::Sltiu | Mnemonic::Sltu
                | Mnemonic::Sub | Mnemonic::Subu
        )
    }

    /// Whether the instruction writes the HI/LO pair rather than a
    /// general-purpose register.
    pub fn writes_hi_lo(self) -> bool {
        matches!(
            self,
            Mnemonic::Div | Mnemonic::Divu
                | Mnemonic::Madd | Mnemonic::Maddu | Mnemonic::Msub | Mnemonic::Msubu
                | Mnemonic::Mult | Mnemonic::Multu
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mnemonic {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.name() == lower)
            .ok_or_else(|| OpError::UnknownMnemonic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("ADDIU".parse::<Mnemonic>().unwrap(), Mnemonic::Addiu);
        assert_eq!(" msubu ".parse::<Mnemonic>().unwrap(), Mnemonic::Msubu);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "lw".parse::<Mnemonic>().unwrap_err();
        assert!(matches!(err, OpError::UnknownMnemonic(ref s) if s == "lw"));
    }

    #[test]
    fn test_names_roundtrip() {
        for m in Mnemonic::ALL {
            assert_eq!(m.to_string().parse::<Mnemonic>().unwrap(), m);
        }
    }

    #[test]
    fn test_supported_set() {
        let supported = Mnemonic::ALL.iter().filter(|m| m.is_supported()).count();
        assert_eq!(supported, 17);
        assert!(!Mnemonic::Sub.is_supported());
        assert!(!Mnemonic::Sltiu.is_supported());
        assert!(Mnemonic::Seh.is_supported());
    }

    #[test]
    fn test_hi_lo_writers() {
        assert!(Mnemonic::Mult.writes_hi_lo());
        assert!(Mnemonic::Div.writes_hi_lo());
        assert!(!Mnemonic::Mul.writes_hi_lo());
        assert!(!Mnemonic::Add.writes_hi_lo());
    }
}
