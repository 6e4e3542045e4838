//! Semantic quirk profiles.
//!
//! A few instructions can run either the way the legacy simulator this
//! core reproduces behaved, or the way the MIPS32 architecture defines
//! them. The profile is carried by [`ProcessorState`](crate::ProcessorState)
//! so every operation executed against it agrees on the same rules.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Switches for the behaviors where the legacy simulator and the
/// architecture disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quirks {
    /// DIV writes the quotient to HI and the remainder to LO.
    /// DIVU always uses HI = remainder, LO = quotient.
    pub div_swaps_hi_lo: bool,

    /// LO after MULT/MULTU/MADD/MADDU/MSUB/MSUBU, and the MUL result,
    /// keep only their low 16 bits.
    pub narrow_products: bool,

    /// MUL multiplies rs by rd instead of rt.
    pub mul_reads_rd: bool,
}

impl Quirks {
    /// Legacy simulator behavior (the default).
    pub const fn legacy() -> Self {
        Self {
            div_swaps_hi_lo: true,
            narrow_products: true,
            mul_reads_rd: true,
        }
    }

    /// Behavior as defined by the MIPS32 architecture.
    pub const fn architectural() -> Self {
        Self {
            div_swaps_hi_lo: false,
            narrow_products: false,
            mul_reads_rd: false,
        }
    }

    /// Parse a profile from JSON. Missing fields take their legacy value.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let quirks: Quirks = serde_json::from_str(text)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        tracing::debug!(?quirks, "loaded quirk profile");
        Ok(quirks)
    }

    /// Load a JSON profile from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }

    /// Serialize the profile as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Mask applied to LO (and the MUL result) under this profile.
    #[inline]
    pub(crate) fn product_mask(&self) -> u32 {
        if self.narrow_products { 0x0000_FFFF } else { 0xFFFF_FFFF }
    }
}

impl Default for Quirks {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Errors that can occur while loading a quirk profile.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_legacy() {
        assert_eq!(Quirks::default(), Quirks::legacy());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let quirks = Quirks::from_json(r#"{ "mul_reads_rd": false }"#).unwrap();
        assert!(!quirks.mul_reads_rd);
        assert!(quirks.div_swaps_hi_lo);
        assert!(quirks.narrow_products);
    }

    #[test]
    fn test_json_roundtrip() {
        let text = Quirks::architectural().to_json().unwrap();
        assert_eq!(Quirks::from_json(&text).unwrap(), Quirks::architectural());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Quirks::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Quirks::load("/nonexistent/quirks.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_product_mask() {
        assert_eq!(Quirks::legacy().product_mask(), 0xFFFF);
        assert_eq!(Quirks::architectural().product_mask(), u32::MAX);
    }
}
