//! Single-slot undo memory.

use crate::ops::Mnemonic;

/// The prior value an operation saved on its last execute.
///
/// Filled by `execute`, emptied by `reverse`. Executing again overwrites
/// whatever was saved before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Saved<T>(Option<T>);

impl<T: Copy> Saved<T> {
    pub const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub fn store(&mut self, value: T) {
        self.0 = Some(value);
    }

    /// Take the saved value for a reverse.
    ///
    /// # Panics
    /// Panics if nothing was saved, i.e. `reverse` was called without a
    /// matching `execute` before it.
    #[inline]
    pub fn take(&mut self, mnemonic: Mnemonic) -> T {
        match self.0.take() {
            Some(value) => value,
            None => panic!("{}: reverse called without a preceding execute", mnemonic),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl<T: Copy> Default for Saved<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_take() {
        let mut slot = Saved::empty();
        slot.store(5u32);
        slot.store(6u32);
        assert!(!slot.is_empty());
        assert_eq!(slot.take(Mnemonic::Add), 6);
        assert!(slot.is_empty());
    }

    #[test]
    #[should_panic(expected = "addu: reverse called without a preceding execute")]
    fn test_take_empty() {
        let mut slot: Saved<u32> = Saved::empty();
        slot.take(Mnemonic::Addu);
    }
}
