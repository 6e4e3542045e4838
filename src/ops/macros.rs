//! Boilerplate for the [`Operation`](crate::ops::Operation) impls.
//!
//! Every instruction saves its destination, computes, writes, and on
//! reverse puts the saved value back. Only the computation differs, so each
//! type supplies an inherent `compute` and these macros wire up the rest.

/// Implement `Operation` for an instruction with one general-purpose
/// destination register held in field `$dest`.
///
/// Plain form: `compute(&self, &ProcessorState) -> u32`.
/// `trapping` form: `compute(&self, &ProcessorState) -> Result<u32, Overflow>`;
/// on `Err` the destination keeps its value and the overflow trap fires.
macro_rules! gpr_operation {
    ($type:ident, $mnemonic:ident, $dest:ident) => {
        impl $crate::ops::Operation for $type {
            gpr_operation!(@common $mnemonic, $dest);

            fn execute(&mut self, state: &mut $crate::cpu::ProcessorState) {
                self.saved.store(state.read(self.$dest));
                let value = self.compute(state);
                tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, rd = self.$dest, value, "execute");
                state.write(self.$dest, value);
            }
        }
    };
    ($type:ident, $mnemonic:ident, $dest:ident, trapping) => {
        impl $crate::ops::Operation for $type {
            gpr_operation!(@common $mnemonic, $dest);

            fn execute(&mut self, state: &mut $crate::cpu::ProcessorState) {
                self.saved.store(state.read(self.$dest));
                match self.compute(state) {
                    Ok(value) => {
                        tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, rd = self.$dest, value, "execute");
                        state.write(self.$dest, value);
                    }
                    Err($crate::ops::Overflow) => {
                        tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, rd = self.$dest, "execute: overflow");
                        state.signal_overflow_trap();
                    }
                }
            }
        }
    };
    (@common $mnemonic:ident, $dest:ident) => {
        fn mnemonic(&self) -> $crate::ops::Mnemonic {
            $crate::ops::Mnemonic::$mnemonic
        }

        fn destination(&self) -> $crate::ops::Destination {
            $crate::ops::Destination::Gpr(self.$dest)
        }

        fn reverse(&mut self, state: &mut $crate::cpu::ProcessorState) {
            let prior = self.saved.take($crate::ops::Mnemonic::$mnemonic);
            tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, rd = self.$dest, prior, "reverse");
            state.write(self.$dest, prior);
        }
    };
}

/// Implement `Operation` for an instruction that writes the HI/LO pair.
/// The type supplies `compute(&self, &ProcessorState) -> (u32, u32)`
/// returning the new `(hi, lo)`.
macro_rules! hi_lo_operation {
    ($type:ident, $mnemonic:ident) => {
        impl $crate::ops::Operation for $type {
            fn mnemonic(&self) -> $crate::ops::Mnemonic {
                $crate::ops::Mnemonic::$mnemonic
            }

            fn destination(&self) -> $crate::ops::Destination {
                $crate::ops::Destination::HiLo
            }

            fn execute(&mut self, state: &mut $crate::cpu::ProcessorState) {
                self.saved.store((state.hi(), state.lo()));
                let (hi, lo) = self.compute(state);
                tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, hi, lo, "execute");
                state.set_hi(hi);
                state.set_lo(lo);
            }

            fn reverse(&mut self, state: &mut $crate::cpu::ProcessorState) {
                let (hi, lo) = self.saved.take($crate::ops::Mnemonic::$mnemonic);
                tracing::trace!(op = %$crate::ops::Mnemonic::$mnemonic, hi, lo, "reverse");
                state.set_hi(hi);
                state.set_lo(lo);
            }
        }
    };
}

/// Define a HI/LO instruction taking `rs` and `rt`: the struct, its
/// constructor and accessors. The `compute` body is written separately.
macro_rules! hi_lo_instruction {
    ($(#[$meta:meta])* $type:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $type {
            rs: usize,
            rt: usize,
            #[serde(skip)]
            saved: Saved<(u32, u32)>,
        }

        impl $type {
            pub fn new(rs: usize, rt: usize) -> Self {
                Self { rs, rt, saved: Saved::empty() }
            }

            pub fn rs(&self) -> usize {
                self.rs
            }

            pub fn rt(&self) -> usize {
                self.rt
            }
        }
    };
}
