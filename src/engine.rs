//! The engine contract shared by every PRNG in this crate.
//!
//! An engine is a deterministic state machine that produces full-width,
//! zero-based unsigned values: its output covers every bit pattern of its
//! word type with `min() == 0` and `max() == MAX`. That shape is what lets
//! [`Random`](crate::Random) treat a draw as uniformly distributed over all
//! `2^W` patterns, which the bounded-generation and bit-extraction paths
//! rely on.
//!
//! The contract is enforced structurally: only word types implementing the
//! sealed [`EngineWord`] trait can be engine outputs, and `min()`/`max()`
//! are fixed by default methods rather than left to each implementation.

use std::fmt::Debug;

use crate::seed;

/// Domain-separation key for [`RandomBitEngine::split`] ("SPLIT-01").
const SPLIT_DOMAIN: u64 = 0x5350_4C49_542D_3031;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned word type an engine may produce. Sealed: exactly `u32` and
/// `u64` qualify, which keeps the width arithmetic in the facade total.
pub trait EngineWord: sealed::Sealed + Copy + Eq + Ord + Debug {
    /// Width of the word in bits.
    const BITS: u32;
    /// The zero value; also the engine's minimum output.
    const ZERO: Self;
    /// The all-ones value; also the engine's maximum output.
    const MAX: Self;

    /// Truncating conversion from `u64`.
    fn from_u64(value: u64) -> Self;

    /// Widening conversion to `u64`.
    fn to_u64(self) -> u64;
}

impl EngineWord for u32 {
    const BITS: u32 = 32;
    const ZERO: Self = 0;
    const MAX: Self = u32::MAX;

    #[inline]
    fn from_u64(value: u64) -> Self {
        value as u32
    }

    #[inline]
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl EngineWord for u64 {
    const BITS: u32 = 64;
    const ZERO: Self = 0;
    const MAX: Self = u64::MAX;

    #[inline]
    fn from_u64(value: u64) -> Self {
        value
    }

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }
}

/// A deterministically seedable uniform random-bit engine.
///
/// Implementations must guarantee:
/// - `from_seed(s)` twice with the same `s` yields identical sequences;
/// - `next()` never fails and covers the full `[0, Output::MAX]` range;
/// - `discard(n)` is observably identical to `n` calls of `next()`, however
///   it is computed (engines with algebraic jump formulas may override the
///   linear default);
/// - `Default` is a fixed, documented seed, so default-constructed engines
///   are reproducible too.
///
/// Engines are plain value types. Sharing one instance across threads is
/// not supported; give each thread its own via [`split`](Self::split) or
/// independent seeding.
pub trait RandomBitEngine: Clone + PartialEq + Debug + Default {
    /// The unsigned word type this engine emits.
    type Output: EngineWord;

    /// Creates an engine from a 64-bit seed. Engines with narrower internal
    /// words fold or mix the seed down as their algorithm prescribes.
    fn from_seed(seed: u64) -> Self;

    /// Advances the state and returns one full-width unsigned value.
    fn next(&mut self) -> Self::Output;

    /// Resets to the deterministic state for `seed`.
    #[inline]
    fn seed(&mut self, seed: u64) {
        *self = Self::from_seed(seed);
    }

    /// Resets to the fixed default seed.
    #[inline]
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the state as if `next()` had been called `n` times.
    #[inline]
    fn discard(&mut self, n: u64) {
        for _ in 0..n {
            self.next();
        }
    }

    /// Forks a decorrelated engine, advancing this engine's state.
    ///
    /// Two raw draws are hashed through the xNASAM avalanche mixer under a
    /// fixed domain-separation key, so child streams are not trivially
    /// correlated with the parent or with sibling splits.
    #[inline]
    fn split(&mut self) -> Self {
        let a = self.next().to_u64();
        let b = self.next().to_u64();
        Self::from_seed(seed::xnasam(a ^ b.rotate_left(32), SPLIT_DOMAIN))
    }

    /// Smallest possible output. Always zero; part of the contract.
    #[inline]
    fn min() -> Self::Output {
        <Self::Output as EngineWord>::ZERO
    }

    /// Largest possible output. Always the word's full range.
    #[inline]
    fn max() -> Self::Output {
        <Self::Output as EngineWord>::MAX
    }
}
