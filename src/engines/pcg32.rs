//! PCG32 - Permuted Congruential Generator, XSH-RR variant.
//!
//! Based on "Really minimal PCG32 code" by M.E. O'Neill,
//! <https://www.pcg-random.org> / <https://github.com/imneme/pcg-c-basic>.
//! 64 bits of state, 32-bit output, period 2^64, with independent sequence
//! selection via an odd increment ("stream").

use crate::engine::RandomBitEngine;

/// PCG32 engine: 32-bit output from a 64-bit linear congruential state,
/// permuted by an xorshift and a data-dependent rotate.
///
/// Supports log-time [`discard`](RandomBitEngine::discard) via the
/// arbitrary-stride LCG jump, and derives split streams by re-seeding onto
/// a fresh sequence constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcg32 {
    /// LCG state. All values are possible.
    state: u64,
    /// Sequence (stream) selector. Must always be odd.
    inc: u64,
}

const DEFAULT_SEED: u64 = 0x853C_49E6_748F_EA9B;
const DEFAULT_STREAM: u64 = 0xDA3E_39CB_94B9_5BDB;
const MULT: u64 = 6_364_136_223_846_793_005;

impl Pcg32 {
    /// Creates an engine from a seed and an explicit sequence constant.
    ///
    /// Engines with different sequence constants produce independent,
    /// non-overlapping streams even from the same seed.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = Pcg32 { state: 0, inc: (stream << 1) | 1 };
        // Warm up the LCG so the first returned bits are mixed.
        rng.next();
        rng.state = rng.state.wrapping_add(seed);
        rng.next();
        rng
    }

    /// Restores an engine from raw state, bypassing the seeding routine.
    /// `inc` is forced odd to keep the stream invariant.
    pub const fn from_state(state: u64, inc: u64) -> Self {
        Pcg32 { state, inc: inc | 1 }
    }

    /// Returns the raw `(state, inc)` pair for checkpointing.
    pub const fn state(&self) -> (u64, u64) {
        (self.state, self.inc)
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        Pcg32 { state: DEFAULT_SEED, inc: DEFAULT_STREAM }
    }
}

impl RandomBitEngine for Pcg32 {
    type Output = u32;

    fn from_seed(seed: u64) -> Self {
        Pcg32::with_stream(seed, DEFAULT_STREAM)
    }

    #[inline]
    fn next(&mut self) -> u32 {
        let oldstate = self.state;
        self.state = oldstate.wrapping_mul(MULT).wrapping_add(self.inc);
        let xorshifted = (((oldstate >> 18) ^ oldstate) >> 27) as u32;
        let rot = (oldstate >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Advances `n` steps in O(log n) time.
    ///
    /// Based on Brown, "Random Number Generation with Arbitrary Stride",
    /// Transactions of the American Nuclear Society (Nov. 1994): square the
    /// LCG's multiplier/increment pair for each set bit of the stride.
    fn discard(&mut self, n: u64) {
        let mut delta = n;
        let mut cur_mult = MULT;
        let mut cur_plus = self.inc;
        let mut acc_mult: u64 = 1;
        let mut acc_plus: u64 = 0;
        while delta > 0 {
            if delta & 1 == 1 {
                acc_mult = acc_mult.wrapping_mul(cur_mult);
                acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
            }
            cur_plus = cur_mult.wrapping_add(1).wrapping_mul(cur_plus);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            delta /= 2;
        }
        self.state = acc_mult.wrapping_mul(self.state).wrapping_add(acc_plus);
    }

    /// Forks onto a fresh stream: one draw seeds the child, another selects
    /// its sequence constant, so parent and child never share an orbit.
    fn split(&mut self) -> Self {
        let seed = u64::from(self.next());
        let stream = u64::from(self.next());
        Pcg32::with_stream(seed, stream)
    }
}
