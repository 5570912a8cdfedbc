//! SmallFast64 - a 64-bit three-rotate implementation of Bob Jenkins'
//! Small Fast PRNG.
//!
//! Original algorithm and C code by Bob Jenkins (public domain),
//! <https://burtleburtle.net/bob/rand/smallprng.html>. The rotate constants
//! (7, 13, 37) are the 64-bit set, reaching 18.4 bits of avalanche after
//! five rounds.

use crate::engine::RandomBitEngine;

/// Jenkins small-fast generator with four 64-bit words of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallFast64 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

const DEFAULT_SEED: u64 = 0xBADC_0FFE_E0DD_F00D;

impl Default for SmallFast64 {
    fn default() -> Self {
        SmallFast64::from_seed(DEFAULT_SEED)
    }
}

impl RandomBitEngine for SmallFast64 {
    type Output = u64;

    fn from_seed(seed: u64) -> Self {
        let mut rng = SmallFast64 { a: 0xF1EA_5EED, b: seed, c: seed, d: seed };
        rng.discard(20); // warmup: mix the state thoroughly
        rng
    }

    #[inline]
    fn next(&mut self) -> u64 {
        let e = self.a.wrapping_sub(self.b.rotate_left(7));
        self.a = self.b ^ self.c.rotate_left(13);
        self.b = self.c.wrapping_add(self.d.rotate_left(37));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}
