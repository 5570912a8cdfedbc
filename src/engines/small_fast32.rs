//! SmallFast32 - a 32-bit two-rotate implementation of Bob Jenkins'
//! Small Fast PRNG.
//!
//! Original algorithm and C code by Bob Jenkins (public domain),
//! <https://burtleburtle.net/bob/rand/smallprng.html>.

use crate::engine::RandomBitEngine;
use crate::seed;

/// Jenkins small-fast generator with four 32-bit words of state.
///
/// Tiny, fast, and statistically solid for its size. 64-bit seeds are
/// XOR-folded down to 32 bits before seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallFast32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

const DEFAULT_SEED: u32 = 0xBADC_0FFE;

impl SmallFast32 {
    /// Seeds from a raw 32-bit value, exactly as Jenkins' `raninit` does.
    pub fn from_seed32(seed: u32) -> Self {
        let mut rng = SmallFast32 { a: 0xF1EA_5EED, b: seed, c: seed, d: seed };
        rng.discard(20); // warmup: mix the state thoroughly
        rng
    }
}

impl Default for SmallFast32 {
    fn default() -> Self {
        SmallFast32::from_seed32(DEFAULT_SEED)
    }
}

impl RandomBitEngine for SmallFast32 {
    type Output = u32;

    fn from_seed(seed: u64) -> Self {
        SmallFast32::from_seed32(seed::to_32(seed))
    }

    #[inline]
    fn next(&mut self) -> u32 {
        let e = self.a.wrapping_sub(self.b.rotate_left(27));
        self.a = self.b ^ self.c.rotate_left(17);
        self.b = self.c.wrapping_add(self.d);
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Jenkins' reference JSF implementation, ported verbatim for
    /// validation (<https://burtleburtle.net/bob/rand/smallprng.html>).
    struct RanCtx {
        a: u32,
        b: u32,
        c: u32,
        d: u32,
    }

    fn ranval(x: &mut RanCtx) -> u32 {
        let e = x.a.wrapping_sub(x.b.rotate_left(27));
        x.a = x.b ^ x.c.rotate_left(17);
        x.b = x.c.wrapping_add(x.d);
        x.c = x.d.wrapping_add(e);
        x.d = e.wrapping_add(x.a);
        x.d
    }

    fn raninit(seed: u32) -> RanCtx {
        let mut x = RanCtx { a: 0xF1EA_5EED, b: seed, c: seed, d: seed };
        for _ in 0..20 {
            ranval(&mut x);
        }
        x
    }

    #[test]
    fn test_matches_jenkins_reference() {
        let mut reference = raninit(123);
        let mut rng = SmallFast32::from_seed32(123);
        for i in 0..6 {
            assert_eq!(rng.next(), ranval(&mut reference), "JSF32 vector {} mismatch", i);
        }
    }

    #[test]
    fn test_deterministic_seed() {
        let mut a = SmallFast32::from_seed(42);
        let mut b = SmallFast32::from_seed(42);
        for _ in 0..1000 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_seed_folding_preserves_low_word() {
        // A seed that fits in 32 bits must reach the state unchanged.
        assert_eq!(SmallFast32::from_seed(123), SmallFast32::from_seed32(123));
    }

    #[test]
    fn test_default_is_reproducible() {
        let mut a = SmallFast32::default();
        let mut b = SmallFast32::default();
        assert_eq!(a.next(), b.next());
    }
}
