//! Konadare192 - Pelle Evensen's "konadare192px++" PRNG.
//!
//! Original code: <https://github.com/pellevensen/PReenactiNG> (Apache-2.0).
//! Three words of state, add/rotate/xor update, no multiplies in the
//! output path.

use crate::engine::RandomBitEngine;

const INC: u64 = 0xBB67_AE85_84CA_A73B;
const DEFAULT_SEED: u64 = 1;

/// Konadare192 engine: 192 bits of state, 64-bit output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Konadare192 {
    a: u64,
    b: u64,
    c: u64,
}

/// "kMixNoMul" from Evensen's original repository; used only during
/// seeding to warm the state up.
const fn mix(a: u64, b: u64) -> u64 {
    let mut c = b;
    let mut x = a;
    let mut i: u64 = 0;
    while i < 5 {
        x ^= x.rotate_right(25) ^ x.rotate_right(49);
        c = c
            .wrapping_add(INC)
            .wrapping_add(c << 15)
            .wrapping_add(c << 7)
            .wrapping_add(i);
        c ^= (c >> 47) ^ (c >> 23);
        x = x.wrapping_add(c);
        x ^= (x >> 11) ^ (x >> 3);
        i += 1;
    }
    x
}

impl Default for Konadare192 {
    fn default() -> Self {
        Konadare192::from_seed(DEFAULT_SEED)
    }
}

impl RandomBitEngine for Konadare192 {
    type Output = u64;

    fn from_seed(seed: u64) -> Self {
        let mut a = seed;
        let mut b = seed.wrapping_add(1);
        let mut c = seed.wrapping_add(2);
        // two rounds of mixing to warm up the state
        for _ in 0..2 {
            let t0 = mix(a, c);
            let t1 = mix(b, a);
            let t2 = mix(c, b);
            a = t0;
            b = t1;
            c = t2;
        }
        if a | b | c == 0 {
            a = 0x3C6E_F372_FE94_F82B; // avoid the all-zeros state
        }
        Konadare192 { a, b, c }
    }

    #[inline]
    fn next(&mut self) -> u64 {
        let out = self.b ^ self.c;
        let a0 = self.a ^ (self.a >> 32);
        self.a = self.a.wrapping_add(INC);
        self.b = self.b.wrapping_add(a0).rotate_right(11);
        self.c = self.c.wrapping_add(self.b).rotate_left(8);
        out
    }
}
