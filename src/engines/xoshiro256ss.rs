//! Xoshiro256** 1.0 by David Blackman and Sebastiano Vigna (public domain),
//! <https://prng.di.unimi.it/xoshiro256starstar.c>, seeded via Vigna's
//! splitmix64 (<https://prng.di.unimi.it/splitmix64.c>).

use crate::engine::RandomBitEngine;

const DEFAULT_SEED: u64 = 0xFEED_FACE_CAFE_BEEF;

/// Xoshiro256** engine: 256 bits of state, 64-bit output, period 2^256 - 1.
///
/// Seed initialization chains splitmix64 calls with distinct large odd
/// constants instead of copying one splitmix64 result into all four state
/// words, so a poor initial seed can never collapse the whole state into
/// something trivial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xoshiro256SS {
    s: [u64; 4],
}

const fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl Xoshiro256SS {
    /// Restores an engine from raw state, bypassing the seeding routine.
    ///
    /// The all-zero state is a fixed point of the update function and must
    /// not be used; `from_seed` can never produce it.
    pub const fn from_state(s: [u64; 4]) -> Self {
        Xoshiro256SS { s }
    }
}

impl Default for Xoshiro256SS {
    fn default() -> Self {
        Xoshiro256SS::from_seed(DEFAULT_SEED)
    }
}

impl RandomBitEngine for Xoshiro256SS {
    type Output = u64;

    fn from_seed(seed: u64) -> Self {
        let s0 = splitmix64(seed);
        let s1 = splitmix64(s0.wrapping_add(0x9E37_79B9_7F4A_7C15)); // golden ratio
        let s2 = splitmix64(s1.wrapping_add(0x7F4A_7C15_F39C_CCD1)); // arbitrary odd
        let s3 = splitmix64(s2.wrapping_add(0x3549_B5A7_B97C_9A31)); // another odd
        Xoshiro256SS { s: [s0, s1, s2, s3] }
    }

    #[inline]
    fn next(&mut self) -> u64 {
        let result = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Blackman/Vigna reference xoshiro256**, ported verbatim for
    /// validation (<https://prng.di.unimi.it/xoshiro256starstar.c>).
    struct Reference {
        s: [u64; 4],
    }

    fn reference_next(r: &mut Reference) -> u64 {
        let result = r.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = r.s[1] << 17;
        r.s[2] ^= r.s[0];
        r.s[3] ^= r.s[1];
        r.s[1] ^= r.s[2];
        r.s[0] ^= r.s[3];
        r.s[2] ^= t;
        r.s[3] = r.s[3].rotate_left(45);
        result
    }

    #[test]
    fn test_matches_vigna_reference() {
        let state = [0xFEED_FACE_CAFE_BEEF, 1, 2, 3];
        let mut reference = Reference { s: state };
        let mut rng = Xoshiro256SS::from_state(state);
        for i in 0..6 {
            assert_eq!(
                rng.next(),
                reference_next(&mut reference),
                "xoshiro256** vector {} mismatch",
                i
            );
        }
    }

    #[test]
    fn test_deterministic_seed() {
        let mut a = Xoshiro256SS::from_seed(42);
        let mut b = Xoshiro256SS::from_seed(42);
        for _ in 0..1000 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_seeding_never_yields_zero_state() {
        for seed in [0u64, 1, u64::MAX, 0x9E37_79B9_7F4A_7C15] {
            let rng = Xoshiro256SS::from_seed(seed);
            assert_ne!(rng.s, [0, 0, 0, 0], "degenerate state for seed {}", seed);
        }
    }

    #[test]
    fn test_split_decorrelates() {
        let mut parent = Xoshiro256SS::from_seed(11);
        let mut child = parent.split();
        let child_seq: Vec<u64> = (0..8).map(|_| child.next()).collect();
        let parent_seq: Vec<u64> = (0..8).map(|_| parent.next()).collect();
        assert_ne!(child_seq, parent_seq);
    }
}
