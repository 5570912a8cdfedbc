//! The `Random<E>` facade: turns raw engine bits into useful values.
//!
//! Wraps any [`RandomBitEngine`] by exclusive ownership and derives every
//! higher-level value from its draws: bounded integers (Lemire's
//! multiply-high reduction), arbitrary bit counts, unit-interval floats
//! (IEEE-754 mantissa fill), booleans with odds, approximate Gaussian
//! samples, and uniform picks from slices.
//!
//! Every method is a pure function of the engine state plus its own draws;
//! the only side effect is advancing that state by the documented number of
//! draws. There is no hidden global state. To use randomness from several
//! threads, give each thread its own instance (see [`Random::split`]).

use crate::engine::{EngineWord, RandomBitEngine};
use crate::wide;

mod sealed {
    pub trait Sealed {}
}

/// A float type that can be built from random mantissa bits. Sealed:
/// exactly `f32` and `f64`, both IEEE-754.
pub trait UnitFloat:
    sealed::Sealed
    + Copy
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
{
    /// Number of explicit mantissa bits (23 for f32, 52 for f64).
    const MANTISSA_BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const SIX: Self;

    /// Builds a value in `[0, 1)` from `MANTISSA_BITS` random bits by
    /// OR-ing them into the bit pattern of `1.0` and subtracting `1.0`.
    /// Branchless; exploits the IEEE-754 layout where `1.0` has an all-zero
    /// mantissa, so `1.0 | mantissa` spans exactly `[1.0, 2.0)`.
    fn from_mantissa(bits: u64) -> Self;
}

impl sealed::Sealed for f32 {}
impl UnitFloat for f32 {
    const MANTISSA_BITS: u32 = 23;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const SIX: Self = 6.0;

    #[inline]
    fn from_mantissa(bits: u64) -> Self {
        f32::from_bits(1.0f32.to_bits() | (bits as u32)) - 1.0
    }
}

impl sealed::Sealed for f64 {}
impl UnitFloat for f64 {
    const MANTISSA_BITS: u32 = 52;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const SIX: Self = 6.0;

    #[inline]
    fn from_mantissa(bits: u64) -> Self {
        f64::from_bits(1.0f64.to_bits() | bits) - 1.0
    }
}

/// An integer type usable with [`Random::between`]. Sealed; implemented
/// for every primitive integer up to 64 bits.
///
/// Span and offset work in modular 64-bit arithmetic, which handles ranges
/// like `between(i64::MIN, i64::MAX)` without overflow: two's complement
/// makes `hi - lo` correct as an unsigned span regardless of signs.
pub trait RangeInt: sealed::Sealed + Copy + PartialOrd {
    /// `(hi - lo)` as an unsigned 64-bit span.
    fn span(lo: Self, hi: Self) -> u64;
    /// `lo + delta`, wrapping in the unsigned representation.
    fn offset(lo: Self, delta: u64) -> Self;
}

macro_rules! impl_range_int {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl RangeInt for $t {
            #[inline]
            fn span(lo: Self, hi: Self) -> u64 {
                (hi as u64).wrapping_sub(lo as u64)
            }

            #[inline]
            fn offset(lo: Self, delta: u64) -> Self {
                (lo as u64).wrapping_add(delta) as $t
            }
        }
    )*};
}

impl_range_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Random value generator built on a [`RandomBitEngine`].
///
/// Construction is cheap; the facade holds nothing but the engine. Equal
/// facades (same engine state) produce equal futures.
///
/// # Examples
///
/// ```
/// use randbits::{engines::SmallFast64, Random};
///
/// let mut rng = Random::<SmallFast64>::from_seed(42);
/// let roll = rng.between(1, 7); // d6
/// assert!((1..7).contains(&roll));
/// let chance: f64 = rng.normalized();
/// assert!((0.0..1.0).contains(&chance));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Random<E: RandomBitEngine> {
    engine: E,
}

impl<E: RandomBitEngine> Random<E> {
    /// Wraps an existing engine.
    pub fn new(engine: E) -> Self {
        Random { engine }
    }

    /// Creates a facade over a freshly seeded engine.
    pub fn from_seed(seed: u64) -> Self {
        Random { engine: E::from_seed(seed) }
    }

    /// Access to the underlying engine, e.g. for manual checkpointing.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Resets the engine to the deterministic state for `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.engine.seed(seed);
    }

    /// Resets the engine to its fixed default seed.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Advances the engine `n` steps. Some engines (PCG32) do this in
    /// logarithmic rather than linear time.
    pub fn discard(&mut self, n: u64) {
        self.engine.discard(n);
    }

    /// Returns a decorrelated, forked generator; advances this one's state.
    /// Use for parallel or independent streams (task/thread-local
    /// randomness).
    pub fn split(&mut self) -> Random<E> {
        Random { engine: self.engine.split() }
    }

    /// Smallest possible raw output (always 0).
    pub fn min() -> E::Output {
        E::min()
    }

    /// Largest possible raw output (the word's full range).
    pub fn max() -> E::Output {
        E::max()
    }

    /// One full-width draw from the engine.
    #[inline]
    pub fn next(&mut self) -> E::Output {
        self.engine.next()
    }

    /// A value in `[0, bound)` via Lemire's multiply-high reduction.
    ///
    /// Much faster than naive modulo and free of rejection loops; the
    /// residual bias when `2^W` is not a multiple of `bound` is accepted by
    /// design. A zero `bound` is a contract violation: it trips a debug
    /// assertion, and in release builds the call returns 0.
    #[inline]
    pub fn next_bounded(&mut self, bound: E::Output) -> E::Output {
        debug_assert!(bound != <E::Output as EngineWord>::ZERO, "next_bounded: bound must be non-zero");
        if bound == <E::Output as EngineWord>::ZERO {
            return <E::Output as EngineWord>::ZERO;
        }
        let x = self.next().to_u64();
        let b = bound.to_u64();
        let w = <E::Output as EngineWord>::BITS;
        let reduced = if w <= 32 {
            // the full product fits a native u64
            (x * b) >> w
        } else {
            wide::mul_shift(x, b, w)
        };
        <E::Output as EngineWord>::from_u64(reduced)
    }

    /// A value in `[0, BOUND)` with the bound known at compile time.
    ///
    /// Power-of-two bounds skip the multiply entirely and extract exactly
    /// `log2(BOUND)` high bits, which is cheaper and exactly unbiased; all
    /// other bounds constant-fold through [`next_bounded`](Self::next_bounded).
    #[inline]
    pub fn next_below<const BOUND: u64>(&mut self) -> E::Output {
        debug_assert!(BOUND > 0, "next_below: BOUND must be positive");
        debug_assert!(
            BOUND.saturating_sub(1) <= <E::Output as EngineWord>::MAX.to_u64(),
            "next_below: BOUND too large for this engine's output type"
        );
        if BOUND.is_power_of_two() {
            let n = BOUND.trailing_zeros();
            if n == 0 {
                return <E::Output as EngineWord>::ZERO; // BOUND == 1: only one possible value
            }
            <E::Output as EngineWord>::from_u64(self.bits(n))
        } else {
            self.next_bounded(<E::Output as EngineWord>::from_u64(BOUND))
        }
    }

    /// Returns `n` random bits, right-justified, for `n` in `[1, 64]`.
    ///
    /// Takes the high `n` bits of one draw when `n` fits the engine width;
    /// wider requests concatenate the high bits of successive draws until
    /// `n` bits are filled. High bits are preferred because they are the
    /// best-mixed bits of most engines. Out-of-range `n` trips a debug
    /// assertion and is clamped in release builds.
    pub fn bits(&mut self, n: u32) -> u64 {
        debug_assert!((1..=64).contains(&n), "bits: n must be in [1, 64]");
        let n = n.clamp(1, 64);
        let width = <E::Output as EngineWord>::BITS;
        let mut acc: u64 = 0;
        let mut filled = 0;
        while filled < n {
            let take = (n - filled).min(width);
            let chunk = self.next().to_u64() >> (width - take);
            acc = if take == 64 { chunk } else { (acc << take) | chunk };
            filled += take;
        }
        acc
    }

    /// Compile-time variant of [`bits`](Self::bits): `rng.bits_const::<8>()`.
    #[inline]
    pub fn bits_const<const N: u32>(&mut self) -> u64 {
        self.bits(N)
    }

    /// Fills `dest` with random bytes, drawing full engine words and taking
    /// their high-order bytes first.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        let word_bytes = (<E::Output as EngineWord>::BITS / 8) as usize;
        for chunk in dest.chunks_mut(word_bytes) {
            let draw = self.next().to_u64().to_be_bytes();
            let src = &draw[8 - word_bytes..];
            chunk.copy_from_slice(&src[..chunk.len()]);
        }
    }

    /// A uniform float in `[0, 1)` via the IEEE-754 mantissa-fill trick.
    ///
    /// See Iñigo Quilez, "sfrand": <https://iquilezles.org/articles/sfrand/>.
    /// Works with any engine width: a 32-bit engine simply draws twice to
    /// fill an f64 mantissa.
    #[inline]
    pub fn normalized<F: UnitFloat>(&mut self) -> F {
        F::from_mantissa(self.bits(F::MANTISSA_BITS))
    }

    /// A uniform float in `[-1, 1)`: `2 * normalized() - 1`.
    #[inline]
    pub fn signed_norm<F: UnitFloat>(&mut self) -> F {
        F::TWO * self.normalized::<F>() - F::ONE
    }

    /// An integer in `[lo, hi)`.
    ///
    /// An inverted or empty range is a contract violation: debug assertion,
    /// and `lo` is returned in release builds. The span must fit the
    /// engine's output range; prefer a 64-bit engine for ranges wider than
    /// 32 bits.
    pub fn between<I: RangeInt>(&mut self, lo: I, hi: I) -> I {
        debug_assert!(lo < hi, "between(lo, hi): inverted or empty range");
        if !(lo < hi) {
            return lo;
        }
        let bound = I::span(lo, hi);
        debug_assert!(
            bound <= <E::Output as EngineWord>::MAX.to_u64(),
            "between(lo, hi): range too large for this engine; use a 64-bit engine"
        );
        let delta = self.next_bounded(<E::Output as EngineWord>::from_u64(bound)).to_u64();
        I::offset(lo, delta)
    }

    /// A float in `[lo, hi)`: `lo + (hi - lo) * normalized()`.
    pub fn between_float<F: UnitFloat>(&mut self, lo: F, hi: F) -> F {
        debug_assert!(lo < hi, "between_float(lo, hi): inverted or empty range");
        lo + (hi - lo) * self.normalized::<F>()
    }

    /// A fair coin flip from the lowest bit of one draw.
    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.next().to_u64() & 1 == 1
    }

    /// A biased coin flip: true with probability `p`.
    ///
    /// `p <= 0` never returns true and `p >= 1` always does, because
    /// `normalized()` is a half-open `[0, 1)` interval.
    #[inline]
    pub fn coin_flip_with(&mut self, p: f64) -> bool {
        self.normalized::<f64>() < p
    }

    /// An approximate Gaussian sample with the given mean and standard
    /// deviation.
    ///
    /// Sums twelve independent `normalized()` draws: the Irwin-Hall
    /// distribution of that sum has mean 6 and variance 1, so shifting and
    /// scaling gives an N(mean, stddev) approximation. Twelve terms is a
    /// deliberate simplicity/accuracy tradeoff, not exact sampling; tails
    /// are clipped to roughly six standard deviations.
    pub fn gaussian<F: UnitFloat>(&mut self, mean: F, stddev: F) -> F {
        let mut sum = F::ZERO;
        for _ in 0..12 {
            sum = sum + self.normalized::<F>();
        }
        mean + (sum - F::SIX) * stddev
    }

    /// A uniform index into `collection`, in `[0, len)`.
    ///
    /// An empty collection is a contract violation (debug assertion; the
    /// release fallback returns 0, which callers must not use to index).
    pub fn index<T>(&mut self, collection: &[T]) -> usize {
        debug_assert!(!collection.is_empty(), "index(): empty collection");
        if collection.is_empty() {
            return 0;
        }
        self.between(0usize, collection.len())
    }

    /// A reference to a uniformly chosen element. Panics on an empty slice.
    pub fn choose<'a, T>(&mut self, collection: &'a [T]) -> &'a T {
        let idx = self.index(collection);
        &collection[idx]
    }

    /// A mutable reference to a uniformly chosen element. Panics on an
    /// empty slice.
    pub fn choose_mut<'a, T>(&mut self, collection: &'a mut [T]) -> &'a mut T {
        let idx = self.index(collection);
        &mut collection[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{Pcg32, SmallFast64, Xoshiro256SS};

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Random::<Xoshiro256SS>::from_seed(1234);
        let mut b = Random::<Xoshiro256SS>::from_seed(1234);
        for _ in 0..1000 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_next_bounded_stays_below_bound_64() {
        let mut rng = Random::<SmallFast64>::from_seed(42);
        for bound in [1u64, 2, 3, 10, 1000, u64::MAX] {
            for _ in 0..1000 {
                assert!(rng.next_bounded(bound) < bound, "bound {}", bound);
            }
        }
    }

    #[test]
    fn test_next_bounded_stays_below_bound_32() {
        let mut rng = Random::<Pcg32>::from_seed(42);
        for bound in [1u32, 2, 7, 100, u32::MAX] {
            for _ in 0..1000 {
                assert!(rng.next_bounded(bound) < bound, "bound {}", bound);
            }
        }
    }

    #[test]
    fn test_next_bounded_one_is_always_zero() {
        let mut rng = Random::<SmallFast64>::from_seed(7);
        for _ in 0..100 {
            assert_eq!(rng.next_bounded(1u64), 0);
        }
    }

    #[test]
    fn test_next_below_power_of_two_uses_exact_bits() {
        let mut rng = Random::<SmallFast64>::from_seed(11);
        for _ in 0..1000 {
            assert!(rng.next_below::<16>() < 16);
            assert!(rng.next_below::<1>() == 0);
            assert!(rng.next_below::<10>() < 10);
        }
    }

    #[test]
    fn test_bits_bounded_by_width() {
        let mut rng = Random::<SmallFast64>::from_seed(5);
        for n in 1..=63u32 {
            let v = rng.bits(n);
            assert!(v < (1u64 << n), "bits({}) = {:#x} out of range", n, v);
        }
        let _ = rng.bits(64); // full width: any u64 is valid
    }

    #[test]
    fn test_bits_concatenates_draws_beyond_engine_width() {
        // A 32-bit engine must be able to serve 52-bit requests.
        let mut rng = Random::<Pcg32>::from_seed(5);
        for _ in 0..1000 {
            let v = rng.bits(52);
            assert!(v < (1u64 << 52));
        }
        // 33 bits forces exactly two draws; check the packing is dense.
        let mut any_high_bit = false;
        for _ in 0..100 {
            if rng.bits(33) >> 32 != 0 {
                any_high_bit = true;
            }
        }
        assert!(any_high_bit, "high bits of multi-draw packing never set");
    }

    #[test]
    fn test_fill_bytes_covers_all_positions() {
        let mut rng = Random::<Pcg32>::from_seed(3);
        let mut buf = [0u8; 10];
        // With 100 fills, every position should be non-zero at least once.
        let mut seen = [false; 10];
        for _ in 0..100 {
            rng.fill_bytes(&mut buf);
            for (i, &b) in buf.iter().enumerate() {
                if b != 0 {
                    seen[i] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "some byte positions never filled");
    }

    #[test]
    fn test_normalized_is_half_open_unit_interval() {
        let mut rng = Random::<SmallFast64>::from_seed(9);
        for _ in 0..10000 {
            let x: f64 = rng.normalized();
            assert!((0.0..1.0).contains(&x) && x.is_finite());
            let y: f32 = rng.normalized();
            assert!((0.0..1.0).contains(&y) && y.is_finite());
        }
    }

    #[test]
    fn test_normalized_f64_from_32_bit_engine() {
        let mut rng = Random::<Pcg32>::from_seed(9);
        for _ in 0..10000 {
            let x: f64 = rng.normalized();
            assert!((0.0..1.0).contains(&x) && x.is_finite());
        }
    }

    #[test]
    fn test_signed_norm_interval() {
        let mut rng = Random::<SmallFast64>::from_seed(10);
        for _ in 0..10000 {
            let x: f64 = rng.signed_norm();
            assert!((-1.0..1.0).contains(&x) && x.is_finite());
        }
    }

    #[test]
    fn test_between_integers_in_range() {
        let mut rng = Random::<SmallFast64>::from_seed(20);
        for _ in 0..10000 {
            let v = rng.between(-50i32, 50);
            assert!((-50..50).contains(&v));
            let u = rng.between(10u8, 20);
            assert!((10..20).contains(&u));
        }
    }

    #[test]
    fn test_between_spans_negative_i64_range() {
        let mut rng = Random::<SmallFast64>::from_seed(21);
        for _ in 0..1000 {
            let v = rng.between(i64::MIN, i64::MAX);
            assert!(v < i64::MAX);
        }
    }

    #[test]
    fn test_between_single_value_range() {
        let mut rng = Random::<SmallFast64>::from_seed(22);
        for _ in 0..100 {
            assert_eq!(rng.between(5, 6), 5);
        }
    }

    #[test]
    fn test_between_float_in_range() {
        let mut rng = Random::<SmallFast64>::from_seed(23);
        for _ in 0..10000 {
            let v = rng.between_float(-2.5f64, 7.5);
            assert!((-2.5..7.5).contains(&v));
        }
    }

    #[test]
    fn test_coin_flip_with_degenerate_probabilities() {
        let mut rng = Random::<SmallFast64>::from_seed(24);
        for _ in 0..10000 {
            assert!(!rng.coin_flip_with(0.0), "p=0 must never be true");
            assert!(rng.coin_flip_with(1.0), "p=1 must never be false");
        }
    }

    #[test]
    fn test_coin_flip_is_roughly_fair() {
        let mut rng = Random::<SmallFast64>::from_seed(25);
        let heads = (0..10000).filter(|_| rng.coin_flip()).count();
        assert!((4000..6000).contains(&heads), "suspicious flip count: {}", heads);
    }

    #[test]
    fn test_gaussian_mean_and_spread() {
        let mut rng = Random::<SmallFast64>::from_seed(26);
        let samples: Vec<f64> = (0..10000).map(|_| rng.gaussian(100.0, 15.0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 100.0).abs() < 1.5, "mean drifted: {}", mean);
        // Irwin-Hall clips at six sigma from the mean.
        assert!(samples.iter().all(|&s| (10.0..190.0).contains(&s)));
    }

    #[test]
    fn test_index_and_choose() {
        let mut rng = Random::<SmallFast64>::from_seed(27);
        let items = [10, 20, 30, 40, 50];
        for _ in 0..1000 {
            let idx = rng.index(&items);
            assert!(idx < items.len());
            assert!(items.contains(rng.choose(&items)));
        }
    }

    #[test]
    fn test_choose_mut_allows_mutation() {
        let mut rng = Random::<SmallFast64>::from_seed(28);
        let mut items = [0u32; 8];
        for _ in 0..100 {
            *rng.choose_mut(&mut items) += 1;
        }
        assert_eq!(items.iter().sum::<u32>(), 100);
    }

    #[test]
    fn test_split_produces_independent_stream() {
        let mut rng = Random::<Xoshiro256SS>::from_seed(30);
        let mut forked = rng.split();
        let a: Vec<u64> = (0..16).map(|_| rng.next()).collect();
        let b: Vec<u64> = (0..16).map(|_| forked.next()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_discard_equals_stepping() {
        for n in [0u64, 1, 25, 10000] {
            let mut jumped = Random::<Pcg32>::from_seed(31);
            let mut stepped = Random::<Pcg32>::from_seed(31);
            jumped.discard(n);
            for _ in 0..n {
                stepped.next();
            }
            assert_eq!(jumped.next(), stepped.next(), "discard({}) diverged", n);
        }
    }

    #[test]
    fn test_facade_equality_tracks_engine_state() {
        let a = Random::<SmallFast64>::from_seed(1);
        let mut b = Random::<SmallFast64>::from_seed(1);
        assert_eq!(a, b);
        b.next();
        assert_ne!(a, b);
    }
}
