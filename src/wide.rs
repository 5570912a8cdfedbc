//! Double-width multiply and shift helpers for bounded generation.
//!
//! Lemire's multiplicative range reduction needs `floor(x * bound / 2^w)`,
//! which for 64-bit engines means the high half of a 128-bit product. The
//! helpers here build that product from four 32-bit partial products with
//! explicit carry propagation, then shift across the 128-bit boundary. The
//! unit tests cross-check every path against native `u128` arithmetic.

/// A 128-bit product split into two 64-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct U128Parts {
    pub lo: u64,
    pub hi: u64,
}

/// Computes the full 128-bit product of two 64-bit values.
///
/// Splits each operand into 32-bit limbs and combines the four partial
/// products. The middle-term sum can carry into bit 64, and the low-half
/// sum can carry into the high half; both carries are propagated explicitly.
pub(crate) const fn mul128_parts(a: u64, b: u64) -> U128Parts {
    const LO32_MASK: u64 = 0xFFFF_FFFF;
    // 32-bit limbs
    let a0 = a & LO32_MASK;
    let a1 = a >> 32;
    let b0 = b & LO32_MASK;
    let b1 = b >> 32;

    // partial products, each at most (2^32 - 1)^2 < 2^64
    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    // combine: p00 + (p01 + p10) << 32 + p11 << 64
    let mid = p01.wrapping_add(p10);
    let mid_carry = if mid < p01 { 1u64 << 32 } else { 0 };
    let mid_lo = (mid & LO32_MASK) << 32;
    let mid_hi = mid >> 32;

    let lo = p00.wrapping_add(mid_lo);
    let lo_carry = if lo < p00 { 1 } else { 0 };

    let hi = p11 + mid_hi + mid_carry + lo_carry;
    U128Parts { lo, hi }
}

/// Computes `(hi:lo) >> n` for `n` in `[1, 64]`, returning the low 64 bits
/// of the shifted 128-bit value.
///
/// `n == 64` is the common case for 64-bit engines and simply selects the
/// high half; smaller shifts stitch the two halves together.
pub(crate) const fn shr128(hi: u64, lo: u64, n: u32) -> u64 {
    debug_assert!(n >= 1 && n <= 64);
    if n == 64 {
        hi
    } else {
        (lo >> n) | (hi << (64 - n))
    }
}

/// Computes `floor(x * bound / 2^width)` for `width` in `[1, 64]`.
///
/// This is the multiply-high-bits kernel of Lemire's range reduction: for a
/// raw draw `x` uniform over `[0, 2^width)` and a `bound` below `2^width`,
/// the result is uniform-ish over `[0, bound)` without division or
/// rejection. See <https://lemire.me/blog/2016/06/27/a-fast-alternative-to-the-modulo-reduction/>.
pub(crate) const fn mul_shift(x: u64, bound: u64, width: u32) -> u64 {
    let p = mul128_parts(x, bound);
    shr128(p.hi, p.lo, width)
}
