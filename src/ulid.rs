//! ULID: Universally Unique Lexicographically Sortable Identifier.
//!
//! A ULID is a 128-bit identifier laid out as
//!
//!   - 48 bits: millisecond timestamp since the Unix epoch (big-endian)
//!   - 80 bits: randomness
//!
//! Encoded in Crockford Base32 it becomes a 26-character string whose
//! lexicographic order matches its timestamp order, which makes ULIDs
//! useful as human-friendly, time-orderable keys for logs, databases and
//! filenames. Format reference: <https://github.com/ulid/spec>.
//!
//! [`Ulid`] is the identifier value; [`UlidGenerator`] owns the random
//! engine and the monotonic state. Generators are plain values with no
//! global or thread-local state: give each thread its own generator, and
//! monotonicity holds within a generator only.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::engine::RandomBitEngine;
use crate::engines::RomuDuoJr;
use crate::error::UlidError;
use crate::random::Random;
use crate::seed;

/// Crockford Base32 alphabet: digits then letters, skipping I, L, O and U
/// to avoid misreading.
const ENCODING: [u8; 32] = *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const TIMESTAMP_BYTES: usize = 6;
const RANDOM_BYTES: usize = 10;
const ENCODED_LEN: usize = 26;

/// A 128-bit ULID value.
///
/// Stored big-endian, so the derived `Ord` sorts identifiers the same way
/// their string encodings sort: by timestamp first, randomness second.
///
/// # Examples
///
/// ```
/// use randbits::Ulid;
///
/// let id: Ulid = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse().unwrap();
/// assert_eq!(id.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ulid([u8; 16]);

impl Ulid {
    /// Builds a ULID from its raw big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Ulid(bytes)
    }

    /// Builds a ULID from a millisecond timestamp and 10 random bytes.
    ///
    /// Only the low 48 bits of `timestamp_ms` are representable; higher
    /// bits are discarded (that limit is not reached until the year 10889).
    pub const fn from_parts(timestamp_ms: u64, randomness: [u8; RANDOM_BYTES]) -> Self {
        let mut data = [0u8; 16];
        let ts = timestamp_ms.to_be_bytes();
        let mut i = 0;
        while i < TIMESTAMP_BYTES {
            data[i] = ts[2 + i]; // low 48 bits of the big-endian u64
            i += 1;
        }
        let mut j = 0;
        while j < RANDOM_BYTES {
            data[TIMESTAMP_BYTES + j] = randomness[j];
            j += 1;
        }
        Ulid(data)
    }

    /// The raw big-endian bytes.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// The millisecond timestamp component.
    pub const fn timestamp_ms(self) -> u64 {
        let mut ts = 0u64;
        let mut i = 0;
        while i < TIMESTAMP_BYTES {
            ts = (ts << 8) | self.0[i] as u64;
            i += 1;
        }
        ts
    }

    /// The 80-bit randomness component.
    pub const fn randomness(self) -> [u8; RANDOM_BYTES] {
        let mut out = [0u8; RANDOM_BYTES];
        let mut i = 0;
        while i < RANDOM_BYTES {
            out[i] = self.0[TIMESTAMP_BYTES + i];
            i += 1;
        }
        out
    }
}

/// Reads the 5 bits whose lowest bit sits at `bitpos` (bit 0 is the least
/// significant bit of the last byte). A group may straddle a byte boundary,
/// so two adjacent bytes are fetched and shifted together.
const fn extract_5bits(bytes: &[u8; 16], bitpos: u32) -> u32 {
    let hi = bitpos + 4;
    if hi > 127 {
        // the first character's group extends past bit 127; the two pad
        // bits above read as zero
        return (bytes[0] >> 5) as u32;
    }
    let top_offset = 127 - hi;
    let byte_index = (top_offset >> 3) as usize;
    let start_bit = top_offset & 7;
    let first = bytes[byte_index] as u32;
    let second = if byte_index + 1 < 16 { bytes[byte_index + 1] as u32 } else { 0 };
    (((first << 8) | second) >> (11 - start_bit)) & 0x1F
}

/// Maps a Crockford Base32 character to its value. Case-insensitive, with
/// the standard decoding aliases: O/o read as 0, I/i/L/l read as 1. U is
/// excluded from the alphabet entirely.
const fn decode_crockford(c: u8) -> Option<u8> {
    Some(match c {
        b'0' | b'O' | b'o' => 0,
        b'1' | b'I' | b'i' | b'L' | b'l' => 1,
        b'2'..=b'9' => c - b'0',
        b'A'..=b'H' => c - b'A' + 10,
        b'a'..=b'h' => c - b'a' + 10,
        b'J' | b'j' => 18,
        b'K' | b'k' => 19,
        b'M' | b'm' => 20,
        b'N' | b'n' => 21,
        b'P'..=b'T' => c - b'P' + 22,
        b'p'..=b't' => c - b'p' + 22,
        b'V'..=b'Z' => c - b'V' + 27,
        b'v'..=b'z' => c - b'v' + 27,
        _ => return None,
    })
}

impl fmt::Display for Ulid {
    /// Canonical 26-character Crockford Base32 encoding (always uppercase).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [0u8; ENCODED_LEN];
        // 26 * 5 = 130 bits, scanned top-down in 5-bit groups.
        let mut bitpos = 130u32;
        for slot in out.iter_mut() {
            bitpos -= 5;
            *slot = ENCODING[extract_5bits(&self.0, bitpos) as usize];
        }
        // the encoding table is pure ASCII
        f.write_str(std::str::from_utf8(&out).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Ulid {
    type Err = UlidError;

    /// Parses a 26-character Crockford Base32 string.
    ///
    /// Accepts lowercase and the decoding aliases (O→0, I/L→1), but
    /// rejects any string whose value exceeds 128 bits: 26 characters
    /// carry 130 bits, so the first character must be `0`–`7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ENCODED_LEN {
            return Err(UlidError::InvalidLength(s.len()));
        }
        // 192-bit accumulator; acc[0] holds the least significant limb.
        let mut acc = [0u64; 3];
        for (i, &b) in s.as_bytes().iter().enumerate() {
            let v = decode_crockford(b).ok_or_else(|| {
                UlidError::InvalidCharacter(s[i..].chars().next().unwrap_or('\u{FFFD}'))
            })?;
            let mut carry = v as u64;
            for limb in acc.iter_mut() {
                let new_carry = *limb >> (64 - 5);
                *limb = (*limb << 5) | carry;
                carry = new_carry;
            }
        }
        // Canonicality: bits 128 and 129 of the 130-bit value must be zero.
        if acc[2] & 0x3 != 0 {
            return Err(UlidError::NonCanonical);
        }
        let mut data = [0u8; 16];
        data[..8].copy_from_slice(&acc[1].to_be_bytes());
        data[8..].copy_from_slice(&acc[0].to_be_bytes());
        Ok(Ulid(data))
    }
}

/// Increments the 10-byte big-endian randomness field by one, wrapping
/// silently from all-ones to all-zeros. The wrap breaks monotonicity
/// within that millisecond, which would take 2^80 IDs to hit.
fn increment_big_endian(rand: &mut [u8; RANDOM_BYTES]) {
    for byte in rand.iter_mut().rev() {
        if *byte != 0xFF {
            *byte += 1;
            return;
        }
        *byte = 0;
    }
}

fn now_ms() -> u64 {
    // A clock before the Unix epoch reads as 0 rather than failing.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A ULID source owning its random engine and monotonic state.
///
/// [`generate`](Self::generate) draws fresh randomness every call and is
/// time-ordered only at millisecond granularity;
/// [`generate_monotonic`](Self::generate_monotonic) additionally guarantees
/// strictly increasing IDs from this generator, even within one millisecond
/// or when the system clock steps backwards.
///
/// There is no locking and no cross-generator coordination. For use from
/// several threads, construct one generator per thread.
#[derive(Debug, Clone)]
pub struct UlidGenerator<E: RandomBitEngine = RomuDuoJr> {
    rng: Random<E>,
    last_ts: u64,
    last_rand: [u8; RANDOM_BYTES],
    have_last: bool,
}

impl UlidGenerator {
    /// A generator over a [`RomuDuoJr`] engine seeded from every available
    /// runtime entropy source.
    pub fn new() -> Self {
        UlidGenerator::from_seed(seed::from_all())
    }
}

impl Default for UlidGenerator {
    fn default() -> Self {
        UlidGenerator::new()
    }
}

impl<E: RandomBitEngine> UlidGenerator<E> {
    /// A deterministic generator, for reproducible ID streams in tests.
    pub fn from_seed(seed: u64) -> Self {
        UlidGenerator::with_engine(E::from_seed(seed))
    }

    /// Wraps an existing engine.
    pub fn with_engine(engine: E) -> Self {
        UlidGenerator {
            rng: Random::new(engine),
            last_ts: 0,
            last_rand: [0; RANDOM_BYTES],
            have_last: false,
        }
    }

    /// A ULID stamped with the current time and fresh randomness.
    pub fn generate(&mut self) -> Ulid {
        self.generate_at(now_ms())
    }

    /// A strictly increasing ULID stamped with the current time.
    pub fn generate_monotonic(&mut self) -> Ulid {
        self.generate_monotonic_at(now_ms())
    }

    /// [`generate`](Self::generate) with an explicit timestamp.
    pub fn generate_at(&mut self, timestamp_ms: u64) -> Ulid {
        let mut randomness = [0u8; RANDOM_BYTES];
        self.rng.fill_bytes(&mut randomness);
        Ulid::from_parts(timestamp_ms, randomness)
    }

    /// [`generate_monotonic`](Self::generate_monotonic) with an explicit
    /// timestamp.
    ///
    /// A later timestamp draws fresh randomness; the same timestamp (or an
    /// earlier one, if the clock stepped back) pins the timestamp to the
    /// last one issued and increments the previous randomness instead.
    pub fn generate_monotonic_at(&mut self, timestamp_ms: u64) -> Ulid {
        let ts = if !self.have_last || timestamp_ms > self.last_ts {
            self.last_ts = timestamp_ms;
            self.rng.fill_bytes(&mut self.last_rand);
            self.have_last = true;
            timestamp_ms
        } else {
            increment_big_endian(&mut self.last_rand);
            self.last_ts
        };
        Ulid::from_parts(ts, self.last_rand)
    }
}
