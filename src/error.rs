//! Error types for the randbits library.

use thiserror::Error;

/// Errors produced when parsing a ULID from its string form.
///
/// Only parsing is fallible; generation and encoding always succeed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UlidError {
    /// The input is not exactly 26 characters long.
    #[error("ULID string must be exactly 26 characters, got {0}")]
    InvalidLength(usize),
    /// The input contains a character outside the Crockford Base32 set.
    #[error("invalid character {0:?} in ULID string")]
    InvalidCharacter(char),
    /// The string decodes to more than 128 bits. 26 Base32 characters carry
    /// 130 bits, so the top two bits of the first character must be zero;
    /// anything above `7ZZZZZZZZZZZZZZZZZZZZZZZZZ` is rejected.
    #[error("ULID string encodes a value larger than 128 bits")]
    NonCanonical,
}
