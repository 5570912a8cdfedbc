//! Fast deterministic random number engines, a value-generation facade,
//! and ULID identifiers.
//!
//! The crate is built in three layers:
//!
//! ```text
//! RandomBitEngine  (atomic unit — full-width word generator: seed/next/
//!                   discard/split; six interchangeable implementations)
//!     ↕ wrapped by
//! Random<E>        (facade — bounded integers, bit extraction, unit floats,
//!                   coin flips, Gaussian samples, slice picks)
//!     ↕ consumed by
//! UlidGenerator    (128-bit sortable identifiers: timestamp + randomness,
//!                   Crockford Base32, optional per-generator monotonicity)
//! ```
//!
//! Everything is deterministic from a seed and free of global state, which
//! makes streams reproducible and testable; the [`seed`] module provides
//! runtime entropy for when reproducibility is not wanted.
//!
//! # Examples
//!
//! Generate values through the facade:
//!
//! ```
//! use randbits::{engines::SmallFast64, Random};
//!
//! let mut rng = Random::<SmallFast64>::from_seed(0xC0FFEE);
//! let die = rng.between(1, 7);
//! assert!((1..7).contains(&die));
//! let chance: f64 = rng.normalized();
//! assert!((0.0..1.0).contains(&chance));
//! let pick: u32 = *rng.choose(&[2, 4, 8, 16]);
//! assert!(pick.is_power_of_two());
//! ```
//!
//! Generate and parse ULIDs:
//!
//! ```
//! use randbits::{Ulid, UlidGenerator};
//!
//! let mut ids = UlidGenerator::new();
//! let a = ids.generate_monotonic();
//! let b = ids.generate_monotonic();
//! assert!(a < b);
//!
//! let parsed: Ulid = a.to_string().parse().unwrap();
//! assert_eq!(parsed, a);
//! ```

#![deny(clippy::all)]

pub mod engines;
pub mod error;
pub mod seed;

mod engine;
mod random;
mod ulid;
pub(crate) mod wide;

pub use engine::{EngineWord, RandomBitEngine};
pub use error::UlidError;
pub use random::{Random, RangeInt, UnitFloat};
pub use ulid::{Ulid, UlidGenerator};
