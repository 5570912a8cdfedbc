//! Concrete random-bit engine implementations.
//!
//! Every engine here satisfies the [`RandomBitEngine`](crate::RandomBitEngine)
//! contract: full-width, zero-based unsigned output, deterministic seeding,
//! fast-forward, and stream splitting. They differ in output width, state
//! size, speed, and statistical pedigree; all are non-cryptographic.

mod konadare192;
mod pcg32;
mod romuduojr;
mod small_fast32;
mod small_fast64;
mod xoshiro256ss;

pub use konadare192::Konadare192;
pub use pcg32::Pcg32;
pub use romuduojr::RomuDuoJr;
pub use small_fast32::SmallFast32;
pub use small_fast64::SmallFast64;
pub use xoshiro256ss::Xoshiro256SS;
