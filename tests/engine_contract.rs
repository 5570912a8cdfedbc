//! Contract tests applied uniformly to every engine.
//!
//! Each engine gets the same battery: deterministic seeding, reset and
//! reseed equivalence, discard/step equivalence, split decorrelation, and
//! full-width output. A new engine only has to be added to the macro list
//! at the bottom to inherit the whole battery.

use randbits::engines::{Konadare192, Pcg32, RomuDuoJr, SmallFast32, SmallFast64, Xoshiro256SS};
use randbits::{EngineWord, RandomBitEngine};

fn draws<E: RandomBitEngine>(engine: &mut E, n: usize) -> Vec<u64> {
    (0..n).map(|_| engine.next().to_u64()).collect()
}

fn check_deterministic_seeding<E: RandomBitEngine>() {
    for seed in [0u64, 1, 42, u64::MAX] {
        let mut a = E::from_seed(seed);
        let mut b = E::from_seed(seed);
        assert_eq!(draws(&mut a, 256), draws(&mut b, 256), "seed {} diverged", seed);
    }
}

fn check_distinct_seeds_distinct_streams<E: RandomBitEngine>() {
    let mut a = E::from_seed(1);
    let mut b = E::from_seed(2);
    assert_ne!(draws(&mut a, 64), draws(&mut b, 64));
}

fn check_reseed_equals_fresh<E: RandomBitEngine>() {
    let mut used = E::from_seed(7);
    used.discard(100);
    used.seed(99);
    let mut fresh = E::from_seed(99);
    assert_eq!(draws(&mut used, 64), draws(&mut fresh, 64));
}

fn check_reset_restores_default<E: RandomBitEngine>() {
    let mut engine = E::from_seed(1234);
    engine.discard(57);
    engine.reset();
    assert_eq!(engine, E::default());
}

fn check_discard_matches_stepping<E: RandomBitEngine>() {
    for n in [0u64, 1, 2, 63, 1000] {
        let mut jumped = E::from_seed(5);
        let mut stepped = E::from_seed(5);
        jumped.discard(n);
        for _ in 0..n {
            stepped.next();
        }
        assert_eq!(jumped.next(), stepped.next(), "discard({}) diverged", n);
    }
}

fn check_split_decorrelates<E: RandomBitEngine>() {
    let mut parent = E::from_seed(11);
    let pristine = parent.clone();
    let mut child = parent.split();
    assert_ne!(parent, pristine, "split must consume parent state");
    let parent_seq = draws(&mut parent, 64);
    let child_seq = draws(&mut child, 64);
    assert_ne!(parent_seq, child_seq);
    let matches = parent_seq
        .iter()
        .zip(&child_seq)
        .filter(|(a, b)| a == b)
        .count();
    assert!(matches < 4, "parent and child look correlated: {} matches", matches);
}

fn check_split_is_deterministic<E: RandomBitEngine>() {
    let mut a = E::from_seed(13);
    let mut b = E::from_seed(13);
    assert_eq!(a.split(), b.split());
    assert_eq!(a, b);
}

fn check_output_range_constants<E: RandomBitEngine>() {
    assert_eq!(E::min().to_u64(), 0);
    let width = <E::Output as EngineWord>::BITS;
    let expected_max = if width == 64 { u64::MAX } else { (1u64 << width) - 1 };
    assert_eq!(E::max().to_u64(), expected_max);
}

fn check_output_exercises_full_width<E: RandomBitEngine>() {
    // Over 512 draws every bit position should show both values.
    let mut engine = E::from_seed(17);
    let mut ones = 0u64;
    let mut zeros = 0u64;
    for _ in 0..512 {
        let draw = engine.next().to_u64();
        ones |= draw;
        zeros |= !draw;
    }
    let full = E::max().to_u64();
    assert_eq!(ones & full, full, "some bit was never 1");
    assert_eq!(zeros & full, full, "some bit was never 0");
}

macro_rules! engine_contract_tests {
    ($($module:ident => $engine:ty),* $(,)?) => {$(
        mod $module {
            use super::*;

            #[test]
            fn deterministic_seeding() {
                check_deterministic_seeding::<$engine>();
            }

            #[test]
            fn distinct_seeds_distinct_streams() {
                check_distinct_seeds_distinct_streams::<$engine>();
            }

            #[test]
            fn reseed_equals_fresh() {
                check_reseed_equals_fresh::<$engine>();
            }

            #[test]
            fn reset_restores_default() {
                check_reset_restores_default::<$engine>();
            }

            #[test]
            fn discard_matches_stepping() {
                check_discard_matches_stepping::<$engine>();
            }

            #[test]
            fn split_decorrelates() {
                check_split_decorrelates::<$engine>();
            }

            #[test]
            fn split_is_deterministic() {
                check_split_is_deterministic::<$engine>();
            }

            #[test]
            fn output_range_constants() {
                check_output_range_constants::<$engine>();
            }

            #[test]
            fn output_exercises_full_width() {
                check_output_exercises_full_width::<$engine>();
            }
        }
    )*};
}

engine_contract_tests!(
    pcg32 => Pcg32,
    small_fast32 => SmallFast32,
    small_fast64 => SmallFast64,
    romuduojr => RomuDuoJr,
    konadare192 => Konadare192,
    xoshiro256ss => Xoshiro256SS,
);
