//! Property-based tests for launch schedule invariants

use launchplan::schedule::LaunchScheduler;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Offsets start at zero, never decrease and end exactly on the window
#[test]
fn test_schedule_spans_window_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(1usize..300, 0u64..500_000, 0u64..1_000, any::<u64>()),
            |(accounts, window, floor, seed)| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let schedule = LaunchScheduler::new(floor)
                    .schedule(accounts, window, &mut rng)
                    .unwrap();
                let offsets = schedule.offsets();

                prop_assert_eq!(offsets.len(), accounts);
                prop_assert_eq!(offsets[0], 0);
                prop_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
                if accounts > 1 {
                    prop_assert_eq!(offsets[accounts - 1], window);
                }
                prop_assert_eq!(schedule.increments().iter().sum::<u64>(), offsets[accounts - 1]);
                Ok(())
            },
        )
        .unwrap();
}

/// The floor is honored whenever the window leaves room for it
#[test]
fn test_sparse_schedule_keeps_floor_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(3usize..20, any::<u64>()),
            |(accounts, seed)| {
                let floor = 300;
                // Every slot but the last can take at least the floor
                let window = floor * (accounts as u64) * 4;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let schedule = LaunchScheduler::new(floor)
                    .schedule(accounts, window, &mut rng)
                    .unwrap();
                let increments = schedule.increments();
                let slots = &increments[1..accounts - 1];
                prop_assert!(slots.iter().all(|&gap| gap >= floor));
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    #[test]
    fn schedule_is_a_function_of_seed(accounts in 1usize..50, window in 0u64..100_000, seed in any::<u64>()) {
        let scheduler = LaunchScheduler::default();
        let a = scheduler.schedule(accounts, window, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let b = scheduler.schedule(accounts, window, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
