//! Property-based tests for task plan selection

use launchplan::category::{Candidate, CategoryPool, RuleSpec};
use launchplan::config::LaunchConfig;
use launchplan::plan::{CategoryRole, PlanLayout, TaskPlanGenerator};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn pool(size: usize, disabled: usize, min: i64, max: i64) -> CategoryPool {
    let candidates = (0..size)
        .map(|i| {
            let action = format!("action_{}", i);
            if i < disabled {
                Candidate::disabled(action)
            } else {
                Candidate::enabled(action)
            }
        })
        .collect();
    CategoryPool::new("SAMPLED", candidates, &RuleSpec::RangeSample { min, max }).unwrap()
}

/// RangeSample picks a duplicate-free subset whose size respects the clamped bounds
#[test]
fn test_range_sample_bounds_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(0usize..12, 0usize..4, 0i64..10, 0i64..10, any::<u64>()),
            |(size, disabled, a, b, seed)| {
                let (min, max) = if a <= b { (a, b) } else { (b, a) };
                let pool = pool(size, disabled, min, max);
                let enabled: HashSet<String> =
                    pool.enabled_actions().into_iter().cloned().collect();
                let live = enabled.len();

                let layout = PlanLayout::new().with(CategoryRole::Body, pool).unwrap();
                let generator = TaskPlanGenerator::new(layout);
                let plan = generator.generate(&mut ChaCha8Rng::seed_from_u64(seed));

                let picked = plan.body();
                let unique: HashSet<&String> = picked.iter().collect();
                prop_assert_eq!(unique.len(), picked.len());
                prop_assert!(picked.iter().all(|action| enabled.contains(action)));

                let upper = (max as usize).min(live);
                let lower = (min as usize).min(upper);
                prop_assert!(picked.len() >= lower && picked.len() <= upper);
                Ok(())
            },
        )
        .unwrap();
}

/// With the built-in layout the head is fixed and the terminal action is last
#[test]
fn test_default_layout_shape_property() {
    let generator = LaunchConfig::default().generator().unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<u64>(), |seed| {
            let plan = generator.generate(&mut ChaCha8Rng::seed_from_u64(seed));

            prop_assert_eq!(plan.head(), ["faucet".to_string()]);
            prop_assert_eq!(plan.actions().last().map(String::as_str), Some("logs"));
            prop_assert!(plan.body().contains(&"frontrunner".to_string()));
            // 1-3 swaps, 1-3 stakes, 2-4 mints, one game, at most one other
            prop_assert!(plan.body().len() >= 5 && plan.body().len() <= 12);

            let tail: Vec<&str> = plan.tail().iter().map(String::as_str).collect();
            prop_assert!(
                tail == ["logs"] || tail == ["collect_all_to_monad", "logs"],
                "unexpected tail {:?}",
                tail
            );

            let unique: HashSet<&String> = plan.actions().iter().collect();
            prop_assert_eq!(unique.len(), plan.len());
            Ok(())
        })
        .unwrap();
}

proptest! {
    #[test]
    fn certain_and_impossible_probabilities(seed in any::<u64>(), size in 1usize..6) {
        let actions: Vec<String> = (0..size).map(|i| format!("other_{}", i)).collect();
        let always = CategoryPool::probability_single("ALWAYS", actions.clone(), 100.0).unwrap();
        let never = CategoryPool::probability_single("NEVER", actions, 0.0).unwrap();
        let layout = PlanLayout::new()
            .with(CategoryRole::Body, always)
            .unwrap()
            .with(CategoryRole::Body, never)
            .unwrap();

        let plan = TaskPlanGenerator::new(layout).generate(&mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(plan.len(), 1);
        prop_assert!(plan.actions()[0].starts_with("other_"));
    }
}
