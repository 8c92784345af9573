mod common;

use common::{healthy_client, workout};
use otf_parity_canonical::{CanonicalValue, ProbeName};
use otf_parity_harness::{
    filter_by_calories, FixedClock, Harness, HarnessConfig, Probe, ProbeError, ProbeSuccess,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn calorie_filter_partitions_records(
        calories in prop::collection::vec(prop::option::of(0i64..400), 0..24)
    ) {
        let workouts: Vec<_> = calories
            .iter()
            .enumerate()
            .map(|(i, c)| workout(&format!("w-{}", i), *c, None))
            .collect();
        let original = workouts.len();
        let (kept, dropped) = filter_by_calories(workouts, 100);

        prop_assert_eq!(kept.len() + dropped, original);
        for w in &kept {
            prop_assert!(w.calories_burned.map_or(true, |c| c >= 100));
        }
        let expected_kept: Vec<String> = calories
            .iter()
            .enumerate()
            .filter(|(_, c)| c.map_or(true, |c| c >= 100))
            .map(|(i, _)| format!("w-{}", i))
            .collect();
        let kept_ids: Vec<String> = kept.iter().map(|w| w.class_history_uuid.clone()).collect();
        prop_assert_eq!(kept_ids, expected_kept);
    }

    #[test]
    fn every_probe_runs_and_exit_code_tracks_failures(
        plan in prop::collection::vec(0u8..3, 1..12)
    ) {
        let probes: Vec<Probe> = plan
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let kind = *kind;
                Probe::new(
                    ProbeName::parse(format!("probe_{}", i)).unwrap(),
                    format!("Probe {} failed", i),
                    move |_| match kind {
                        0 => Ok(ProbeSuccess::new(CanonicalValue::from(i))),
                        1 => Err(ProbeError::raised("boom")),
                        _ => Err(ProbeError::no_data("nothing")),
                    },
                )
            })
            .collect();
        let report = Harness::new(Box::new(healthy_client()), HarnessConfig::default())
            .with_clock(FixedClock(common::now()))
            .run(&probes)
            .unwrap();

        let failed = plan.iter().filter(|k| **k != 0).count();
        let raised = plan.iter().filter(|k| **k == 1).count();
        prop_assert_eq!(report.tests().count(), plan.len());
        prop_assert_eq!(report.summary().failed, failed);
        prop_assert_eq!(report.errors().len(), raised);
        prop_assert_eq!(failed == 0, report.status().exit_code() == 0);

        for ((name, outcome), kind) in report.tests().zip(plan.iter()) {
            prop_assert_eq!(outcome.is_success(), *kind == 0, "{}", name);
        }
    }
}
