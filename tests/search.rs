//! End-to-end Tabu Search runs on small hand-checked instances.

use std::time::Duration;

use scqbf_tabu::construct::{Construction, GreedyCoverage, GreedyObjective, RandomCoverage};
use scqbf_tabu::tabu::{run_seeds, NoMovePolicy, StopReason, TabuConfig, TabuRunner};
use scqbf_tabu::{Evaluator, Instance, ScQbfError, Solution};

const SCENARIO: &str = "3\n2 2 1\n1 2\n2 3\n3\n2 1 0\n3 1\n5\n";

fn scenario() -> Instance<i64> {
    SCENARIO.parse().unwrap()
}

/// `n` items over `n` elements: item `i` covers `{i, i+1 mod n}`, diagonal
/// rewards and mixed-sign pair terms.
fn ring(n: usize) -> Instance<i64> {
    let coverage = (0..n).map(|i| vec![i, (i + 1) % n]).collect();
    let matrix = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        2 + (i % 3) as i64
                    } else if (i + j) % 4 == 0 {
                        3
                    } else {
                        -((i * j) as i64 % 5)
                    }
                })
                .collect()
        })
        .collect();
    Instance::new(n, coverage, matrix).unwrap()
}

#[test]
fn test_scenario_evaluation() {
    let inst = scenario();
    let ev = Evaluator::new(&inst);
    let sol = Solution::from_items(&inst, &[0, 1]).unwrap();

    assert_eq!(ev.evaluate_objfun(&sol), 6);
    assert!((ev.evaluate_coverage(&sol) - 1.0).abs() < 1e-12);
    assert!(ev.is_solution_valid(&sol));
    assert_eq!(ev.evaluate_insertion_delta(&sol, 2).unwrap(), 6);
    assert_eq!(ev.evaluate_objfun_items(&[0, 1, 2]), 12);
    assert_eq!(ev.evaluate_removal_delta(&sol, 1).unwrap(), -4);
}

#[test]
fn test_scenario_search_finds_optimum() {
    let inst = scenario();
    let config = TabuConfig::default().with_max_iterations(50).with_tenure(2);

    for result in [
        TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap(),
        TabuRunner::run(&inst, &GreedyObjective, &config).unwrap(),
        TabuRunner::run(&inst, &RandomCoverage::new(9), &config).unwrap(),
    ] {
        assert_eq!(result.best_objective, 12);
        assert_eq!(result.best.to_vec(), vec![0, 1, 2]);
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
    }
}

#[test]
fn test_iteration_cap_is_respected() {
    let inst = ring(14);
    for k in [1, 7, 40] {
        let config = TabuConfig::default().with_max_iterations(k).with_tenure(3);
        let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
        assert_eq!(result.iterations, k);
        assert_eq!(result.objective_history.len(), k);
        assert!(result.best_iteration <= k);
    }
}

#[test]
fn test_patience_bounds_trailing_iterations() {
    let inst = ring(16);
    let config = TabuConfig::default()
        .with_max_iterations(10_000)
        .with_patience(25)
        .with_tenure(4);
    let result = TabuRunner::run(&inst, &RandomCoverage::new(1), &config).unwrap();

    assert_eq!(result.stop_reason, StopReason::PatienceExceeded);
    assert!(
        result.iterations - result.best_iteration <= 25,
        "ran {} iterations past the last improvement",
        result.iterations - result.best_iteration
    );
}

#[test]
fn test_best_is_monotone_valid_and_exact() {
    let inst = ring(20);
    let ev = Evaluator::new(&inst);
    let config = TabuConfig::default().with_max_iterations(300).with_tenure(5);
    let initial = GreedyObjective.construct(&inst).unwrap();
    let result = TabuRunner::run(&inst, &GreedyObjective, &config).unwrap();

    assert!(result.best_objective >= initial.objective());
    assert!(ev.is_solution_valid(&result.best));
    assert_eq!(ev.evaluate_objfun(&result.best), result.best_objective);
    assert!(result
        .objective_history
        .windows(2)
        .all(|w| w[0] <= w[1]));
    assert_eq!(result.objective_history.last(), Some(&result.best_objective));
}

#[test]
fn test_without_aspiration_still_valid() {
    let inst = ring(12);
    let config = TabuConfig::default()
        .with_max_iterations(200)
        .with_tenure(6)
        .with_aspiration(false);
    let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
    assert!(Evaluator::new(&inst).is_solution_valid(&result.best));
}

#[test]
fn test_float_coefficients() {
    let text = "3\n2 2 1\n1 2\n2 3\n3\n2.5 1 0\n3 -0.5\n5\n";
    let inst: Instance<f64> = text.parse().unwrap();
    let config = TabuConfig::default().with_max_iterations(30).with_tenure(2);
    let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
    // {0, 1, 2} = 2.5 + 1 + 3 - 0.5 + 5
    assert!((result.best_objective - 11.0).abs() < 1e-9);
}

#[test]
fn test_time_limit_only() {
    let inst = ring(30);
    let config = TabuConfig::default()
        .unbounded_iterations()
        .with_time_limit_secs(0.05);
    let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
    assert_eq!(result.stop_reason, StopReason::TimeLimit);
    assert!(result.elapsed >= Duration::from_millis(50));
}

#[test]
fn test_stop_policy_ends_stuck_search() {
    // every item is required: no removal or exchange keeps the cover
    let inst = Instance::new(
        3,
        vec![vec![0], vec![1], vec![2]],
        vec![vec![1, 1, 1], vec![0, 1, 1], vec![0, 0, 1]],
    )
    .unwrap();
    let config = TabuConfig::default().with_no_move_policy(NoMovePolicy::Stop);
    let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
    assert_eq!(result.stop_reason, StopReason::NoAdmissibleMove);
    assert_eq!(result.best.to_vec(), vec![0, 1, 2]);
    assert_eq!(result.best_objective, 6);
}

#[test]
fn test_rejects_unbounded_config() {
    let inst = scenario();
    let config = TabuConfig::default().unbounded_iterations();
    assert!(matches!(
        TabuRunner::run(&inst, &GreedyCoverage, &config),
        Err(ScQbfError::InvalidConfig(_))
    ));
}

#[test]
fn test_rejects_uncoverable_instance() {
    let inst = Instance::new(3, vec![vec![0, 1], vec![1]], vec![vec![1, 0], vec![0, 1]]).unwrap();
    match TabuRunner::run(&inst, &GreedyCoverage, &TabuConfig::default()) {
        Err(ScQbfError::InfeasibleInstance(e)) => assert_eq!(e.uncovered(), &[2]),
        other => panic!("expected an infeasible instance error, got {other:?}"),
    }
}

#[test]
fn test_multistart_beats_or_matches_each_seed() {
    let inst = ring(18);
    let config = TabuConfig::default().with_max_iterations(80).with_tenure(4);
    let seeds = [1, 2, 3, 4];
    let (seed, best) = run_seeds(&inst, &config, &seeds).unwrap();
    assert!(seeds.contains(&seed));

    let single = TabuRunner::run(&inst, &RandomCoverage::new(seed), &config).unwrap();
    assert_eq!(single.best_objective, best.best_objective);
}
