//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build a feasible initial solution with the supplied [`Construction`]
//! 2. At each iteration:
//!    a. Score every insertion, every coverage-preserving removal and every
//!       coverage-preserving exchange with an exact delta
//!    b. Select the best non-tabu move (or tabu move satisfying aspiration)
//!    c. Apply it and forbid its reverse for `tenure` iterations
//!    d. Update the best solution if the current one beats it
//! 3. Terminate on the iteration cap, the time limit or exhausted patience
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::{Duration, Instant};

use log::{debug, info, trace};

use super::config::{NoMovePolicy, TabuConfig};
use super::types::{Candidate, Move, TabuList};
use crate::coefficient::Coefficient;
use crate::construct::{ensure_coverable, Construction};
use crate::error::{PreconditionError, ScQbfError};
use crate::evaluator::{CoverageCounter, Evaluator};
use crate::instance::Instance;
use crate::solution::Solution;

/// Purge expired tabu entries this often.
const PURGE_INTERVAL: usize = 256;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    MaxIterations,
    TimeLimit,
    PatienceExceeded,
    /// No admissible move under [`NoMovePolicy::Stop`].
    NoAdmissibleMove,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TabuResult<T: Coefficient> {
    /// Best solution found.
    pub best: Solution<T>,
    /// Objective of the best solution.
    pub best_objective: T,
    /// Fraction of the universe covered by `best` (1.0 for any valid run).
    pub coverage: f64,
    /// Total iterations executed, idle ones included.
    pub iterations: usize,
    /// Iteration after which the best solution was found (0 = initial).
    pub best_iteration: usize,
    pub stop_reason: StopReason,
    /// Wall time spent in the search loop.
    pub elapsed: Duration,
    /// Best objective after each iteration.
    pub objective_history: Vec<T>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search on `instance` from the solution built by
    /// `construction`.
    ///
    /// # Errors
    ///
    /// - [`ScQbfError::InvalidConfig`] if `config` fails validation,
    /// - [`ScQbfError::InfeasibleInstance`] if some element has no cover,
    /// - [`ScQbfError::SolutionSizeMismatch`] if the construction returns a
    ///   solution over a different item count,
    /// - [`ScQbfError::InvalidInitialSolution`] if the construction returns
    ///   a solution that leaves elements uncovered.
    ///
    /// Hitting a limit is not an error: the best solution found so far is
    /// always returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use scqbf_tabu::construct::GreedyCoverage;
    /// use scqbf_tabu::tabu::{TabuConfig, TabuRunner};
    /// use scqbf_tabu::Instance;
    ///
    /// let inst = Instance::new(
    ///     3,
    ///     vec![vec![0, 1], vec![1, 2], vec![2]],
    ///     vec![vec![2, 1, 0], vec![0, 3, 1], vec![0, 0, 5]],
    /// )
    /// .unwrap();
    /// let config = TabuConfig::default().with_max_iterations(20).with_tenure(2);
    /// let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
    /// assert_eq!(result.best_objective, 12);
    /// ```
    pub fn run<T, C>(
        instance: &Instance<T>,
        construction: &C,
        config: &TabuConfig,
    ) -> Result<TabuResult<T>, ScQbfError>
    where
        T: Coefficient,
        C: Construction<T> + ?Sized,
    {
        config.validate().map_err(ScQbfError::InvalidConfig)?;
        ensure_coverable(instance)?;

        let evaluator = Evaluator::new(instance);
        let mut current = construction.construct(instance)?;
        if current.n_items() != instance.n_items() {
            return Err(ScQbfError::SolutionSizeMismatch {
                expected: instance.n_items(),
                got: current.n_items(),
            });
        }
        if !evaluator.is_solution_valid(&current) {
            return Err(ScQbfError::InvalidInitialSolution {
                uncovered: evaluator.uncovered_elements(&current).len(),
            });
        }

        let mut counter = CoverageCounter::new(instance, &current);
        let mut tabu = TabuList::new(config.tenure);

        let mut best = current.clone();
        let mut best_objective = current.objective();
        let mut best_iteration = 0;
        let mut objective_history =
            Vec::with_capacity(config.max_iterations.unwrap_or(0).min(1 << 16));
        let mut iteration = 0usize;
        let mut no_improve_count = 0usize;

        info!(
            "tabu search: {} items, {} elements, tenure {}, initial objective {} with {} items selected",
            instance.n_items(),
            instance.universe_size(),
            tabu.tenure(),
            best_objective,
            current.len()
        );

        let start = Instant::now();
        let stop_reason = loop {
            if let Some(reason) = Self::termination(config, iteration, no_improve_count, start) {
                break reason;
            }

            let aspiration = config.aspiration.then_some(best_objective);
            let chosen =
                best_admissible_move(&evaluator, &current, &counter, &tabu, iteration, aspiration)?;

            match chosen {
                Some(Candidate { mv, delta }) => {
                    match mv {
                        Move::Insert(k) => {
                            current.apply_insertion(k, delta)?;
                            counter.insert(k);
                        }
                        Move::Remove(k) => {
                            current.apply_removal(k, delta)?;
                            counter.remove(k);
                        }
                        Move::Exchange { out, into } => {
                            current.apply_exchange(out, into, delta)?;
                            counter.remove(out);
                            counter.insert(into);
                        }
                    }
                    tabu.forbid(mv.reverse_attribute(), iteration);
                    trace!(
                        "iteration {iteration}: {mv:?} delta {delta}, objective {}",
                        current.objective()
                    );
                }
                None => {
                    if config.no_move_policy == NoMovePolicy::Stop {
                        break StopReason::NoAdmissibleMove;
                    }
                    trace!("iteration {iteration}: no admissible move");
                }
            }
            debug_assert!(counter.is_complete());

            iteration += 1;
            if current.objective() > best_objective {
                best = current.clone();
                best_objective = current.objective();
                best_iteration = iteration;
                no_improve_count = 0;
                debug!("iteration {iteration}: new best objective {best_objective}");
            } else {
                no_improve_count += 1;
            }
            objective_history.push(best_objective);

            if iteration % PURGE_INTERVAL == 0 {
                tabu.purge_expired(iteration);
            }
        };

        let elapsed = start.elapsed();
        info!(
            "tabu search stopped ({stop_reason:?}) after {iteration} iterations in {:.3}s, best objective {best_objective}",
            elapsed.as_secs_f64()
        );

        Ok(TabuResult {
            coverage: evaluator.evaluate_coverage(&best),
            best,
            best_objective,
            iterations: iteration,
            best_iteration,
            stop_reason,
            elapsed,
            objective_history,
        })
    }

    fn termination(
        config: &TabuConfig,
        iteration: usize,
        no_improve_count: usize,
        start: Instant,
    ) -> Option<StopReason> {
        if config.max_iterations.is_some_and(|max| iteration >= max) {
            return Some(StopReason::MaxIterations);
        }
        if config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
            return Some(StopReason::TimeLimit);
        }
        if config.patience.is_some_and(|p| no_improve_count >= p) {
            return Some(StopReason::PatienceExceeded);
        }
        None
    }
}

/// Best admissible move from `current`, or `None` if every feasible move is
/// tabu without meeting aspiration.
///
/// Candidates are scanned as insertions by item, then removals by item,
/// then exchanges by `(out, into)`, all ascending; only a strictly larger
/// delta replaces the incumbent, so ties go to the earliest candidate.
/// Removals and exchanges that would uncover an element are never scored.
/// With `aspiration = Some(best)`, a tabu move is admissible when
/// `current + delta > best`.
pub(crate) fn best_admissible_move<T: Coefficient>(
    evaluator: &Evaluator<'_, T>,
    current: &Solution<T>,
    counter: &CoverageCounter<'_, T>,
    tabu: &TabuList,
    iteration: usize,
    aspiration: Option<T>,
) -> Result<Option<Candidate<T>>, PreconditionError> {
    let n = current.n_items();
    let base = current.objective();
    let selected: Vec<usize> = current.items().collect();
    let unselected: Vec<usize> = current.unselected().collect();

    let mut best: Option<Candidate<T>> = None;
    let mut consider = |mv: Move, delta: T| {
        let admissible = !tabu.is_move_tabu(&mv, iteration)
            || aspiration.is_some_and(|best_objective| base + delta > best_objective);
        if admissible && best.is_none_or(|b| delta > b.delta) {
            best = Some(Candidate { mv, delta });
        }
    };

    let mut insertion = vec![T::zero(); n];
    for &k in &unselected {
        insertion[k] = evaluator.evaluate_insertion_delta(current, k)?;
        consider(Move::Insert(k), insertion[k]);
    }

    let mut removal = vec![T::zero(); n];
    for &k in &selected {
        removal[k] = evaluator.evaluate_removal_delta(current, k)?;
        if counter.can_remove(k) {
            consider(Move::Remove(k), removal[k]);
        }
    }

    for &out in &selected {
        for &into in &unselected {
            if counter.can_exchange(out, into) {
                let delta =
                    evaluator.exchange_delta_from_parts(out, into, removal[out], insertion[into]);
                consider(Move::Exchange { out, into }, delta);
            }
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{GreedyCoverage, RandomCoverage};
    use crate::tabu::TabuAttribute;

    fn scenario() -> Instance<i64> {
        Instance::from_upper_triangular(
            3,
            vec![vec![0, 1], vec![1, 2], vec![2]],
            vec![vec![2, 1, 0], vec![3, 1], vec![5]],
        )
        .unwrap()
    }

    /// Items 0..n each cover {i}; item n covers everything. Negative pair
    /// terms make the optimum a strict subset.
    fn star(n: usize) -> Instance<i64> {
        let mut coverage: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        coverage.push((0..n).collect());
        let matrix = (0..=n)
            .map(|i| {
                (0..=n)
                    .map(|j| {
                        if i == j {
                            if i == n { 1 } else { 3 + (i as i64 % 4) }
                        } else if j == n {
                            -2
                        } else {
                            -((i + j) as i64 % 3)
                        }
                    })
                    .collect()
            })
            .collect();
        Instance::new(n, coverage, matrix).unwrap()
    }

    #[test]
    fn test_scenario_reaches_full_selection() {
        let inst = scenario();
        let config = TabuConfig::default().with_max_iterations(10).with_tenure(2);
        let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();

        assert_eq!(result.best.to_vec(), vec![0, 1, 2]);
        assert_eq!(result.best_objective, 12);
        assert_eq!(result.best_iteration, 1);
        assert!((result.coverage - 1.0).abs() < 1e-12);
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
        assert_eq!(result.iterations, 10);
    }

    #[test]
    fn test_best_feasible_removal_is_chosen() {
        let inst = scenario();
        let ev = Evaluator::new(&inst);
        let sol = Solution::from_items(&inst, &[0, 1, 2]).unwrap();
        let counter = CoverageCounter::new(&inst, &sol);
        let tabu = TabuList::new(5);

        // removing 0 uncovers element 0; removing 1 costs 5, removing 2 costs 6
        let chosen = best_admissible_move(&ev, &sol, &counter, &tabu, 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(chosen.mv, Move::Remove(1));
        assert_eq!(chosen.delta, -5);
    }

    #[test]
    fn test_no_admissible_move_returns_none() {
        let inst = scenario();
        let ev = Evaluator::new(&inst);
        let sol = Solution::from_items(&inst, &[0, 1]).unwrap();
        let counter = CoverageCounter::new(&inst, &sol);
        let mut tabu = TabuList::new(5);
        tabu.forbid(TabuAttribute::Add(2), 0);

        // insert 2 and exchange 1 -> 2 are the only feasible moves; removing
        // 1 (delta -4) would uncover element 2 and is never generated
        assert_eq!(
            best_admissible_move(&ev, &sol, &counter, &tabu, 1, None).unwrap(),
            None
        );
    }

    #[test]
    fn test_aspiration_overrides_tabu() {
        let inst = scenario();
        let ev = Evaluator::new(&inst);
        let sol = Solution::from_items(&inst, &[0, 1]).unwrap();
        let counter = CoverageCounter::new(&inst, &sol);
        let mut tabu = TabuList::new(5);
        tabu.forbid(TabuAttribute::Add(2), 0);

        // 6 + 6 = 12 beats the best-known 6: admissible despite being tabu
        let chosen = best_admissible_move(&ev, &sol, &counter, &tabu, 1, Some(6))
            .unwrap()
            .unwrap();
        assert_eq!(chosen.mv, Move::Insert(2));
        assert_eq!(chosen.delta, 6);

        // reaching the best-known value exactly is not enough
        assert_eq!(
            best_admissible_move(&ev, &sol, &counter, &tabu, 1, Some(12)).unwrap(),
            None
        );
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        // two identical items: inserting either gives the same delta
        let inst = Instance::new(
            2,
            vec![vec![0, 1], vec![0, 1], vec![0, 1]],
            vec![vec![1, 0, 0], vec![0, 4, 0], vec![0, 0, 4]],
        )
        .unwrap();
        let ev = Evaluator::new(&inst);
        let sol = Solution::from_items(&inst, &[0]).unwrap();
        let counter = CoverageCounter::new(&inst, &sol);
        let tabu = TabuList::new(1);

        let chosen = best_admissible_move(&ev, &sol, &counter, &tabu, 0, None)
            .unwrap()
            .unwrap();
        assert_eq!(chosen.mv, Move::Insert(1));
    }

    #[test]
    fn test_history_is_non_decreasing_and_best_is_valid() {
        let inst = star(10);
        let ev = Evaluator::new(&inst);
        let config = TabuConfig::default().with_max_iterations(200).with_tenure(3);
        let result = TabuRunner::run(&inst, &RandomCoverage::new(3), &config).unwrap();

        for window in result.objective_history.windows(2) {
            assert!(window[1] >= window[0], "best objective decreased: {window:?}");
        }
        assert!(ev.is_solution_valid(&result.best));
        assert_eq!(result.best_objective, ev.evaluate_objfun(&result.best));
        assert_eq!(result.objective_history.len(), result.iterations);
    }

    #[test]
    fn test_patience_termination() {
        let inst = star(8);
        let config = TabuConfig::default()
            .unbounded_iterations()
            .with_patience(15)
            .with_tenure(2);
        let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();

        assert_eq!(result.stop_reason, StopReason::PatienceExceeded);
        assert_eq!(result.iterations, result.best_iteration + 15);
    }

    #[test]
    fn test_stop_policy_on_no_move() {
        // single item: nothing to insert, removing it breaks coverage
        let inst = Instance::new(1, vec![vec![0]], vec![vec![5]]).unwrap();
        let config = TabuConfig::default()
            .with_max_iterations(50)
            .with_no_move_policy(NoMovePolicy::Stop);
        let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::NoAdmissibleMove);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best_objective, 5);

        let idle = TabuConfig::default().with_max_iterations(50);
        let result = TabuRunner::run(&inst, &GreedyCoverage, &idle).unwrap();
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
        assert_eq!(result.iterations, 50);
    }

    #[test]
    fn test_time_limit_termination() {
        let inst = star(12);
        let config = TabuConfig::default()
            .unbounded_iterations()
            .with_time_limit(Duration::from_millis(20));
        let result = TabuRunner::run(&inst, &GreedyCoverage, &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::TimeLimit);
        assert!(result.elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_config_and_instance() {
        let inst = scenario();
        let config = TabuConfig::default().with_tenure(0);
        assert!(matches!(
            TabuRunner::run(&inst, &GreedyCoverage, &config),
            Err(ScQbfError::InvalidConfig(_))
        ));

        let gap = Instance::new(2, vec![vec![0]], vec![vec![1]]).unwrap();
        assert!(matches!(
            TabuRunner::run(&gap, &GreedyCoverage, &TabuConfig::default()),
            Err(ScQbfError::InfeasibleInstance(_))
        ));
    }

    #[test]
    fn test_invalid_construction_is_rejected() {
        let inst = scenario();
        let partial = |inst: &Instance<i64>| -> Result<Solution<i64>, ScQbfError> {
            Ok(Solution::from_items(inst, &[0])?)
        };
        assert_eq!(
            TabuRunner::run(&inst, &partial, &TabuConfig::default()).unwrap_err(),
            ScQbfError::InvalidInitialSolution { uncovered: 1 }
        );
    }

    #[test]
    fn test_construction_with_wrong_item_count_is_rejected() {
        let inst = scenario();
        // covers the universe through items 0 and 1 but has no slot for item 2
        let short = |_: &Instance<i64>| -> Result<Solution<i64>, ScQbfError> {
            let mut sol = Solution::empty(2);
            sol.apply_insertion(0, 2)?;
            sol.apply_insertion(1, 4)?;
            Ok(sol)
        };
        assert_eq!(
            TabuRunner::run(&inst, &short, &TabuConfig::default()).unwrap_err(),
            ScQbfError::SolutionSizeMismatch {
                expected: 3,
                got: 2
            }
        );

        let long = |_: &Instance<i64>| -> Result<Solution<i64>, ScQbfError> {
            let mut sol = Solution::empty(5);
            sol.apply_insertion(4, 1)?;
            Ok(sol)
        };
        assert_eq!(
            TabuRunner::run(&inst, &long, &TabuConfig::default()).unwrap_err(),
            ScQbfError::SolutionSizeMismatch {
                expected: 3,
                got: 5
            }
        );
    }
}
