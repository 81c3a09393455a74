//! Deterministic greedy constructions.

use super::types::{ensure_coverable, Construction};
use crate::coefficient::Coefficient;
use crate::error::{InfeasibleInstanceError, ScQbfError};
use crate::evaluator::{CoverageCounter, Evaluator};
use crate::instance::Instance;
use crate::solution::Solution;

/// Adds the item covering the most uncovered elements until the universe is
/// covered. Ties go to the lowest item id. The objective is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCoverage;

impl<T: Coefficient> Construction<T> for GreedyCoverage {
    fn construct(&self, instance: &Instance<T>) -> Result<Solution<T>, ScQbfError> {
        ensure_coverable(instance)?;

        let empty = Solution::empty(instance.n_items());
        let mut counter = CoverageCounter::new(instance, &empty);
        let mut selected = vec![false; instance.n_items()];
        let mut items = Vec::new();

        while !counter.is_complete() {
            let mut best: Option<(usize, usize)> = None;
            for k in (0..instance.n_items()).filter(|&k| !selected[k]) {
                let gain = counter.newly_covered(k);
                if gain > 0 && best.is_none_or(|(g, _)| gain > g) {
                    best = Some((gain, k));
                }
            }
            let (_, k) = best.ok_or_else(|| stalled(instance, &items))?;
            selected[k] = true;
            counter.insert(k);
            items.push(k);
        }

        Ok(Solution::from_items(instance, &items)?)
    }
}

/// Among items that cover something new, adds the one with the largest
/// insertion delta. Ties go to the larger coverage gain, then the lowest id.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyObjective;

impl<T: Coefficient> Construction<T> for GreedyObjective {
    fn construct(&self, instance: &Instance<T>) -> Result<Solution<T>, ScQbfError> {
        ensure_coverable(instance)?;

        let evaluator = Evaluator::new(instance);
        let mut partial = Solution::empty(instance.n_items());
        let mut counter = CoverageCounter::new(instance, &partial);

        while !counter.is_complete() {
            let mut best: Option<(T, usize, usize)> = None;
            for k in partial.unselected() {
                let gain = counter.newly_covered(k);
                if gain == 0 {
                    continue;
                }
                let delta = evaluator.evaluate_insertion_delta(&partial, k)?;
                let better = match best {
                    None => true,
                    Some((d, g, _)) => delta > d || (delta == d && gain > g),
                };
                if better {
                    best = Some((delta, gain, k));
                }
            }
            let (delta, _, k) = best.ok_or_else(|| stalled(instance, &partial.to_vec()))?;
            partial.apply_insertion(k, delta)?;
            counter.insert(k);
        }

        Ok(Solution::from_items(instance, &partial.to_vec())?)
    }
}

/// No remaining item covers anything new while elements are still open.
pub(super) fn stalled<T: Coefficient>(instance: &Instance<T>, items: &[usize]) -> ScQbfError {
    let mut covered = vec![false; instance.universe_size()];
    for &k in items {
        for &e in instance.coverage(k) {
            covered[e] = true;
        }
    }
    let uncovered = covered
        .iter()
        .enumerate()
        .filter(|&(_, &c)| !c)
        .map(|(e, _)| e)
        .collect();
    InfeasibleInstanceError::new(uncovered).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Instance<i64> {
        Instance::from_upper_triangular(
            3,
            vec![vec![0, 1], vec![1, 2], vec![2]],
            vec![vec![2, 1, 0], vec![3, 1], vec![5]],
        )
        .unwrap()
    }

    #[test]
    fn test_greedy_coverage_scenario() {
        let inst = scenario();
        let sol = GreedyCoverage.construct(&inst).unwrap();
        // item 0 and 1 tie on 2 new elements; 0 wins, then 1 and 2 tie on 1
        assert_eq!(sol.to_vec(), vec![0, 1]);
        assert_eq!(sol.objective(), 6);
        assert!(Evaluator::new(&inst).is_solution_valid(&sol));
    }

    #[test]
    fn test_greedy_objective_prefers_value() {
        let inst = scenario();
        let sol = GreedyObjective.construct(&inst).unwrap();
        // 2 (delta 5), then 1 (delta 4 beats 0's 2), then 0 for element 0
        assert_eq!(sol.to_vec(), vec![0, 1, 2]);
        assert_eq!(sol.objective(), 12);
        assert!(Evaluator::new(&inst).is_solution_valid(&sol));
    }

    #[test]
    fn test_uncoverable_instance() {
        let inst = Instance::new(3, vec![vec![0], vec![1]], vec![vec![1, 1], vec![0, 1]]).unwrap();
        let err = GreedyCoverage.construct(&inst).unwrap_err();
        assert_eq!(
            err,
            ScQbfError::InfeasibleInstance(InfeasibleInstanceError::new(vec![2]))
        );
        assert!(GreedyObjective.construct(&inst).is_err());
    }
}
