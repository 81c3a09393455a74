//! Coverage queries and incremental coverage bookkeeping.

use super::objective::Evaluator;
use crate::coefficient::Coefficient;
use crate::error::PreconditionError;
use crate::instance::Instance;
use crate::solution::Solution;

impl<'a, T: Coefficient> Evaluator<'a, T> {
    /// Number of universe elements covered by at least one selected item.
    pub fn covered_count(&self, solution: &Solution<T>) -> usize {
        self.covered_mask(solution).iter().filter(|&&c| c).count()
    }

    /// Fraction of the universe covered by `solution`, in `[0, 1]`.
    pub fn evaluate_coverage(&self, solution: &Solution<T>) -> f64 {
        self.covered_count(solution) as f64 / self.instance().universe_size() as f64
    }

    /// `true` iff every universe element is covered.
    pub fn is_solution_valid(&self, solution: &Solution<T>) -> bool {
        self.covered_count(solution) == self.instance().universe_size()
    }

    /// Elements `solution` leaves uncovered, ascending.
    pub fn uncovered_elements(&self, solution: &Solution<T>) -> Vec<usize> {
        self.covered_mask(solution)
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(|(e, _)| e)
            .collect()
    }

    /// How many currently uncovered elements item `k` would cover.
    pub fn evaluate_insertion_delta_coverage(
        &self,
        solution: &Solution<T>,
        k: usize,
    ) -> Result<usize, PreconditionError> {
        solution.check_absent(k)?;
        let covered = self.covered_mask(solution);
        Ok(self
            .instance()
            .coverage(k)
            .iter()
            .filter(|&&e| !covered[e])
            .count())
    }

    fn covered_mask(&self, solution: &Solution<T>) -> Vec<bool> {
        let mut covered = vec![false; self.instance().universe_size()];
        for item in solution.items() {
            for &e in self.instance().coverage(item) {
                covered[e] = true;
            }
        }
        covered
    }
}

/// Per-element count of selected items covering it.
///
/// Kept in step with a solution by calling [`insert`](Self::insert) /
/// [`remove`](Self::remove) alongside every applied move; answers
/// feasibility of removals and exchanges without rescanning the solution.
#[derive(Debug, Clone)]
pub struct CoverageCounter<'a, T: Coefficient> {
    instance: &'a Instance<T>,
    counts: Vec<usize>,
    covered: usize,
}

impl<'a, T: Coefficient> CoverageCounter<'a, T> {
    pub fn new(instance: &'a Instance<T>, solution: &Solution<T>) -> Self {
        let mut counter = Self {
            instance,
            counts: vec![0; instance.universe_size()],
            covered: 0,
        };
        for item in solution.items() {
            counter.insert(item);
        }
        counter
    }

    /// Number of elements covered at least once.
    #[inline]
    pub fn covered(&self) -> usize {
        self.covered
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.covered == self.counts.len()
    }

    /// How many selected items cover `element`.
    #[inline]
    pub fn count(&self, element: usize) -> usize {
        self.counts[element]
    }

    /// Elements of `item` not yet covered.
    pub fn newly_covered(&self, item: usize) -> usize {
        self.instance
            .coverage(item)
            .iter()
            .filter(|&&e| self.counts[e] == 0)
            .count()
    }

    /// Dropping selected `item` keeps every element covered.
    pub fn can_remove(&self, item: usize) -> bool {
        self.instance
            .coverage(item)
            .iter()
            .all(|&e| self.counts[e] >= 2)
    }

    /// Swapping selected `out` for unselected `into` keeps every element
    /// covered: each element only `out` covers must be covered by `into`.
    pub fn can_exchange(&self, out: usize, into: usize) -> bool {
        let gained = self.instance.coverage(into);
        self.instance
            .coverage(out)
            .iter()
            .all(|&e| self.counts[e] >= 2 || gained.binary_search(&e).is_ok())
    }

    pub fn insert(&mut self, item: usize) {
        for &e in self.instance.coverage(item) {
            if self.counts[e] == 0 {
                self.covered += 1;
            }
            self.counts[e] += 1;
        }
    }

    pub fn remove(&mut self, item: usize) {
        for &e in self.instance.coverage(item) {
            debug_assert!(self.counts[e] > 0, "removing item {item} not counted");
            self.counts[e] -= 1;
            if self.counts[e] == 0 {
                self.covered -= 1;
            }
        }
    }
}
