//! Randomised coverage-driven construction.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;

use super::greedy::stalled;
use super::types::{ensure_coverable, Construction};
use crate::coefficient::Coefficient;
use crate::error::ScQbfError;
use crate::evaluator::CoverageCounter;
use crate::instance::Instance;
use crate::solution::Solution;

/// Repeatedly picks a uniformly random item among those that still cover
/// something new, until the universe is covered.
///
/// The candidate list starts as a seeded shuffle of all items and shrinks
/// each round to the items with positive coverage gain, so the same seed
/// always yields the same solution.
#[derive(Debug, Clone, Copy)]
pub struct RandomCoverage {
    pub seed: u64,
}

impl RandomCoverage {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl<T: Coefficient> Construction<T> for RandomCoverage {
    fn construct(&self, instance: &Instance<T>) -> Result<Solution<T>, ScQbfError> {
        ensure_coverable(instance)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let empty = Solution::empty(instance.n_items());
        let mut counter = CoverageCounter::new(instance, &empty);
        let mut items = Vec::new();

        let mut candidates: Vec<usize> = (0..instance.n_items()).collect();
        candidates.shuffle(&mut rng);

        while !counter.is_complete() {
            candidates.retain(|&k| counter.newly_covered(k) > 0);
            let &k = candidates
                .choose(&mut rng)
                .ok_or_else(|| stalled(instance, &items))?;
            candidates.retain(|&c| c != k);
            counter.insert(k);
            items.push(k);
        }

        Ok(Solution::from_items(instance, &items)?)
    }
}
