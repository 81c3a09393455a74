//! Construction capability shared by all initial-solution strategies.

use crate::coefficient::Coefficient;
use crate::error::{InfeasibleInstanceError, ScQbfError};
use crate::instance::Instance;
use crate::solution::Solution;

/// Produces a feasible starting [`Solution`] for the tabu search.
///
/// Implementations must return a solution that covers the whole universe
/// and whose cached objective equals the full evaluation. Any
/// `Fn(&Instance<T>) -> Result<Solution<T>, ScQbfError>` is a construction,
/// so strategies can be swapped without touching the search driver.
///
/// # Examples
///
/// ```
/// use scqbf_tabu::{Construction, Instance, ScQbfError, Solution};
///
/// let take_all = |inst: &Instance<i64>| -> Result<Solution<i64>, ScQbfError> {
///     let items: Vec<usize> = (0..inst.n_items()).collect();
///     Ok(Solution::from_items(inst, &items)?)
/// };
///
/// let inst = Instance::new(1, vec![vec![0]], vec![vec![4]]).unwrap();
/// assert_eq!(take_all.construct(&inst).unwrap().objective(), 4);
/// ```
pub trait Construction<T: Coefficient> {
    fn construct(&self, instance: &Instance<T>) -> Result<Solution<T>, ScQbfError>;
}

impl<T, F> Construction<T> for F
where
    T: Coefficient,
    F: Fn(&Instance<T>) -> Result<Solution<T>, ScQbfError>,
{
    fn construct(&self, instance: &Instance<T>) -> Result<Solution<T>, ScQbfError> {
        self(instance)
    }
}

/// Fails with [`InfeasibleInstanceError`] when some element has no cover.
pub fn ensure_coverable<T: Coefficient>(
    instance: &Instance<T>,
) -> Result<(), InfeasibleInstanceError> {
    let uncovered = instance.uncovered_elements();
    if uncovered.is_empty() {
        Ok(())
    } else {
        Err(InfeasibleInstanceError::new(uncovered))
    }
}
