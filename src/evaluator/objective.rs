//! Objective value and exact move deltas.

use crate::coefficient::Coefficient;
use crate::error::PreconditionError;
use crate::instance::Instance;
use crate::solution::Solution;

/// Stateless evaluation of solutions against one [`Instance`].
///
/// The objective of a selection `S` is `Σ_{i ≤ j; i, j ∈ S} A[i][j]`: every
/// diagonal term once and every unordered pair once. Delta functions return
/// the exact change a move causes, without re-evaluating the whole solution,
/// and fail with [`PreconditionError`] when the move does not apply.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a, T: Coefficient> {
    instance: &'a Instance<T>,
}

impl<'a, T: Coefficient> Evaluator<'a, T> {
    pub fn new(instance: &'a Instance<T>) -> Self {
        Self { instance }
    }

    #[inline]
    pub fn instance(&self) -> &'a Instance<T> {
        self.instance
    }

    /// Full, non-incremental objective of `solution`.
    pub fn evaluate_objfun(&self, solution: &Solution<T>) -> T {
        let items = solution.to_vec();
        self.evaluate_objfun_items(&items)
    }

    /// Objective of an explicit list of distinct items.
    pub fn evaluate_objfun_items(&self, items: &[usize]) -> T {
        let mut total = T::zero();
        for (a, &i) in items.iter().enumerate() {
            for &j in &items[a..] {
                total += self.instance.coefficient(i, j);
            }
        }
        total
    }

    /// `A[k][k] + Σ_{i ∈ S} A(i, k)`: the change from adding `k`.
    pub fn evaluate_insertion_delta(
        &self,
        solution: &Solution<T>,
        k: usize,
    ) -> Result<T, PreconditionError> {
        solution.check_absent(k)?;
        Ok(self.contribution(solution, k, None))
    }

    /// `-(A[k][k] + Σ_{i ∈ S, i ≠ k} A(i, k))`: the change from dropping `k`.
    pub fn evaluate_removal_delta(
        &self,
        solution: &Solution<T>,
        k: usize,
    ) -> Result<T, PreconditionError> {
        solution.check_present(k)?;
        Ok(-self.contribution(solution, k, Some(k)))
    }

    /// Change from swapping `out` (selected) for `into` (unselected): the
    /// removal delta of `out` plus the insertion delta of `into` taken
    /// against `S \ {out}`, so the cross term `A(out, into)` never enters.
    pub fn evaluate_exchange_delta(
        &self,
        solution: &Solution<T>,
        out: usize,
        into: usize,
    ) -> Result<T, PreconditionError> {
        solution.check_present(out)?;
        solution.check_absent(into)?;
        let removal = -self.contribution(solution, out, Some(out));
        let insertion = self.contribution(solution, into, Some(out));
        Ok(removal + insertion)
    }

    /// Exchange delta assembled from a removal delta of `out` and an
    /// insertion delta of `into`, both taken against the same solution.
    ///
    /// The insertion delta against `S` contains `A(out, into)` because `out`
    /// is still selected there; it is subtracted once. Equal to
    /// [`evaluate_exchange_delta`](Self::evaluate_exchange_delta) without the
    /// O(|S|) rescan.
    #[inline]
    pub fn exchange_delta_from_parts(
        &self,
        out: usize,
        into: usize,
        removal_delta: T,
        insertion_delta: T,
    ) -> T {
        removal_delta + insertion_delta - self.instance.coefficient(out, into)
    }

    /// `A[k][k] + Σ A(i, k)` over selected `i`, skipping `i == k` and `skip`.
    fn contribution(&self, solution: &Solution<T>, k: usize, skip: Option<usize>) -> T {
        let mut total = self.instance.coefficient(k, k);
        for i in solution.items() {
            if i == k || Some(i) == skip {
                continue;
            }
            total += self.instance.coefficient(i, k);
        }
        total
    }
}
