//! Candidate solution: a set of selected items with a cached objective.
//!
//! The item set is only mutated through [`Solution::apply_insertion`],
//! [`Solution::apply_removal`] and [`Solution::apply_exchange`], each of
//! which updates membership and the cached objective together. The delta
//! passed in must come from the matching [`Evaluator`](crate::Evaluator)
//! function, otherwise the cache no longer equals the objective.

use crate::coefficient::Coefficient;
use crate::error::PreconditionError;
use crate::evaluator::Evaluator;
use crate::instance::Instance;

/// Selected items of a MAX-SC-QBF instance plus their objective value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution<T: Coefficient> {
    selected: Vec<bool>,
    size: usize,
    objective: T,
}

impl<T: Coefficient> Solution<T> {
    /// Empty selection over `n_items` items; objective zero.
    pub fn empty(n_items: usize) -> Self {
        Self {
            selected: vec![false; n_items],
            size: 0,
            objective: T::zero(),
        }
    }

    /// Selection holding `items` (duplicates ignored), with the objective
    /// computed from scratch.
    pub fn from_items(instance: &Instance<T>, items: &[usize]) -> Result<Self, PreconditionError> {
        let n = instance.n_items();
        let mut selected = vec![false; n];
        for &item in items {
            if item >= n {
                return Err(PreconditionError::ItemOutOfRange { item, n_items: n });
            }
            selected[item] = true;
        }
        let size = selected.iter().filter(|&&s| s).count();
        let mut sol = Self {
            selected,
            size,
            objective: T::zero(),
        };
        sol.objective = Evaluator::new(instance).evaluate_objfun(&sol);
        Ok(sol)
    }

    /* queries */

    #[inline]
    pub fn objective(&self) -> T {
        self.objective
    }

    /// Number of selected items.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of items in the instance this solution belongs to.
    #[inline]
    pub fn n_items(&self) -> usize {
        self.selected.len()
    }

    /// Whether `item` is selected; `false` for out-of-range indices.
    #[inline]
    pub fn contains(&self, item: usize) -> bool {
        self.selected.get(item).copied().unwrap_or(false)
    }

    /// Selected items in ascending order.
    pub fn items(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| i)
    }

    /// Unselected items in ascending order.
    pub fn unselected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| !s)
            .map(|(i, _)| i)
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.items().collect()
    }

    /* mutators */

    /// Adds `item`; `delta` must be its insertion delta against `self`.
    pub fn apply_insertion(&mut self, item: usize, delta: T) -> Result<(), PreconditionError> {
        self.check_absent(item)?;
        self.selected[item] = true;
        self.size += 1;
        self.objective += delta;
        Ok(())
    }

    /// Drops `item`; `delta` must be its removal delta against `self`.
    pub fn apply_removal(&mut self, item: usize, delta: T) -> Result<(), PreconditionError> {
        self.check_present(item)?;
        self.selected[item] = false;
        self.size -= 1;
        self.objective += delta;
        Ok(())
    }

    /// Swaps `out` for `into`; `delta` must be the exchange delta against `self`.
    pub fn apply_exchange(
        &mut self,
        out: usize,
        into: usize,
        delta: T,
    ) -> Result<(), PreconditionError> {
        self.check_present(out)?;
        self.check_absent(into)?;
        self.selected[out] = false;
        self.selected[into] = true;
        self.objective += delta;
        Ok(())
    }

    pub(crate) fn check_present(&self, item: usize) -> Result<(), PreconditionError> {
        self.check_range(item)?;
        if !self.selected[item] {
            return Err(PreconditionError::NotSelected { item });
        }
        Ok(())
    }

    pub(crate) fn check_absent(&self, item: usize) -> Result<(), PreconditionError> {
        self.check_range(item)?;
        if self.selected[item] {
            return Err(PreconditionError::AlreadySelected { item });
        }
        Ok(())
    }

    fn check_range(&self, item: usize) -> Result<(), PreconditionError> {
        if item >= self.selected.len() {
            return Err(PreconditionError::ItemOutOfRange {
                item,
                n_items: self.selected.len(),
            });
        }
        Ok(())
    }
}
