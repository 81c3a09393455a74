//! Moves, tabu attributes and the recency-based tabu list.

use std::collections::HashMap;

use crate::coefficient::Coefficient;

/// A neighbourhood move on the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Select an unselected item.
    Insert(usize),
    /// Deselect a selected item.
    Remove(usize),
    /// Deselect `out` and select `into` in one step.
    Exchange { out: usize, into: usize },
}

impl Move {
    /// The attribute forbidden after this move is applied, i.e. the one
    /// that would undo it.
    pub fn reverse_attribute(&self) -> TabuAttribute {
        match *self {
            Move::Insert(k) => TabuAttribute::Drop(k),
            Move::Remove(k) => TabuAttribute::Add(k),
            Move::Exchange { out, into } => TabuAttribute::Swap {
                out: into,
                into: out,
            },
        }
    }
}

/// Key of a tabu list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabuAttribute {
    /// The item may not be selected again.
    Add(usize),
    /// The item may not be deselected.
    Drop(usize),
    /// This exact exchange may not be made.
    Swap { out: usize, into: usize },
}

/// A scored move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<T: Coefficient> {
    pub mv: Move,
    pub delta: T,
}

/// Attribute → release iteration map with lazy expiry.
///
/// An attribute forbidden at iteration `t` is active while the iteration
/// counter is below `t + tenure`. Expired entries are never consulted and
/// are dropped by [`purge_expired`](Self::purge_expired).
#[derive(Debug, Clone)]
pub struct TabuList {
    release: HashMap<TabuAttribute, usize>,
    tenure: usize,
}

impl TabuList {
    pub fn new(tenure: usize) -> Self {
        Self {
            release: HashMap::new(),
            tenure,
        }
    }

    #[inline]
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Forbids `attribute` until iteration `iteration + tenure`.
    pub fn forbid(&mut self, attribute: TabuAttribute, iteration: usize) {
        self.release.insert(attribute, iteration + self.tenure);
    }

    /// Iteration at which `attribute` becomes eligible again, if recorded.
    pub fn release_iteration(&self, attribute: &TabuAttribute) -> Option<usize> {
        self.release.get(attribute).copied()
    }

    #[inline]
    pub fn is_tabu(&self, attribute: &TabuAttribute, iteration: usize) -> bool {
        self.release
            .get(attribute)
            .is_some_and(|&release| iteration < release)
    }

    /// A move is tabu when any attribute defining it is active: the item
    /// it adds, the item it drops, or the exact exchange pair.
    pub fn is_move_tabu(&self, mv: &Move, iteration: usize) -> bool {
        match *mv {
            Move::Insert(k) => self.is_tabu(&TabuAttribute::Add(k), iteration),
            Move::Remove(k) => self.is_tabu(&TabuAttribute::Drop(k), iteration),
            Move::Exchange { out, into } => {
                self.is_tabu(&TabuAttribute::Swap { out, into }, iteration)
                    || self.is_tabu(&TabuAttribute::Drop(out), iteration)
                    || self.is_tabu(&TabuAttribute::Add(into), iteration)
            }
        }
    }

    /// Drops entries whose release iteration has passed.
    pub fn purge_expired(&mut self, iteration: usize) {
        self.release.retain(|_, &mut release| release > iteration);
    }

    /// Number of stored entries, expired ones included until purged.
    #[inline]
    pub fn len(&self) -> usize {
        self.release.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.release.is_empty()
    }
}
