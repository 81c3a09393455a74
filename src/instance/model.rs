//! Immutable MAX-SC-QBF problem data.

use crate::coefficient::Coefficient;
use crate::error::MalformedInstanceError;

/// A MAX-SC-QBF instance: `n` items, each covering part of a universe of
/// `m` elements, and an upper-triangular `n × n` coefficient matrix.
///
/// Coverage sets are stored sorted and deduplicated. Matrix entries below the
/// diagonal are never read; callers go through [`Instance::coefficient`],
/// which folds `(i, j)` onto `(min, max)`.
///
/// # Examples
///
/// ```
/// use scqbf_tabu::Instance;
///
/// let inst = Instance::new(
///     3,
///     vec![vec![0, 1], vec![1, 2], vec![2]],
///     vec![vec![2, 1, 0], vec![0, 3, 1], vec![0, 0, 5]],
/// )
/// .unwrap();
/// assert_eq!(inst.n_items(), 3);
/// assert_eq!(inst.coefficient(2, 1), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance<T: Coefficient> {
    universe_size: usize,
    coverage: Vec<Vec<usize>>,
    /// Row-major `n × n`; entries with row > column are zero.
    matrix: Vec<T>,
}

impl<T: Coefficient> Instance<T> {
    /// Builds an instance from a full `n × n` matrix. Entries below the
    /// diagonal are ignored.
    pub fn new(
        universe_size: usize,
        coverage: Vec<Vec<usize>>,
        matrix: Vec<Vec<T>>,
    ) -> Result<Self, MalformedInstanceError> {
        let n = coverage.len();
        check_row_count(n, matrix.len())?;

        let mut flat = Vec::with_capacity(n * n);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != n {
                return Err(MalformedInstanceError::MatrixRowLength {
                    row: i,
                    expected: n,
                    got: row.len(),
                });
            }
            flat.extend(
                row.into_iter()
                    .enumerate()
                    .map(|(j, v)| if j < i { T::zero() } else { v }),
            );
        }

        Self::assemble(universe_size, coverage, flat)
    }

    /// Builds an instance from upper-triangular rows: row `i` holds the
    /// `n - i` entries `A[i][i..n]`.
    pub fn from_upper_triangular(
        universe_size: usize,
        coverage: Vec<Vec<usize>>,
        rows: Vec<Vec<T>>,
    ) -> Result<Self, MalformedInstanceError> {
        let n = coverage.len();
        check_row_count(n, rows.len())?;

        let mut flat = vec![T::zero(); n * n];
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n - i {
                return Err(MalformedInstanceError::MatrixRowLength {
                    row: i,
                    expected: n - i,
                    got: row.len(),
                });
            }
            flat[i * n + i..(i + 1) * n].copy_from_slice(&row);
        }

        Self::assemble(universe_size, coverage, flat)
    }

    fn assemble(
        universe_size: usize,
        mut coverage: Vec<Vec<usize>>,
        matrix: Vec<T>,
    ) -> Result<Self, MalformedInstanceError> {
        if universe_size == 0 {
            return Err(MalformedInstanceError::EmptyUniverse);
        }
        for (item, set) in coverage.iter_mut().enumerate() {
            if set.is_empty() {
                return Err(MalformedInstanceError::EmptyCoverageSet { item });
            }
            if let Some(&element) = set.iter().find(|&&e| e >= universe_size) {
                return Err(MalformedInstanceError::ElementOutOfRange {
                    item,
                    element,
                    universe_size,
                });
            }
            set.sort_unstable();
            set.dedup();
        }

        Ok(Self {
            universe_size,
            coverage,
            matrix,
        })
    }

    /// Number of items `n`.
    #[inline]
    pub fn n_items(&self) -> usize {
        self.coverage.len()
    }

    /// Number of universe elements `m`.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    /// Elements covered by `item`, ascending.
    ///
    /// # Panics
    /// Panics if `item >= n_items()`.
    #[inline]
    pub fn coverage(&self, item: usize) -> &[usize] {
        &self.coverage[item]
    }

    /// `A[min(i, j)][max(i, j)]`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn coefficient(&self, i: usize, j: usize) -> T {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        self.matrix[lo * self.n_items() + hi]
    }

    /// Universe elements that no item covers, ascending. Empty iff the
    /// instance admits a feasible solution.
    pub fn uncovered_elements(&self) -> Vec<usize> {
        let mut covered = vec![false; self.universe_size];
        for set in &self.coverage {
            for &e in set {
                covered[e] = true;
            }
        }
        covered
            .iter()
            .enumerate()
            .filter(|&(_, &c)| !c)
            .map(|(e, _)| e)
            .collect()
    }
}

fn check_row_count(n: usize, rows: usize) -> Result<(), MalformedInstanceError> {
    if n == 0 {
        return Err(MalformedInstanceError::NoItems);
    }
    if rows != n {
        return Err(MalformedInstanceError::ItemCountMismatch {
            coverage_sets: n,
            matrix_rows: rows,
        });
    }
    Ok(())
}
