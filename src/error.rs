//! Error types.
//!
//! Three failure classes are distinguished:
//!
//! - [`MalformedInstanceError`]: the problem data is structurally inconsistent.
//! - [`PreconditionError`]: a move was evaluated or applied against a solution
//!   that violates its membership requirements.
//! - [`InfeasibleInstanceError`]: some universe element is covered by no item,
//!   so no feasible solution exists.
//!
//! [`ScQbfError`] wraps all of them for the search entry points.

use std::fmt;

/// Structural inconsistency in instance data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInstanceError {
    /// The instance has no items.
    NoItems,
    /// The universe has no elements.
    EmptyUniverse,
    /// Number of coverage sets differs from the number of matrix rows.
    ItemCountMismatch { coverage_sets: usize, matrix_rows: usize },
    /// A matrix row has the wrong number of entries.
    MatrixRowLength {
        row: usize,
        expected: usize,
        got: usize,
    },
    /// An item covers nothing.
    EmptyCoverageSet { item: usize },
    /// An item covers an element outside `[0, universe_size)`.
    ElementOutOfRange {
        item: usize,
        element: usize,
        universe_size: usize,
    },
    /// A token could not be parsed.
    InvalidToken { position: usize, token: String },
    /// Input ended before the expected section was complete.
    UnexpectedEof { expected: &'static str },
    /// Input continues after the last matrix row.
    TrailingData { position: usize },
    /// Reading the input failed.
    Io(String),
}

impl fmt::Display for MalformedInstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => write!(f, "instance has no items"),
            Self::EmptyUniverse => write!(f, "instance universe is empty"),
            Self::ItemCountMismatch {
                coverage_sets,
                matrix_rows,
            } => write!(
                f,
                "{coverage_sets} coverage sets but {matrix_rows} coefficient matrix rows"
            ),
            Self::MatrixRowLength { row, expected, got } => {
                write!(f, "matrix row {row} has {got} entries, expected {expected}")
            }
            Self::EmptyCoverageSet { item } => write!(f, "item {item} covers no element"),
            Self::ElementOutOfRange {
                item,
                element,
                universe_size,
            } => write!(
                f,
                "item {item} covers element {element}, outside universe of size {universe_size}"
            ),
            Self::InvalidToken { position, token } => {
                write!(f, "invalid token '{token}' at position {position}")
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input while reading {expected}")
            }
            Self::TrailingData { position } => {
                write!(f, "unexpected trailing data at token {position}")
            }
            Self::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for MalformedInstanceError {}

/// A move violates the membership requirements of the solution it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreconditionError {
    /// Item index is not in `[0, n_items)`.
    ItemOutOfRange { item: usize, n_items: usize },
    /// Insertion requested for an item that is already selected.
    AlreadySelected { item: usize },
    /// Removal requested for an item that is not selected.
    NotSelected { item: usize },
}

impl fmt::Display for PreconditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemOutOfRange { item, n_items } => {
                write!(f, "item {item} out of range for {n_items} items")
            }
            Self::AlreadySelected { item } => write!(f, "item {item} is already selected"),
            Self::NotSelected { item } => write!(f, "item {item} is not selected"),
        }
    }
}

impl std::error::Error for PreconditionError {}

/// Some universe elements are covered by no item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfeasibleInstanceError {
    uncovered: Vec<usize>,
}

impl InfeasibleInstanceError {
    #[inline]
    pub fn new(uncovered: Vec<usize>) -> Self {
        Self { uncovered }
    }

    /// Elements no item covers, ascending.
    #[inline]
    pub fn uncovered(&self) -> &[usize] {
        &self.uncovered
    }
}

impl fmt::Display for InfeasibleInstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} universe element(s) covered by no item: {:?}",
            self.uncovered.len(),
            self.uncovered
        )
    }
}

impl std::error::Error for InfeasibleInstanceError {}

/// Any failure surfaced by construction or search.
#[derive(Debug, Clone, PartialEq)]
pub enum ScQbfError {
    MalformedInstance(MalformedInstanceError),
    Precondition(PreconditionError),
    InfeasibleInstance(InfeasibleInstanceError),
    /// The search configuration was rejected by [`TabuConfig::validate`](crate::tabu::TabuConfig::validate).
    InvalidConfig(String),
    /// A construction strategy returned a solution that leaves elements uncovered.
    InvalidInitialSolution { uncovered: usize },
    /// A construction strategy returned a solution sized for a different
    /// number of items than the instance has.
    SolutionSizeMismatch { expected: usize, got: usize },
}

impl fmt::Display for ScQbfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInstance(e) => write!(f, "malformed instance: {e}"),
            Self::Precondition(e) => write!(f, "precondition violated: {e}"),
            Self::InfeasibleInstance(e) => write!(f, "infeasible instance: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::InvalidInitialSolution { uncovered } => write!(
                f,
                "construction returned a solution with {uncovered} uncovered element(s)"
            ),
            Self::SolutionSizeMismatch { expected, got } => write!(
                f,
                "construction returned a solution over {got} items, instance has {expected}"
            ),
        }
    }
}

impl std::error::Error for ScQbfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedInstance(e) => Some(e),
            Self::Precondition(e) => Some(e),
            Self::InfeasibleInstance(e) => Some(e),
            Self::InvalidConfig(_)
            | Self::InvalidInitialSolution { .. }
            | Self::SolutionSizeMismatch { .. } => None,
        }
    }
}

impl From<MalformedInstanceError> for ScQbfError {
    fn from(e: MalformedInstanceError) -> Self {
        Self::MalformedInstance(e)
    }
}

impl From<PreconditionError> for ScQbfError {
    fn from(e: PreconditionError) -> Self {
        Self::Precondition(e)
    }
}

impl From<InfeasibleInstanceError> for ScQbfError {
    fn from(e: InfeasibleInstanceError) -> Self {
        Self::InfeasibleInstance(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let e = MalformedInstanceError::MatrixRowLength {
            row: 2,
            expected: 3,
            got: 1,
        };
        assert_eq!(e.to_string(), "matrix row 2 has 1 entries, expected 3");

        let e = PreconditionError::AlreadySelected { item: 4 };
        assert_eq!(e.to_string(), "item 4 is already selected");
    }

    #[test]
    fn test_wrapping_keeps_source() {
        let err: ScQbfError = InfeasibleInstanceError::new(vec![1, 5]).into();
        assert!(matches!(err, ScQbfError::InfeasibleInstance(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("[1, 5]"));

        let err = ScQbfError::InvalidConfig("tenure must be positive".into());
        assert!(err.source().is_none());
    }
}
