//! Tabu Search for MAX-SC-QBF: maximise a quadratic binary function under a
//! set-cover constraint.
//!
//! Given `n` items, an upper-triangular coefficient matrix `A` and, for each
//! item, the subset of a universe `{0, .., m-1}` it covers, find a set of
//! items `S` maximising
//!
//! ```text
//! f(S) = Σ_{i ≤ j, i,j ∈ S} A[i][j]
//! ```
//!
//! such that the coverage sets of `S` together cover the whole universe.
//!
//! # Modules
//!
//! - [`instance`]: problem data, validation and the plain-text loader.
//! - [`solution`]: selected-item sets with a cached objective.
//! - [`evaluator`]: full objective, coverage checks and exact move deltas.
//! - [`construct`]: feasible starting solutions (greedy and randomised).
//! - [`tabu`]: the insertion/removal/exchange Tabu Search and multi-start.
//!
//! # Example
//!
//! ```
//! use scqbf_tabu::construct::GreedyCoverage;
//! use scqbf_tabu::tabu::{TabuConfig, TabuRunner};
//! use scqbf_tabu::Instance;
//!
//! let text = "3\n2 2 1\n1 2\n2 3\n3\n2 1 0\n3 1\n5\n";
//! let instance: Instance<i64> = text.parse().unwrap();
//!
//! let config = TabuConfig::default().with_max_iterations(100).with_tenure(2);
//! let result = TabuRunner::run(&instance, &GreedyCoverage, &config).unwrap();
//! assert_eq!(result.best.to_vec(), vec![0, 1, 2]);
//! assert_eq!(result.best_objective, 12);
//! ```

pub mod coefficient;
pub mod construct;
pub mod error;
pub mod evaluator;
pub mod instance;
pub mod solution;
pub mod tabu;

pub use coefficient::Coefficient;
pub use construct::{Construction, GreedyCoverage, GreedyObjective, RandomCoverage};
pub use error::{InfeasibleInstanceError, MalformedInstanceError, PreconditionError, ScQbfError};
pub use evaluator::{CoverageCounter, Evaluator};
pub use instance::Instance;
pub use solution::Solution;
pub use tabu::{StopReason, TabuConfig, TabuResult, TabuRunner};
