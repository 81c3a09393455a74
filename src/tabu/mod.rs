//! Tabu Search (TS) over feasible covers.
//!
//! Starting from a feasible solution, each iteration applies the best
//! admissible insertion, removal or exchange. The tabu list forbids undoing
//! recent moves, aspiration lets a forbidden move through when it would
//! set a new best, and removals or exchanges that would uncover an element
//! are never generated, so every visited solution is a valid cover.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
pub mod multistart;
mod runner;
mod types;

pub use config::{NoMovePolicy, TabuConfig};
pub use multistart::run_seeds;
pub use runner::{StopReason, TabuResult, TabuRunner};
pub use types::{Candidate, Move, TabuAttribute, TabuList};
