//! Objective, coverage and move-delta evaluation.

mod coverage;
mod objective;

pub use coverage::CoverageCounter;
pub use objective::Evaluator;
