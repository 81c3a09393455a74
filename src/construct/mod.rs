//! Initial-solution strategies.
//!
//! Every strategy implements [`Construction`] and returns a solution that
//! covers the whole universe. The search driver only depends on the trait.

mod greedy;
mod random;
mod types;

pub use greedy::{GreedyCoverage, GreedyObjective};
pub use random::RandomCoverage;
pub use types::{ensure_coverable, Construction};
