//! Independent restarts from randomised constructions.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::info;

use super::config::TabuConfig;
use super::runner::{TabuResult, TabuRunner};
use crate::coefficient::Coefficient;
use crate::construct::RandomCoverage;
use crate::error::ScQbfError;
use crate::instance::Instance;

/// Runs one Tabu Search per seed, each starting from
/// [`RandomCoverage`] with that seed, and returns the winning seed with its
/// result.
///
/// With the `parallel` feature the runs are spread over the rayon thread
/// pool; otherwise they run one after another. Either way the outcome is
/// identical for iteration- or patience-bounded configs: the highest
/// objective wins and ties go to the seed listed first.
///
/// # Errors
///
/// [`ScQbfError::InvalidConfig`] if `seeds` is empty, otherwise the first
/// error (in seed order) reported by any run.
pub fn run_seeds<T: Coefficient>(
    instance: &Instance<T>,
    config: &TabuConfig,
    seeds: &[u64],
) -> Result<(u64, TabuResult<T>), ScQbfError> {
    if seeds.is_empty() {
        return Err(ScQbfError::InvalidConfig("no seeds given".into()));
    }
    config.validate().map_err(ScQbfError::InvalidConfig)?;

    let run = |&seed: &u64| {
        TabuRunner::run(instance, &RandomCoverage::new(seed), config).map(|r| (seed, r))
    };

    #[cfg(feature = "parallel")]
    let results: Vec<_> = seeds.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = seeds.iter().map(run).collect();

    let mut best: Option<(u64, TabuResult<T>)> = None;
    for result in results {
        let (seed, result) = result?;
        if best
            .as_ref()
            .is_none_or(|(_, b)| result.best_objective > b.best_objective)
        {
            best = Some((seed, result));
        }
    }

    let (seed, result) = best.ok_or_else(|| ScQbfError::InvalidConfig("no seeds given".into()))?;
    info!(
        "multi-start over {} seeds: best objective {} from seed {seed}",
        seeds.len(),
        result.best_objective
    );
    Ok((seed, result))
}
