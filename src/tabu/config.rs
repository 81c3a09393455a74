//! Tabu Search configuration.

use std::time::Duration;

/// What the search does when every candidate move is tabu (and none
/// satisfies aspiration) or no feasible move exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoMovePolicy {
    /// Count the iteration as a no-op and keep going; tabu entries expire
    /// as the counter advances.
    #[default]
    Idle,
    /// End the run with [`StopReason::NoAdmissibleMove`](super::StopReason::NoAdmissibleMove).
    Stop,
}

/// Configuration parameters for Tabu Search.
///
/// At least one of `max_iterations`, `time_limit` and `patience` must be
/// set; [`validate`](Self::validate) rejects an unbounded run instead of
/// silently capping it.
///
/// # Examples
///
/// ```
/// use scqbf_tabu::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tenure(7)
///     .with_patience(200)
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, Some(1000));
/// assert_eq!(config.tenure, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// How many iterations the reverse of an applied move stays forbidden.
    pub tenure: usize,
    /// Maximum number of iterations (applied or idle). `None` = unbounded.
    pub max_iterations: Option<usize>,
    /// Wall-clock budget, polled between iterations. `None` = unbounded.
    pub time_limit: Option<Duration>,
    /// Maximum iterations without a new best. `None` = unbounded.
    pub patience: Option<usize>,
    /// Whether a tabu move that would beat the best objective is allowed.
    pub aspiration: bool,
    pub no_move_policy: NoMovePolicy,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 7,
            max_iterations: Some(1000),
            time_limit: None,
            patience: None,
            aspiration: true,
            no_move_policy: NoMovePolicy::Idle,
        }
    }
}

impl TabuConfig {
    /// Sets the tabu tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Removes the iteration cap; another limit must then be set.
    pub fn unbounded_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the wall-clock budget in seconds. Infinite or too large values
    /// clear the limit.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit = Duration::try_from_secs_f64(secs.max(0.0)).ok();
        self
    }

    /// Sets the maximum number of iterations without improvement.
    pub fn with_patience(mut self, n: usize) -> Self {
        self.patience = Some(n);
        self
    }

    /// Enables or disables the aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_no_move_policy(mut self, policy: NoMovePolicy) -> Self {
        self.no_move_policy = policy;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.tenure == 0 {
            return Err("tenure must be positive".into());
        }
        if self.max_iterations == Some(0) {
            return Err("max_iterations must be positive".into());
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err("time_limit must be positive".into());
        }
        if self.patience == Some(0) {
            return Err("patience must be positive".into());
        }
        if self.max_iterations.is_none() && self.time_limit.is_none() && self.patience.is_none() {
            return Err("at least one of max_iterations, time_limit, patience must be set".into());
        }
        Ok(())
    }
}
