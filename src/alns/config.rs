//! Search configuration.

use std::time::Duration;

use crate::error::{CvrpError, CvrpResult};

use super::stop::StoppingPolicy;

/// Configuration for the ALNS search.
///
/// # Scoring
///
/// Each iteration the selected destroy/repair pair receives a reward by
/// outcome tier:
/// - `score_new_best`: found a new global best
/// - `score_improved`: accepted and better than the incumbent
/// - `score_accepted`: accepted despite being worse
/// - rejected candidates score zero
///
/// The pair's weights are updated immediately via exponential smoothing
/// with `selector_decay`. The tier values are tunable defaults, not a
/// contract.
///
/// # Acceptance
///
/// Record-to-record travel: a candidate is accepted when its objective is
/// within a threshold of the best objective. The threshold starts at
/// `initial_objective * acceptance_start_fraction` and decays linearly to
/// `acceptance_end_gap` over the search budget.
///
/// # Examples
///
/// ```
/// use u_cvrp::alns::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_destruction_rate(0.1)
///     .with_max_iterations(5000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Fraction of customers removed by random removal, in (0, 1].
    /// At least one customer is always removed.
    pub destruction_rate: f64,

    /// Maximum number of routes string removal may touch per call.
    pub max_string_removals: usize,

    /// Configured cap on removed string length. The effective cap is the
    /// larger of this and the current average route length.
    pub max_string_size: usize,

    /// Exponential smoothing factor for operator weights, in (0, 1).
    /// Higher values adapt more slowly.
    pub selector_decay: f64,

    /// Reward for finding a new global best.
    pub score_new_best: f64,

    /// Reward for an accepted candidate that beats the incumbent.
    pub score_improved: f64,

    /// Reward for an accepted candidate that is worse than the incumbent.
    pub score_accepted: f64,

    /// Starting acceptance gap as a fraction of the initial objective.
    pub acceptance_start_fraction: f64,

    /// Final acceptance gap reached at the end of the budget.
    pub acceptance_end_gap: f64,

    /// Wall-clock budget. Optional if an iteration bound is set.
    pub time_budget: Option<Duration>,

    /// Iteration budget. Optional if a time budget is set. Runs bounded
    /// only by iterations are reproducible bit-for-bit for a fixed seed.
    pub max_iterations: Option<u64>,

    /// Random seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            destruction_rate: 0.05,
            max_string_removals: 2,
            max_string_size: 12,
            selector_decay: 0.8,
            score_new_best: 25.0,
            score_improved: 5.0,
            score_accepted: 1.0,
            acceptance_start_fraction: 0.02,
            acceptance_end_gap: 0.0,
            time_budget: None,
            max_iterations: Some(10_000),
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_destruction_rate(mut self, rate: f64) -> Self {
        self.destruction_rate = rate;
        self
    }

    pub fn with_string_removal(mut self, max_removals: usize, max_size: usize) -> Self {
        self.max_string_removals = max_removals;
        self.max_string_size = max_size;
        self
    }

    pub fn with_selector_decay(mut self, decay: f64) -> Self {
        self.selector_decay = decay;
        self
    }

    pub fn with_scores(mut self, new_best: f64, improved: f64, accepted: f64) -> Self {
        self.score_new_best = new_best;
        self.score_improved = improved;
        self.score_accepted = accepted;
        self
    }

    pub fn with_acceptance(mut self, start_fraction: f64, end_gap: f64) -> Self {
        self.acceptance_start_fraction = start_fraction;
        self.acceptance_end_gap = end_gap;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the stopping policy from the configured bounds.
    pub fn stopping_policy(&self) -> CvrpResult<StoppingPolicy> {
        StoppingPolicy::new(self.time_budget, self.max_iterations)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CvrpResult<()> {
        if self.destruction_rate <= 0.0 || self.destruction_rate > 1.0 {
            return Err(CvrpError::InvalidConfig(format!(
                "destruction_rate must be in (0, 1], got {}",
                self.destruction_rate
            )));
        }
        if self.max_string_removals == 0 {
            return Err(CvrpError::InvalidConfig(
                "max_string_removals must be at least 1".into(),
            ));
        }
        if self.max_string_size == 0 {
            return Err(CvrpError::InvalidConfig(
                "max_string_size must be at least 1".into(),
            ));
        }
        if self.selector_decay <= 0.0 || self.selector_decay >= 1.0 {
            return Err(CvrpError::InvalidConfig(format!(
                "selector_decay must be in (0, 1), got {}",
                self.selector_decay
            )));
        }
        if self.score_new_best < 0.0 || self.score_improved < 0.0 || self.score_accepted < 0.0 {
            return Err(CvrpError::InvalidConfig(
                "reward scores must be nonnegative".into(),
            ));
        }
        if self.acceptance_start_fraction < 0.0 {
            return Err(CvrpError::InvalidConfig(format!(
                "acceptance_start_fraction must be nonnegative, got {}",
                self.acceptance_start_fraction
            )));
        }
        if self.acceptance_end_gap < 0.0 {
            return Err(CvrpError::InvalidConfig(format!(
                "acceptance_end_gap must be nonnegative, got {}",
                self.acceptance_end_gap
            )));
        }
        self.stopping_policy().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.destruction_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.max_string_removals, 2);
        assert_eq!(config.max_string_size, 12);
        assert!((config.selector_decay - 0.8).abs() < 1e-10);
        assert!((config.score_new_best - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_builder_chain() {
        let config = SearchConfig::default()
            .with_destruction_rate(0.2)
            .with_string_removal(3, 8)
            .with_selector_decay(0.9)
            .with_scores(10.0, 4.0, 2.0)
            .with_acceptance(0.05, 1.0)
            .with_time_budget(Duration::from_secs(30))
            .with_max_iterations(500)
            .with_seed(42);

        assert!((config.destruction_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.max_string_removals, 3);
        assert_eq!(config.max_string_size, 8);
        assert_eq!(config.time_budget, Some(Duration::from_secs(30)));
        assert_eq!(config.max_iterations, Some(500));
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_destruction_rate() {
        assert!(SearchConfig::default()
            .with_destruction_rate(0.0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_destruction_rate(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_decay() {
        assert!(SearchConfig::default()
            .with_selector_decay(0.0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_selector_decay(1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_string_caps() {
        assert!(SearchConfig::default()
            .with_string_removal(0, 12)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_string_removal(2, 0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_requires_a_bound() {
        let mut config = SearchConfig::default();
        config.max_iterations = None;
        assert!(config.validate().is_err());

        let config = config.with_time_budget(Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_negative_acceptance() {
        assert!(SearchConfig::default()
            .with_acceptance(-0.1, 0.0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_acceptance(0.02, -1.0)
            .validate()
            .is_err());
    }
}
