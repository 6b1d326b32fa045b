//! Stopping policy for the search loop.

use std::time::Duration;

use crate::error::{CvrpError, CvrpResult};

/// Time- and/or iteration-bounded stopping predicate.
///
/// The driver consults `done` exactly once per full iteration, so an
/// iteration is never interrupted partway and the incumbent is always
/// well-formed. `progress` reports the consumed fraction of the tightest
/// budget and drives the acceptance threshold decay.
///
/// Wall-clock bounds match production use; iteration bounds make runs
/// reproducible bit-for-bit for a fixed seed.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingPolicy {
    time_budget: Option<Duration>,
    max_iterations: Option<u64>,
}

impl StoppingPolicy {
    /// Creates a policy; at least one bound is required, since the loop has
    /// no other exit path.
    pub fn new(time_budget: Option<Duration>, max_iterations: Option<u64>) -> CvrpResult<Self> {
        if time_budget.is_none() && max_iterations.is_none() {
            return Err(CvrpError::InvalidConfig(
                "stopping policy needs a time budget or an iteration bound".into(),
            ));
        }
        if max_iterations == Some(0) {
            return Err(CvrpError::InvalidConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if time_budget == Some(Duration::ZERO) {
            return Err(CvrpError::InvalidConfig(
                "time budget must be positive".into(),
            ));
        }
        Ok(Self {
            time_budget,
            max_iterations,
        })
    }

    /// Purely wall-clock bounded.
    pub fn max_runtime(budget: Duration) -> CvrpResult<Self> {
        Self::new(Some(budget), None)
    }

    /// Purely iteration bounded.
    pub fn max_iterations(iterations: u64) -> CvrpResult<Self> {
        Self::new(None, Some(iterations))
    }

    /// Whether the search must stop before the next iteration.
    pub fn done(&self, elapsed: Duration, iteration: u64) -> bool {
        if let Some(budget) = self.time_budget {
            if elapsed >= budget {
                return true;
            }
        }
        if let Some(limit) = self.max_iterations {
            if iteration >= limit {
                return true;
            }
        }
        false
    }

    /// Consumed budget fraction in `[0, 1]`: the max over whichever bounds
    /// are set, so the tighter budget drives the schedule.
    pub fn progress(&self, elapsed: Duration, iteration: u64) -> f64 {
        let time_fraction = self
            .time_budget
            .map(|budget| elapsed.as_secs_f64() / budget.as_secs_f64())
            .unwrap_or(0.0);
        let iteration_fraction = self
            .max_iterations
            .map(|limit| iteration as f64 / limit as f64)
            .unwrap_or(0.0);
        time_fraction.max(iteration_fraction).clamp(0.0, 1.0)
    }
}
