//! Search execution loop.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::accept::RecordToRecordTravel;
use super::config::SearchConfig;
use super::destroy::DestroyOp;
use super::repair::RepairOp;
use super::selector::{AdaptiveSelector, Outcome};
use super::types::{DestroyOperator, RepairOperator};
use crate::error::{CvrpError, CvrpResult};
use crate::problem::ProblemInstance;
use crate::state::CvrpState;

/// Result of a search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The best solution found.
    pub best: CvrpState,

    /// Objective of the best solution.
    pub best_cost: f64,

    /// Best objective after each iteration, starting with the initial
    /// objective. Non-increasing.
    pub trace: Vec<f64>,

    /// Number of completed iterations.
    pub iterations: u64,

    /// Wall-clock time spent.
    pub elapsed: Duration,

    /// Number of new global bests found.
    pub improvements: usize,

    /// Final destroy operator weights.
    pub destroy_weights: Vec<f64>,

    /// Final repair operator weights.
    pub repair_weights: Vec<f64>,
}

/// Executes the destroy/repair search loop.
///
/// The driver owns all search state — incumbent, best, selector weights,
/// and the seeded random stream — for the duration of a run; nothing is
/// shared or ambient. Each iteration destroys a copy of the incumbent,
/// repairs it to feasibility, and decides acceptance by record-to-record
/// travel against the best objective. The stopping policy is consulted
/// only at iteration boundaries, so the returned state is always the
/// product of a fully completed iteration.
pub struct SearchDriver;

impl SearchDriver {
    /// Runs the search with the default operator portfolio.
    pub fn run_default(
        problem: &ProblemInstance,
        initial: CvrpState,
        config: &SearchConfig,
    ) -> CvrpResult<SearchResult> {
        let destroy_ops = DestroyOp::portfolio(config);
        let repair_ops = RepairOp::portfolio(config);
        Self::run(problem, initial, &destroy_ops, &repair_ops, config)
    }

    /// Runs the search.
    ///
    /// `initial` must be feasible; construction heuristics are expected to
    /// hand over a complete solution. An infeasible initial state fails
    /// fast with [`CvrpError::InvalidState`].
    pub fn run<D, P>(
        problem: &ProblemInstance,
        initial: CvrpState,
        destroy_ops: &[D],
        repair_ops: &[P],
        config: &SearchConfig,
    ) -> CvrpResult<SearchResult>
    where
        D: DestroyOperator,
        P: RepairOperator,
    {
        config.validate()?;
        if destroy_ops.is_empty() {
            return Err(CvrpError::InvalidConfig(
                "at least one destroy operator required".into(),
            ));
        }
        if repair_ops.is_empty() {
            return Err(CvrpError::InvalidConfig(
                "at least one repair operator required".into(),
            ));
        }
        let policy = config.stopping_policy()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut incumbent = initial;
        let mut incumbent_cost = incumbent.objective(problem)?;
        incumbent.validate(problem)?;

        let mut best = incumbent.clone();
        let mut best_cost = incumbent_cost;

        let accept = RecordToRecordTravel::autofit(
            incumbent_cost,
            config.acceptance_start_fraction,
            config.acceptance_end_gap,
        );
        let mut selector = AdaptiveSelector::new(destroy_ops.len(), repair_ops.len(), config);

        let mut trace = vec![best_cost];
        let mut improvements = 0usize;
        let mut iteration = 0u64;
        let start = Instant::now();

        while !policy.done(start.elapsed(), iteration) {
            let destroy_index = selector.select_destroy(&mut rng);
            let repair_index = selector.select_repair(&mut rng);

            let destroyed = destroy_ops[destroy_index].destroy(problem, &incumbent, &mut rng)?;
            let candidate = repair_ops[repair_index].repair(problem, &destroyed, &mut rng)?;

            candidate.validate(problem)?;
            let candidate_cost = candidate.objective(problem)?;

            let progress = policy.progress(start.elapsed(), iteration);
            let accepted = accept.accepts(candidate_cost, best_cost, progress);

            let outcome = if candidate_cost < best_cost {
                Outcome::NewBest
            } else if accepted && candidate_cost < incumbent_cost {
                Outcome::Improved
            } else if accepted {
                Outcome::Accepted
            } else {
                Outcome::Rejected
            };

            if candidate_cost < best_cost {
                best = candidate.clone();
                best_cost = candidate_cost;
                improvements += 1;
            }
            if accepted {
                incumbent = candidate;
                incumbent_cost = candidate_cost;
            }

            selector.update(destroy_index, repair_index, outcome);
            trace.push(best_cost);
            iteration += 1;
        }

        Ok(SearchResult {
            best,
            best_cost,
            trace,
            iterations: iteration,
            elapsed: start.elapsed(),
            improvements,
            destroy_weights: selector.destroy_weights().to_vec(),
            repair_weights: selector.repair_weights().to_vec(),
        })
    }
}
