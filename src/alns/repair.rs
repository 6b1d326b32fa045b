//! Repair operators.

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::SearchConfig;
use super::types::RepairOperator;
use crate::error::CvrpResult;
use crate::problem::{ProblemInstance, DEPOT};
use crate::state::{route_load, CvrpState};

/// Reinserts every unassigned customer at its globally cheapest feasible
/// position, opening a new route when no position fits.
///
/// The unassigned pool is shuffled first so equally greedy runs break ties
/// differently; within one scan, the first position found at the minimum
/// cost wins.
#[derive(Debug, Clone)]
pub struct GreedyInsertion;

impl RepairOperator for GreedyInsertion {
    fn name(&self) -> &str {
        "greedy_insertion"
    }

    fn repair<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState> {
        let mut repaired = state.clone();
        repaired.unassigned_mut().shuffle(rng);

        while let Some(customer) = repaired.unassigned_mut().pop() {
            match best_insert(problem, &repaired, customer) {
                Some((route_index, position)) => {
                    repaired.routes_mut()[route_index].insert(position, customer);
                }
                None => repaired.routes_mut().push(vec![customer]),
            }
        }
        Ok(repaired)
    }
}

/// Finds the cheapest feasible `(route, position)` for a customer, or
/// `None` when no route can take its demand.
fn best_insert(
    problem: &ProblemInstance,
    state: &CvrpState,
    customer: usize,
) -> Option<(usize, usize)> {
    let mut best: Option<(f64, usize, usize)> = None;

    for (route_index, route) in state.routes().iter().enumerate() {
        if route_load(route, problem) + problem.demand(customer) > problem.capacity() {
            continue;
        }
        for position in 0..=route.len() {
            let pred = if position == 0 {
                DEPOT
            } else {
                route[position - 1]
            };
            let succ = if position == route.len() {
                DEPOT
            } else {
                route[position]
            };
            let cost = problem.distance(pred, customer) + problem.distance(customer, succ)
                - problem.distance(pred, succ);

            if best.is_none_or(|(best_cost, _, _)| cost < best_cost) {
                best = Some((cost, route_index, position));
            }
        }
    }

    best.map(|(_, route_index, position)| (route_index, position))
}

/// The closed set of repair operators.
#[derive(Debug, Clone)]
pub enum RepairOp {
    /// Cheapest-position greedy insertion.
    Greedy(GreedyInsertion),
}

impl RepairOp {
    /// The default repair portfolio for a configuration.
    pub fn portfolio(_config: &SearchConfig) -> Vec<RepairOp> {
        vec![RepairOp::Greedy(GreedyInsertion)]
    }
}

impl RepairOperator for RepairOp {
    fn name(&self) -> &str {
        match self {
            RepairOp::Greedy(op) => op.name(),
        }
    }

    fn repair<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState> {
        match self {
            RepairOp::Greedy(op) => op.repair(problem, state, rng),
        }
    }
}
