//! Destroy operators.
//!
//! # Operators
//!
//! - [`RandomRemoval`] — removes uniformly random customers
//! - [`StringRemoval`] — removes contiguous route segments around a random
//!   center, exploiting spatial locality
//!
//! # References
//!
//! Ropke & Pisinger (2006); Christiaens & Vanden Berghe (2020), "Slack
//! Induction by String Removals for Vehicle Routing Problems"

use rand::Rng;

use super::config::SearchConfig;
use super::types::DestroyOperator;
use crate::error::{CvrpError, CvrpResult};
use crate::problem::ProblemInstance;
use crate::state::CvrpState;

/// Removes `max(1, floor(n * destruction_rate))` distinct customers chosen
/// uniformly without replacement.
///
/// Simple baseline operator; keeps the search diversified.
#[derive(Debug, Clone)]
pub struct RandomRemoval {
    destruction_rate: f64,
}

impl RandomRemoval {
    /// Creates the operator with the given destruction fraction in (0, 1].
    pub fn new(destruction_rate: f64) -> Self {
        Self { destruction_rate }
    }
}

impl DestroyOperator for RandomRemoval {
    fn name(&self) -> &str {
        "random_removal"
    }

    fn destroy<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState> {
        let mut destroyed = state.clone();
        let n = problem.num_customers();
        let count = ((n as f64 * self.destruction_rate).floor() as usize).clamp(1, n);

        for index in rand::seq::index::sample(rng, n, count).iter() {
            let customer = index + 1;
            if destroyed.unassigned().contains(&customer) {
                continue;
            }
            let route_index = destroyed.find_route(customer)?;
            let route = &mut destroyed.routes_mut()[route_index];
            if let Some(position) = route.iter().position(|&c| c == customer) {
                route.remove(position);
            }
            destroyed.unassigned_mut().push(customer);
        }

        destroyed.remove_empty_routes();
        Ok(destroyed)
    }
}

/// Removes contiguous cyclic substrings ("strings") from the routes nearest
/// to a randomly chosen center customer.
///
/// Geographically clustered removals leave repair with far better insertion
/// opportunities than uniform random removal. The string length cap is
/// `max(max_size, average route length)`, recomputed from the current state
/// on every call.
#[derive(Debug, Clone)]
pub struct StringRemoval {
    max_removals: usize,
    max_size: usize,
}

impl StringRemoval {
    /// Creates the operator with a cap on touched routes and a configured
    /// string length cap.
    pub fn new(max_removals: usize, max_size: usize) -> Self {
        Self {
            max_removals,
            max_size,
        }
    }
}

impl DestroyOperator for StringRemoval {
    fn name(&self) -> &str {
        "string_removal"
    }

    fn destroy<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState> {
        let mut destroyed = state.clone();
        if destroyed.num_assigned() == 0 {
            return Ok(destroyed);
        }

        let average_route_len = destroyed.num_assigned() / destroyed.num_routes();
        let max_size = self.max_size.max(average_route_len).max(1);
        let max_removals = self.max_removals.min(destroyed.num_routes());

        let center = rng.random_range(1..=problem.num_customers());
        // Route indices stay stable during the loop; empty routes are only
        // pruned at the end.
        let mut touched: Vec<usize> = Vec::new();

        for &neighbor in problem.neighbors(center) {
            if touched.len() >= max_removals {
                break;
            }
            if destroyed.unassigned().contains(&neighbor) {
                continue;
            }
            let route_index = destroyed.find_route(neighbor)?;
            if touched.contains(&route_index) {
                continue;
            }

            let removed = remove_string(
                &mut destroyed.routes_mut()[route_index],
                neighbor,
                max_size,
                rng,
            )?;
            destroyed.unassigned_mut().extend(removed);
            touched.push(route_index);
        }

        destroyed.remove_empty_routes();
        Ok(destroyed)
    }
}

/// Removes a contiguous cyclic substring containing `customer`.
///
/// The length is uniform in `[1, min(route_len, max_size)]`; the start
/// offset is drawn so the substring is guaranteed to cover the customer,
/// wrapping around the route ends.
fn remove_string<R: Rng>(
    route: &mut Vec<usize>,
    customer: usize,
    max_size: usize,
    rng: &mut R,
) -> CvrpResult<Vec<usize>> {
    let len = route.len();
    let anchor = route
        .iter()
        .position(|&c| c == customer)
        .ok_or(CvrpError::NotFound { customer })?;

    let size = rng.random_range(1..=len.min(max_size));
    let offset = rng.random_range(0..size);
    let start = (anchor + len - offset) % len;

    let mut indices: Vec<usize> = (0..size).map(|i| (start + i) % len).collect();
    indices.sort_unstable();

    let mut removed = Vec::with_capacity(size);
    for &index in indices.iter().rev() {
        removed.push(route.remove(index));
    }
    Ok(removed)
}

/// The closed set of destroy operators.
///
/// Enum dispatch keeps operator selection exhaustively checked when a new
/// operator is added.
#[derive(Debug, Clone)]
pub enum DestroyOp {
    /// Uniform random customer removal.
    Random(RandomRemoval),
    /// Correlated string removal.
    String(StringRemoval),
}

impl DestroyOp {
    /// The default destroy portfolio for a configuration.
    pub fn portfolio(config: &SearchConfig) -> Vec<DestroyOp> {
        vec![
            DestroyOp::Random(RandomRemoval::new(config.destruction_rate)),
            DestroyOp::String(StringRemoval::new(
                config.max_string_removals,
                config.max_string_size,
            )),
        ]
    }
}

impl DestroyOperator for DestroyOp {
    fn name(&self) -> &str {
        match self {
            DestroyOp::Random(op) => op.name(),
            DestroyOp::String(op) => op.name(),
        }
    }

    fn destroy<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState> {
        match self {
            DestroyOp::Random(op) => op.destroy(problem, state, rng),
            DestroyOp::String(op) => op.destroy(problem, state, rng),
        }
    }
}
