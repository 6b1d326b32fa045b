//! Nearest-neighbor construction.

use crate::problem::{ProblemInstance, DEPOT};
use crate::state::CvrpState;

/// Builds an initial solution by iteratively extending routes with the
/// nearest unvisited customer until the vehicle capacity is met, then
/// opening a new route.
///
/// Deterministic: ties in the neighbor order are broken by customer index.
/// The returned state is feasible (every customer routed, every route
/// within capacity).
///
/// # Examples
///
/// ```
/// use u_cvrp::constructive::nearest_neighbor;
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::problem::ProblemInstance;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let problem = ProblemInstance::new(vec![0, 10, 10], 30, dm).unwrap();
/// let state = nearest_neighbor(&problem);
/// assert!(state.is_feasible());
/// ```
pub fn nearest_neighbor(problem: &ProblemInstance) -> CvrpState {
    let n = problem.num_customers();
    let mut unvisited = vec![true; n + 1];
    unvisited[DEPOT] = false;
    let mut remaining = n;
    let mut routes = Vec::new();

    while remaining > 0 {
        let mut route: Vec<usize> = Vec::new();
        let mut load = 0;

        loop {
            let current = route.last().copied().unwrap_or(DEPOT);
            let Some(next) = problem
                .neighbors(current)
                .iter()
                .copied()
                .find(|&c| unvisited[c])
            else {
                break;
            };
            if load + problem.demand(next) > problem.capacity() {
                break;
            }
            route.push(next);
            unvisited[next] = false;
            load += problem.demand(next);
            remaining -= 1;
        }

        routes.push(route);
    }

    CvrpState::new(routes, Vec::new())
}
