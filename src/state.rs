//! Mutable CVRP solution state.

use crate::error::{CvrpError, CvrpResult};
use crate::problem::{ProblemInstance, DEPOT};

/// A CVRP solution under construction or repair.
///
/// Routes are customer index sequences with the depot implicit at both
/// ends; `unassigned` holds customers currently in no route. A state is
/// *feasible* when `unassigned` is empty. Destroy operators move customers
/// into `unassigned`, repair operators move them back; every route stays
/// within vehicle capacity throughout.
///
/// `Clone` is the deep copy: routes and the unassigned list share nothing
/// with the original.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::problem::ProblemInstance;
/// use u_cvrp::state::CvrpState;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let problem = ProblemInstance::new(vec![0, 10, 10], 30, dm).unwrap();
///
/// let state = CvrpState::new(vec![vec![1, 2]], vec![]);
/// // 0→1→2→0 = 1 + 1 + 2
/// assert!((state.objective(&problem).unwrap() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CvrpState {
    routes: Vec<Vec<usize>>,
    unassigned: Vec<usize>,
}

impl CvrpState {
    /// Creates a state from route sequences and an unassigned pool.
    pub fn new(routes: Vec<Vec<usize>>, unassigned: Vec<usize>) -> Self {
        Self { routes, unassigned }
    }

    /// Routes as customer index sequences.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Mutable routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.routes
    }

    /// Customers currently in no route.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Mutable unassigned pool.
    pub fn unassigned_mut(&mut self) -> &mut Vec<usize> {
        &mut self.unassigned
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customers currently assigned to a route.
    pub fn num_assigned(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Whether every customer is routed.
    pub fn is_feasible(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Total travel distance over all routes, depot legs included.
    ///
    /// Only defined for feasible states; fails with
    /// [`CvrpError::InvalidState`] while any customer is unassigned, never
    /// returning a partial sum.
    pub fn objective(&self, problem: &ProblemInstance) -> CvrpResult<f64> {
        if !self.unassigned.is_empty() {
            return Err(CvrpError::InvalidState {
                unassigned: self.unassigned.len(),
            });
        }
        Ok(self
            .routes
            .iter()
            .map(|route| route_cost(route, problem))
            .sum())
    }

    /// Index of the route containing `customer`.
    ///
    /// Fails with [`CvrpError::NotFound`] if the customer is in no route
    /// (e.g. already unassigned) — callers must check membership first when
    /// that is a possibility.
    pub fn find_route(&self, customer: usize) -> CvrpResult<usize> {
        self.routes
            .iter()
            .position(|route| route.contains(&customer))
            .ok_or(CvrpError::NotFound { customer })
    }

    /// Drops empty routes. Invoked after every destroy operation so that no
    /// empty route survives into repair or the next iteration.
    pub fn remove_empty_routes(&mut self) {
        self.routes.retain(|route| !route.is_empty());
    }

    /// Checks the structural invariants against an instance: every customer
    /// in exactly one place, every route within capacity.
    pub fn validate(&self, problem: &ProblemInstance) -> CvrpResult<()> {
        let n = problem.num_customers();
        let mut seen = vec![false; n + 1];

        for (index, route) in self.routes.iter().enumerate() {
            let mut load = 0;
            for &customer in route {
                if customer == DEPOT || customer > n || seen[customer] {
                    return Err(CvrpError::NotFound { customer });
                }
                seen[customer] = true;
                load += problem.demand(customer);
            }
            if load > problem.capacity() {
                return Err(CvrpError::CapacityViolation {
                    route: index,
                    load,
                    capacity: problem.capacity(),
                });
            }
        }
        for &customer in &self.unassigned {
            if customer == DEPOT || customer > n || seen[customer] {
                return Err(CvrpError::NotFound { customer });
            }
            seen[customer] = true;
        }
        if let Some(customer) = (1..=n).find(|&c| !seen[c]) {
            return Err(CvrpError::NotFound { customer });
        }
        Ok(())
    }
}

/// Cost of one route: depot → first, consecutive legs, last → depot.
pub fn route_cost(route: &[usize], problem: &ProblemInstance) -> f64 {
    let Some((&first, _)) = route.split_first() else {
        return 0.0;
    };
    let mut cost = problem.distance(DEPOT, first);
    for pair in route.windows(2) {
        cost += problem.distance(pair[0], pair[1]);
    }
    cost + problem.distance(route[route.len() - 1], DEPOT)
}

/// Total demand carried by one route.
pub fn route_load(route: &[usize], problem: &ProblemInstance) -> i32 {
    route.iter().map(|&c| problem.demand(c)).sum()
}
