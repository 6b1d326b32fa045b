//! Clarke-Wright parallel savings construction.

use crate::problem::{ProblemInstance, DEPOT};
use crate::state::CvrpState;

/// Builds an initial solution with the parallel savings algorithm.
///
/// Every customer starts in its own route. Merging the routes ending at
/// `i` and starting at `j` saves `d(i,0) + d(0,j) - d(i,j)`; merges are
/// applied best-savings-first whenever both customers are endpoints of
/// distinct routes and the combined demand fits the vehicle. Nonpositive
/// savings are skipped, so a merge never worsens the solution.
///
/// Deterministic: savings ties break on smaller inter-customer distance,
/// then on the customer pair.
///
/// # References
///
/// Clarke & Wright (1964), "Scheduling of Vehicles from a Central Depot to
/// a Number of Delivery Points"
pub fn clarke_wright(problem: &ProblemInstance) -> CvrpState {
    let n = problem.num_customers();

    // Singleton route per customer; routes[r] = None once merged away.
    let mut routes: Vec<Option<Vec<usize>>> = (1..=n).map(|c| Some(vec![c])).collect();
    let mut loads: Vec<i32> = (1..=n).map(|c| problem.demand(c)).collect();
    let mut route_of: Vec<usize> = (0..=n).map(|c| c.saturating_sub(1)).collect();

    for (i, j) in savings_order(problem) {
        let (ri, rj) = (route_of[i], route_of[j]);
        if ri == rj {
            continue;
        }
        if loads[ri] + loads[rj] > problem.capacity() {
            continue;
        }
        let (Some(route_i), Some(route_j)) = (routes[ri].as_ref(), routes[rj].as_ref()) else {
            continue;
        };

        // Both customers must be route endpoints.
        let i_first = route_i.first() == Some(&i);
        let i_last = route_i.last() == Some(&i);
        let j_first = route_j.first() == Some(&j);
        let j_last = route_j.last() == Some(&j);
        if !(i_first || i_last) || !(j_first || j_last) {
            continue;
        }

        // Orient so i sits at the tail of its route and j at the head.
        let (Some(mut merged), Some(mut tail)) = (routes[ri].take(), routes[rj].take()) else {
            continue;
        };
        if i_first && merged.len() > 1 {
            merged.reverse();
        }
        if j_last && tail.len() > 1 {
            tail.reverse();
        }
        merged.extend(tail);

        for &customer in &merged {
            route_of[customer] = ri;
        }
        loads[ri] += loads[rj];
        routes[ri] = Some(merged);
    }

    CvrpState::new(routes.into_iter().flatten().collect(), Vec::new())
}

/// Customer pairs in descending savings order, positive savings only.
fn savings_order(problem: &ProblemInstance) -> Vec<(usize, usize)> {
    let n = problem.num_customers();
    let mut savings: Vec<(f64, f64, usize, usize)> = Vec::with_capacity(n * (n - 1) / 2);
    for i in 1..=n {
        for j in (i + 1)..=n {
            let s = problem.distance(i, DEPOT) + problem.distance(DEPOT, j)
                - problem.distance(i, j);
            if s > 0.0 {
                savings.push((s, problem.distance(i, j), i, j));
            }
        }
    }
    savings.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.2.cmp(&b.2))
            .then(a.3.cmp(&b.3))
    });
    savings.into_iter().map(|(_, _, i, j)| (i, j)).collect()
}
