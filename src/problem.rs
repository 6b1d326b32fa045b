//! CVRP problem instance.

use crate::distance::DistanceMatrix;
use crate::error::{CvrpError, CvrpResult};

/// Vertex index of the depot.
pub const DEPOT: usize = 0;

/// An immutable CVRP instance: customer demands, a homogeneous vehicle
/// capacity, and a symmetric distance matrix over depot + customers.
///
/// Customers are indexed `1..=n`; index 0 is the depot. Per-vertex
/// nearest-neighbor lists (ascending distance, depot excluded) are
/// precomputed at construction since the matrix never changes during a
/// search.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
/// use u_cvrp::problem::ProblemInstance;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)]);
/// let problem = ProblemInstance::new(vec![0, 5, 5], 10, dm).unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.demand(1), 5);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    demands: Vec<i32>,
    capacity: i32,
    distances: DistanceMatrix,
    neighbors: Vec<Vec<usize>>,
}

impl ProblemInstance {
    /// Creates a validated instance.
    ///
    /// `demands[0]` is the depot and must be zero; every customer demand
    /// must be nonnegative and fit an empty vehicle (otherwise the instance
    /// has no feasible solution at all).
    pub fn new(demands: Vec<i32>, capacity: i32, distances: DistanceMatrix) -> CvrpResult<Self> {
        if demands.len() < 2 {
            return Err(CvrpError::InvalidConfig(
                "instance needs a depot and at least one customer".into(),
            ));
        }
        if demands.len() != distances.size() {
            return Err(CvrpError::InvalidConfig(format!(
                "demand vector length {} does not match matrix size {}",
                demands.len(),
                distances.size()
            )));
        }
        if capacity <= 0 {
            return Err(CvrpError::InvalidConfig(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        if demands[DEPOT] != 0 {
            return Err(CvrpError::InvalidConfig(format!(
                "depot demand must be zero, got {}",
                demands[DEPOT]
            )));
        }
        for (customer, &demand) in demands.iter().enumerate().skip(1) {
            if demand < 0 {
                return Err(CvrpError::InvalidConfig(format!(
                    "customer {customer} has negative demand {demand}"
                )));
            }
            if demand > capacity {
                return Err(CvrpError::InvalidConfig(format!(
                    "customer {customer} demand {demand} exceeds capacity {capacity}"
                )));
            }
        }

        let neighbors = build_neighbor_lists(&distances);
        Ok(Self {
            demands,
            capacity,
            distances,
            neighbors,
        })
    }

    /// Number of customers `n` (depot excluded).
    pub fn num_customers(&self) -> usize {
        self.demands.len() - 1
    }

    /// Demand of a vertex (zero for the depot).
    #[inline]
    pub fn demand(&self, vertex: usize) -> i32 {
        self.demands[vertex]
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Distance between two vertices.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Customers sorted by ascending distance from `vertex`, depot
    /// excluded. A customer's own list starts with itself (distance zero).
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.neighbors[vertex]
    }
}

/// Sorts, per vertex, all customers by ascending distance. Ties break on
/// the customer index so the order is fully deterministic.
fn build_neighbor_lists(distances: &DistanceMatrix) -> Vec<Vec<usize>> {
    let size = distances.size();
    (0..size)
        .map(|from| {
            let mut order: Vec<usize> = (1..size).collect();
            order.sort_by(|&a, &b| {
                distances
                    .get(from, a)
                    .partial_cmp(&distances.get(from, b))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.cmp(&b))
            });
            order
        })
        .collect()
}
