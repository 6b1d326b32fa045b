//! Capacitated vehicle routing solver built on adaptive large neighborhood
//! search (ALNS).
//!
//! Routes a set of customers with known demands from a single depot,
//! minimizing total travel distance under a per-vehicle capacity bound. A
//! constructive heuristic produces an initial solution; the ALNS engine
//! then iteratively destroys and repairs it, adapting operator selection
//! to past performance and accepting candidates by record-to-record
//! travel.
//!
//! # Modules
//!
//! - [`problem`] / [`distance`] — immutable instance data: demands,
//!   capacity, symmetric distance matrix
//! - [`state`] — mutable solution state (routes + unassigned pool)
//! - [`constructive`] — initial solution builders (nearest neighbor,
//!   Clarke-Wright savings)
//! - [`alns`] — the search engine: operators, adaptive selector,
//!   acceptance, stopping policy, driver
//! - [`error`] — the crate-wide error taxonomy
//!
//! # Example
//!
//! ```
//! use u_cvrp::alns::{SearchConfig, SearchDriver};
//! use u_cvrp::constructive::nearest_neighbor;
//! use u_cvrp::distance::DistanceMatrix;
//! use u_cvrp::problem::ProblemInstance;
//!
//! let dm = DistanceMatrix::from_coordinates(&[
//!     (0.0, 0.0),
//!     (0.0, 10.0),
//!     (10.0, 0.0),
//!     (10.0, 10.0),
//! ]);
//! let problem = ProblemInstance::new(vec![0, 5, 5, 5], 10, dm).unwrap();
//!
//! let initial = nearest_neighbor(&problem);
//! let config = SearchConfig::default()
//!     .with_max_iterations(1000)
//!     .with_seed(42);
//! let result = SearchDriver::run_default(&problem, initial, &config).unwrap();
//!
//! assert!(result.best.is_feasible());
//! ```

pub mod alns;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod problem;
pub mod state;
