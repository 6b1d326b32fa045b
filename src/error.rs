//! Error types for u-cvrp.
//!
//! Every fallible operation returns [`CvrpResult`]. None of these errors is
//! retried inside the search loop: a failing iteration indicates a broken
//! invariant and propagates straight out of the driver.

use thiserror::Error;

/// Result type alias for u-cvrp operations.
pub type CvrpResult<T> = Result<T, CvrpError>;

/// Unified error type for all u-cvrp operations.
#[derive(Debug, Error)]
pub enum CvrpError {
    /// The objective was requested on a state that still has unassigned
    /// customers. The objective is only defined for complete solutions.
    #[error("objective requested on infeasible state: {unassigned} customers unassigned")]
    InvalidState {
        /// Number of customers currently unassigned.
        unassigned: usize,
    },

    /// A route lookup was performed for a customer that is in no route.
    /// Indicates the every-customer-exactly-once invariant was broken
    /// upstream.
    #[error("customer {customer} is not assigned to any route")]
    NotFound {
        /// The customer that could not be located.
        customer: usize,
    },

    /// A route's total demand exceeds the vehicle capacity. Operators must
    /// never produce such a state; detecting one is fatal.
    #[error("route {route} carries load {load}, exceeding capacity {capacity}")]
    CapacityViolation {
        /// Index of the offending route.
        route: usize,
        /// Total demand on the route.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },

    /// Invalid configuration or problem instance.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
