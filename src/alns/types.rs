//! Core traits for the destroy/repair operator set.

use rand::Rng;

use crate::error::CvrpResult;
use crate::problem::ProblemInstance;
use crate::state::CvrpState;

/// A destroy operator moves customers out of their routes into the
/// unassigned pool.
///
/// The input state is feasible or partially destroyed; the output must keep
/// every remaining route within capacity and must contain no empty routes.
///
/// # References
///
/// Ropke & Pisinger (2006), Section 2
pub trait DestroyOperator {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Removes some customers from the solution.
    ///
    /// Fails only when the state violates the one-place-per-customer
    /// invariant (a route lookup misses); that is a defect upstream, not a
    /// recoverable condition.
    fn destroy<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState>;
}

/// A repair operator reinserts every unassigned customer, producing a
/// feasible solution.
///
/// # References
///
/// Ropke & Pisinger (2006), Section 2
pub trait RepairOperator {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Reinserts all unassigned customers.
    fn repair<R: Rng>(
        &self,
        problem: &ProblemInstance,
        state: &CvrpState,
        rng: &mut R,
    ) -> CvrpResult<CvrpState>;
}
