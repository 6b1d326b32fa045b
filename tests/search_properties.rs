//! Randomized property tests for the search engine.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_cvrp::alns::{
    DestroyOperator, GreedyInsertion, RandomRemoval, RepairOperator, SearchConfig, SearchDriver,
    StringRemoval,
};
use u_cvrp::constructive::nearest_neighbor;
use u_cvrp::distance::DistanceMatrix;
use u_cvrp::problem::ProblemInstance;

fn instance_strategy() -> impl Strategy<Value = ProblemInstance> {
    (2usize..=10)
        .prop_flat_map(|n| {
            (
                proptest::collection::vec((0.0f64..50.0, 0.0f64..50.0), n + 1),
                proptest::collection::vec(1i32..=8, n),
                8i32..=30,
            )
        })
        .prop_map(|(coords, demands, capacity)| {
            let matrix = DistanceMatrix::from_coordinates(&coords);
            let mut all_demands = vec![0];
            all_demands.extend(demands);
            ProblemInstance::new(all_demands, capacity, matrix).expect("generated instance")
        })
}

proptest! {
    /// Any destroy/repair chain keeps every customer in exactly one place
    /// and every route within capacity, at every stage.
    #[test]
    fn destroy_repair_preserves_invariants(
        problem in instance_strategy(),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let random_removal = RandomRemoval::new(0.3);
        let string_removal = StringRemoval::new(2, 3);
        let insertion = GreedyInsertion;

        let mut state = nearest_neighbor(&problem);
        prop_assert!(state.validate(&problem).is_ok());

        for _ in 0..4 {
            let destroyed = random_removal
                .destroy(&problem, &state, &mut rng)
                .expect("destroy");
            prop_assert!(destroyed.validate(&problem).is_ok());
            prop_assert!(destroyed.routes().iter().all(|r| !r.is_empty()));

            let destroyed = string_removal
                .destroy(&problem, &destroyed, &mut rng)
                .expect("destroy");
            prop_assert!(destroyed.validate(&problem).is_ok());

            state = insertion
                .repair(&problem, &destroyed, &mut rng)
                .expect("repair");
            prop_assert!(state.is_feasible());
            prop_assert!(state.validate(&problem).is_ok());
        }
    }

    /// Full runs return a feasible best with a non-increasing trace.
    #[test]
    fn driver_run_is_well_formed(
        problem in instance_strategy(),
        seed in any::<u64>(),
    ) {
        let config = SearchConfig::default()
            .with_destruction_rate(0.25)
            .with_max_iterations(40)
            .with_seed(seed);
        let initial = nearest_neighbor(&problem);
        let result = SearchDriver::run_default(&problem, initial, &config).expect("search");

        prop_assert!(result.best.is_feasible());
        prop_assert!(result.best.validate(&problem).is_ok());
        prop_assert_eq!(result.iterations, 40);
        prop_assert_eq!(result.trace.len(), 41);
        for window in result.trace.windows(2) {
            prop_assert!(window[1] <= window[0]);
        }
        let recomputed = result.best.objective(&problem).expect("objective");
        prop_assert!((recomputed - result.best_cost).abs() < 1e-9);
    }

    /// Identical instance, configuration, and seed reproduce the run
    /// bit-for-bit.
    #[test]
    fn driver_is_deterministic(
        problem in instance_strategy(),
        seed in any::<u64>(),
    ) {
        let config = SearchConfig::default()
            .with_max_iterations(30)
            .with_seed(seed);
        let initial = nearest_neighbor(&problem);

        let first =
            SearchDriver::run_default(&problem, initial.clone(), &config).expect("search");
        let second = SearchDriver::run_default(&problem, initial, &config).expect("search");

        prop_assert_eq!(first.trace, second.trace);
        prop_assert_eq!(first.best, second.best);
        prop_assert_eq!(first.destroy_weights, second.destroy_weights);
        prop_assert_eq!(first.repair_weights, second.repair_weights);
    }
}

/// Three customers on a unit square, demand 5, capacity 10: removal of any
/// single customer followed by greedy reinsertion restores a route set of
/// exactly the original cost.
#[test]
fn single_removal_reinsertion_restores_cost() {
    let matrix = DistanceMatrix::from_coordinates(&[
        (0.0, 0.0),
        (0.0, 10.0),
        (10.0, 0.0),
        (10.0, 10.0),
    ]);
    let problem = ProblemInstance::new(vec![0, 5, 5, 5], 10, matrix).expect("valid instance");

    let initial = nearest_neighbor(&problem);
    assert_eq!(initial.num_routes(), 2);
    let initial_cost = initial.objective(&problem).expect("objective");

    // floor(3 * 0.34) = 1: exactly one customer comes out.
    let removal = RandomRemoval::new(0.34);
    let insertion = GreedyInsertion;
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let destroyed = removal
            .destroy(&problem, &initial, &mut rng)
            .expect("destroy");
        assert_eq!(destroyed.unassigned().len(), 1);

        let repaired = insertion
            .repair(&problem, &destroyed, &mut rng)
            .expect("repair");
        let repaired_cost = repaired.objective(&problem).expect("objective");
        assert!(
            (repaired_cost - initial_cost).abs() < 1e-9,
            "seed {seed}: expected cost {initial_cost}, got {repaired_cost}"
        );
    }
}
