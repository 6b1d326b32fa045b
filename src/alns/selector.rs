//! Adaptive operator selection.

use rand::Rng;

use super::config::SearchConfig;

/// How one iteration's candidate fared against the incumbent and the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Candidate beat the best solution found so far.
    NewBest,
    /// Candidate was accepted and beat the incumbent.
    Improved,
    /// Candidate was accepted despite being no better than the incumbent.
    Accepted,
    /// Candidate was rejected.
    Rejected,
}

/// Roulette-wheel operator selection with per-iteration weight smoothing.
///
/// Destroy and repair operators carry independent weight vectors,
/// initialized equal. Selection probability is proportional to weight, so
/// an operator in a bad streak is still drawn occasionally and can recover.
/// After each iteration the chosen pair is updated with
/// `w ← decay * w + (1 - decay) * reward`, where the reward depends on the
/// iteration [`Outcome`].
///
/// # References
///
/// Ropke & Pisinger (2006), Section 3
#[derive(Debug, Clone)]
pub struct AdaptiveSelector {
    destroy_weights: Vec<f64>,
    repair_weights: Vec<f64>,
    decay: f64,
    score_new_best: f64,
    score_improved: f64,
    score_accepted: f64,
}

impl AdaptiveSelector {
    /// Creates a selector for the given operator counts, reading decay and
    /// reward scores from the configuration.
    pub fn new(num_destroy: usize, num_repair: usize, config: &SearchConfig) -> Self {
        Self {
            destroy_weights: vec![1.0; num_destroy],
            repair_weights: vec![1.0; num_repair],
            decay: config.selector_decay,
            score_new_best: config.score_new_best,
            score_improved: config.score_improved,
            score_accepted: config.score_accepted,
        }
    }

    /// Samples a destroy operator index.
    pub fn select_destroy<R: Rng>(&self, rng: &mut R) -> usize {
        roulette(&self.destroy_weights, rng)
    }

    /// Samples a repair operator index.
    pub fn select_repair<R: Rng>(&self, rng: &mut R) -> usize {
        roulette(&self.repair_weights, rng)
    }

    /// Feeds one iteration's outcome back into the weights of the operator
    /// pair that produced it.
    pub fn update(&mut self, destroy: usize, repair: usize, outcome: Outcome) {
        let reward = self.reward(outcome);
        let decay = self.decay;
        self.destroy_weights[destroy] =
            decay * self.destroy_weights[destroy] + (1.0 - decay) * reward;
        self.repair_weights[repair] =
            decay * self.repair_weights[repair] + (1.0 - decay) * reward;
    }

    /// Current destroy weights.
    pub fn destroy_weights(&self) -> &[f64] {
        &self.destroy_weights
    }

    /// Current repair weights.
    pub fn repair_weights(&self) -> &[f64] {
        &self.repair_weights
    }

    fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::NewBest => self.score_new_best,
            Outcome::Improved => self.score_improved,
            Outcome::Accepted => self.score_accepted,
            Outcome::Rejected => 0.0,
        }
    }
}

/// Selects an index with probability proportional to its weight.
fn roulette<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let mut roll = rng.random_range(0.0..total);
    for (index, &weight) in weights.iter().enumerate() {
        roll -= weight;
        if roll <= 0.0 {
            return index;
        }
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn selector() -> AdaptiveSelector {
        AdaptiveSelector::new(2, 1, &SearchConfig::default())
    }

    #[test]
    fn test_initial_weights_equal() {
        let selector = selector();
        assert_eq!(selector.destroy_weights(), &[1.0, 1.0]);
        assert_eq!(selector.repair_weights(), &[1.0]);
    }

    #[test]
    fn test_update_smooths_toward_reward() {
        let mut selector = selector();
        selector.update(0, 0, Outcome::NewBest);
        // 0.8 * 1.0 + 0.2 * 25.0 = 5.8
        assert!((selector.destroy_weights()[0] - 5.8).abs() < 1e-10);
        // Unused operator untouched.
        assert_eq!(selector.destroy_weights()[1], 1.0);
    }

    #[test]
    fn test_rejected_decays_weight() {
        let mut selector = selector();
        selector.update(1, 0, Outcome::Rejected);
        // 0.8 * 1.0 + 0.2 * 0.0 = 0.8
        assert!((selector.destroy_weights()[1] - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_reward_ordering() {
        let selector = selector();
        assert!(selector.reward(Outcome::NewBest) > selector.reward(Outcome::Improved));
        assert!(selector.reward(Outcome::Improved) > selector.reward(Outcome::Accepted));
        assert!(selector.reward(Outcome::Accepted) > selector.reward(Outcome::Rejected));
        assert_eq!(selector.reward(Outcome::Rejected), 0.0);
    }

    #[test]
    fn test_selection_in_bounds() {
        let selector = selector();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(selector.select_destroy(&mut rng) < 2);
            assert_eq!(selector.select_repair(&mut rng), 0);
        }
    }

    #[test]
    fn test_low_weight_operator_still_selected() {
        let mut selector = selector();
        for _ in 0..50 {
            selector.update(0, 0, Outcome::Rejected);
        }
        let mut rng = StdRng::seed_from_u64(1);
        let picked_low = (0..2000).any(|_| selector.select_destroy(&mut rng) == 0);
        assert!(picked_low, "weighted sampling must keep exploring");
    }

    #[test]
    fn test_heavier_weight_selected_more_often() {
        let mut selector = selector();
        for _ in 0..10 {
            selector.update(1, 0, Outcome::NewBest);
        }
        let mut rng = StdRng::seed_from_u64(7);
        let hits = (0..1000)
            .filter(|_| selector.select_destroy(&mut rng) == 1)
            .count();
        assert!(hits > 700, "expected operator 1 to dominate, got {hits}");
    }
}
