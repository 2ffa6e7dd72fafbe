// Swap partner selection.
//
// A swap between p and q is scored by comparing the same-color degrees before
// the swap (d_pp^alpha + d_qq^alpha) with those after it (d_pq^alpha + d_qp^alpha).
// The annealing policy turns the two values into an acceptance decision and a
// benefit, and the accepted candidate with the greatest benefit wins.

use rand::Rng;
use crate::config::AnnealingPolicy;
use crate::graph::Graph;

#[derive(Debug, Clone, Copy)]
pub struct PartnerSelector {
    pub policy: AnnealingPolicy,
    pub alpha: f64,
}

/// Outcome of scoring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Evaluation {
    benefit: f64,
    accepted: bool,
}

impl PartnerSelector {

    // Sum of the two degrees raised to alpha. Degrees are non-negative so
    // `powf` never leaves the real domain, and 0^alpha is 0 for alpha > 0.
    fn value(&self, d1: usize, d2: usize) -> f64 {
        (d1 as f64).powf(self.alpha) + (d2 as f64).powf(self.alpha)
    }

    /// Returns `(old_value, new_value)` for swapping the colors of `p` and `q`.
    fn swap_values(&self, graph: &Graph, p: usize, q: usize) -> (f64, f64) {
        let color_p = graph.color(p);
        let color_q = graph.color(q);

        let dpp = graph.degree_in_color(p, color_p);
        let dqq = graph.degree_in_color(q, color_q);
        let old_value = self.value(dpp, dqq);

        let dpq = graph.degree_in_color(p, color_q);
        let dqp = graph.degree_in_color(q, color_p);
        let new_value = self.value(dpq, dqp);

        (old_value, new_value)
    }

    fn evaluate<R: Rng>(&self, old_value: f64, new_value: f64, temperature: f64, rng: &mut R) -> Evaluation {
        let benefit = match self.policy {
            AnnealingPolicy::Linear => {
                return Evaluation {
                    benefit: new_value,
                    accepted: new_value * temperature > old_value,
                };
            }
            AnnealingPolicy::Exponential => ((new_value - old_value) / temperature).exp(),
            AnnealingPolicy::ImprovedExp => ((1.0 / old_value - 1.0 / new_value) / temperature).exp(),
        };

        // The draw is taken for every candidate, even when the values are
        // equal, so the random stream only depends on the candidate count.
        let draw: f64 = rng.gen();
        Evaluation {
            benefit,
            accepted: benefit > draw && new_value != old_value,
        }
    }

    /// Pick the swap partner of node `p` among `candidates`.
    ///
    /// Candidates are scored in the given order. The first accepted candidate
    /// with the strictly greatest benefit is returned, or `None` when no
    /// candidate is accepted.
    pub fn select<R: Rng>(
        &self,
        graph: &Graph,
        p: usize,
        candidates: &[usize],
        temperature: f64,
        rng: &mut R,
    ) -> Option<usize> {
        let mut best_partner = None;
        let mut highest_benefit = 0.0;

        for &q in candidates {
            let (old_value, new_value) = self.swap_values(graph, p, q);
            let evaluation = self.evaluate(old_value, new_value, temperature, rng);

            if evaluation.accepted && evaluation.benefit > highest_benefit {
                best_partner = Some(q);
                highest_benefit = evaluation.benefit;
            }
        }

        best_partner
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::graph::Node;
    use super::*;

    // Star: center 0 (color 0) with leaves 1, 2, 3 colored 1, 1, 0, and
    // an isolated node 4 colored 1.
    fn star() -> Graph {
        Graph::from_nodes(vec![
            Node::new(0, 0, vec![1, 2, 3]),
            Node::new(1, 1, vec![0]),
            Node::new(2, 1, vec![0]),
            Node::new(3, 0, vec![0]),
            Node::new(4, 1, vec![]),
        ])
        .unwrap()
    }

    fn selector(policy: AnnealingPolicy, alpha: f64) -> PartnerSelector {
        PartnerSelector { policy, alpha }
    }

    #[test]
    fn test_swap_values() {
        // Arrange
        let graph = star();

        // Act
        let (old_value, new_value) = selector(AnnealingPolicy::Linear, 2.0).swap_values(&graph, 0, 1);

        // Assert
        // dpp = 1 (leaf 3), dqq = 0, dpq = 2 (leaves 1 and 2), dqp = 1 (center)
        assert_relative_eq!(old_value, 1.0);
        assert_relative_eq!(new_value, 5.0);
    }

    #[test]
    fn test_value_with_zero_degrees() {
        let selector = selector(AnnealingPolicy::Linear, 0.5);

        assert_relative_eq!(selector.value(0, 0), 0.0);
        assert_relative_eq!(selector.value(4, 0), 2.0);
    }

    #[test]
    fn test_linear_picks_first_best_candidate() {
        // Arrange
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(5);

        // Act
        let partner = selector(AnnealingPolicy::Linear, 1.0).select(&graph, 0, &[3, 1, 2], 1.0, &mut rng);

        // Assert
        // Leaves 1 and 2 tie with new = 3 > old = 1; leaf 3 has the same color.
        assert_eq!(partner, Some(1));
    }

    #[test]
    fn test_linear_temperature_relaxes_acceptance() {
        // Leaf 3 with isolated node 4: old = 1, new = 0 + 0 = 0 -> never accepted.
        // Leaf 3 shares the center's color: old = new = 2, accepted only when T > 1.
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(5);
        let linear = selector(AnnealingPolicy::Linear, 1.0);

        assert_eq!(linear.select(&graph, 3, &[4], 10.0, &mut rng), None);
        assert_eq!(linear.select(&graph, 0, &[3], 1.0, &mut rng), None);
        assert_eq!(linear.select(&graph, 0, &[3], 1.5, &mut rng), Some(3));
    }

    #[test]
    fn test_empty_candidates() {
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(5);

        for policy in [AnnealingPolicy::Linear, AnnealingPolicy::Exponential, AnnealingPolicy::ImprovedExp] {
            assert_eq!(selector(policy, 2.0).select(&graph, 4, &[], 1.0, &mut rng), None);
        }
    }

    #[test]
    fn test_exponential_rejects_equal_values() {
        // Arrange
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(5);

        // Act
        // Same color: old == new, so exp(0) = 1.0 beats any draw but is still rejected.
        let partner = selector(AnnealingPolicy::Exponential, 2.0).select(&graph, 0, &[3, 3, 3], 1.0, &mut rng);

        // Assert
        assert_eq!(partner, None);
    }

    #[test]
    fn test_exponential_always_accepts_improvement() {
        // exp((5 - 1) / T) > 1 > draw for any draw in [0, 1).
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..50 {
            assert_eq!(selector(AnnealingPolicy::Exponential, 2.0).select(&graph, 0, &[1], 0.5, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_improved_exp_benefit() {
        // Arrange
        let mut rng = SmallRng::seed_from_u64(5);
        let improved = selector(AnnealingPolicy::ImprovedExp, 2.0);

        // Act
        let evaluation = improved.evaluate(1.0, 5.0, 0.5, &mut rng);

        // Assert
        assert_relative_eq!(evaluation.benefit, ((1.0 - 0.2) / 0.5f64).exp());
        assert!(evaluation.accepted);
    }

    #[test]
    fn test_improved_exp_with_zero_old_value_does_not_panic() {
        // 1/0 - 1/0 is NaN, which compares false against every draw.
        let mut rng = SmallRng::seed_from_u64(5);

        let evaluation = selector(AnnealingPolicy::ImprovedExp, 2.0).evaluate(0.0, 0.0, 1.0, &mut rng);

        assert!(!evaluation.accepted);
    }

    #[test]
    fn test_one_draw_per_non_linear_candidate() {
        // Arrange
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut reference = SmallRng::seed_from_u64(42);

        // Act
        selector(AnnealingPolicy::Exponential, 2.0).select(&graph, 0, &[1, 2, 3], 1.0, &mut rng);
        for _ in 0..3 {
            let _: f64 = reference.gen();
        }

        // Assert
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_linear_draws_nothing() {
        let graph = star();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut reference = SmallRng::seed_from_u64(42);

        selector(AnnealingPolicy::Linear, 2.0).select(&graph, 0, &[1, 2, 3], 1.0, &mut rng);

        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }
}
