use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use crate::config::InitColorPolicy;
use crate::graph::Color;

/// Generate the initial colors of `num_nodes` nodes, in ascending id order.
///
/// `seed` is only used by [`InitColorPolicy::Random`].
pub fn assign_initial_colors(num_nodes: usize, num_colors: usize, policy: InitColorPolicy, seed: u64) -> Vec<Color> {
    if num_colors <= 1 {
        return vec![0; num_nodes];
    }

    match policy {
        InitColorPolicy::RoundRobin => (0..num_nodes).map(|index| index % num_colors).collect(),
        InitColorPolicy::Random => {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..num_nodes).map(|_| rng.gen_range(0..num_colors)).collect()
        }
        InitColorPolicy::Batch => {
            // Contiguous blocks of ceil(n / k) nodes.
            let batch_size = num_nodes.div_ceil(num_colors).max(1);
            (0..num_nodes).map(|index| index / batch_size).collect()
        }
    }
}
