// Candidate sampling for the swap step. All sampling is without replacement and
// works on node indices, see `Graph::index_of`.

use rand::Rng;
use crate::algorithms::Error;

#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    // Upper bound on the neighbors drawn for the local stage.
    pub neighbor_sample_size: usize,

    // Exact number of nodes drawn for the graph-wide stage.
    pub uniform_sample_size: usize,
}

impl Sampler {
    /// Draw up to `neighbor_sample_size` distinct entries of `neighbors`.
    ///
    /// When the node has no more neighbors than the sample size, all of them are
    /// returned in their stored order and no random number is drawn.
    pub fn sample_neighbors<R: Rng>(&self, rng: &mut R, neighbors: &[usize]) -> Vec<usize> {
        let count = self.neighbor_sample_size;
        if neighbors.len() <= count {
            return neighbors.to_vec();
        }

        let mut sample = Vec::with_capacity(count);
        while sample.len() < count {
            let candidate = neighbors[rng.gen_range(0..neighbors.len())];
            if !sample.contains(&candidate) {
                sample.push(candidate);
            }
        }
        sample
    }

    /// Draw `uniform_sample_size` distinct node indices out of `0..population`,
    /// never returning `exclude`.
    ///
    /// The size is checked before any draw: asking for more nodes than exist
    /// besides `exclude` fails with [`Error::InvalidSampleSize`] instead of
    /// rejecting forever.
    pub fn sample_graph<R: Rng>(&self, rng: &mut R, population: usize, exclude: usize) -> Result<Vec<usize>, Error> {
        let count = self.uniform_sample_size;
        let available = if exclude < population { population - 1 } else { population };
        if count > available {
            return Err(Error::InvalidSampleSize {
                requested: count,
                available,
            });
        }

        let mut sample = Vec::with_capacity(count);
        while sample.len() < count {
            let candidate = rng.gen_range(0..population);
            if candidate != exclude && !sample.contains(&candidate) {
                sample.push(candidate);
            }
        }
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use super::*;

    fn sampler(neighbor_sample_size: usize, uniform_sample_size: usize) -> Sampler {
        Sampler { neighbor_sample_size, uniform_sample_size }
    }

    #[test]
    fn test_sample_neighbors_returns_all_when_few() {
        // Arrange
        let mut rng = SmallRng::seed_from_u64(5);
        let neighbors = [4, 9, 2];

        // Act
        let sample = sampler(3, 0).sample_neighbors(&mut rng, &neighbors);

        // Assert
        assert_eq!(sample, vec![4, 9, 2]);
    }

    #[test]
    fn test_sample_neighbors_is_distinct_subset() {
        let mut rng = SmallRng::seed_from_u64(5);
        let neighbors: Vec<usize> = (10..30).collect();

        for _ in 0..100 {
            let sample = sampler(5, 0).sample_neighbors(&mut rng, &neighbors);

            assert_eq!(sample.len(), 5);
            assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 5);
            assert!(sample.iter().all(|id| neighbors.contains(id)));
        }
    }

    #[test]
    fn test_sample_neighbors_of_isolated_node() {
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(sampler(3, 0).sample_neighbors(&mut rng, &[]).is_empty());
    }

    #[test]
    fn test_sample_graph_excludes_self() {
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..100 {
            let sample = sampler(0, 4).sample_graph(&mut rng, 5, 2).unwrap();

            let mut sorted = sample.clone();
            sorted.sort();
            assert_eq!(sorted, vec![0, 1, 3, 4]);
        }
    }

    #[test]
    fn test_sample_graph_is_roughly_uniform() {
        // Arrange
        let mut rng = SmallRng::seed_from_u64(5);
        let mut hits = [0usize; 10];
        let draws = 20_000;

        // Act
        for _ in 0..draws {
            for index in sampler(0, 1).sample_graph(&mut rng, 10, 0).unwrap() {
                hits[index] += 1;
            }
        }

        // Assert
        assert_eq!(hits[0], 0);
        let expected = draws as f64 / 9.0;
        for &count in &hits[1..] {
            assert!((count as f64 - expected).abs() < expected * 0.1);
        }
    }

    #[test]
    fn test_sample_graph_rejects_oversized_sample() {
        let mut rng = SmallRng::seed_from_u64(5);

        let result = sampler(0, 5).sample_graph(&mut rng, 5, 0);

        assert!(matches!(result, Err(Error::InvalidSampleSize { requested: 5, available: 4 })));
    }

    #[test]
    fn test_sample_graph_of_single_node() {
        let mut rng = SmallRng::seed_from_u64(5);

        assert!(sampler(0, 0).sample_graph(&mut rng, 1, 0).unwrap().is_empty());
        assert!(sampler(0, 1).sample_graph(&mut rng, 1, 0).is_err());
    }
}
