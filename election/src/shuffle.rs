use crypto::Hash as _;
use rand::seq::SliceRandom as _;
use rand::SeedableRng as _;
use rand_chacha::ChaCha20Rng;

#[cfg(test)]
#[path = "tests/shuffle_tests.rs"]
pub mod shuffle_tests;

/// Reproducible permutations: any two shufflers built from the same seed
/// produce the same sequence of orderings.
pub struct SeededShuffler {
    rng: ChaCha20Rng,
}

impl SeededShuffler {
    pub fn new(seed: &str) -> Self {
        let digest = seed.as_bytes().digest();
        Self {
            rng: ChaCha20Rng::from_seed(digest.0),
        }
    }

    /// Seed used to break ties at the edge of the leader set. It is the
    /// same for every participant and every round.
    pub fn for_leader_set(task_id: &str) -> Self {
        Self::new(task_id)
    }

    /// Seed used to draw audit participants for `round`.
    pub fn for_sampling(task_id: &str, round: i64) -> Self {
        Self::new(&format!("{}{}", task_id, round))
    }

    pub fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        items.shuffle(&mut self.rng);
        items
    }

    /// The first `n` items of a shuffle of `items`.
    pub fn sample<T>(&mut self, items: Vec<T>, n: usize) -> Vec<T> {
        let mut items = self.shuffle(items);
        items.truncate(n);
        items
    }
}
