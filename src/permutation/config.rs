use serde::{Deserialize, Serialize};

/// Settings for a permutation test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationConfig {
    /// Number of shuffled trials to run.
    pub repetitions: usize,
    /// Base seed; trial `i` draws from a generator seeded with `seed + i`.
    /// `None` draws from the thread-local entropy source.
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PermutationConfig {
    fn default() -> Self {
        Self { repetitions: 1000, seed: None, parallel: false }
    }
}

impl PermutationConfig {
    /// Unseeded, sequential test with `repetitions` trials.
    pub fn new(repetitions: usize) -> Self {
        Self { repetitions, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
