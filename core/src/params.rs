//! Reconstruction parameters and their defaults.

/// Upper bound on C(n, k) evaluated by a single reconstruction request.
pub const DEFAULT_MAX_COMBINATIONS: u64 = 5_000_000;

/// Below this many combinations the tally runs on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 4_096;

/// Knobs for a [`ConsensusReconstructor`](crate::consensus::ConsensusReconstructor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveryParams {
    /// Number of shares `k` needed to reconstruct.
    pub threshold: usize,
    /// Reject requests whose C(n, k) exceeds this.
    pub max_combinations: u64,
    /// Fan the tally out over the rayon pool for large requests.
    pub parallel: bool,
    pub parallel_threshold: u64,
    /// Fail with `AmbiguousConsensus` instead of applying the tie-break.
    pub require_decisive_majority: bool,
}

impl RecoveryParams {
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            require_decisive_majority: false,
        }
    }

    #[must_use]
    pub const fn with_max_combinations(mut self, limit: u64) -> Self {
        self.max_combinations = limit;
        self
    }

    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: u64) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_decisive_majority(mut self, required: bool) -> Self {
        self.require_decisive_majority = required;
        self
    }
}

/// `1 <= threshold <= shares`.
pub fn validate_threshold_config(threshold: usize, shares: usize) -> bool {
    (1..=shares).contains(&threshold)
}
