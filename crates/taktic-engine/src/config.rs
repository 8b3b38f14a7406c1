//! Engine configuration.

use tracing::warn;

use crate::error::EngineError;

/// Deepest iteration the engine will attempt.
pub const MAX_DEPTH: u32 = 64;

/// How candidate moves are ordered inside the searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOrdering {
    /// Seeded PV move first, then the rules' natural enumeration order.
    Natural,
    /// Cached best move, PV move, response move, then shuffled (root) or
    /// history-sorted (interior) remainder.
    #[default]
    Heuristic,
}

/// What happens to the history/response tables and the best-move cache
/// between successive searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TablePolicy {
    /// Keep learned ordering data for the engine's lifetime.
    #[default]
    Persist,
    /// Start every `analyze` call from empty tables.
    ResetEachSearch,
}

/// Configuration knobs for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board edge the search buffers are sized for.
    pub size: usize,
    /// Final iterative-deepening depth.
    pub max_depth: u32,
    /// 0 = silent, 1 = per-iteration records, 2 = per-root-move detail.
    pub verbosity: u8,
    /// Skip the history sort at interior nodes.
    pub disable_history_sort: bool,
    /// Move ordering variant.
    pub ordering: MoveOrdering,
    /// Lifetime of the ordering tables.
    pub table_policy: TablePolicy,
    /// Seed for the root shuffle.
    pub seed: u64,
    /// Best-move cache holds `1 << cache_bits` slots.
    pub cache_bits: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: 5,
            max_depth: 3,
            verbosity: 0,
            disable_history_sort: false,
            ordering: MoveOrdering::Heuristic,
            table_policy: TablePolicy::Persist,
            seed: 0x7a6b_7461_6b74_6963,
            cache_bits: 16,
        }
    }
}

impl EngineConfig {
    /// Default configuration for a board of edge `size`.
    pub fn for_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_history_sort(mut self, enabled: bool) -> Self {
        self.disable_history_sort = !enabled;
        self
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_table_policy(mut self, policy: TablePolicy) -> Self {
        self.table_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cache size, clamped to `4..=24` bits.
    pub fn with_cache_bits(mut self, bits: u32) -> Self {
        let clamped = bits.clamp(4, 24);
        if clamped != bits {
            warn!(requested = bits, using = clamped, "best-move cache size clamped");
        }
        self.cache_bits = clamped;
        self
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(taktic_core::MIN_SIZE..=taktic_core::MAX_SIZE).contains(&self.size) {
            return Err(EngineError::InvalidConfig {
                reason: format!("board size {} is not supported", self.size),
            });
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH {
            return Err(EngineError::InvalidConfig {
                reason: format!("max depth must be 1..={MAX_DEPTH}, got {}", self.max_depth),
            });
        }
        if self.cache_bits > 24 {
            return Err(EngineError::InvalidConfig {
                reason: format!("cache of 2^{} slots is too large", self.cache_bits),
            });
        }
        Ok(())
    }

    /// Whether interior nodes sort the remainder by history score.
    #[inline]
    pub(crate) fn history_sort(&self) -> bool {
        self.ordering == MoveOrdering::Heuristic && !self.disable_history_sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.size, 5);
        assert!(config.history_sort());
    }

    #[test]
    fn builder_sets_fields() {
        let config = EngineConfig::for_size(6)
            .with_max_depth(4)
            .with_verbosity(2)
            .with_history_sort(false)
            .with_table_policy(TablePolicy::ResetEachSearch)
            .with_seed(7);
        assert_eq!(config.size, 6);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.verbosity, 2);
        assert!(config.disable_history_sort);
        assert!(!config.history_sort());
        assert_eq!(config.table_policy, TablePolicy::ResetEachSearch);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn natural_ordering_never_sorts() {
        let config = EngineConfig::default().with_ordering(MoveOrdering::Natural);
        assert!(!config.history_sort());
    }

    #[test]
    fn rejects_bad_sizes_and_depths() {
        assert!(EngineConfig::for_size(2).validate().is_err());
        assert!(EngineConfig::for_size(9).validate().is_err());
        assert!(EngineConfig::default().with_max_depth(0).validate().is_err());
        assert!(EngineConfig::default().with_max_depth(MAX_DEPTH + 1).validate().is_err());
    }

    #[test]
    fn cache_bits_are_clamped() {
        assert_eq!(EngineConfig::default().with_cache_bits(40).cache_bits, 24);
        assert_eq!(EngineConfig::default().with_cache_bits(1).cache_bits, 4);
    }
}
