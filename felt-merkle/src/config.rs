use crate::HashScheme;

/// Default minimum level width before hashing is split across rayon workers.
const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Construction options for a [`MerkleTree`](crate::MerkleTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Leaf/node hash framing. Verification must use the same scheme.
    pub scheme: HashScheme,
    /// Levels with at least this many nodes are hashed in parallel when the
    /// `parallel` feature is enabled. Ignored otherwise.
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            scheme: HashScheme::Plain,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TreeConfig {
    /// Use `scheme` for leaf and node hashing.
    pub fn with_scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Change the parallel hashing threshold. Zero is treated as one.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }
}
