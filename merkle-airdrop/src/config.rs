//! Build configuration for airdrop Merkle trees.
//!
//! A [`TreeConfig`] fixes the policy knobs that influence the root:
//! - `dedup`: whether duplicate encoded leaves collapse to one position
//! - `pair_order`: how two children are ordered before hashing
//!
//! and the knobs that only influence how fast the root is computed:
//! - `parallel_cutoff`: level size from which hashing moves to the rayon pool
//! - `chunk_size`: minimum number of items per rayon task
//!
//! # Usage Examples
//! ```
//! use merkle_airdrop::config::{PairOrder, TreeConfig};
//!
//! // Positional pairing, duplicates preserved
//! let config = TreeConfig::default();
//!
//! // Collapse duplicates and hash pairs the way the on-chain contract does
//! let mut config = TreeConfig::with_dedup(true);
//! config.set_pair_order(PairOrder::Sorted);
//! ```
//!
//! A verifier must be told the `pair_order` the root was built with. The
//! parallelism knobs never change the result.

use serde::{Deserialize, Serialize};

use crate::def::{PARALLEL_CUTOFF, PAR_CHUNK_SIZE};
use crate::utils::hasher::{self, Hash32};

/// Ordering of two sibling nodes inside their parent's preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PairOrder {
    /// `parent = sha256(left || right)` where left has the even index.
    #[default]
    Positional,
    /// `parent = sha256(min || max)`, children compared bytewise.
    Sorted,
}

impl PairOrder {
    /// Hashes a left and a right child into their parent.
    pub fn combine(self, left: &Hash32, right: &Hash32) -> Hash32 {
        match self {
            PairOrder::Positional => hasher::hash2(left, right),
            PairOrder::Sorted => hasher::hash2_sorted(left, right),
        }
    }
}

/// Configuration for building an airdrop Merkle tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Collapse duplicate encoded leaves to their first occurrence
    pub dedup: bool,
    /// Ordering rule for sibling hashes
    pub pair_order: PairOrder,
    /// Levels with fewer nodes are hashed sequentially
    pub parallel_cutoff: usize,
    /// Minimum items per rayon task
    pub chunk_size: usize,
}

impl Default for TreeConfig {
    /// # Default Values
    /// - `dedup`: false
    /// - `pair_order`: `Positional`
    /// - `parallel_cutoff`: 16384
    /// - `chunk_size`: 4096
    fn default() -> Self {
        Self {
            dedup: false,
            pair_order: PairOrder::Positional,
            parallel_cutoff: PARALLEL_CUTOFF,
            chunk_size: PAR_CHUNK_SIZE,
        }
    }
}

impl TreeConfig {
    pub fn new(
        dedup: bool,
        pair_order: PairOrder,
        parallel_cutoff: usize,
        chunk_size: usize,
    ) -> Self {
        Self {
            dedup,
            pair_order,
            parallel_cutoff,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Default configuration with the given dedup mode.
    pub fn with_dedup(dedup: bool) -> Self {
        TreeConfig {
            dedup,
            ..TreeConfig::default()
        }
    }

    pub fn set_dedup(&mut self, dedup: bool) {
        self.dedup = dedup;
    }

    pub fn set_pair_order(&mut self, pair_order: PairOrder) {
        self.pair_order = pair_order;
    }

    /// A cutoff of 0 sends every level to the rayon pool, `usize::MAX`
    /// keeps the whole build on the calling thread.
    pub fn set_parallel_cutoff(&mut self, parallel_cutoff: usize) {
        self.parallel_cutoff = parallel_cutoff;
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size.max(1);
    }

    /// Whether a level of `len` nodes should be hashed in parallel.
    pub(crate) fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TreeConfig::default();
        assert!(!config.dedup);
        assert_eq!(config.pair_order, PairOrder::Positional);
        assert_eq!(config.parallel_cutoff, PARALLEL_CUTOFF);
        assert_eq!(config.chunk_size, PAR_CHUNK_SIZE);
    }

    #[test]
    fn test_chunk_size_never_zero() {
        let config = TreeConfig::new(false, PairOrder::Sorted, 0, 0);
        assert_eq!(config.chunk_size, 1);
        let mut config = TreeConfig::default();
        config.set_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }

    #[test]
    fn test_combine() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        assert_eq!(PairOrder::Positional.combine(&b, &a), hasher::hash2(&b, &a));
        assert_eq!(PairOrder::Sorted.combine(&b, &a), hasher::hash2(&a, &b));
        assert_eq!(
            PairOrder::Sorted.combine(&a, &b),
            PairOrder::Sorted.combine(&b, &a)
        );
    }

    #[test]
    fn test_is_parallel() {
        let mut config = TreeConfig::with_dedup(true);
        assert!(config.dedup);
        config.set_parallel_cutoff(10);
        assert!(!config.is_parallel(9));
        assert!(config.is_parallel(10));
    }
}
