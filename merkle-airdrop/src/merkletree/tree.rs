//! The airdrop Merkle tree builder.
//!
//! Level 0 holds the leaf hashes (after optional dedup). Every following
//! level pairs adjacent nodes left to right and hashes each pair according to
//! the configured [`PairOrder`]. When a level has an odd number of nodes the
//! last one is promoted unchanged ([`CarryPolicy::Promote`]). The last level
//! holds exactly one node, the root.
//!
//! Levels are stored as plain vectors indexed by position, so a built tree is
//! an immutable value that can be shared between threads and queried without
//! locking. A new leaf set always produces a new tree.
//!
//! The root depends on leaf order: pairing is positional.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::{PairOrder, TreeConfig};
use crate::def::{CarryPolicy, CARRY_POLICY};
use crate::error::{MerkleError, Result};
use crate::leaf::Leaf;
use crate::utils::hasher::Hash32;
use crate::utils::hexfmt;

#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// levels[0] are the leaf hashes, the last level holds only the root
    levels: Vec<Vec<Hash32>>,
    /// First position in level 0 of every distinct leaf hash
    positions: HashMap<Hash32, usize>,
    /// Number of leaves supplied by the caller, before dedup
    input_count: usize,
    root: Hash32,
    config: TreeConfig,
}

impl MerkleTree {
    /// Builds a tree over `leaves` in the given order.
    ///
    /// # Errors
    /// Returns [`MerkleError::EmptyInput`] when `leaves` is empty.
    pub fn build(leaves: &[Leaf], config: &TreeConfig) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let start = Instant::now();
        let hashes = hash_leaves(leaves, config);
        debug!(
            "Hashed {} leaves in {:.1?}",
            hashes.len(),
            start.elapsed()
        );
        Self::from_leaf_hashes(hashes, config)
    }

    /// Builds a tree over already computed leaf hashes.
    ///
    /// With `dedup` enabled, equal hashes collapse to their first occurrence.
    /// Leaf encoding is injective, so this is the same as collapsing equal
    /// encoded leaves.
    pub fn from_leaf_hashes(hashes: Vec<Hash32>, config: &TreeConfig) -> Result<Self> {
        if hashes.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let start = Instant::now();
        let input_count = hashes.len();
        let (base, positions) = index_leaves(hashes, config.dedup);
        let levels = build_levels(base, config);
        let root = levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .ok_or(MerkleError::EmptyInput)?;

        let tree = Self {
            levels,
            positions,
            input_count,
            root,
            config: config.clone(),
        };
        info!(
            "Built Merkle tree: {} leaves ({} input, dedup={}), depth {}, root {} in {:.1?}",
            tree.leaf_count(),
            input_count,
            config.dedup,
            tree.depth(),
            tree.hex_root(),
            start.elapsed()
        );
        Ok(tree)
    }

    pub fn root(&self) -> Hash32 {
        self.root
    }

    /// Root as `0x`-prefixed lowercase hex.
    pub fn hex_root(&self) -> String {
        hexfmt::to_hex(&self.root)
    }

    /// Number of positions in level 0 (distinct leaves when dedup is on).
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of leaves passed to the builder.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Number of levels above the leaves; 0 for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn levels(&self) -> &[Vec<Hash32>] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&[Hash32]> {
        self.levels.get(level).map(|l| l.as_slice())
    }

    pub fn leaf_hash_at(&self, index: usize) -> Option<Hash32> {
        self.levels[0].get(index).copied()
    }

    /// Position of a leaf in level 0. Duplicates resolve to the first
    /// occurrence, so every copy of a leaf maps to the same proof.
    pub fn position_of(&self, leaf: &Leaf) -> Option<usize> {
        self.position_of_hash(&leaf.hash())
    }

    pub fn position_of_hash(&self, leaf_hash: &Hash32) -> Option<usize> {
        self.positions.get(leaf_hash).copied()
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }
}

/// Computes the root of `leaves` without keeping the levels.
///
/// Completed subtrees are kept on a stack indexed by height, like a binary
/// counter, so the auxiliary memory is `O(log n)` hashes (plus the set of
/// seen hashes when dedup is on). Folding the remaining stack from the right
/// reproduces the promote-unchanged carry rule, so the result always equals
/// `MerkleTree::build(leaves, config)?.root()`.
pub fn compute_root(leaves: &[Leaf], config: &TreeConfig) -> Result<Hash32> {
    if leaves.is_empty() {
        return Err(MerkleError::EmptyInput);
    }
    let order = config.pair_order;
    let mut seen = HashSet::new();
    let mut stack: Vec<(u32, Hash32)> = Vec::with_capacity(64);
    for leaf in leaves {
        let h = leaf.hash();
        if config.dedup && !seen.insert(h) {
            continue;
        }
        let (mut height, mut node) = (0u32, h);
        while let Some(&(top_height, top)) = stack.last() {
            if top_height != height {
                break;
            }
            stack.pop();
            node = order.combine(&top, &node);
            height += 1;
        }
        stack.push((height, node));
    }

    let (_, mut acc) = stack.pop().ok_or(MerkleError::EmptyInput)?;
    while let Some((_, left)) = stack.pop() {
        acc = order.combine(&left, &acc);
    }
    Ok(acc)
}

fn hash_leaves(leaves: &[Leaf], config: &TreeConfig) -> Vec<Hash32> {
    if config.is_parallel(leaves.len()) {
        leaves
            .par_iter()
            .with_min_len(config.chunk_size)
            .map(Leaf::hash)
            .collect()
    } else {
        leaves.iter().map(Leaf::hash).collect()
    }
}

/// Applies dedup and records the first position of every leaf hash.
fn index_leaves(hashes: Vec<Hash32>, dedup: bool) -> (Vec<Hash32>, HashMap<Hash32, usize>) {
    let mut positions = HashMap::with_capacity(hashes.len());
    if !dedup {
        for (i, h) in hashes.iter().enumerate() {
            positions.entry(*h).or_insert(i);
        }
        return (hashes, positions);
    }

    let mut base = Vec::with_capacity(hashes.len());
    for h in hashes {
        if let Entry::Vacant(e) = positions.entry(h) {
            e.insert(base.len());
            base.push(h);
        }
    }
    (base, positions)
}

fn build_levels(base: Vec<Hash32>, config: &TreeConfig) -> Vec<Vec<Hash32>> {
    let mut levels = vec![base];
    loop {
        let current = &levels[levels.len() - 1];
        if current.len() <= 1 {
            break;
        }
        let next = next_level(current, config);
        debug!(
            "Level {}: {} nodes -> {} nodes",
            levels.len() - 1,
            current.len(),
            next.len()
        );
        levels.push(next);
    }
    levels
}

/// Hashes one level into its parent level.
///
/// Above the cutoff the level is split into contiguous chunks of pairs that
/// are hashed on the rayon pool; the indexed collect keeps positions intact.
pub(crate) fn next_level(level: &[Hash32], config: &TreeConfig) -> Vec<Hash32> {
    let order = config.pair_order;
    if config.is_parallel(level.len()) {
        level
            .par_chunks(2)
            .with_min_len(config.chunk_size)
            .map(|pair| parent_of(pair, order))
            .collect()
    } else {
        level.chunks(2).map(|pair| parent_of(pair, order)).collect()
    }
}

fn parent_of(pair: &[Hash32], order: PairOrder) -> Hash32 {
    match (pair, CARRY_POLICY) {
        ([left, right], _) => order.combine(left, right),
        ([single], CarryPolicy::Promote) => *single,
        _ => unreachable!("chunks(2) yields one or two nodes"),
    }
}
