//! Inclusion proofs for the airdrop Merkle tree.
//!
//! A proof is the list of peer (sibling) hashes met while walking from a
//! leaf up to the root, each tagged with the side the peer sits on. Levels
//! where the walked node is promoted unchanged contribute no entry, so a
//! proof can be shorter than the tree depth.
//!
//! Verification only needs the leaf, the proof and the committed root:
//!
//! ```text
//! node = sha256(identity || ' ' || decimal(amount))
//! for (peer_hash, peer_at_left) in proof:
//!     node = peer_at_left ? sha256(peer_hash || node) : sha256(node || peer_hash)
//! accept iff node == root
//! ```
//!
//! Trees built with [`PairOrder::Sorted`] record sides that agree with the
//! sorted rule, so the same fold applies. For those trees the sides are also
//! redundant and [`check_sorted_proof`] verifies a bare sibling list, the way
//! the on-chain contract does.

use serde::{Deserialize, Serialize};

use super::tree::MerkleTree;
use crate::config::PairOrder;
use crate::def::MAX_TREE_DEPTH;
use crate::error::{MerkleError, Result};
use crate::leaf::Leaf;
use crate::utils::hasher::{self, Hash32};

/// One step of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// Hash of the sibling of the current node
    pub peer_hash: Hash32,
    /// Whether the sibling is the left child of the parent
    pub peer_at_left: bool,
}

impl ProofNode {
    /// Parent of `current` and this node's peer.
    pub fn fold(&self, current: &Hash32) -> Hash32 {
        hasher::hash2x(current, &self.peer_hash, self.peer_at_left)
    }
}

/// A complete inclusion proof for one leaf position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPath {
    /// Position of the leaf in level 0
    pub leaf_index: u64,
    pub leaf_hash: Hash32,
    /// Peers from the leaf level upwards
    pub nodes: Vec<ProofNode>,
    pub root: Hash32,
}

impl ProofPath {
    /// Recomputes the root from `leaf_hash` and compares it to `root`.
    pub fn check(&self) -> bool {
        check_proof(&self.leaf_hash, &self.nodes, &self.root)
    }

    /// Peer hashes without sides, the form consumed by a sorted-pair verifier.
    pub fn siblings(&self) -> Vec<Hash32> {
        self.nodes.iter().map(|n| n.peer_hash).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| MerkleError::EncodingError(e.to_string()))
    }

    pub fn from_bytes(bz: &[u8]) -> Result<Self> {
        let proof: ProofPath = bincode::deserialize(bz)
            .map_err(|e| MerkleError::InvalidProof(format!("decode error: {}", e)))?;
        if proof.nodes.len() > MAX_TREE_DEPTH {
            return Err(MerkleError::InvalidProof(format!(
                "proof has {} nodes, max is {}",
                proof.nodes.len(),
                MAX_TREE_DEPTH
            )));
        }
        Ok(proof)
    }
}

impl MerkleTree {
    /// Proof for `leaf`. Duplicates resolve to their first position.
    ///
    /// # Errors
    /// Returns [`MerkleError::LeafNotFound`] when the leaf was not committed.
    pub fn get_proof(&self, leaf: &Leaf) -> Result<ProofPath> {
        let index = self
            .position_of(leaf)
            .ok_or_else(|| MerkleError::LeafNotFound(leaf.to_string()))?;
        self.get_proof_at(index)
    }

    /// Proof for the leaf at `index` in level 0.
    ///
    /// Without dedup, every occurrence of a repeated leaf has its own index
    /// and its own valid proof.
    pub fn get_proof_at(&self, index: usize) -> Result<ProofPath> {
        let leaf_hash = self
            .leaf_hash_at(index)
            .ok_or(MerkleError::IndexOutOfRange {
                index,
                len: self.leaf_count(),
            })?;
        let pair_order = self.config().pair_order;

        let levels = self.levels();
        let below_root = &levels[..levels.len() - 1];
        let mut nodes = Vec::with_capacity(below_root.len());
        let mut idx = index;
        for level in below_root {
            let peer_idx = idx ^ 1;
            // a missing peer means the node was promoted
            if let Some(peer_hash) = level.get(peer_idx).copied() {
                let peer_at_left = match pair_order {
                    PairOrder::Positional => peer_idx < idx,
                    PairOrder::Sorted => peer_hash <= level[idx],
                };
                nodes.push(ProofNode {
                    peer_hash,
                    peer_at_left,
                });
            }
            idx >>= 1;
        }

        Ok(ProofPath {
            leaf_index: index as u64,
            leaf_hash,
            nodes,
            root: self.root(),
        })
    }
}

/// Folds `nodes` over `leaf_hash` and compares the result with `root`.
pub fn check_proof(leaf_hash: &Hash32, nodes: &[ProofNode], root: &Hash32) -> bool {
    let computed = nodes
        .iter()
        .fold(*leaf_hash, |current, node| node.fold(&current));
    &computed == root
}

/// Checks that `leaf` with proof `nodes` leads to `root`.
///
/// A `false` result means the claim is rejected; it is not an error.
pub fn verify(leaf: &Leaf, nodes: &[ProofNode], root: &Hash32) -> bool {
    check_proof(&leaf.hash(), nodes, root)
}

/// Like [`verify`] but starts from raw claim fields.
///
/// # Errors
/// Returns [`MerkleError::InvalidInput`] when the identity cannot be encoded.
pub fn verify_claim(
    identity: &str,
    amount: u64,
    nodes: &[ProofNode],
    root: &Hash32,
) -> Result<bool> {
    let leaf = Leaf::new(identity, amount)?;
    Ok(verify(&leaf, nodes, root))
}

/// Verifies a bare sibling list by hashing each pair in sorted order.
///
/// Only meaningful for roots built with [`PairOrder::Sorted`].
pub fn check_sorted_proof(leaf_hash: &Hash32, siblings: &[Hash32], root: &Hash32) -> bool {
    let computed = siblings
        .iter()
        .fold(*leaf_hash, |current, peer| hasher::hash2_sorted(&current, peer));
    &computed == root
}
