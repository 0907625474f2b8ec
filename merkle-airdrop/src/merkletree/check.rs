//! Consistency checks for built trees.
//!
//! These walk a [`MerkleTree`] and panic on the first broken invariant. They
//! are meant for tests and debugging, not for verifying untrusted proofs.

use super::tree::MerkleTree;
use crate::config::PairOrder;
use crate::utils::hasher;

/// Panics unless `a` and `b` are the same hash.
pub fn hash_equal(tag: &str, a: &[u8], b: &[u8]) {
    if !a.eq(b) {
        println!("a: {}, b: {}", hex::encode(a), hex::encode(b));
        panic!("{} Not Equal", tag);
    }
}

/// Checks that each level is exactly the parent level of the one below it
/// and that the last level holds only the root.
pub fn check_levels(tree: &MerkleTree) {
    let levels = tree.levels();
    for (k, pair) in levels.windows(2).enumerate() {
        let (below, above) = (&pair[0], &pair[1]);
        if above.len() != below.len().div_ceil(2) {
            panic!(
                "Level {} has {} nodes, expected {}",
                k + 1,
                above.len(),
                below.len().div_ceil(2)
            );
        }
        let mut sum = [0u8; 32];
        for (i, (children, parent)) in below.chunks(2).zip(above.iter()).enumerate() {
            match children {
                [left, right] => {
                    let swap = tree.config().pair_order == PairOrder::Sorted && right < left;
                    let (a, b) = if swap { (right, left) } else { (left, right) };
                    hasher::node_hash_inplace(&mut sum, a, b);
                }
                [single] => sum = *single,
                _ => unreachable!(),
            }
            hash_equal(&format!("Node {}-{}", k + 1, i), parent, &sum);
        }
    }
    let top = &levels[levels.len() - 1];
    if top.len() != 1 {
        panic!("Top level has {} nodes", top.len());
    }
    hash_equal("Root", &top[0], &tree.root());
}

/// Checks that every recorded position points at a leaf with that hash and
/// that every leaf has a recorded position no later than itself.
pub fn check_positions(tree: &MerkleTree) {
    let leaves = &tree.levels()[0];
    for (i, h) in leaves.iter().enumerate() {
        match tree.position_of_hash(h) {
            Some(pos) if pos <= i => hash_equal(&format!("Leaf {}", i), &leaves[pos], h),
            Some(pos) => panic!("Leaf {} maps to later position {}", i, pos),
            None => panic!("Leaf {} has no position", i),
        }
    }
    if tree.config().dedup {
        let first = leaves
            .iter()
            .enumerate()
            .all(|(i, h)| tree.position_of_hash(h) == Some(i));
        if !first {
            panic!("Dedup tree holds a repeated leaf");
        }
    }
}

/// Checks that every proof served by the tree folds back to the root.
pub fn check_all_proofs(tree: &MerkleTree) {
    for i in 0..tree.leaf_count() {
        let proof = match tree.get_proof_at(i) {
            Ok(proof) => proof,
            Err(e) => panic!("No proof for leaf {}: {}", i, e),
        };
        let computed = proof
            .nodes
            .iter()
            .fold(proof.leaf_hash, |current, node| {
                hasher::hash2x(&current, &node.peer_hash, node.peer_at_left)
            });
        hash_equal(&format!("Proof {}", i), &computed, &tree.root());
    }
}

/// Runs every structural check on `tree`.
pub fn check_hash_consistency(tree: &MerkleTree) {
    check_levels(tree);
    check_positions(tree);
    check_all_proofs(tree);
}
