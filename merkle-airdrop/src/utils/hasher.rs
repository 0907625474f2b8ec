//! Hashing utilities for the airdrop Merkle tree.
//!
//! This module provides SHA-256 based hashing functions for:
//! - Encoded leaves
//! - Pairs of nodes in positional order
//! - Pairs of nodes in sorted order (the on-chain contract rule)
//! - In-place node hashing

use sha2::{Digest, Sha256};

use crate::def::HASH_LEN;

/// Type alias for a 32-byte hash value.
pub type Hash32 = [u8; HASH_LEN];

/// Computes the SHA-256 hash of a single value.
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of `a || b`.
///
/// This is the parent of two nodes when `a` is the left child.
pub fn hash2<T: AsRef<[u8]>>(a: T, b: T) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of two values with optional order swapping.
///
/// # Arguments
/// * `a` - First value to hash
/// * `b` - Second value to hash
/// * `exchange_ab` - Whether to hash `b || a` instead of `a || b`
pub fn hash2x<T: AsRef<[u8]>>(a: T, b: T, exchange_ab: bool) -> Hash32 {
    if exchange_ab {
        hash2(b, a)
    } else {
        hash2(a, b)
    }
}

/// Hashes two nodes after ordering them bytewise ascending.
///
/// Equal inputs produce the same bytes either way.
pub fn hash2_sorted(a: &Hash32, b: &Hash32) -> Hash32 {
    hash2x(a, b, b < a)
}

/// Computes the SHA-256 hash of `a || b` and stores it in `target`.
pub fn node_hash_inplace(target: &mut Hash32, a: &Hash32, b: &Hash32) {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    target.copy_from_slice(&hasher.finalize());
}
