//! Merkle tree over airdrop leaves.
//!
//! - [`MerkleTree`]: immutable tree built from a leaf list, with all levels kept
//! - [`compute_root`]: root-only computation in logarithmic memory
//! - [`proof`]: inclusion proof generation and verification
//! - [`check`]: structural consistency checks for tests
//! - [`helpers`]: reproducible sample leaf sets

pub mod check;
pub mod helpers;
pub mod proof;
pub mod tree;

pub use proof::{check_proof, check_sorted_proof, verify, verify_claim, ProofNode, ProofPath};
pub use tree::{compute_root, MerkleTree};
