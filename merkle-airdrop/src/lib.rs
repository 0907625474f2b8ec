//! Merkle commitments for token airdrop entitlement sets.
//!
//! # Overview
//! An airdrop distributes tokens to a list of `(identity, amount)` entitlements.
//! This crate commits that list to a single 32-byte root that can be published
//! on chain, and produces compact inclusion proofs that let any claimant
//! prove their entitlement against the root without the full list.
//!
//! ## Components
//! - [`Leaf`]: a validated entitlement and its canonical encoding
//! - [`MerkleTree`]: an immutable tree built once per leaf set
//! - [`ProofPath`] / [`ProofNode`]: inclusion proofs and their steps
//! - [`verify`], [`verify_claim`], [`check_sorted_proof`]: stateless verification
//! - [`compute_root`]: root-only computation without keeping the levels
//! - [`snapshot`]: the persisted leaf-set format
//!
//! # Example Usage
//! ```
//! use merkle_airdrop::{verify, Leaf, MerkleTree, TreeConfig};
//!
//! let leaves: Vec<Leaf> = ["alice", "bob", "carol"]
//!     .iter()
//!     .map(|name| Leaf::new(*name, 10000).unwrap())
//!     .collect();
//! let tree = MerkleTree::build(&leaves, &TreeConfig::default()).unwrap();
//!
//! let proof = tree.get_proof(&leaves[1]).unwrap();
//! assert!(verify(&leaves[1], &proof.nodes, &tree.root()));
//! ```

pub mod config;
pub mod def;
pub mod error;
pub mod leaf;
pub mod merkletree;
pub mod snapshot;
pub mod utils;

pub use config::{PairOrder, TreeConfig};
pub use error::{MerkleError, Result};
pub use leaf::Leaf;
pub use merkletree::{
    check_proof, check_sorted_proof, compute_root, verify, verify_claim, MerkleTree, ProofNode,
    ProofPath,
};
pub use snapshot::{read_leaves, read_snapshot, write_snapshot, Snapshot};
pub use utils::hasher::Hash32;
