//! Core definitions and constants for the airdrop Merkle commitment.
//!
//! Everything in this module is part of the commitment format shared with
//! independent verifiers. Changing any of these values changes every root
//! and invalidates every previously issued proof.
//!
//! ## Leaf Encoding
//! - A leaf is encoded as `identity || LEAF_FIELD_SEPARATOR || decimal(amount)`
//! - Identities never contain the separator, so the encoding is injective
//!
//! ## Tree Shape
//! - Binary tree built bottom-up, adjacent nodes paired left to right
//! - An unpaired last node is carried to the next level (see [`CARRY_POLICY`])
//!
//! ## Parallelism
//! - Levels at or above [`PARALLEL_CUTOFF`] nodes are hashed on the rayon pool
//! - Each rayon task handles at least [`PAR_CHUNK_SIZE`] items

/// Length in bytes of every node in the tree (SHA-256 digest).
pub const HASH_LEN: usize = 32;

/// Byte placed between the identity and the decimal amount of a leaf.
pub const LEAF_FIELD_SEPARATOR: u8 = b' ';

/// Maximum length of an identity token in bytes.
/// Ethereum addresses with prefix use 42, EOS account names use 12.
pub const MAX_IDENTITY_LEN: usize = 128;

/// Levels with fewer nodes than this are hashed on the calling thread.
pub const PARALLEL_CUTOFF: usize = 1 << 14;

/// Minimum number of items handed to a single rayon task.
pub const PAR_CHUNK_SIZE: usize = 4096;

/// Upper bound on proof length. A level at least halves on every step, so
/// no tree addressable with `u64` positions is deeper than this.
pub const MAX_TREE_DEPTH: usize = 64;

/// Rule applied to the last node of an odd-length level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryPolicy {
    /// The node moves up unchanged and contributes no proof entry.
    Promote,
}

/// The carry policy used by the builder, the proof generator and the verifier.
pub const CARRY_POLICY: CarryPolicy = CarryPolicy::Promote;
