use thiserror::Error;

/// Errors raised while encoding leaves, building trees or producing proofs.
///
/// None of these describe a rejected claim: a proof that does not lead to
/// the committed root is reported as `false` by the verification functions.
#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot build a Merkle tree from an empty leaf set")]
    EmptyInput,

    #[error("Leaf not found in tree: {0}")]
    LeafNotFound(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Leaf index {index} is out of range for {len} leaves")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid proof: {0}")]
    InvalidProof(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MerkleError>;
