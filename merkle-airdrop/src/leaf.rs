//! Leaf encoding for airdrop entitlements.
//!
//! A leaf is an `(identity, amount)` pair. Its canonical byte form is
//!
//! ```text
//! identity || 0x20 || decimal(amount)
//! ```
//!
//! e.g. `b"alice 10000"`, and its leaf hash is the SHA-256 of those bytes.
//! Identities are restricted to printable, non-whitespace ASCII, so the
//! separator can only ever be the single space between the two fields and
//! two different pairs never share an encoding: `("alice", 10000)` encodes
//! to `"alice 10000"` while `("alice1", 0)` encodes to `"alice1 0"`.

use std::fmt;

use serde::Serialize;

use crate::def::{LEAF_FIELD_SEPARATOR, MAX_IDENTITY_LEN};
use crate::error::{MerkleError, Result};
use crate::utils::hasher::{self, Hash32};

/// One entitlement record committed into the tree.
///
/// A `Leaf` can only be obtained through the validating constructors, so
/// encoding a `Leaf` never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Leaf {
    identity: String,
    amount: u64,
}

impl Leaf {
    /// Validates the identity and builds a leaf.
    pub fn new(identity: impl Into<String>, amount: u64) -> Result<Self> {
        let identity = identity.into();
        validate_identity(&identity)?;
        Ok(Self { identity, amount })
    }

    /// Builds a leaf from a textual amount, rejecting negative, non-numeric
    /// and overflowing values.
    pub fn parse(identity: &str, amount: &str) -> Result<Self> {
        let amount = parse_amount(amount)?;
        Self::new(identity, amount)
    }

    /// Parses a persisted record of the form `identity amount`.
    ///
    /// Surrounding whitespace is ignored; the two fields must be separated
    /// by whitespace and nothing else may follow the amount.
    pub fn from_line(line: &str) -> Result<Self> {
        let mut fields = line.split_whitespace();
        let (identity, amount) = match (fields.next(), fields.next(), fields.next()) {
            (Some(identity), Some(amount), None) => (identity, amount),
            _ => {
                return Err(MerkleError::InvalidInput(format!(
                    "expected 'identity amount', got '{}'",
                    line.trim()
                )))
            }
        };
        Self::parse(identity, amount)
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Canonical byte form of the leaf.
    pub fn encode(&self) -> Vec<u8> {
        let amount = self.amount.to_string();
        let mut bz = Vec::with_capacity(self.identity.len() + 1 + amount.len());
        bz.extend_from_slice(self.identity.as_bytes());
        bz.push(LEAF_FIELD_SEPARATOR);
        bz.extend_from_slice(amount.as_bytes());
        bz
    }

    /// SHA-256 of the canonical byte form.
    pub fn hash(&self) -> Hash32 {
        hasher::hash(self.encode())
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identity, self.amount)
    }
}

/// Checks that an identity is non-empty, bounded and made of printable,
/// non-whitespace ASCII.
pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.is_empty() {
        return Err(MerkleError::InvalidInput("identity is empty".to_string()));
    }
    if identity.len() > MAX_IDENTITY_LEN {
        return Err(MerkleError::InvalidInput(format!(
            "identity is {} bytes long, max is {}",
            identity.len(),
            MAX_IDENTITY_LEN
        )));
    }
    if let Some(c) = identity.chars().find(|c| !c.is_ascii_graphic()) {
        return Err(MerkleError::InvalidInput(format!(
            "identity '{}' contains forbidden character {:?}",
            identity.escape_default(),
            c
        )));
    }
    Ok(())
}

/// Parses a decimal amount in the smallest currency unit.
pub fn parse_amount(text: &str) -> Result<u64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MerkleError::InvalidInput("amount is empty".to_string()));
    }
    if text.starts_with('-') {
        return Err(MerkleError::InvalidInput(format!(
            "amount {} is negative",
            text
        )));
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MerkleError::InvalidInput(format!(
            "amount '{}' is not a decimal integer",
            text
        )));
    }
    text.parse::<u64>()
        .map_err(|_| MerkleError::InvalidInput(format!("amount {} overflows u64", text)))
}

/// Canonical byte form of `(identity, amount)`.
pub fn encode_leaf(identity: &str, amount: u64) -> Result<Vec<u8>> {
    Ok(Leaf::new(identity, amount)?.encode())
}

/// Leaf hash of `(identity, amount)`.
pub fn leaf_hash(identity: &str, amount: u64) -> Result<Hash32> {
    Ok(Leaf::new(identity, amount)?.hash())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let leaf = Leaf::new("alice", 10000).unwrap();
        assert_eq!(leaf.encode(), b"alice 10000".to_vec());
        assert_eq!(leaf.to_string(), "alice 10000");
        assert_eq!(leaf.hash(), hasher::hash(b"alice 10000"));
    }

    #[test]
    fn test_no_field_ambiguity() {
        let a = Leaf::new("alice", 10000).unwrap();
        let b = Leaf::new("alice1", 0).unwrap();
        assert_ne!(a.encode(), b.encode());
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_equal_pairs_equal_hash() {
        assert_eq!(
            leaf_hash("bob", 7).unwrap(),
            Leaf::parse("bob", "7").unwrap().hash()
        );
        assert_eq!(encode_leaf("bob", 7).unwrap(), b"bob 7".to_vec());
    }

    #[test]
    fn test_amount_change_changes_hash() {
        let a = Leaf::new("carol", 10000).unwrap();
        let b = Leaf::new("carol", 10001).unwrap();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn test_invalid_identity() {
        assert!(matches!(
            Leaf::new("", 1),
            Err(MerkleError::InvalidInput(_))
        ));
        assert!(Leaf::new("has space", 1).is_err());
        assert!(Leaf::new("tab\there", 1).is_err());
        assert!(Leaf::new("caf\u{e9}", 1).is_err());
        assert!(Leaf::new("a".repeat(MAX_IDENTITY_LEN + 1), 1).is_err());
        assert!(Leaf::new("a".repeat(MAX_IDENTITY_LEN), 1).is_ok());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(parse_amount(" 10000 ").unwrap(), 10000);
        assert_eq!(parse_amount("007").unwrap(), 7);
        assert_eq!(parse_amount("18446744073709551615").unwrap(), u64::MAX);
        assert!(parse_amount("18446744073709551616").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("+5").is_err());
        assert!(parse_amount("1.5").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_leading_zeros_normalised() {
        let a = Leaf::parse("dave", "0010").unwrap();
        let b = Leaf::new("dave", 10).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.encode(), b"dave 10".to_vec());
    }

    #[test]
    fn test_from_line() {
        let leaf = Leaf::from_line("  0x1234abcd 999\n").unwrap();
        assert_eq!(leaf.identity(), "0x1234abcd");
        assert_eq!(leaf.amount(), 999);
        assert!(Leaf::from_line("alice10000").is_err());
        assert!(Leaf::from_line("alice 1 2").is_err());
        assert!(Leaf::from_line("alice -1").is_err());
        assert!(Leaf::from_line("").is_err());
    }
}
