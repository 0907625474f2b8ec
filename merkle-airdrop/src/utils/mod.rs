//! Utility functions for the airdrop Merkle tree.
//!
//! This module provides:
//! - SHA-256 hashing of leaves and node pairs
//! - Hex rendering and parsing of 32-byte hashes
//! - A seeded pseudo-random register for reproducible sample data

pub mod hasher;
pub mod hexfmt;
pub mod lfsr;
