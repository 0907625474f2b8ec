//! Persisted leaf sets.
//!
//! A snapshot is a text file whose first line is the hex root and every
//! following line one `identity amount` record, in tree order:
//!
//! ```text
//! 0x6c1fd0b6...
//! alice 10000
//! bob 10000
//! carol 10000
//! ```
//!
//! Plain leaf files produced by generators use the same record lines without
//! the root header and are read with [`read_leaves`].

use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::config::TreeConfig;
use crate::error::{MerkleError, Result};
use crate::leaf::Leaf;
use crate::merkletree::tree::MerkleTree;
use crate::utils::hasher::Hash32;
use crate::utils::hexfmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub root: Hash32,
    pub leaves: Vec<Leaf>,
}

impl Snapshot {
    /// Builds the tree the snapshot describes.
    pub fn rebuild(&self, config: &TreeConfig) -> Result<MerkleTree> {
        MerkleTree::build(&self.leaves, config)
    }

    /// Rebuilds the tree and reports whether its root matches the header.
    pub fn rebuild_and_check(&self, config: &TreeConfig) -> Result<bool> {
        let tree = self.rebuild(config)?;
        let ok = tree.root() == self.root;
        if !ok {
            warn!(
                "Snapshot root {} does not match rebuilt root {}",
                hexfmt::to_hex(&self.root),
                tree.hex_root()
            );
        }
        Ok(ok)
    }
}

/// Writes the root header followed by one line per leaf.
pub fn write_snapshot<W: Write>(mut writer: W, root: &Hash32, leaves: &[Leaf]) -> Result<()> {
    writeln!(writer, "{}", hexfmt::to_hex(root))?;
    for leaf in leaves {
        writeln!(writer, "{}", leaf)?;
    }
    writer.flush()?;
    debug!("Wrote snapshot with {} leaves", leaves.len());
    Ok(())
}

/// Reads `identity amount` records until end of input, skipping blank lines.
pub fn read_leaves<R: BufRead>(reader: R) -> Result<Vec<Leaf>> {
    parse_records(reader.lines().enumerate())
}

/// Reads a snapshot written by [`write_snapshot`].
pub fn read_snapshot<R: BufRead>(reader: R) -> Result<Snapshot> {
    let mut lines = reader.lines().enumerate();
    let root = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                break hexfmt::parse_hash32(line.trim()).map_err(|e| {
                    MerkleError::InvalidInput(format!("snapshot header: {}", e))
                })?;
            }
            None => {
                return Err(MerkleError::InvalidInput(
                    "snapshot has no root line".to_string(),
                ))
            }
        }
    };
    let leaves = parse_records(lines)?;
    Ok(Snapshot { root, leaves })
}

fn parse_records<I>(lines: I) -> Result<Vec<Leaf>>
where
    I: Iterator<Item = (usize, std::io::Result<String>)>,
{
    let mut leaves = Vec::new();
    for (n, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let leaf = Leaf::from_line(&line)
            .map_err(|e| MerkleError::InvalidInput(format!("line {}: {}", n + 1, e)))?;
        leaves.push(leaf);
    }
    Ok(leaves)
}
