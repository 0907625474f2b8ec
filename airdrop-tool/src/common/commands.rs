use std::io::Write;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn};
use merkle_airdrop::utils::hexfmt;
use merkle_airdrop::{
    snapshot, verify_claim, Leaf, MerkleTree, PairOrder, ProofNode, ProofPath, TreeConfig,
};
use serde::{Deserialize, Serialize};

use super::cli::IdentityKind;
use super::generators;
use super::utils;

/// One proof step with the peer hash rendered as hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEntry {
    pub peer_hash: String,
    pub peer_at_left: bool,
}

/// Self-contained proof handed to a claimant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofDocument {
    pub root: String,
    pub identity: String,
    pub amount: u64,
    pub leaf_index: u64,
    pub leaf_hash: String,
    pub pair_order: PairOrder,
    pub proof: Vec<ProofEntry>,
}

impl ProofDocument {
    pub fn new(leaf: &Leaf, path: &ProofPath, pair_order: PairOrder) -> Self {
        Self {
            root: hexfmt::to_hex(&path.root),
            identity: leaf.identity().to_string(),
            amount: leaf.amount(),
            leaf_index: path.leaf_index,
            leaf_hash: hexfmt::to_hex(&path.leaf_hash),
            pair_order,
            proof: path
                .nodes
                .iter()
                .map(|n| ProofEntry {
                    peer_hash: hexfmt::to_hex(&n.peer_hash),
                    peer_at_left: n.peer_at_left,
                })
                .collect(),
        }
    }

    pub fn nodes(&self) -> Result<Vec<ProofNode>> {
        self.proof
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let peer_hash = hexfmt::parse_hash32(&e.peer_hash)
                    .with_context(|| format!("proof entry {}", i))?;
                Ok(ProofNode {
                    peer_hash,
                    peer_at_left: e.peer_at_left,
                })
            })
            .collect()
    }
}

pub fn tree_config(dedup: bool, sorted_pairs: bool) -> TreeConfig {
    let mut config = TreeConfig::with_dedup(dedup);
    if sorted_pairs {
        config.set_pair_order(PairOrder::Sorted);
    }
    config
}

pub fn generate(
    count: usize,
    kind: IdentityKind,
    max_amount: u64,
    seed: Option<u64>,
    output: &str,
) -> Result<()> {
    if count == 0 {
        bail!("--count must be positive");
    }
    let seed = seed.unwrap_or_else(generators::random_seed);
    let mut generator = generators::new_generator(kind, seed);
    let leaves = generators::generate_leaves(&mut *generator, count, max_amount, seed);

    let mut writer = utils::create_writer(output)?;
    for leaf in &leaves {
        writeln!(writer, "{}", leaf)?;
    }
    writer.flush()?;
    info!("Wrote {} leaves to {} (seed={})", leaves.len(), output, seed);
    Ok(())
}

/// Builds the tree over a leaf file, writes the snapshot and returns the tree.
pub fn build(input: &str, output: &str, config: &TreeConfig) -> Result<MerkleTree> {
    let start = Instant::now();
    let leaves = snapshot::read_leaves(utils::open_reader(input)?)
        .with_context(|| format!("Failed to read leaves from {}", input))?;
    info!("Read {} leaves from {} in {:.1?}", leaves.len(), input, start.elapsed());

    let tree = MerkleTree::build(&leaves, config)?;
    if tree.leaf_count() != tree.input_count() {
        warn!(
            "Collapsed {} duplicate leaves",
            tree.input_count() - tree.leaf_count()
        );
    }

    snapshot::write_snapshot(utils::create_writer(output)?, &tree.root(), &leaves)
        .with_context(|| format!("Failed to write snapshot {}", output))?;
    info!("Wrote snapshot {} with root {}", output, tree.hex_root());
    Ok(tree)
}

pub fn prove(
    snapshot_path: &str,
    identity: &str,
    amount: &str,
    config: &TreeConfig,
) -> Result<ProofDocument> {
    let snap = snapshot::read_snapshot(utils::open_reader(snapshot_path)?)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path))?;
    let tree = snap.rebuild(config)?;
    if tree.root() != snap.root {
        bail!(
            "Snapshot root {} does not match rebuilt root {}; check --dedup and --sorted-pairs",
            hexfmt::to_hex(&snap.root),
            tree.hex_root()
        );
    }

    let leaf = Leaf::parse(identity, amount)?;
    let path = tree.get_proof(&leaf)?;
    info!(
        "Proof for '{}' at index {} has {} nodes",
        leaf,
        path.leaf_index,
        path.nodes.len()
    );
    Ok(ProofDocument::new(&leaf, &path, config.pair_order))
}

/// Checks a proof document, optionally against an overridden claim or root.
pub fn verify(
    doc: &ProofDocument,
    identity: Option<&str>,
    amount: Option<&str>,
    root: Option<&str>,
) -> Result<bool> {
    let identity = identity.unwrap_or(doc.identity.as_str());
    let amount = match amount {
        Some(text) => merkle_airdrop::leaf::parse_amount(text)?,
        None => doc.amount,
    };
    let root = hexfmt::parse_hash32(root.unwrap_or(doc.root.as_str()))
        .map_err(|e| anyhow!("Invalid root: {}", e))?;
    let nodes = doc.nodes()?;
    Ok(verify_claim(identity, amount, &nodes, &root)?)
}

pub fn read_proof_document(path: &str) -> Result<ProofDocument> {
    let reader = utils::open_reader(path)?;
    serde_json::from_reader(reader).with_context(|| format!("Failed to parse proof {}", path))
}

pub fn proof_to_json(doc: &ProofDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
