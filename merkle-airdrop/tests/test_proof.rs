use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::{sync::Arc, thread};

use merkle_airdrop::{
    merkletree::{
        check,
        helpers::sample_leaves,
        proof::{check_proof, check_sorted_proof, ProofPath},
    },
    snapshot,
    utils::{hasher, hexfmt},
    verify, verify_claim, Leaf, MerkleError, MerkleTree, PairOrder, TreeConfig,
};

fn sorted_config(dedup: bool) -> TreeConfig {
    let mut config = TreeConfig::with_dedup(dedup);
    config.set_pair_order(PairOrder::Sorted);
    config
}

#[test]
fn test_all_leaves_verify() {
    for n in [1usize, 2, 3, 5, 8, 13, 100, 1025] {
        let leaves = sample_leaves(n, 100 + n as u64);
        for config in [TreeConfig::default(), sorted_config(false)] {
            let tree = MerkleTree::build(&leaves, &config).unwrap();
            check::check_hash_consistency(&tree);
            for leaf in &leaves {
                let proof = tree.get_proof(leaf).unwrap();
                assert!(proof.check());
                assert!(verify(leaf, &proof.nodes, &tree.root()), "n={} {}", n, leaf);
                assert!(proof.nodes.len() <= tree.depth());
                if config.pair_order == PairOrder::Sorted {
                    assert!(check_sorted_proof(
                        &proof.leaf_hash,
                        &proof.siblings(),
                        &tree.root()
                    ));
                }
            }
        }
    }
}

#[test]
fn test_exclusion() {
    let leaves = sample_leaves(200, 77);
    let tree = MerkleTree::build(&leaves, &TreeConfig::default()).unwrap();
    let outsider = Leaf::new("notincluded1", 5).unwrap();
    assert!(matches!(
        tree.get_proof(&outsider),
        Err(MerkleError::LeafNotFound(_))
    ));

    // a member's proof does not carry over to a non-member
    let proof = tree.get_proof(&leaves[42]).unwrap();
    assert!(!verify(&outsider, &proof.nodes, &tree.root()));
    let inflated = Leaf::new(leaves[42].identity(), leaves[42].amount() + 1).unwrap();
    assert!(!verify(&inflated, &proof.nodes, &tree.root()));
}

#[test]
fn test_alice_bob_carol() {
    let leaves: Vec<Leaf> = ["alice 10000", "bob 10000", "carol 10000"]
        .iter()
        .map(|line| Leaf::from_line(line).unwrap())
        .collect();
    let tree = MerkleTree::build(&leaves, &TreeConfig::default()).unwrap();

    let a = hasher::hash(b"alice 10000");
    let b = hasher::hash(b"bob 10000");
    let c = hasher::hash(b"carol 10000");
    let expected = hasher::hash2(hasher::hash2(a, b), c);
    assert_eq!(tree.root(), expected);
    assert_eq!(tree.hex_root(), hexfmt::to_hex(&expected));

    let proof = tree.get_proof(&leaves[2]).unwrap();
    assert_eq!(proof.nodes.len(), 1);
    assert_eq!(proof.nodes[0].peer_hash, hasher::hash2(a, b));
    assert!(proof.nodes[0].peer_at_left);

    assert!(verify_claim("carol", 10000, &proof.nodes, &tree.root()).unwrap());
    assert!(!verify_claim("carol", 10001, &proof.nodes, &tree.root()).unwrap());
    assert!(verify_claim("car ol", 10000, &proof.nodes, &tree.root()).is_err());
}

#[test]
fn test_snapshot_file_roundtrip() {
    let temp_dir = ::tempfile::Builder::new()
        .prefix("airdrop-snapshot")
        .tempdir()
        .unwrap();
    let path = temp_dir.path().join("snapshot.txt");

    let leaves = sample_leaves(1000, 31);
    let config = sorted_config(true);
    let tree = MerkleTree::build(&leaves, &config).unwrap();
    {
        let file = BufWriter::new(File::create(&path).unwrap());
        snapshot::write_snapshot(file, &tree.root(), &leaves).unwrap();
    }

    let file = BufReader::new(File::open(&path).unwrap());
    let restored = snapshot::read_snapshot(file).unwrap();
    assert_eq!(restored.root, tree.root());
    assert_eq!(restored.leaves, leaves);
    assert!(restored.rebuild_and_check(&config).unwrap());

    let rebuilt = restored.rebuild(&config).unwrap();
    let proof = rebuilt.get_proof(&leaves[999]).unwrap();
    assert!(verify(&leaves[999], &proof.nodes, &tree.root()));
}

#[test]
fn test_dedup_equals_distinct_projection() {
    let base = sample_leaves(50, 5);
    let mut with_dups = base.clone();
    with_dups.insert(10, base[3].clone());
    with_dups.push(base[0].clone());
    with_dups.push(base[49].clone());

    for order in [PairOrder::Positional, PairOrder::Sorted] {
        let mut dedup = TreeConfig::with_dedup(true);
        dedup.set_pair_order(order);
        let mut plain = TreeConfig::default();
        plain.set_pair_order(order);

        let collapsed = MerkleTree::build(&with_dups, &dedup).unwrap();
        let projected = MerkleTree::build(&base, &plain).unwrap();
        assert_eq!(collapsed.root(), projected.root());
        assert_eq!(collapsed.leaf_count(), 50);
        assert_eq!(collapsed.input_count(), 53);

        let p1 = collapsed.get_proof(&with_dups[10]).unwrap();
        let p2 = projected.get_proof(&base[3]).unwrap();
        assert_eq!(p1, p2);
    }
}

#[test]
fn test_proof_bytes() {
    let leaves = sample_leaves(300, 8);
    let tree = MerkleTree::build(&leaves, &TreeConfig::default()).unwrap();
    let proof = tree.get_proof_at(123).unwrap();
    let bz = proof.to_bytes().unwrap();
    let decoded = ProofPath::from_bytes(&bz).unwrap();
    assert_eq!(decoded, proof);
    assert!(check_proof(&decoded.leaf_hash, &decoded.nodes, &tree.root()));

    assert!(matches!(
        ProofPath::from_bytes(&bz[..bz.len() - 1]),
        Err(MerkleError::InvalidProof(_))
    ));
}

#[test]
fn test_concurrent_queries() {
    let leaves = Arc::new(sample_leaves(4096, 12));
    let tree = Arc::new(MerkleTree::build(&leaves, &TreeConfig::default()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let tree = Arc::clone(&tree);
            let leaves = Arc::clone(&leaves);
            thread::spawn(move || {
                for i in (t..leaves.len()).step_by(8) {
                    let proof = tree.get_proof(&leaves[i]).unwrap();
                    assert_eq!(proof.leaf_index, i as u64);
                    assert!(verify(&leaves[i], &proof.nodes, &tree.root()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_old_tree_survives_rebuild() {
    let mut leaves = sample_leaves(64, 21);
    let old = Arc::new(MerkleTree::build(&leaves, &TreeConfig::default()).unwrap());
    let old_proof = old.get_proof(&leaves[5]).unwrap();

    leaves.push(Leaf::new("latecomer111", 1).unwrap());
    let new = MerkleTree::build(&leaves, &TreeConfig::default()).unwrap();
    assert_ne!(old.root(), new.root());

    assert!(verify(&leaves[5], &old_proof.nodes, &old.root()));
    assert!(!verify(&leaves[5], &old_proof.nodes, &new.root()));
}
