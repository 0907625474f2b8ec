// Random entitlement lists for trying out the tool.
// Identities are drawn from a seeded LFSR so a run can be reproduced with
// the same --seed; amounts are uniform in 1..=max_amount.

use std::collections::HashSet;

use log::info;
use merkle_airdrop::utils::lfsr::GaloisLfsr;
use merkle_airdrop::Leaf;
use rand_core::{OsRng, RngCore};

use super::cli::IdentityKind;

const EOS_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz12345";
const EOS_NAME_LEN: usize = 12;
const ETH_ADDRESS_LEN: usize = 20;

pub trait Generator {
    fn next_identity(&mut self) -> String;
    fn get_name(&self) -> String;
}

pub struct EosNameGenerator {
    lfsr: GaloisLfsr,
}

impl EosNameGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            lfsr: GaloisLfsr::new(seed),
        }
    }
}

impl Generator for EosNameGenerator {
    fn next_identity(&mut self) -> String {
        (0..EOS_NAME_LEN)
            .map(|_| EOS_CHARSET[self.lfsr.below(EOS_CHARSET.len() as u64) as usize] as char)
            .collect()
    }

    fn get_name(&self) -> String {
        "eos".to_string()
    }
}

pub struct EthAddressGenerator {
    lfsr: GaloisLfsr,
}

impl EthAddressGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            lfsr: GaloisLfsr::new(seed),
        }
    }
}

impl Generator for EthAddressGenerator {
    fn next_identity(&mut self) -> String {
        let mut address = [0u8; ETH_ADDRESS_LEN];
        for chunk in address.chunks_mut(4) {
            let word = self.lfsr.rand_n(32) as u32;
            chunk.copy_from_slice(&word.to_be_bytes()[..chunk.len()]);
        }
        format!("0x{}", hex::encode(address))
    }

    fn get_name(&self) -> String {
        "eth".to_string()
    }
}

pub fn new_generator(kind: IdentityKind, seed: u64) -> Box<dyn Generator> {
    match kind {
        IdentityKind::Eos => Box::new(EosNameGenerator::new(seed)),
        IdentityKind::Eth => Box::new(EthAddressGenerator::new(seed)),
    }
}

pub fn random_seed() -> u64 {
    OsRng.next_u64()
}

/// Draws `count` leaves with distinct identities.
///
/// # Panics
/// Panics if the generator yields an identity that is not a valid leaf
/// identity.
pub fn generate_leaves(
    generator: &mut dyn Generator,
    count: usize,
    max_amount: u64,
    seed: u64,
) -> Vec<Leaf> {
    info!(
        "Generating {} {} leaves (seed={}, max_amount={})",
        count,
        generator.get_name(),
        seed,
        max_amount
    );
    let mut amounts = GaloisLfsr::new(seed.rotate_left(32));
    let mut seen = HashSet::with_capacity(count);
    let mut leaves = Vec::with_capacity(count);
    while leaves.len() < count {
        let identity = generator.next_identity();
        if !seen.insert(identity.clone()) {
            continue;
        }
        let amount = 1 + amounts.below(max_amount.max(1));
        let leaf = Leaf::new(identity, amount)
            .expect("generated identities are printable ASCII without whitespace");
        leaves.push(leaf);
    }
    leaves
}
