//! Sample data for tests and benchmarks.

use crate::leaf::Leaf;
use crate::utils::lfsr::GaloisLfsr;

/// Characters allowed in an EOS account name.
const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz12345";
const NAME_LEN: usize = 12;
/// Trailing characters that spell out the index in base 31
const INDEX_DIGITS: usize = 6;
const MAX_SAMPLE_AMOUNT: u64 = 1_000_000_000;

/// Generates `count` distinct leaves reproducibly from `seed`.
///
/// Identities look like 12-character EOS account names. The last six
/// characters encode the position, so names never collide for up to
/// 31^6 leaves. Amounts are in `1..=1_000_000_000`.
///
/// # Panics
/// Panics if a generated name fails identity validation, which the fixed
/// charset and length rule out.
pub fn sample_leaves(count: usize, seed: u64) -> Vec<Leaf> {
    let mut lfsr = GaloisLfsr::new(seed);
    (0..count)
        .map(|i| {
            let name = sample_name(&mut lfsr, i);
            let amount = 1 + lfsr.below(MAX_SAMPLE_AMOUNT);
            Leaf::new(name, amount).expect("sample names are valid identities")
        })
        .collect()
}

fn sample_name(lfsr: &mut GaloisLfsr, index: usize) -> String {
    let radix = NAME_CHARSET.len();
    let mut name = vec![0u8; NAME_LEN];
    for c in name.iter_mut().take(NAME_LEN - INDEX_DIGITS) {
        *c = NAME_CHARSET[lfsr.below(radix as u64) as usize];
    }
    let mut n = index;
    for c in name.iter_mut().rev().take(INDEX_DIGITS) {
        *c = NAME_CHARSET[n % radix];
        n /= radix;
    }
    String::from_utf8_lossy(&name).into_owned()
}
