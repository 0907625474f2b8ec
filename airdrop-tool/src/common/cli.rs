use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(ValueEnum, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    /// 12-character EOS account names
    Eos,
    /// 0x-prefixed 20-byte Ethereum addresses
    Eth,
}

#[derive(Subcommand, Debug, Serialize, Clone)]
pub enum Command {
    /// Writes a random leaf file with one `identity amount` per line
    Generate {
        #[arg(long)]
        count: usize,

        #[arg(long, value_enum, default_value_t = IdentityKind::Eos)]
        kind: IdentityKind,

        /// Amounts are drawn from 1..=max_amount
        #[arg(long, default_value_t = 1_000_000)]
        max_amount: u64,

        /// Seed for reproducible output; drawn from the OS when absent
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        output: String,
    },
    /// Builds the tree over a leaf file and writes a snapshot
    Build {
        #[arg(long)]
        input: String,

        #[arg(long)]
        output: String,

        /// Collapse duplicate leaves to their first occurrence
        #[arg(long, default_value_t = false)]
        dedup: bool,

        /// Hash sibling pairs in sorted order, as the on-chain contract does
        #[arg(long, default_value_t = false)]
        sorted_pairs: bool,
    },
    /// Issues a JSON proof for one entitlement in a snapshot
    Prove {
        #[arg(long)]
        snapshot: String,

        #[arg(long)]
        identity: String,

        #[arg(long)]
        amount: String,

        /// Must match the options the snapshot was built with
        #[arg(long, default_value_t = false)]
        dedup: bool,

        #[arg(long, default_value_t = false)]
        sorted_pairs: bool,

        /// Prints to stdout when absent
        #[arg(long)]
        output: Option<String>,
    },
    /// Checks a JSON proof against its root
    Verify {
        #[arg(long)]
        proof: String,

        /// Claim a different identity than the one in the proof file
        #[arg(long)]
        identity: Option<String>,

        #[arg(long)]
        amount: Option<String>,

        /// Check against a published root instead of the one in the proof file
        #[arg(long)]
        root: Option<String>,
    },
}

#[derive(Parser, Debug, Serialize, Clone)]
#[command(name = "airdrop-tool", version, about)]
pub struct AirdropCli {
    #[command(subcommand)]
    pub command: Command,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
