// Command-line front end for airdrop Merkle commitments.
// 4 sub-commands
// - generate: random leaf file (eos names or eth addresses)
// - build: leaf file -> snapshot (root + leaves)
// - prove: snapshot + claim -> JSON proof
// - verify: JSON proof -> VALID / INVALID
use airdrop_tool::common::{cli, commands, utils};
use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = cli::AirdropCli::parse();
    utils::init_logging(&args.log_level);

    match &args.command {
        cli::Command::Generate {
            count,
            kind,
            max_amount,
            seed,
            output,
        } => commands::generate(*count, *kind, *max_amount, *seed, output)?,
        cli::Command::Build {
            input,
            output,
            dedup,
            sorted_pairs,
        } => {
            let config = commands::tree_config(*dedup, *sorted_pairs);
            let tree = commands::build(input, output, &config)?;
            println!("{}", tree.hex_root());
        }
        cli::Command::Prove {
            snapshot,
            identity,
            amount,
            dedup,
            sorted_pairs,
            output,
        } => {
            let config = commands::tree_config(*dedup, *sorted_pairs);
            let doc = commands::prove(snapshot, identity, amount, &config)?;
            utils::write_output(output.as_deref(), &commands::proof_to_json(&doc)?)?;
        }
        cli::Command::Verify {
            proof,
            identity,
            amount,
            root,
        } => {
            let doc = commands::read_proof_document(proof)?;
            let ok = commands::verify(
                &doc,
                identity.as_deref(),
                amount.as_deref(),
                root.as_deref(),
            )?;
            info!("Proof {} checked against root {}", proof, doc.root);
            if ok {
                println!("VALID");
            } else {
                println!("INVALID");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
