use std::fs;

use anyhow::{Context, Result};

use crate::algorithms::artifact::Artifact;
use crate::algorithms::code_table::generate_codes;
use crate::algorithms::tree::CodeTreeNode;
use crate::cli::InspectArgs;
use crate::stats::CompressionReport;

pub fn inspect(args: InspectArgs) -> Result<()> {
    let path = &args.input;
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let artifact = Artifact::from_bytes(&bytes).with_context(|| format!("{} is not a huffman artifact", path.display()))?;
    let report = CompressionReport::from_artifact(&artifact)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", path.display());
    println!("{}", report);
    if artifact.encoded_len() < bytes.len() {
        println!("\t{} trailing bytes ignored", bytes.len() - artifact.encoded_len());
    }
    if artifact.original_len() > 0 {
        let table = generate_codes(&CodeTreeNode::from_description(artifact.tree())?);
        println!("\tcodes:");
        for (byte, code) in table.iter() {
            println!("\t\t{:#04x} {}", byte, code);
        }
    }
    Ok(())
}
