use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::EncodeArgs;

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;
    let mut codec = args.selection.build()?;

    let input_data = fs::read(input_path).with_context(|| format!("failed to read {}", input_path.display()))?;
    let start = Instant::now();
    let compressed_data = codec.compress_bytes(&input_data);
    let _elapsed = start.elapsed();
    if_tracing! {
        tracing::info!(event = "encode_complete", codec = %codec.compressor_name(), input = %input_path.display(), output = %output_path.display(), elapsed_us = _elapsed.as_micros(), input_len = input_data.len(), compressed_len = compressed_data.len(), "encode finished");
    }
    fs::write(output_path, compressed_data).with_context(|| format!("failed to write {}", output_path.display()))
}
