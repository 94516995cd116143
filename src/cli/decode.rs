use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::cli::DecodeArgs;

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;
    let mut codec = args.selection.build()?;

    let compressed_data = fs::read(input_path).with_context(|| format!("failed to read {}", input_path.display()))?;
    let start = Instant::now();
    let decompressed_data = codec
        .decompress_bytes(&compressed_data)
        .with_context(|| format!("{} is not a valid {} artifact", input_path.display(), codec.compressor_name()))?;
    let _elapsed = start.elapsed();
    if_tracing! {
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), elapsed = ?_elapsed, decompressed_len = decompressed_data.len(), "decode finished");
    }
    fs::write(output_path, decompressed_data).with_context(|| format!("failed to write {}", output_path.display()))
}
