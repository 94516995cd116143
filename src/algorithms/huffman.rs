use core::fmt::Display;

use crate::algorithms::artifact::Artifact;
use crate::algorithms::bits::{BitSink, BitSource};
use crate::algorithms::code_table::generate_codes;
use crate::algorithms::frequency::FrequencyModel;
use crate::algorithms::tree::{CodeTreeNode, build_tree};
use crate::compressor::{Compressor, CompressorExt, DecodeError, Result};
use crate::stats::CompressionReport;

if_tracing! {
    use tracing::{debug, info, warn};
}

/// Static Huffman codec over the byte alphabet.
///
/// Holds no state between calls: every [`encode`](HuffmanCodec::encode) builds its own frequency
/// model, tree and code table, and every [`decode`](HuffmanCodec::decode) rebuilds the tree from
/// the artifact. Calls on separate threads need no coordination.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Compresses `input` into a self-describing artifact. Cannot fail.
    pub fn encode(&self, input: &[u8]) -> Artifact {
        if_tracing! {
            debug!(target: "huffman", input_len = input.len(), "huffman encode start");
        }

        let model = FrequencyModel::compute(input);
        let Some(tree) = build_tree(&model) else {
            if_tracing! {
                debug!(target: "huffman", "huffman encode passthrough: input empty");
            }
            return Artifact::empty();
        };
        let table = generate_codes(&tree);

        let mut payload = Vec::with_capacity(input.len() / 2);
        let mut sink = BitSink::new(&mut payload);
        for &byte in input {
            // the table was built from this input's model, so every byte has a code
            let code = table.get(byte);
            debug_assert!(code.is_some(), "byte {:#04x} has no code", byte);
            if let Some(code) = code {
                sink.push_code(code.bits());
            }
        }
        let _payload_bits = sink.finish();

        if_tracing! {
            info!(
                target: "huffman",
                input_len = input.len(),
                distinct = model.len(),
                payload_bits = _payload_bits,
                max_code_len = table.max_code_len(),
                "huffman encode complete"
            );
        }

        Artifact {
            original_len: input.len() as u64,
            tree: tree.to_description(),
            payload,
        }
    }

    /// Reconstructs the bytes an artifact was encoded from.
    ///
    /// Stops after exactly `original_len` symbols, so padding bits are never read.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the tree description is malformed, if the payload runs out of
    /// bits early, or if a bit walks off a lone-leaf tree.
    pub fn decode(&self, artifact: &Artifact) -> Result<Vec<u8>, DecodeError> {
        let expected = artifact.original_len;
        if_tracing! {
            debug!(target: "huffman", original_len = expected, payload_len = artifact.payload.len(), "huffman decode start");
        }
        if expected == 0 {
            return Ok(Vec::new());
        }

        let result = CodeTreeNode::from_description(&artifact.tree)
            .and_then(|tree| walk_payload(&tree, &artifact.payload, expected));

        if_tracing! {
            match &result {
                Ok(out) => info!(target: "huffman", output_len = out.len(), "huffman decode complete"),
                Err(err) => warn!(target: "huffman", error = %err, "huffman decode rejected artifact"),
            }
        }

        result
    }
}

fn walk_payload(tree: &CodeTreeNode, payload: &[u8], expected: u64) -> Result<Vec<u8>, DecodeError> {
    // every symbol costs at least one bit, which bounds a forged length
    let capacity = expected.min(payload.len() as u64 * 8) as usize;
    let mut out = Vec::with_capacity(capacity);
    let mut source = BitSource::new(payload);

    let truncated = |decoded: usize| DecodeError::TruncatedPayload {
        decoded: decoded as u64,
        expected,
    };

    if let CodeTreeNode::Leaf { byte, .. } = tree {
        while (out.len() as u64) < expected {
            match source.next_bit() {
                Some(false) => out.push(*byte),
                Some(true) => {
                    return Err(DecodeError::InvalidCode {
                        bit: source.consumed() - 1,
                    });
                }
                None => return Err(truncated(out.len())),
            }
        }
        return Ok(out);
    }

    while (out.len() as u64) < expected {
        let mut node = tree;
        loop {
            match node {
                CodeTreeNode::Leaf { byte, .. } => {
                    out.push(*byte);
                    break;
                }
                CodeTreeNode::Internal { left, right, .. } => {
                    let bit = source.next_bit().ok_or_else(|| truncated(out.len()))?;
                    node = if bit { right } else { left };
                }
            }
        }
    }

    Ok(out)
}

impl Compressor for HuffmanCodec {
    fn compress_bytes(&mut self, data: &[u8]) -> Vec<u8> {
        self.encode(data).to_bytes()
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let artifact = Artifact::from_bytes(data)?;
        Ok(self.decode(&artifact)?)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Huffman Coding")
    }
}

impl CompressorExt for HuffmanCodec {
    fn aliases(&self) -> &'static [&'static str] {
        &["huffman", "huff", "huffman_coding"]
    }

    fn short_description(&self) -> &'static str {
        "static Huffman coding, one tree per payload"
    }

    fn dyn_clone(&self) -> Box<dyn CompressorExt> {
        Box::new(*self)
    }

    fn report(&self, input: &[u8], compressed: &[u8]) -> Option<CompressionReport> {
        let artifact = Artifact::from_bytes(compressed).ok()?;
        Some(CompressionReport::new(input, &artifact))
    }
}
