use core::fmt;

use serde::Serialize;

use crate::algorithms::artifact::Artifact;
use crate::algorithms::code_table::{CodeTable, generate_codes};
use crate::algorithms::frequency::FrequencyModel;
use crate::algorithms::tree::CodeTreeNode;
use crate::compressor::DecodeError;

/// Sizes and efficiency of one compressed payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompressionReport {
    pub original_len: u64,
    pub artifact_len: usize,
    pub tree_len: usize,
    pub payload_len: usize,
    pub distinct_symbols: usize,
    pub max_code_len: usize,
    /// `artifact_len / original_len`; 0 for empty input.
    pub ratio: f64,
    /// Bits per symbol actually spent on codes. Needs the input.
    pub average_code_len: Option<f64>,
    /// Shannon entropy of the input in bits per symbol. Needs the input.
    pub entropy: Option<f64>,
}

impl CompressionReport {
    /// Full report for an input and the artifact it encoded to.
    pub fn new(input: &[u8], artifact: &Artifact) -> Self {
        let model = FrequencyModel::compute(input);
        let table = CodeTreeNode::from_description(artifact.tree())
            .ok()
            .map(|tree| generate_codes(&tree));
        let mut report = Self::from_table(artifact, table.as_ref());

        if let Some(table) = &table {
            let coded_bits: u64 = model
                .iter()
                .map(|(byte, count)| count * table.get(byte).map_or(0, |code| code.len() as u64))
                .sum();
            report.average_code_len = Some(coded_bits as f64 / model.total() as f64);
            report.entropy = Some(model.entropy());
        }
        report
    }

    /// What can be known from an artifact alone.
    pub fn from_artifact(artifact: &Artifact) -> Result<Self, DecodeError> {
        if artifact.original_len() == 0 {
            return Ok(Self::from_table(artifact, None));
        }
        let tree = CodeTreeNode::from_description(artifact.tree())?;
        Ok(Self::from_table(artifact, Some(&generate_codes(&tree))))
    }

    fn from_table(artifact: &Artifact, table: Option<&CodeTable>) -> Self {
        let (distinct_symbols, max_code_len) = table.map_or((0, 0), |table| (table.len(), table.max_code_len()));
        let original_len = artifact.original_len();
        let artifact_len = artifact.encoded_len();

        Self {
            original_len,
            artifact_len,
            tree_len: artifact.tree().len(),
            payload_len: artifact.payload().len(),
            distinct_symbols,
            max_code_len,
            ratio: if original_len == 0 {
                0.0
            } else {
                artifact_len as f64 / original_len as f64
            },
            average_code_len: None,
            entropy: None,
        }
    }

    /// Bytes saved; negative when the artifact is larger than the input.
    pub fn saved(&self) -> i64 {
        self.original_len as i64 - self.artifact_len as i64
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\toriginal: {} bytes", self.original_len)?;
        writeln!(
            f,
            "\tartifact: {} bytes (tree {}, payload {})",
            self.artifact_len, self.tree_len, self.payload_len
        )?;
        writeln!(f, "\tsymbols: {} distinct, longest code {} bits", self.distinct_symbols, self.max_code_len)?;
        if let (Some(avg), Some(entropy)) = (self.average_code_len, self.entropy) {
            writeln!(f, "\tcode length: {:.3} bits/symbol (entropy {:.3})", avg, entropy)?;
        }
        write!(f, "\tratio: {:.1}% (artifact/original), saved: {:+} bytes", self.ratio * 100.0, self.saved())
    }
}
