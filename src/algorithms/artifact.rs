use crate::algorithms::bits::BitSource;
use crate::algorithms::tree::CodeTreeNode;
use crate::compressor::DecodeError;

/// Width of the little-endian original-length field that opens every artifact.
pub const HEADER_LEN: usize = 8;

/// Self-contained output of one encode call.
///
/// Wire layout: `u64` LE original length, then the pre-order tree description padded to a byte,
/// then the MSB-first payload padded to a byte. Both the tree and the payload are absent when the
/// original length is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub(crate) original_len: u64,
    pub(crate) tree: Vec<u8>,
    pub(crate) payload: Vec<u8>,
}

impl Artifact {
    /// The artifact of the empty input.
    pub const fn empty() -> Self {
        Self {
            original_len: 0,
            tree: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Assembles an artifact from parts stored separately. Nothing is validated until decode.
    pub const fn from_parts(original_len: u64, tree: Vec<u8>, payload: Vec<u8>) -> Self {
        Self {
            original_len,
            tree,
            payload,
        }
    }

    pub const fn original_len(&self) -> u64 {
        self.original_len
    }

    /// The serialized tree description.
    pub fn tree(&self) -> &[u8] {
        &self.tree
    }

    /// The packed codes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Total size on the wire.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.tree.len() + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut bytes);
        bytes
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.original_len.to_le_bytes());
        out.extend_from_slice(&self.tree);
        out.extend_from_slice(&self.payload);
    }

    /// Splits wire bytes back into header, tree description and payload.
    ///
    /// The tree description has no length field; it is parsed here to find where it ends, so a
    /// truncated or inconsistent tree is rejected immediately. The payload is not checked until
    /// decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let Some((header, rest)) = bytes.split_first_chunk::<HEADER_LEN>() else {
            return Err(DecodeError::TruncatedHeader { found: bytes.len() });
        };
        let original_len = u64::from_le_bytes(*header);

        if original_len == 0 {
            return Ok(Self::empty());
        }

        let mut source = BitSource::new(rest);
        CodeTreeNode::read_description(&mut source)?;
        let tree_len = source.consumed().div_ceil(8) as usize;
        let (tree, payload) = rest.split_at(tree_len);

        Ok(Self {
            original_len,
            tree: tree.to_vec(),
            payload: payload.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::huffman::HuffmanCodec;

    #[test]
    fn empty_artifact_is_just_the_header() {
        let artifact = HuffmanCodec.encode(&[]);
        assert_eq!(artifact, Artifact::empty());
        assert_eq!(artifact.to_bytes(), vec![0u8; HEADER_LEN]);
        assert_eq!(Artifact::from_bytes(&[0u8; HEADER_LEN]).unwrap(), Artifact::empty());
    }

    #[test]
    fn single_symbol_wire_bytes() {
        let artifact = HuffmanCodec.encode(&[0x41; 3]);
        let mut expected = 3u64.to_le_bytes().to_vec();
        expected.extend_from_slice(&[0b1010_0000, 0b1000_0000]);
        expected.push(0b0000_0000);
        assert_eq!(artifact.to_bytes(), expected);
    }

    #[test]
    fn multi_symbol_wire_bytes() {
        // tree (c, (a, b)) in pre-order: 0, 1 'c', 0, 1 'a', 1 'b' = 29 bits
        // payload a b c c = 10 11 0 0
        let artifact = HuffmanCodec.encode(b"abcc");
        let mut expected = 4u64.to_le_bytes().to_vec();
        expected.extend_from_slice(&[0b0101_1000, 0b1101_0110, 0b0001_1011, 0b0001_0000]);
        expected.push(0b1011_0000);
        assert_eq!(artifact.to_bytes(), expected);
        assert_eq!(HuffmanCodec.decode(&Artifact::from_bytes(&expected).unwrap()).unwrap(), b"abcc");
    }

    #[test]
    fn parsing_finds_the_tree_boundary() {
        let artifact = HuffmanCodec.encode(b"she sells sea shells by the sea shore");
        let parsed = Artifact::from_bytes(&artifact.to_bytes()).unwrap();
        assert_eq!(parsed, artifact);
        assert_eq!(parsed.encoded_len(), artifact.to_bytes().len());
    }

    #[test]
    fn short_header_is_rejected() {
        assert_eq!(Artifact::from_bytes(&[1, 0, 0]), Err(DecodeError::TruncatedHeader { found: 3 }));
        assert_eq!(Artifact::from_bytes(&[]), Err(DecodeError::TruncatedHeader { found: 0 }));
    }

    #[test]
    fn missing_tree_is_rejected() {
        let bytes = 5u64.to_le_bytes();
        assert_eq!(Artifact::from_bytes(&bytes), Err(DecodeError::TruncatedTree));
    }

    #[test]
    fn truncated_tree_is_rejected() {
        let bytes = HuffmanCodec.encode(b"abracadabra").to_bytes();
        assert_eq!(Artifact::from_bytes(&bytes[..HEADER_LEN + 3]), Err(DecodeError::TruncatedTree));
    }
}
