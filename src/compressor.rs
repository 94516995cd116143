pub use anyhow::Result;
use thiserror::Error;

use crate::stats::CompressionReport;

/// Represents an error emitted while decoding an artifact or a frame sequence.
///
/// A well-formed artifact produced by this crate never triggers any of these; they exist for
/// corrupted or foreign input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than the fixed-width length field.
    #[error("artifact header needs 8 bytes, found {found}")]
    TruncatedHeader { found: usize },

    /// The tree description ended before every internal node had two children.
    #[error("tree description ended before the tree was complete")]
    TruncatedTree,

    /// The same byte value appears on two leaves.
    #[error("byte {0:#04x} appears on more than one leaf")]
    DuplicateSymbol(u8),

    /// Nesting deeper than any tree over a 256-symbol alphabet can reach.
    #[error("tree description nests deeper than 255 levels")]
    TreeTooDeep,

    /// The payload ran out of bits before `expected` symbols were produced.
    #[error("payload exhausted after {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u64, expected: u64 },

    /// A bit walked off a single-leaf tree.
    #[error("invalid code at payload bit {bit}")]
    InvalidCode { bit: u64 },

    /// A frame header or frame body was cut short.
    #[error("frame {index} is truncated")]
    TruncatedFrame { index: usize },

    /// Bytes left over after the declared number of frames.
    #[error("{count} trailing bytes after the last frame")]
    TrailingBytes { count: usize },
}

/// Represents an error emitted while building a frame sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The `u32` frame count field cannot hold this many frames.
    #[error("{count} frames exceed the frame sequence limit of {}", u32::MAX)]
    TooManyFrames { count: usize },
}

/// Represents shared behavior for all codecs that turn a byte blob into another byte blob.
///
/// Provides a method [`compress_bytes`](Compressor::compress_bytes) to compress data and
/// [`decompress_bytes`](Compressor::decompress_bytes) to decompress data.
///
/// # Note
///
/// No guarantees are made about the length of the resulting [`Vec<u8>`] from
/// [`compress_bytes`](Compressor::compress_bytes). Uniform data can grow by the size of the tree
/// description and the length header. The only guarantee is that
/// [`decompress_bytes`](Compressor::decompress_bytes) reconstructs the original data.
pub trait Compressor: 'static {
    /// Compresses a given byte slice and returns the encoded data.
    fn compress_bytes(&mut self, data: &[u8]) -> Vec<u8>;

    /// Decompresses a given byte slice and returns the decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error wrapping a [`DecodeError`] if the input data was malformed.
    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>>;

    /// Human readable name, used in reports.
    fn compressor_name(&self) -> String {
        core::any::type_name::<Self>().to_string()
    }

    /// Performs a round-trip test on the compressor.
    fn test_roundtrip<'orig>(&mut self, data: &'orig [u8]) -> Result<RoundTripTestResult<'orig>> {
        let compressed = <Self as Compressor>::compress_bytes(self, data);
        let decompressed = <Self as Compressor>::decompress_bytes(self, &compressed)?;
        let equal = data == decompressed.as_slice();

        Ok(RoundTripTestResult {
            equal,
            original: data,
            compressed,
            decompressed,
        })
    }

    /// Converts the compressor into a boxed trait object.
    fn into_boxed(self) -> Box<dyn Compressor>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

pub trait CompressorExt: Compressor {
    /// Returns the canonical aliases of the codec, most common first.
    ///
    /// Must be all-lowercased, and can only use characters from `a-z0-9_`.
    fn aliases(&self) -> &'static [&'static str];

    /// One line shown by `list-codecs`.
    fn short_description(&self) -> &'static str;

    /// Clone the given codec into an owned trait object.
    fn dyn_clone(&self) -> Box<dyn CompressorExt>;

    /// Code statistics for `compressed`, the output of this codec on `input`. `None` for codecs
    /// whose output is not a single artifact.
    fn report(&self, _input: &[u8], _compressed: &[u8]) -> Option<CompressionReport> {
        None
    }
}

/// Represents the result of a round-trip test.
#[derive(Clone, Debug, Hash)]
pub struct RoundTripTestResult<'orig> {
    pub(crate) equal: bool,
    pub(crate) original: &'orig [u8],
    pub(crate) compressed: Vec<u8>,
    pub(crate) decompressed: Vec<u8>,
}

impl<'orig> RoundTripTestResult<'orig> {
    /// Whether the original and decompressed data were equal.
    pub const fn is_successful(&self) -> bool {
        self.equal
    }

    pub const fn get_original(&self) -> &'orig [u8] {
        self.original
    }

    pub fn get_compressed(&self) -> &[u8] {
        self.compressed.as_slice()
    }

    pub fn get_decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_messages() {
        assert_eq!(
            DecodeError::TruncatedPayload { decoded: 3, expected: 10 }.to_string(),
            "payload exhausted after 3 of 10 symbols"
        );
        assert_eq!(DecodeError::DuplicateSymbol(0x41).to_string(), "byte 0x41 appears on more than one leaf");
    }

    #[test]
    fn decode_error_survives_anyhow() {
        let err: anyhow::Error = DecodeError::TruncatedTree.into();
        assert_eq!(err.downcast_ref::<DecodeError>(), Some(&DecodeError::TruncatedTree));
    }
}
