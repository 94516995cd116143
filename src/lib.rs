//! A static Huffman codec for raw byte streams.
//!
//! The payload is opaque: audio sample buffers, encoded image bytes and
//! decoded video frames all go through the same path. One optimal prefix
//! code is built per payload, and the tree travels inside the compressed
//! [`Artifact`] so decoding needs no side channel.
//!
//! ```
//! use huffpack::HuffmanCodec;
//!
//! let codec = HuffmanCodec;
//! let artifact = codec.encode(b"abracadabra");
//! let bytes = artifact.to_bytes();
//!
//! let parsed = huffpack::Artifact::from_bytes(&bytes)?;
//! assert_eq!(codec.decode(&parsed)?, b"abracadabra");
//! # Ok::<(), huffpack::DecodeError>(())
//! ```

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

pub mod algorithms;
pub mod cli;
pub mod compressor;
pub mod stats;


pub use algorithms::artifact::Artifact;
pub use algorithms::code_table::{Code, CodeTable, generate_codes};
pub use algorithms::frames::FrameCodec;
pub use algorithms::frequency::FrequencyModel;
pub use algorithms::huffman::HuffmanCodec;
pub use algorithms::tree::{CodeTreeNode, build_tree};
pub use compressor::{Compressor, CompressorExt, DecodeError, EncodeError};
pub use stats::CompressionReport;
