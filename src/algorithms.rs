//! The codec pieces, bottom-up: frequency counting, tree construction, code generation, the
//! artifact wire format, the codec itself, and the multi-frame container built on top of it.

pub mod artifact;
mod bits;
pub mod code_table;
pub mod frames;
pub mod frequency;
pub mod huffman;
pub mod tree;

use crate::compressor::CompressorExt;

/// Codecs available to the command line. `frame_size` configures the framed codec.
pub fn all(frame_size: usize) -> Vec<Box<dyn CompressorExt>> {
    vec![Box::new(huffman::HuffmanCodec), Box::new(frames::FrameCodec::new(frame_size))]
}

/// Finds the codec with the given alias.
pub fn find(name: &str, frame_size: usize) -> Option<Box<dyn CompressorExt>> {
    all(frame_size).into_iter().find(|codec| codec.aliases().contains(&name))
}
