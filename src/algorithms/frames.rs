//! Sequences of independently coded frames.
//!
//! Each frame becomes its own [`Artifact`] with its own tree, so a frame can be decoded without
//! the others. Layout: `u32` LE frame count, then per frame a `u64` LE artifact length followed by
//! the artifact bytes. The count field caps a sequence at `u32::MAX` frames.

use core::fmt::Display;

use rayon::prelude::*;

use crate::algorithms::artifact::Artifact;
use crate::algorithms::huffman::HuffmanCodec;
use crate::compressor::{Compressor, CompressorExt, DecodeError, EncodeError, Result};

if_tracing! {
    use tracing::{Level, info, span};
}

pub const DEFAULT_FRAME_SIZE: usize = 64 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct FrameCodec {
    /// Used by [`Compressor::compress_bytes`] to split a flat buffer. Decoding does not need it.
    pub frame_size: usize,
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

impl FrameCodec {
    pub const fn new(frame_size: usize) -> Self {
        Self { frame_size }
    }

    /// Chops `data` into `frame_size` chunks, the last one possibly shorter.
    ///
    /// # Panics
    ///
    /// Panics if `frame_size` is 0.
    pub fn split(data: &[u8], frame_size: usize) -> Vec<&[u8]> {
        data.chunks(frame_size).collect()
    }

    /// Encodes every frame independently, in parallel. Output order follows input order.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::TooManyFrames`] for more than `u32::MAX` frames. Nothing is encoded
    /// in that case.
    pub fn encode_frames<F>(&self, frames: &[F]) -> Result<Vec<u8>, EncodeError>
    where
        F: AsRef<[u8]> + Sync,
    {
        let count = frame_count(frames.len())?;

        if_tracing! {
            let span = span!(Level::INFO, "encode_frames", frames = frames.len());
            let _enter = span.enter();
        }

        let artifacts: Vec<Artifact> = frames.par_iter().map(|frame| HuffmanCodec.encode(frame.as_ref())).collect();

        let body: usize = artifacts.iter().map(|a| 8 + a.encoded_len()).sum();
        let mut out = Vec::with_capacity(4 + body);
        out.extend_from_slice(&count.to_le_bytes());
        for artifact in &artifacts {
            out.extend_from_slice(&(artifact.encoded_len() as u64).to_le_bytes());
            artifact.write_to(&mut out);
        }

        if_tracing! {
            info!(target: "frames", frames = artifacts.len(), output_len = out.len(), "frame encode complete");
        }
        Ok(out)
    }

    /// Splits a frame sequence into its artifacts without decoding them.
    pub fn parse_frames(data: &[u8]) -> Result<Vec<Artifact>, DecodeError> {
        let Some((count, mut rest)) = data.split_first_chunk::<4>() else {
            return Err(DecodeError::TruncatedFrame { index: 0 });
        };
        let count = u32::from_le_bytes(*count) as usize;

        // a frame takes at least its 8-byte length field plus an 8-byte artifact header
        let mut artifacts = Vec::with_capacity(count.min(rest.len() / 16));
        for index in 0..count {
            let Some((len, tail)) = rest.split_first_chunk::<8>() else {
                return Err(DecodeError::TruncatedFrame { index });
            };
            let len = u64::from_le_bytes(*len);
            if len > tail.len() as u64 {
                return Err(DecodeError::TruncatedFrame { index });
            }
            let (frame, tail) = tail.split_at(len as usize);
            artifacts.push(Artifact::from_bytes(frame)?);
            rest = tail;
        }

        if !rest.is_empty() {
            return Err(DecodeError::TrailingBytes { count: rest.len() });
        }
        Ok(artifacts)
    }

    /// Decodes every frame, in parallel. The first failing frame's error is returned.
    pub fn decode_frames(&self, data: &[u8]) -> Result<Vec<Vec<u8>>, DecodeError> {
        if_tracing! {
            let span = span!(Level::INFO, "decode_frames", input_len = data.len());
            let _enter = span.enter();
        }

        let artifacts = Self::parse_frames(data)?;
        artifacts.par_iter().map(|artifact| HuffmanCodec.decode(artifact)).collect()
    }
}

fn frame_count(frames: usize) -> Result<u32, EncodeError> {
    u32::try_from(frames).map_err(|_| EncodeError::TooManyFrames { count: frames })
}

impl Compressor for FrameCodec {
    /// Frames grow past `frame_size` when `data` would otherwise need more than `u32::MAX` of them.
    fn compress_bytes(&mut self, data: &[u8]) -> Vec<u8> {
        let mut frame_size = self.frame_size.max(1);
        loop {
            match self.encode_frames(&Self::split(data, frame_size)) {
                Ok(out) => return out,
                Err(EncodeError::TooManyFrames { .. }) => frame_size = frame_size.saturating_mul(2),
            }
        }
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.decode_frames(data)?.concat())
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for FrameCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Framed Huffman Coding ({} byte frames)", self.frame_size)
    }
}

impl CompressorExt for FrameCodec {
    fn aliases(&self) -> &'static [&'static str] {
        &["frames", "framed", "framed_huffman"]
    }

    fn short_description(&self) -> &'static str {
        "fixed-size frames, each Huffman coded with its own tree"
    }

    fn dyn_clone(&self) -> Box<dyn CompressorExt> {
        Box::new(*self)
    }
}
