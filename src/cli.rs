//! command line front end of huffpack.
//!
//! `$exename` stands for the executable name. `<description>` denotes a required argument, while
//! `[description]` denotes an optional argument.
//!
//! > `$exename enc <input> <output> [--codec <name>] [--frame-size <bytes>]`
//!
//! compresses one file into one artifact. the default codec is `huffman`, which builds a single
//! tree for the whole file. `frames` splits the file into fixed-size frames and codes each one
//! with its own tree, which suits inputs whose statistics drift (decoded video frames, long audio).
//!
//! > `$exename dec <input> <output> [--codec <name>]`
//!
//! the artifact carries its own tree, but not the codec that made it, so a file made with
//! `--codec frames` must be decoded with `--codec frames`.
//!
//! > `$exename test <input> [--codec <name>] [--frame-size <bytes>]`
//!
//! compresses, decompresses and compares, then prints the sizes.
//!
//! > `$exename inspect <artifact> [--json]`
//!
//! parses a single-tree artifact and prints its header and code statistics without decoding it.
//!
//! > `$exename list-codecs`
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};

use crate::algorithms::{self, frames::DEFAULT_FRAME_SIZE};
use crate::compressor::CompressorExt;

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod list;

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode (compress) a file
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print the header and code statistics of an artifact
    Inspect(InspectArgs),

    /// List available codecs
    ListCodecs {
        /// Show a description of each codec
        #[arg(long)]
        detailed: bool,
    },
}

/// Codec selection shared by every subcommand that runs a codec.
#[derive(Args, Debug, Clone)]
pub struct CodecSelection {
    /// Codec name or alias (see `list-codecs`)
    #[arg(long, default_value = "huffman")]
    pub codec: String,

    /// Frame size in bytes for the `frames` codec
    #[arg(long, default_value_t = DEFAULT_FRAME_SIZE, value_parser = parse_frame_size)]
    pub frame_size: usize,
}

impl CodecSelection {
    pub fn build(&self) -> Result<Box<dyn CompressorExt>> {
        algorithms::find(&self.codec, self.frame_size)
            .ok_or_else(|| anyhow!("unknown codec {:?}, run `list-codecs` for the available ones", self.codec))
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    #[command(flatten)]
    pub selection: CodecSelection,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    #[command(flatten)]
    pub selection: CodecSelection,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    pub input: PathBuf,
    #[command(flatten)]
    pub selection: CodecSelection,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_frame_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("frame size must be at least 1 byte".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn encode_defaults_to_huffman() {
        let cli = Cli::try_parse_from(["huffpack", "enc", "in.wav", "out.huff"]).unwrap();
        let Command::Encode(args) = cli.command else {
            panic!("expected encode");
        };
        assert_eq!(args.selection.codec, "huffman");
        assert_eq!(args.selection.frame_size, DEFAULT_FRAME_SIZE);
    }

    #[test]
    fn selection_builds_the_named_codec() {
        let cli = Cli::try_parse_from(["huffpack", "test", "in", "--codec", "framed", "--frame-size", "512"]).unwrap();
        let Command::Test(args) = cli.command else {
            panic!("expected test");
        };
        let codec = args.selection.build().unwrap();
        assert_eq!(codec.compressor_name(), "Framed Huffman Coding (512 byte frames)");
    }

    #[test]
    fn unknown_codec_is_an_error() {
        let selection = CodecSelection {
            codec: "lzw".to_string(),
            frame_size: DEFAULT_FRAME_SIZE,
        };
        let Err(err) = selection.build() else {
            panic!("lzw is not a registered codec");
        };
        assert!(err.to_string().contains("\"lzw\""));
    }

    #[test]
    fn encode_then_decode_files() {
        let dir = std::env::temp_dir().join(format!("huffpack-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (raw, packed, unpacked) = (dir.join("raw.bin"), dir.join("raw.huff"), dir.join("raw.out"));
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 7 * 31) as u8).collect();
        std::fs::write(&raw, &data).unwrap();

        for codec in ["huffman", "frames"] {
            let args = |command: &str, from: &std::path::Path, to: &std::path::Path| {
                let argv: Vec<std::ffi::OsString> = vec![
                    "huffpack".into(),
                    command.into(),
                    from.into(),
                    to.into(),
                    "--codec".into(),
                    codec.into(),
                    "--frame-size".into(),
                    "1000".into(),
                ];
                Cli::try_parse_from(argv).unwrap().command
            };
            let Command::Encode(enc) = args("enc", &raw, &packed) else {
                panic!("expected encode");
            };
            encode::encode(enc).unwrap();
            let Command::Decode(dec) = args("dec", &packed, &unpacked) else {
                panic!("expected decode");
            };
            decode::decode(dec).unwrap();
            assert_eq!(std::fs::read(&unpacked).unwrap(), data, "{} roundtrip", codec);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn decode_reports_a_corrupt_artifact() {
        let dir = std::env::temp_dir().join(format!("huffpack-corrupt-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let (packed, unpacked) = (dir.join("bad.huff"), dir.join("bad.out"));
        std::fs::write(&packed, [5, 0, 0]).unwrap();

        let args = DecodeArgs {
            input: packed,
            output: unpacked.clone(),
            selection: CodecSelection {
                codec: "huffman".to_string(),
                frame_size: DEFAULT_FRAME_SIZE,
            },
        };
        let err = decode::decode(args).unwrap_err();
        assert!(err.downcast_ref::<crate::compressor::DecodeError>().is_some());
        assert!(!unpacked.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn zero_frame_size_is_rejected() {
        assert!(Cli::try_parse_from(["huffpack", "test", "in", "--codec", "frames", "--frame-size", "0"]).is_err());
    }
}
