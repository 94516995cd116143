use std::process::ExitCode;

use clap::Parser;
use huffpack::cli::{self, Cli, Command};

huffpack::if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

fn main() -> ExitCode {
    huffpack::if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Inspect(args) => cli::inspect::inspect(args),
        Command::ListCodecs { detailed } => {
            cli::list::list_codecs(detailed);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
