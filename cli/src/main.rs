//! Garrison CLI - provision a hardened host for AI agent workloads

use clap::Parser;
use clap::error::ErrorKind;

use garrison_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            // Unknown flags and malformed values exit 1, not clap's default 2.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
