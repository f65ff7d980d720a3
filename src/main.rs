mod commands;
mod config;
mod error;
mod ghorg;
mod github;
mod projection;
mod utils;

use clap::error::ErrorKind;
use clap::Parser;
use commands::Opts;
use std::process::exit;

#[tokio::main]
async fn main() {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            // Help and usage text go to stderr; stdout is only for command output
            if let ErrorKind::DisplayHelp | ErrorKind::DisplayVersion = e.kind() {
                eprint!("{}", e);
                exit(0);
            }
            let e = error::Error::UnknownFlag(e.to_string());
            eprint!("{}", e);
            exit(e.exit_code());
        }
    };
    exit(ghorg::cli(opts).await);
}
