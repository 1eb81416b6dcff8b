//! exas - exec as another uid/gid, without forking
//!
//! Build (static):  cargo build --release --target x86_64-unknown-linux-musl

#![deny(unsafe_op_in_unsafe_fn)]

mod cli;
mod platform;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Usage guidance belongs on stdout; only runtime failures go to stderr.
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            print!("{}", err.render());
            std::process::exit(err.exit_code());
        }
    };

    platform::run(cli)
}
