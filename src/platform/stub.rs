use crate::cli::Cli;
use anyhow::{Result, bail};

pub(super) fn run_impl(_cli: Cli) -> Result<()> {
    bail!("exas currently supports Unix-like targets only. Build and run inside a Linux container.");
}
