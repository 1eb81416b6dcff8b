use crate::cli::Cli;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing::warn;
use tracing_subscriber::{filter::EnvFilter, fmt};

#[cfg(not(unix))]
mod stub;
#[cfg(unix)]
mod unix;

static LOGGER: OnceCell<()> = OnceCell::new();

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbosity);
    run_impl(cli)
}

pub(crate) fn init_logging(v: u8) {
    let lvl = match v {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    LOGGER.get_or_init(move || {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(lvl));
        if let Err(e) = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init()
        {
            warn!(
                error = %e,
                "logging initialization failed; continuing with existing dispatcher"
            );
        }
    });
}

#[cfg(unix)]
fn run_impl(cli: Cli) -> Result<()> {
    unix::run_impl(cli)
}

#[cfg(not(unix))]
fn run_impl(cli: Cli) -> Result<()> {
    stub::run_impl(cli)
}
