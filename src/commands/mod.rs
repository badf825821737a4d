//! Implementation of fileshredder subcommands.
//!
//! `mod.rs` serves as a thin dispatcher; command logic lives in dedicated
//! modules (`once`, `watch`).

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::shredder::parse_duration;

pub(crate) mod once;
pub(crate) mod watch;

pub use once::once;
pub use watch::watch;

#[cfg(test)]
mod tests;

/// Execute commands based on the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    let quiet = cli.global_opts().quiet();

    match cli.command() {
        Commands::Once { policy } => {
            let config = policy.to_config(None)?;
            let options = policy.run_options()?;
            once(config, &options, quiet).map(|_| ())
        }
        Commands::Watch { policy, interval } => {
            let interval = parse_duration(interval)?;
            let config = policy.to_config(Some(interval))?;
            let options = policy.run_options()?;
            watch(config, &options, quiet)
        }
    }
}
