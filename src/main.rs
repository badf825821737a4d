//! # fileshredder CLI
//!
//! Prunes glob-matched files and directories by size, age, and count.
//!
//! ## Commands
//!
//! - **once**: Enforce the policy a single time and exit
//! - **watch**: Enforce the policy on an interval until SIGINT/SIGTERM
//!
//! ## Quick Start
//!
//! ```bash
//! # Keep at most 100 logs, none older than a week, within 1 GiB
//! fileshredder once --glob '/var/log/app/*.log' --max-count 100 --max-age 7d --max-size 1G
//!
//! # Same policy, every minute, never touching the live log
//! fileshredder watch --glob '/var/log/app/*.log' --max-age 7d --interval 1m --keep 'current\.log$'
//! ```
//!
//! ## Environment Variables
//!
//! - `FILESHREDDER_GLOB`: Glob pattern of managed entries
//! - `FILESHREDDER_MAX_AGE` / `FILESHREDDER_MAX_SIZE` / `FILESHREDDER_MAX_COUNT`: Limits
//! - `FILESHREDDER_INTERVAL`: Interval for `watch`
//! - `FILESHREDDER_VERBOSE`: Enable verbose output
//! - `FILESHREDDER_QUIET`: Silence all output except errors

use std::io::IsTerminal;

use fileshredder::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Plain output for logs and service managers
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();
    fileshredder::logging::init(cli.global_opts().verbose(), cli.global_opts().quiet());

    fileshredder::commands::execute(&cli).map_err(Into::into)
}
