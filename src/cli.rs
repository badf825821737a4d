//! Command-line interface definitions for fileshredder.
//!
//! This module defines the CLI structure using clap, including all subcommands
//! and their arguments. The main entry point is the [`Cli`] struct.
//!
//! # Example
//!
//! ```no_run
//! use fileshredder::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_args();
//!
//! match cli.command() {
//!     Commands::Watch { interval, .. } => println!("Shredding every {interval}"),
//!     Commands::Once { policy } => println!("Shredding '{}' once", policy.glob()),
//! }
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use regex::Regex;

use crate::error::{Result, ShredError};
use crate::shredder::{RunOnceOptions, ShredderConfig, parse_duration, parse_size};

/// Main command-line interface for fileshredder.
#[derive(Debug, Parser)]
#[command(
    name = "fileshredder",
    author,
    version,
    about = "Prune glob-matched files by size, age, and count",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options that apply to all fileshredder commands.
#[derive(Debug, Parser)]
pub struct GlobalOpts {
    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, env = "FILESHREDDER_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        env = "FILESHREDDER_QUIET"
    )]
    quiet: bool,
}

impl GlobalOpts {
    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Retention policy shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyOpts {
    /// Glob pattern selecting the entries to manage (e.g. "/var/log/app/*.log")
    #[arg(long, env = "FILESHREDDER_GLOB")]
    glob: String,

    /// Remove entries older than this (e.g. "90s", "30m", "1h30m", "7d")
    #[arg(long, env = "FILESHREDDER_MAX_AGE")]
    max_age: Option<String>,

    /// Cumulative size budget, newest entries first (e.g. "10M", "5G", or bytes)
    #[arg(long, env = "FILESHREDDER_MAX_SIZE")]
    max_size: Option<String>,

    /// Maximum number of entries to keep
    #[arg(long, env = "FILESHREDDER_MAX_COUNT")]
    max_count: Option<usize>,

    /// Regular expression; matching paths are never deleted (repeatable)
    #[arg(long = "keep", value_name = "REGEX", env = "FILESHREDDER_KEEP")]
    keep: Vec<String>,
}

impl PolicyOpts {
    /// Create a new builder for constructing `PolicyOpts` programmatically.
    pub fn builder(glob: impl Into<String>) -> PolicyOptsBuilder {
        PolicyOptsBuilder {
            opts: PolicyOpts {
                glob: glob.into(),
                ..PolicyOpts::default()
            },
        }
    }

    /// Get the glob pattern
    pub fn glob(&self) -> &str {
        &self.glob
    }

    /// Build the shredder configuration, parsing size and age strings.
    pub fn to_config(&self, interval: Option<Duration>) -> Result<ShredderConfig> {
        let mut builder = ShredderConfig::builder().glob_path(&self.glob);
        if let Some(interval) = interval {
            builder = builder.interval(interval);
        }
        if let Some(age) = self.max_age.as_deref() {
            builder = builder.max_age(parse_duration(age)?);
        }
        if let Some(size) = self.max_size.as_deref() {
            builder = builder.max_size(parse_size(size)?);
        }
        if let Some(count) = self.max_count {
            builder = builder.max_count(count);
        }
        Ok(builder.build())
    }

    /// Build run options whose veto preserves paths matching any `--keep`
    /// expression.
    pub fn run_options(&self) -> Result<RunOnceOptions> {
        if self.keep.is_empty() {
            return Ok(RunOnceOptions::new());
        }

        let patterns = self
            .keep
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ShredError::InvalidKeepPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RunOnceOptions::new().preserve(move |entry| {
            let path = entry.path.to_string_lossy();
            patterns.iter().any(|re| re.is_match(&path))
        }))
    }
}

/// Builder for [`PolicyOpts`]
#[derive(Debug)]
pub struct PolicyOptsBuilder {
    opts: PolicyOpts,
}

impl PolicyOptsBuilder {
    /// Set the maximum age (e.g. "1h")
    pub fn max_age(mut self, age: impl Into<String>) -> Self {
        self.opts.max_age = Some(age.into());
        self
    }

    /// Set the size budget (e.g. "10M")
    pub fn max_size(mut self, size: impl Into<String>) -> Self {
        self.opts.max_size = Some(size.into());
        self
    }

    /// Set the maximum count
    pub fn max_count(mut self, count: usize) -> Self {
        self.opts.max_count = Some(count);
        self
    }

    /// Add a keep expression
    pub fn keep(mut self, pattern: impl Into<String>) -> Self {
        self.opts.keep.push(pattern.into());
        self
    }

    /// Build the `PolicyOpts`
    pub fn build(self) -> PolicyOpts {
        self.opts
    }
}

impl Cli {
    /// Get the global options
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// Get the command
    pub fn command(&self) -> &Commands {
        &self.command
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    verbose: u8,
    quiet: bool,
    command: Option<Commands>,
}

impl CliBuilder {
    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Set the command
    pub fn command(mut self, command: Commands) -> Self {
        self.command = Some(command);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let command = self
            .command
            .ok_or_else(|| ShredError::ConfigError("Command is required".to_string()))?;

        Ok(Cli {
            global_opts: GlobalOpts {
                verbose: self.verbose,
                quiet: self.quiet,
            },
            command,
        })
    }
}

/// Available fileshredder subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Enforce the policy on a fixed interval until interrupted
    ///
    /// Runs one cycle per tick. A failed cycle is logged and the next tick
    /// still fires. SIGINT or SIGTERM stops the loop cleanly.
    Watch {
        #[command(flatten)]
        policy: PolicyOpts,

        /// Time between cycles (e.g. "30s", "1m", "1h")
        #[arg(long, default_value = "1m", env = "FILESHREDDER_INTERVAL")]
        interval: String,
    },

    /// Enforce the policy exactly once and exit
    ///
    /// Any failure is reported and produces a non-zero exit status.
    Once {
        #[command(flatten)]
        policy: PolicyOpts,
    },
}

#[cfg(test)]
mod tests;
