//! Error types for fileshredder.
//!
//! This module defines all error types used throughout fileshredder, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`ShredError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Filesystem variants carry the offending path and the underlying
//!   `io::Error` as their source
//! - Errors are automatically converted to `miette::Result` for CLI output
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use fileshredder::error::{Result, ShredError};
//!
//! fn require_interval(interval: Option<Duration>) -> Result<Duration> {
//!     interval
//!         .filter(|d| !d.is_zero())
//!         .ok_or_else(|| ShredError::ConfigError("interval is 0".to_string()))
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in fileshredder operations
#[derive(Error, Debug, Diagnostic)]
pub enum ShredError {
    /// The shredder configuration cannot support the requested operation.
    ///
    /// Raised when the scheduled loop is started without a positive
    /// interval. Manual one-shot runs never need an interval.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(fileshredder::config::error),
        help("Set a non-zero interval (e.g. '--interval 1m') to run on a schedule.")
    )]
    ConfigError(
        /// Description of the configuration error
        String,
    ),

    /// The glob pattern could not be parsed.
    #[error("Invalid glob pattern '{pattern}'")]
    #[diagnostic(
        code(fileshredder::glob::invalid_pattern),
        help("Check for unbalanced '[' or '**' used outside a whole path component.")
    )]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
        /// The underlying parse error
        #[source]
        source: glob::PatternError,
    },

    /// A matched entry could not be stat'd.
    ///
    /// A single unreadable entry aborts the whole cycle before any deletion
    /// takes place.
    #[error("Failed to read metadata for '{path}'")]
    #[diagnostic(code(fileshredder::snapshot::stat_error))]
    StatError {
        /// The matched path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Walking a directory to compute its total size failed.
    ///
    /// A directory that does not exist is sized as zero and never produces
    /// this error.
    #[error("Failed to compute size of directory '{path}'")]
    #[diagnostic(
        code(fileshredder::policy::dir_size_error),
        help("Ensure the directory tree is readable by the current user.")
    )]
    DirSizeError {
        /// The directory (or the entry beneath it) that failed
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// Removing a selected entry failed.
    ///
    /// Deletion is fail-fast: entries after this one were not attempted.
    #[error("Failed to delete '{path}'")]
    #[diagnostic(
        code(fileshredder::delete::error),
        help("Ensure you have write permissions for the entry and its parent directory.")
    )]
    DeleteError {
        /// The path that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid size specification for --max-size.
    ///
    /// Valid suffixes are B (bytes), K (kilobytes), M (megabytes),
    /// G (gigabytes), or T (terabytes). Numbers without suffix are bytes.
    #[error("Invalid size: '{0}' - {1}")]
    #[diagnostic(
        code(fileshredder::config::invalid_size),
        help("Specify size as a number with optional suffix (e.g., '5G', '500M', '1024K', or raw bytes)")
    )]
    InvalidSize(
        /// The invalid size value provided
        String,
        /// Description of the parsing error
        String,
    ),

    /// Invalid duration specification for --max-age or --interval.
    #[error("Invalid duration: '{0}' - {1}")]
    #[diagnostic(
        code(fileshredder::config::invalid_duration),
        help("Specify a duration such as '90s', '30m', '1h30m', '7d', or raw seconds")
    )]
    InvalidDuration(
        /// The invalid duration value provided
        String,
        /// Description of the parsing error
        String,
    ),

    /// A --keep expression is not a valid regular expression.
    #[error("Invalid keep pattern '{pattern}'")]
    #[diagnostic(code(fileshredder::config::invalid_keep_pattern))]
    InvalidKeepPattern {
        /// The expression as supplied
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ShredError>;
