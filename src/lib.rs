//! # fileshredder
//!
//! A retention enforcer that prunes glob-matched files and directories by
//! total size, age, and count, always keeping the most recently modified
//! entries.
//!
//! ## Overview
//!
//! Point fileshredder at a glob pattern (a log directory, a cache of
//! downloads, rotated archives) and give it any combination of limits:
//!
//! - **Size**: cumulative byte budget, newest entries first; directories are
//!   sized recursively
//! - **Age**: entries modified longer ago than the limit are removed
//! - **Count**: only the newest N entries survive
//!
//! An entry survives only if it satisfies every active limit. A caller-supplied
//! veto predicate can still rescue any selected entry.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Implementation of the `once` and `watch` subcommands
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`logging`]: tracing subscriber setup for the binary
//! - [`shredder`]: Snapshot, policy evaluation, deletion, and scheduling
//!
//! ## Library Usage
//!
//! ```no_run
//! use std::thread;
//! use std::time::Duration;
//!
//! use fileshredder::shredder::{RunOnceOptions, Shredder, ShredderConfig};
//!
//! let config = ShredderConfig::builder()
//!     .glob_path("/var/log/myapp/*.log")
//!     .interval(Duration::from_secs(60))
//!     .max_age(Duration::from_secs(60 * 60))
//!     .max_size(10 * 1024 * 1024)
//!     .max_count(100)
//!     .build();
//!
//! let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(0);
//! let worker = thread::spawn(move || {
//!     Shredder::new(config).run_until(&cancel_rx, &RunOnceOptions::new())
//! });
//!
//! // ... later, on shutdown:
//! drop(cancel_tx);
//! worker.join().expect("shredder thread panicked")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! The crate uses a combination of:
//! - `thiserror` for strongly-typed errors
//! - `miette` for rich diagnostic output in CLI
//!
//! Scheduled cycles log their failures and keep going; one-shot cycles
//! return them to the caller.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod shredder;
