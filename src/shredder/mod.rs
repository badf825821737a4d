//! Retention enforcement for glob-matched files and directories.
//!
//! Every cycle follows the same pipeline:
//!
//! - **Snapshot**: expand the glob and stat every match, newest first
//! - **Evaluate**: apply the size, age, and count limits in that order, each
//!   limit narrowing the entries seen by the next
//! - **Delete**: remove the selected entries unless a veto predicate
//!   preserves them, stopping at the first failure
//!
//! Cycles run either on a timer ([`Shredder::run`]) or on demand
//! ([`Shredder::run_once`]).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use fileshredder::shredder::{Shredder, ShredderConfig};
//!
//! let config = ShredderConfig::builder()
//!     .glob_path("/tmp/cache/*")
//!     .max_size(5 * 1024 * 1024 * 1024) // 5GB
//!     .max_age(Duration::from_secs(7 * 24 * 60 * 60))
//!     .build();
//!
//! let stats = Shredder::new(config).run_once()?;
//! println!("Removed {} of {} entries", stats.removed, stats.matched);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cleanup;
pub mod config;
pub mod policy;
mod scheduler;
mod size;
pub mod snapshot;

pub use config::{Limits, ShredderConfig, ShredderConfigBuilder};
pub use policy::{Evaluation, RemovalReason, evaluate};
pub use scheduler::{RunOnceOptions, SchedulerState, ShredStats, Shredder};
pub(crate) use size::{format_duration, parse_duration, parse_size};
pub use snapshot::{Entry, build_snapshot};
