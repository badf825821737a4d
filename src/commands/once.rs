//! One-shot enforcement.

use crate::error::Result;
use crate::shredder::{RunOnceOptions, ShredStats, Shredder, ShredderConfig};

/// Run a single cycle and report what it did.
///
/// Errors are returned to the caller unchanged.
pub fn once(config: ShredderConfig, options: &RunOnceOptions, quiet: bool) -> Result<ShredStats> {
    let shredder = Shredder::new(config);

    if shredder.config().limits().is_unbounded() && !quiet {
        eprintln!("No limits configured; nothing to do.");
    }

    let stats = shredder.run_once_with(options)?;

    if !quiet {
        eprintln!(
            "Removed {} of {} matched entries ({} selected, {} preserved)",
            stats.removed, stats.matched, stats.selected, stats.preserved
        );
    }

    Ok(stats)
}
