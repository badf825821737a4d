//! Scheduled enforcement until SIGINT/SIGTERM.

use std::sync::Arc;

use tracing::warn;

use crate::error::{Result, ShredError};
use crate::shredder::{RunOnceOptions, Shredder, ShredderConfig, format_duration};

/// Run the scheduled loop, stopping cleanly on SIGINT or SIGTERM.
pub fn watch(config: ShredderConfig, options: &RunOnceOptions, quiet: bool) -> Result<()> {
    let interval = config
        .interval()
        .ok_or_else(|| ShredError::ConfigError("interval is 0".to_string()))?;

    let shredder = Arc::new(Shredder::new(config));
    install_stop_on_signal(&shredder);

    if !quiet {
        eprintln!(
            "Shredding '{}' every {} ({}). Press Ctrl-C to stop.",
            shredder.config().glob_path(),
            format_duration(interval),
            shredder.config().limits().describe()
        );
    }

    shredder.run(options)?;

    if !quiet {
        eprintln!("Stopped.");
    }
    Ok(())
}

/// Forward termination signals to [`Shredder::stop`].
///
/// Registration failure is not fatal; the loop then only stops when the
/// process is killed.
#[cfg(unix)]
fn install_stop_on_signal(shredder: &Arc<Shredder>) {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;
    use tracing::debug;

    let mut signals = match Signals::new([SIGINT, SIGTERM]) {
        Ok(signals) => signals,
        Err(err) => {
            warn!(error = %err, "failed to register signal handlers");
            return;
        }
    };

    let shredder = Arc::clone(shredder);
    std::thread::spawn(move || {
        if let Some(signal) = signals.forever().next() {
            debug!(signal, "termination signal received");
            shredder.stop();
        }
    });
}

#[cfg(not(unix))]
fn install_stop_on_signal(_shredder: &Arc<Shredder>) {
    warn!("signal handling is unavailable on this platform");
}
