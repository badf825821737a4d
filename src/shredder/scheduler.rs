use std::fmt;
use std::time::SystemTime;

use crossbeam_channel::{Receiver, Sender, never, select, tick};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::cleanup::{calculate_directory_size, remove_entries};
use super::config::ShredderConfig;
use super::policy::evaluate;
use super::size::format_duration;
use super::snapshot::{Entry, build_snapshot};
use crate::error::{Result, ShredError};

type PreserveFn = dyn Fn(&Entry) -> bool + Send + Sync;
type CycleFn = dyn Fn(&Result<ShredStats>) + Send + Sync;

/// Lifecycle of a [`Shredder`]'s scheduled loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Constructed, loop not started
    Idle,
    /// Scheduled loop is running
    Running,
    /// Stopped by cancellation or [`Shredder::stop`]; terminal
    Stopped,
}

/// Per-invocation options for a policy cycle.
#[derive(Default)]
pub struct RunOnceOptions {
    preserve: Option<Box<PreserveFn>>,
    on_cycle: Option<Box<CycleFn>>,
}

impl RunOnceOptions {
    /// Create options that preserve nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Veto predicate: entries for which `f` returns true survive even when
    /// a limit selects them.
    pub fn preserve<F>(mut self, f: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        self.preserve = Some(Box::new(f));
        self
    }

    /// Called with the outcome of every scheduled cycle, failed ones
    /// included. Manual runs return their outcome directly and skip it.
    pub fn on_cycle<F>(mut self, f: F) -> Self
    where
        F: Fn(&Result<ShredStats>) + Send + Sync + 'static,
    {
        self.on_cycle = Some(Box::new(f));
        self
    }

    fn is_preserved(&self, entry: &Entry) -> bool {
        self.preserve.as_ref().is_some_and(|f| f(entry))
    }
}

impl fmt::Debug for RunOnceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOnceOptions")
            .field("preserve", &self.preserve.is_some())
            .field("on_cycle", &self.on_cycle.is_some())
            .finish()
    }
}

/// Statistics about a single policy cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShredStats {
    /// Entries matched by the glob pattern
    pub matched: usize,
    /// Entries selected by the limits
    pub selected: usize,
    /// Entries actually removed
    pub removed: usize,
    /// Selected entries rescued by the veto predicate
    pub preserved: usize,
}

/// Retention enforcer for one glob pattern.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use fileshredder::shredder::{RunOnceOptions, Shredder, ShredderConfig};
///
/// let config = ShredderConfig::builder()
///     .glob_path("/var/log/myapp/*.log")
///     .interval(Duration::from_secs(60))
///     .max_age(Duration::from_secs(3600))
///     .max_size(10 * 1024 * 1024)
///     .max_count(100)
///     .build();
///
/// let shredder = Shredder::new(config);
/// let stats = shredder.run_once_with(
///     &RunOnceOptions::new().preserve(|entry| entry.path.ends_with("current.log")),
/// )?;
/// println!("removed {} entries", stats.removed);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Shredder {
    config: ShredderConfig,
    state: Mutex<SchedulerState>,
    stop_tx: Mutex<Option<Sender<()>>>,
    stop_rx: Receiver<()>,
}

impl Shredder {
    /// Create a shredder in the [`SchedulerState::Idle`] state
    pub fn new(config: ShredderConfig) -> Self {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(0);
        Self {
            config,
            state: Mutex::new(SchedulerState::Idle),
            stop_tx: Mutex::new(Some(stop_tx)),
            stop_rx,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ShredderConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        *self.state.lock()
    }

    /// Run the scheduled loop until [`Shredder::stop`] is called.
    pub fn run(&self, options: &RunOnceOptions) -> Result<()> {
        self.run_until(&never::<()>(), options)
    }

    /// Run the scheduled loop until `cancel` yields a value or disconnects,
    /// or until [`Shredder::stop`] is called.
    ///
    /// Each tick runs one cycle. A failed cycle is logged and the loop keeps
    /// going. Returns a [`ShredError::ConfigError`] if no interval is set.
    pub fn run_until<T>(&self, cancel: &Receiver<T>, options: &RunOnceOptions) -> Result<()> {
        let interval = self
            .config
            .interval()
            .ok_or_else(|| ShredError::ConfigError("interval is 0".to_string()))?;

        {
            let mut state = self.state.lock();
            if *state == SchedulerState::Stopped {
                return Ok(());
            }
            *state = SchedulerState::Running;
        }

        info!(
            "shredding '{}' every {} ({})",
            self.config.glob_path(),
            format_duration(interval),
            self.config.limits().describe()
        );

        let ticker = tick(interval);
        loop {
            select! {
                recv(cancel) -> _ => {
                    debug!("cancellation received");
                    break;
                }
                recv(self.stop_rx) -> _ => {
                    debug!("stop requested");
                    break;
                }
                recv(ticker) -> _ => {
                    let result = self.run_once_with(options);
                    if let Err(err) = &result {
                        warn!(error = %err, "shred cycle failed");
                    }
                    if let Some(on_cycle) = &options.on_cycle {
                        on_cycle(&result);
                    }
                }
            }
        }

        *self.state.lock() = SchedulerState::Stopped;
        Ok(())
    }

    /// Signal the scheduled loop to stop. Safe to call any number of times.
    pub fn stop(&self) {
        // Dropping the only sender disconnects the channel, which wakes the
        // loop and every later select on it.
        if self.stop_tx.lock().take().is_some() {
            let mut state = self.state.lock();
            if *state == SchedulerState::Idle {
                *state = SchedulerState::Stopped;
            }
        }
    }

    /// Run one cycle with default options.
    pub fn run_once(&self) -> Result<ShredStats> {
        self.run_once_with(&RunOnceOptions::default())
    }

    /// Run exactly one cycle synchronously and return its outcome.
    pub fn run_once_with(&self, options: &RunOnceOptions) -> Result<ShredStats> {
        let limits = self.config.limits();
        if limits.is_unbounded() {
            debug!("no limits configured; nothing to do");
            return Ok(ShredStats::default());
        }

        let snapshot = build_snapshot(self.config.glob_path())?;
        let matched = snapshot.len();

        let evaluation = evaluate(snapshot, limits, SystemTime::now(), |entry| {
            calculate_directory_size(&entry.path)
        })?;

        let removal = remove_entries(&evaluation.remove, &|entry: &Entry| {
            options.is_preserved(entry)
        })?;

        let stats = ShredStats {
            matched,
            selected: evaluation.remove.len(),
            removed: removal.removed,
            preserved: removal.preserved,
        };
        info!(
            matched = stats.matched,
            selected = stats.selected,
            removed = stats.removed,
            preserved = stats.preserved,
            "shred cycle complete"
        );
        Ok(stats)
    }
}

impl fmt::Debug for Shredder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shredder")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}
