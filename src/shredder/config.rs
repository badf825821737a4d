use std::time::Duration;

use super::size::{format_duration, format_size};

/// Retention limits applied on every cycle.
///
/// A zero value disables the corresponding limit. When all three are
/// disabled the shredder never touches the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limits {
    /// Cumulative size budget in bytes, directories sized recursively
    pub max_size: u64,
    /// Maximum age measured from the entry's modification time
    pub max_age: Duration,
    /// Maximum number of surviving entries
    pub max_count: usize,
}

impl Limits {
    /// The size budget, if enabled
    pub fn size_limit(&self) -> Option<u64> {
        (self.max_size > 0).then_some(self.max_size)
    }

    /// The age limit, if enabled
    pub fn age_limit(&self) -> Option<Duration> {
        (!self.max_age.is_zero()).then_some(self.max_age)
    }

    /// The count limit, if enabled
    pub fn count_limit(&self) -> Option<usize> {
        (self.max_count > 0).then_some(self.max_count)
    }

    /// True when no limit is active
    pub fn is_unbounded(&self) -> bool {
        self.size_limit().is_none() && self.age_limit().is_none() && self.count_limit().is_none()
    }

    /// One-line summary of the active limits for log output.
    pub(crate) fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(size) = self.size_limit() {
            parts.push(format!("max size {}", format_size(size)));
        }
        if let Some(age) = self.age_limit() {
            parts.push(format!("max age {}", format_duration(age)));
        }
        if let Some(count) = self.count_limit() {
            parts.push(format!("max count {count}"));
        }
        if parts.is_empty() {
            "no limits".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Immutable shredder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShredderConfig {
    /// Glob expression matched to discover candidate entries
    glob_path: String,
    /// Timer period for the scheduled loop
    interval: Option<Duration>,
    /// Retention limits
    limits: Limits,
}

impl ShredderConfig {
    /// Creates a new builder for [`ShredderConfig`]
    pub fn builder() -> ShredderConfigBuilder {
        ShredderConfigBuilder::default()
    }

    /// Get the glob pattern
    pub fn glob_path(&self) -> &str {
        &self.glob_path
    }

    /// Get the scheduling interval
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Get the retention limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

/// Builder for [`ShredderConfig`]
#[derive(Debug, Default)]
pub struct ShredderConfigBuilder {
    glob_path: Option<String>,
    interval: Option<Duration>,
    limits: Limits,
}

impl ShredderConfigBuilder {
    /// Set the glob pattern
    pub fn glob_path(mut self, pattern: impl Into<String>) -> Self {
        self.glob_path = Some(pattern.into());
        self
    }

    /// Set the scheduling interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the maximum age (zero disables)
    pub fn max_age(mut self, age: Duration) -> Self {
        self.limits.max_age = age;
        self
    }

    /// Set the cumulative size budget in bytes (zero disables)
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.limits.max_size = bytes;
        self
    }

    /// Set the maximum number of surviving entries (zero disables)
    pub fn max_count(mut self, count: usize) -> Self {
        self.limits.max_count = count;
        self
    }

    /// Build the [`ShredderConfig`]
    pub fn build(self) -> ShredderConfig {
        ShredderConfig {
            glob_path: self.glob_path.unwrap_or_default(),
            interval: self.interval.filter(|d| !d.is_zero()),
            limits: self.limits,
        }
    }
}
