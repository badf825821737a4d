use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, ShredError};

/// One matched filesystem path, captured at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The matched path
    pub path: PathBuf,
    /// Whether the path is a directory
    pub is_dir: bool,
    /// Modification time
    pub modified: SystemTime,
    /// Size in bytes (0 for directories; they are sized on demand)
    pub size: u64,
}

impl Entry {
    /// Get the entry path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Age relative to `now`; entries modified in the future have zero age.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.modified).unwrap_or_default()
    }
}

/// Expand `pattern` and return the matches sorted newest first.
///
/// Entries with equal modification times are ordered by path so that
/// boundary decisions are stable from one cycle to the next.
pub fn build_snapshot(pattern: &str) -> Result<Vec<Entry>> {
    let paths = expand_glob(pattern)?;

    let mut entries = paths
        .par_iter()
        .map(|path| stat_entry(path))
        .collect::<Result<Vec<_>>>()?;

    sort_newest_first(&mut entries);
    Ok(entries)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = glob::glob(pattern).map_err(|source| ShredError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    // Unreadable directories encountered while matching are skipped, the same
    // way a shell would expand the pattern.
    Ok(matches
        .filter_map(|m| match m {
            Ok(path) => Some(path),
            Err(err) => {
                debug!(path = %err.path().display(), error = %err.error(), "skipping unreadable glob match");
                None
            }
        })
        .collect())
}

fn stat_entry(path: &Path) -> Result<Entry> {
    let stat_error = |source| ShredError::StatError {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(stat_error)?;
    let modified = metadata.modified().map_err(stat_error)?;
    let is_dir = metadata.is_dir();

    Ok(Entry {
        path: path.to_path_buf(),
        is_dir,
        modified,
        size: if is_dir { 0 } else { metadata.len() },
    })
}

pub(crate) fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.path.cmp(&b.path))
    });
}
