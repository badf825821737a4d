use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use super::policy::RemovalReason;
use super::snapshot::Entry;
use crate::error::{Result, ShredError};

/// Outcome of executing a removal set
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Removal {
    pub removed: usize,
    pub preserved: usize,
}

/// Calculate the total size of all non-directory entries beneath `path`.
///
/// A missing root is sized as zero, as are entries that vanish while the
/// walk is in progress. Symlinks are not followed, the root included: a
/// link to a directory is sized as the link itself.
pub(crate) fn calculate_directory_size(path: &Path) -> Result<u64> {
    let mut total_size: u64 = 0;

    for entry in walkdir::WalkDir::new(path).follow_root_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_not_found(&err) => continue,
            Err(source) => {
                return Err(ShredError::DirSizeError {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total_size = total_size.saturating_add(metadata.len()),
            Err(err) if is_not_found(&err) => {}
            Err(source) => {
                return Err(ShredError::DirSizeError {
                    path: entry.path().to_path_buf(),
                    source,
                });
            }
        }
    }

    Ok(total_size)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

/// Remove every selected entry not vetoed by `preserve`.
///
/// Stops at the first failure; entries after it are left untouched.
pub(crate) fn remove_entries(
    selected: &[(Entry, RemovalReason)],
    preserve: &dyn Fn(&Entry) -> bool,
) -> Result<Removal> {
    let mut outcome = Removal::default();
    let mut seen = HashSet::new();

    for (entry, reason) in selected {
        if !seen.insert(entry.path.as_path()) {
            continue;
        }

        if preserve(entry) {
            debug!(path = ?entry.path, ?reason, "preserved by veto");
            outcome.preserved += 1;
            continue;
        }

        debug!(path = ?entry.path, ?reason, "removing");
        remove_path(&entry.path).map_err(|source| ShredError::DeleteError {
            path: entry.path.clone(),
            source,
        })?;
        outcome.removed += 1;
    }

    Ok(outcome)
}

/// Remove `path` and everything beneath it. A path that is already gone
/// counts as removed.
fn remove_path(path: &Path) -> std::io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use tempfile::TempDir;

    use super::*;

    fn entry(path: &Path) -> Entry {
        Entry {
            path: path.to_path_buf(),
            is_dir: path.is_dir(),
            modified: SystemTime::now(),
            size: 0,
        }
    }

    #[test]
    fn test_directory_size_sums_nested_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("one"), vec![0u8; 10]).unwrap();
        fs::write(root.join("a/two"), vec![0u8; 20]).unwrap();
        fs::write(root.join("a/b/three"), vec![0u8; 30]).unwrap();

        assert_eq!(calculate_directory_size(&root).unwrap(), 60);
    }

    #[test]
    fn test_directory_size_missing_is_zero() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            calculate_directory_size(&temp.path().join("missing")).unwrap(),
            0
        );
    }

    #[test]
    fn test_directory_size_walk_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let bogus = file.join("inner");

        let err = calculate_directory_size(&bogus).unwrap_err();
        assert!(
            matches!(&err, ShredError::DirSizeError { path, .. } if *path == bogus),
            "unexpected error: {err:?}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_size_unreadable_subdir_is_reported() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("cache");
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(root.join("data"), vec![0u8; 10]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users bypass directory permissions
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = calculate_directory_size(&root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(ShredError::DirSizeError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_size_measures_root_symlink_itself() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("big"), vec![0u8; 4096]).unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let size = calculate_directory_size(&link).unwrap();
        assert_eq!(size, fs::symlink_metadata(&link).unwrap().len());
        assert!(size < 4096);
    }

    #[test]
    fn test_remove_entries_handles_files_and_dirs() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("old.log");
        let dir = temp.path().join("old.d");
        fs::write(&file, b"x").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/data"), b"y").unwrap();

        let selected = vec![
            (entry(&file), RemovalReason::Count),
            (entry(&dir), RemovalReason::Count),
        ];
        let outcome = remove_entries(&selected, &|_: &Entry| false).unwrap();

        assert_eq!(outcome.removed, 2);
        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_entries_treats_missing_as_removed() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("gone.log");
        let selected = vec![
            (entry(&gone), RemovalReason::Age),
            (entry(&gone), RemovalReason::Age),
        ];

        let outcome = remove_entries(&selected, &|_: &Entry| false).unwrap();
        assert_eq!(outcome.removed, 1);
    }

    #[test]
    fn test_remove_entries_respects_veto() {
        let temp = TempDir::new().unwrap();
        let keep = temp.path().join("keep.log");
        let drop = temp.path().join("drop.log");
        fs::write(&keep, b"x").unwrap();
        fs::write(&drop, b"x").unwrap();

        let selected = vec![
            (entry(&keep), RemovalReason::Size),
            (entry(&drop), RemovalReason::Size),
        ];
        let outcome =
            remove_entries(&selected, &|e: &Entry| e.path.ends_with("keep.log")).unwrap();

        assert_eq!(outcome, Removal { removed: 1, preserved: 1 });
        assert!(keep.exists());
        assert!(!drop.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_remove_entries_stops_at_first_failure() {
        let temp = TempDir::new().unwrap();
        let undeletable = Path::new("/proc/version");
        let after = temp.path().join("after.log");
        fs::write(&after, b"x").unwrap();

        let selected = vec![
            (entry(undeletable), RemovalReason::Count),
            (entry(&after), RemovalReason::Count),
        ];
        let err = remove_entries(&selected, &|_: &Entry| false).unwrap_err();

        assert!(
            matches!(&err, ShredError::DeleteError { path, .. } if path == undeletable),
            "unexpected error: {err:?}"
        );
        assert!(after.exists());
    }
}
