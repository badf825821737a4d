#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::FileTime;

/// Create a file of `size` bytes whose mtime is `age_secs` in the past.
pub fn create_file_with_age(path: &Path, size: usize, age_secs: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent directory");
    }
    fs::write(path, vec![b'x'; size]).expect("failed to write test file");
    set_age(path, age_secs);
}

/// Create a directory holding one file of `size` bytes, aged `age_secs`.
pub fn create_dir_with_age(path: &Path, size: usize, age_secs: u64) {
    create_file_with_age(&path.join("nested").join("payload.bin"), size, age_secs);
    set_age(&path.join("nested"), age_secs);
    set_age(path, age_secs);
}

/// Set the mtime of `path` to `age_secs` in the past.
pub fn set_age(path: &Path, age_secs: u64) {
    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    filetime::set_file_mtime(path, FileTime::from_system_time(mtime))
        .expect("failed to set mtime");
}

/// Glob pattern rooted in `dir`.
pub fn pattern_in(dir: &Path, glob: &str) -> String {
    dir.join(glob).to_string_lossy().into_owned()
}
