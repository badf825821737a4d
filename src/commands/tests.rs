use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::FileTime;
use tempfile::TempDir;

use crate::cli::{Cli, Commands, PolicyOpts};
use crate::commands::{execute, once, watch};
use crate::error::ShredError;
use crate::shredder::{RunOnceOptions, ShredderConfig};

fn write_aged(path: &Path, size: usize, age_secs: u64) {
    fs::write(path, vec![b'x'; size]).unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_secs);
    filetime::set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

fn pattern(dir: &TempDir, glob: &str) -> String {
    dir.path().join(glob).to_string_lossy().into_owned()
}

#[test]
fn test_execute_once_applies_count_limit() {
    let temp = TempDir::new().unwrap();
    for i in 1..=4 {
        write_aged(&temp.path().join(format!("{i}.log")), 1, i * 60);
    }

    let cli = Cli::builder()
        .quiet(true)
        .command(Commands::Once {
            policy: PolicyOpts::builder(pattern(&temp, "*.log"))
                .max_count(2)
                .build(),
        })
        .build()
        .unwrap();
    execute(&cli).unwrap();

    assert!(temp.path().join("1.log").exists());
    assert!(temp.path().join("2.log").exists());
    assert!(!temp.path().join("3.log").exists());
    assert!(!temp.path().join("4.log").exists());
}

#[test]
fn test_execute_once_honours_keep() {
    let temp = TempDir::new().unwrap();
    write_aged(&temp.path().join("new.log"), 1, 60);
    write_aged(&temp.path().join("pinned.log"), 1, 7200);
    write_aged(&temp.path().join("stale.log"), 1, 7200);

    let cli = Cli::builder()
        .quiet(true)
        .command(Commands::Once {
            policy: PolicyOpts::builder(pattern(&temp, "*.log"))
                .max_age("1h")
                .keep(r"pinned\.log$")
                .build(),
        })
        .build()
        .unwrap();
    execute(&cli).unwrap();

    assert!(temp.path().join("new.log").exists());
    assert!(temp.path().join("pinned.log").exists());
    assert!(!temp.path().join("stale.log").exists());
}

#[test]
fn test_execute_once_reports_invalid_pattern() {
    let cli = Cli::builder()
        .quiet(true)
        .command(Commands::Once {
            policy: PolicyOpts::builder("[unclosed").max_count(1).build(),
        })
        .build()
        .unwrap();

    assert!(matches!(
        execute(&cli),
        Err(ShredError::InvalidPattern { .. })
    ));
}

#[test]
fn test_execute_watch_rejects_zero_interval() {
    let cli = Cli::builder()
        .quiet(true)
        .command(Commands::Watch {
            policy: PolicyOpts::builder("*").max_count(1).build(),
            interval: "0s".to_string(),
        })
        .build()
        .unwrap();

    assert!(matches!(execute(&cli), Err(ShredError::ConfigError(_))));
}

#[test]
fn test_once_without_limits_is_noop() {
    let temp = TempDir::new().unwrap();
    write_aged(&temp.path().join("a.log"), 1, 10_000);

    let config = ShredderConfig::builder()
        .glob_path(pattern(&temp, "*.log"))
        .build();
    let stats = once(config, &RunOnceOptions::new(), true).unwrap();

    assert_eq!(stats.matched, 0);
    assert!(temp.path().join("a.log").exists());
}

#[test]
fn test_watch_requires_interval() {
    let config = ShredderConfig::builder().glob_path("*").max_count(1).build();
    assert!(matches!(
        watch(config, &RunOnceOptions::new(), true),
        Err(ShredError::ConfigError(_))
    ));
}
