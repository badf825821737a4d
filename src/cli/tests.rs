use std::time::Duration;

use clap::Parser;

use crate::cli::{Cli, Commands, PolicyOpts};
use crate::error::ShredError;

#[test]
fn test_cli_parsing_once() {
    let cli = Cli::parse_from(["fileshredder", "once", "--glob", "/tmp/logs/*.log"]);
    let Commands::Once { policy } = cli.command() else {
        panic!("expected once command");
    };
    assert_eq!(policy.glob(), "/tmp/logs/*.log");
    assert_eq!(cli.global_opts().verbose(), 0);
    assert!(!cli.global_opts().quiet());

    let config = policy.to_config(None).unwrap();
    assert!(config.limits().is_unbounded());
    assert_eq!(config.interval(), None);
}

#[test]
fn test_cli_parsing_watch_with_limits() {
    let cli = Cli::parse_from([
        "fileshredder",
        "watch",
        "--glob",
        "cache/*",
        "--interval",
        "30s",
        "--max-age",
        "1h",
        "--max-size",
        "10M",
        "--max-count",
        "100",
    ]);
    let Commands::Watch { policy, interval } = cli.command() else {
        panic!("expected watch command");
    };
    assert_eq!(interval, "30s");

    let config = policy
        .to_config(Some(Duration::from_secs(30)))
        .unwrap();
    assert_eq!(config.glob_path(), "cache/*");
    assert_eq!(config.interval(), Some(Duration::from_secs(30)));
    assert_eq!(config.limits().max_age, Duration::from_secs(3600));
    assert_eq!(config.limits().max_size, 10 * 1024 * 1024);
    assert_eq!(config.limits().max_count, 100);
}

#[test]
fn test_watch_interval_default() {
    let cli = Cli::parse_from(["fileshredder", "watch", "--glob", "*"]);
    let Commands::Watch { interval, .. } = cli.command() else {
        panic!("expected watch command");
    };
    assert_eq!(interval, "1m");
}

#[test]
fn test_missing_glob_is_rejected() {
    assert!(Cli::try_parse_from(["fileshredder", "once"]).is_err());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let cli = Cli::parse_from(["fileshredder", "-vv", "once", "--glob", "*"]);
    assert_eq!(cli.global_opts().verbose(), 2);

    assert!(Cli::try_parse_from(["fileshredder", "-v", "-q", "once", "--glob", "*"]).is_err());
}

#[test]
fn test_global_flag_positioning() {
    let cli = Cli::parse_from(["fileshredder", "once", "--glob", "*", "--quiet"]);
    assert!(cli.global_opts().quiet());
}

#[test]
fn test_invalid_limit_strings() {
    let bad_age = PolicyOpts::builder("*").max_age("soon").build();
    assert!(matches!(
        bad_age.to_config(None),
        Err(ShredError::InvalidDuration(..))
    ));

    let bad_size = PolicyOpts::builder("*").max_size("lots").build();
    assert!(matches!(
        bad_size.to_config(None),
        Err(ShredError::InvalidSize(..))
    ));
}

#[test]
fn test_keep_patterns() {
    let cli = Cli::parse_from([
        "fileshredder",
        "once",
        "--glob",
        "*",
        "--keep",
        r"current\.log$",
        "--keep",
        "^pinned/",
    ]);
    let Commands::Once { policy } = cli.command() else {
        panic!("expected once command");
    };
    assert!(policy.run_options().is_ok());

    let invalid = PolicyOpts::builder("*").keep("([unclosed").build();
    assert!(matches!(
        invalid.run_options(),
        Err(ShredError::InvalidKeepPattern { .. })
    ));
}

#[test]
fn test_cli_builder() {
    let cli = Cli::builder()
        .verbose(2)
        .command(Commands::Once {
            policy: PolicyOpts::builder("logs/*").max_count(3).build(),
        })
        .build()
        .expect("Failed to build CLI");

    assert_eq!(cli.global_opts().verbose(), 2);
    assert!(matches!(cli.command(), Commands::Once { .. }));

    assert!(matches!(
        Cli::builder().build(),
        Err(ShredError::ConfigError(_))
    ));
}
