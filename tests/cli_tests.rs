use clap::Parser;
use longpath_move::cli::Args;
use longpath_move::config::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn apply_overrides_sets_values() {
    let args = Args::parse_from([
        "longpath_move",
        "--source",
        "/deep/tree",
        "--target",
        "/flat",
        "--max-length",
        "200",
        "--dry-run",
        "--log-level",
        "info",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.source_base, Some(PathBuf::from("/deep/tree")));
    assert_eq!(cfg.target_base, Some(PathBuf::from("/flat")));
    assert_eq!(cfg.max_path_len, Some(200));
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["longpath_move"]);
    let mut cfg = Config {
        source_base: Some(PathBuf::from("/from/xml")),
        max_path_len: Some(99),
        ..Default::default()
    };
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.source_base, Some(PathBuf::from("/from/xml")));
    assert_eq!(cfg.max_path_len, Some(99));
    assert!(!cfg.dry_run);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["longpath_move", "--debug", "--log-level", "quiet"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["longpath_move", "--log-level", "info"]);
    let lvl = args.effective_log_level().unwrap();
    assert_eq!(lvl, LogLevel::Info);

    let args = Args::parse_from(["longpath_move"]);
    assert!(args.effective_log_level().is_none());
}

#[test]
fn short_flags_parse() {
    let args = Args::parse_from(["longpath_move", "-s", "/a", "-t", "/b", "-m", "64"]);
    assert_eq!(args.source, Some(PathBuf::from("/a")));
    assert_eq!(args.target, Some(PathBuf::from("/b")));
    assert_eq!(args.max_length, Some(64));
}
